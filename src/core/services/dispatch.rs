//! Call dispatch - runs interceptor chains around real method calls
//!
//! After bootstrap the registrar is frozen into a [`FrozenInterceptors`]
//! table. The table is immutable, `Send + Sync` and cheap to clone, so any
//! number of threads may look up chains through a [`Dispatcher`].
//!
//! # Examples
//!
//! ```
//! use aspectweave::core::models::{MethodIdentity, MethodKey};
//! use aspectweave::core::ports::CallContext;
//! use aspectweave::core::services::{Dispatcher, FrozenInterceptors};
//! use serde_json::json;
//!
//! let dispatcher = Dispatcher::new(FrozenInterceptors::default());
//! let key = MethodKey::new("App.Foo", MethodIdentity { name: "Add".into(), parameter_types: vec![] });
//! let mut ctx = CallContext::new(&(), key, vec![json!(1), json!(2)]);
//!
//! // No chain registered: the real method runs directly.
//! let result = dispatcher
//!     .call(&mut ctx, &|ctx| Ok(json!(ctx.arguments.len())))
//!     .unwrap();
//! assert_eq!(result, json!(2));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::core::models::MethodKey;
use crate::core::ports::{CallContext, InterceptorChain, InvocationError, Proceed, RealMethod};

/// Read-only chain table for the call-time phase
#[derive(Debug, Clone, Default)]
pub struct FrozenInterceptors {
    chains: Arc<HashMap<MethodKey, InterceptorChain>>,
}

impl FrozenInterceptors {
    /// Freeze a set of committed chains
    #[must_use]
    pub fn new(chains: impl IntoIterator<Item = InterceptorChain>) -> Self {
        let chains = chains.into_iter().map(|c| (c.key().clone(), c)).collect();
        Self {
            chains: Arc::new(chains),
        }
    }

    /// The chain for a method, if one was committed
    #[must_use]
    pub fn get(&self, key: &MethodKey) -> Option<&InterceptorChain> {
        self.chains.get(key)
    }

    /// Number of intercepted methods
    #[must_use]
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Whether no method is intercepted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

/// Run `chain` around `real`
///
/// The first link is outermost. With an empty chain `real` runs directly.
pub fn invoke_chain(
    chain: &InterceptorChain,
    ctx: &mut CallContext<'_>,
    real: &RealMethod<'_>,
) -> Result<Value, InvocationError> {
    Proceed::new(chain.links(), real).proceed(ctx)
}

/// Looks up chains by method and runs them
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    table: FrozenInterceptors,
}

impl Dispatcher {
    /// Dispatch through a frozen table
    #[must_use]
    pub const fn new(table: FrozenInterceptors) -> Self {
        Self { table }
    }

    /// The underlying table
    #[must_use]
    pub const fn table(&self) -> &FrozenInterceptors {
        &self.table
    }

    /// Whether calls to a method go through a chain
    #[must_use]
    pub fn is_intercepted(&self, key: &MethodKey) -> bool {
        self.table.get(key).is_some_and(|c| !c.is_empty())
    }

    /// Call the method named by `ctx`, through its chain if it has one
    pub fn call(
        &self,
        ctx: &mut CallContext<'_>,
        real: &RealMethod<'_>,
    ) -> Result<Value, InvocationError> {
        match self.table.get(ctx.method()) {
            Some(chain) => invoke_chain(chain, ctx, real),
            None => real(ctx),
        }
    }
}
