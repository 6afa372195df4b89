//! Interceptor port
//!
//! The call-time contract between the dispatch layer and advice
//! implementations. An interceptor receives the call context and a
//! [`Proceed`] continuation for the rest of the chain. It may:
//!
//! - short-circuit by returning without calling [`Proceed::proceed`]
//! - rewrite [`CallContext::arguments`] before proceeding
//! - inspect or replace the result or error after proceeding
//!
//! `Proceed` is consumed when called, so each interceptor continues the
//! chain at most once.

use std::any::Any;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::core::models::{AdviceId, MethodKey};

/// Errors raised while running an intercepted call
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvocationError {
    /// An interceptor refused the call
    #[error("call to {method} denied: {reason}")]
    Denied {
        /// The intercepted method
        method: String,
        /// Why it was refused
        reason: String,
    },

    /// The real method or an interceptor failed
    #[error("call to {method} failed: {reason}")]
    Failed {
        /// The intercepted method
        method: String,
        /// Failure description
        reason: String,
    },
}

/// Everything an interceptor knows about the call in flight
pub struct CallContext<'a> {
    target: &'a dyn Any,
    method: MethodKey,
    /// Call arguments; interceptors may rewrite them before proceeding
    pub arguments: Vec<Value>,
}

impl<'a> CallContext<'a> {
    /// Create a context for a call on `target`
    pub fn new(target: &'a dyn Any, method: MethodKey, arguments: Vec<Value>) -> Self {
        Self {
            target,
            method,
            arguments,
        }
    }

    /// The receiving instance
    #[must_use]
    pub fn target(&self) -> &'a dyn Any {
        self.target
    }

    /// The receiving instance, downcast to a concrete type
    #[must_use]
    pub fn target_as<T: Any>(&self) -> Option<&'a T> {
        self.target.downcast_ref::<T>()
    }

    /// The method being called
    #[must_use]
    pub const fn method(&self) -> &MethodKey {
        &self.method
    }
}

impl std::fmt::Debug for CallContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallContext")
            .field("method", &self.method)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

/// The underlying method an interceptor chain wraps
pub type RealMethod<'r> = dyn Fn(&mut CallContext<'_>) -> Result<Value, InvocationError> + 'r;

/// Behavior run around an intercepted method
pub trait Interceptor: std::fmt::Debug + Send + Sync {
    /// Handle the call, continuing the chain through `next` if desired
    fn invoke(&self, ctx: &mut CallContext<'_>, next: Proceed<'_>) -> Result<Value, InvocationError>;
}

/// Shared handle to an interceptor instance
pub type SharedInterceptor = Arc<dyn Interceptor>;

/// An interceptor instance together with the advice it was built for
#[derive(Debug, Clone)]
pub struct BoundInterceptor {
    /// The advice identifier
    pub advice: AdviceId,
    /// The resolved instance
    pub interceptor: SharedInterceptor,
}

impl BoundInterceptor {
    /// Bind an interceptor instance to its advice identifier
    #[must_use]
    pub const fn new(advice: AdviceId, interceptor: SharedInterceptor) -> Self {
        Self { advice, interceptor }
    }

    /// Whether both bindings share the same instance
    #[must_use]
    pub fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.interceptor, &other.interceptor)
    }
}

/// Continuation invoking the rest of the chain, or the real method
pub struct Proceed<'c> {
    remaining: &'c [BoundInterceptor],
    real: &'c RealMethod<'c>,
}

impl<'c> Proceed<'c> {
    /// Continuation over `chain`, ending in `real`
    #[must_use]
    pub fn new(chain: &'c [BoundInterceptor], real: &'c RealMethod<'c>) -> Self {
        Self {
            remaining: chain,
            real,
        }
    }

    /// Number of interceptors still to run before the real method
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Run the next chain element
    pub fn proceed(self, ctx: &mut CallContext<'_>) -> Result<Value, InvocationError> {
        match self.remaining.split_first() {
            Some((head, rest)) => {
                let next = Proceed {
                    remaining: rest,
                    real: self.real,
                };
                head.interceptor.invoke(ctx, next)
            },
            None => (self.real)(ctx),
        }
    }
}

impl std::fmt::Debug for Proceed<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Proceed").field("remaining", &self.remaining.len()).finish_non_exhaustive()
    }
}
