//! Advice registry and built-in interceptors
//!
//! Advice identifiers are resolved through factory functions registered
//! up front, so no type lookup happens at registration time.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use aspectweave::advice::{AdviceRegistry, DenyInterceptor};
//! use aspectweave::core::models::AdviceId;
//! use aspectweave::core::ports::AdviceFactory;
//!
//! let registry = AdviceRegistry::builder()
//!     .register("readonly", || Ok(Arc::new(DenyInterceptor::new("read-only mode"))))
//!     .build();
//!
//! assert!(registry.create(&AdviceId::new("readonly")).is_ok());
//! assert!(registry.create(&AdviceId::new("missing")).is_err());
//! ```

mod builtin;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::models::AdviceId;
use crate::core::ports::{AdviceError, AdviceFactory, Interceptor, SharedInterceptor};

pub use builtin::{DenyInterceptor, LoggingInterceptor, RecordingInterceptor};

type FactoryFn = dyn Fn() -> Result<SharedInterceptor, String> + Send + Sync;

/// Advice factory backed by registered constructor functions
///
/// Every call to [`AdviceFactory::create`] runs the registered function
/// again, yielding a fresh instance.
#[derive(Clone, Default)]
pub struct AdviceRegistry {
    factories: BTreeMap<AdviceId, Arc<FactoryFn>>,
}

impl AdviceRegistry {
    /// Start building a registry
    #[must_use]
    pub fn builder() -> AdviceRegistryBuilder {
        AdviceRegistryBuilder::default()
    }

    /// Whether an identifier has a registered factory
    #[must_use]
    pub fn contains(&self, advice: &AdviceId) -> bool {
        self.factories.contains_key(advice)
    }

    /// Registered identifiers, sorted
    #[must_use]
    pub fn ids(&self) -> Vec<&AdviceId> {
        self.factories.keys().collect()
    }

    /// Number of registered factories
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl AdviceFactory for AdviceRegistry {
    fn create(&self, advice: &AdviceId) -> Result<SharedInterceptor, AdviceError> {
        let factory = self
            .factories
            .get(advice)
            .ok_or_else(|| AdviceError::Unknown(advice.clone()))?;
        factory().map_err(|reason| AdviceError::Construction {
            advice: advice.clone(),
            reason,
        })
    }
}

impl std::fmt::Debug for AdviceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdviceRegistry").field("ids", &self.ids()).finish()
    }
}

/// Builder for [`AdviceRegistry`]
#[derive(Default)]
pub struct AdviceRegistryBuilder {
    factories: BTreeMap<AdviceId, Arc<FactoryFn>>,
}

impl AdviceRegistryBuilder {
    /// Register a constructor for an advice identifier
    ///
    /// A later registration under the same identifier replaces the earlier one.
    #[must_use]
    pub fn register<F, T>(mut self, advice: impl Into<AdviceId>, factory: F) -> Self
    where
        F: Fn() -> Result<Arc<T>, String> + Send + Sync + 'static,
        T: Interceptor + 'static,
    {
        let erased = move || factory().map(|instance| -> SharedInterceptor { instance });
        self.factories.insert(advice.into(), Arc::new(erased));
        self
    }

    /// Register a constructor that already yields a shared interceptor
    #[must_use]
    pub fn register_shared<F>(mut self, advice: impl Into<AdviceId>, factory: F) -> Self
    where
        F: Fn() -> Result<SharedInterceptor, String> + Send + Sync + 'static,
    {
        self.factories.insert(advice.into(), Arc::new(factory));
        self
    }

    /// Finish building
    #[must_use]
    pub fn build(self) -> AdviceRegistry {
        AdviceRegistry {
            factories: self.factories,
        }
    }
}

impl std::fmt::Debug for AdviceRegistryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdviceRegistryBuilder")
            .field("ids", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
