//! Component metadata
//!
//! What a component container hands to its listeners when a component is
//! registered: the implementation type, the contracts it is exposed under,
//! and an open property bag listeners may annotate.

use std::collections::HashMap;
use std::sync::Arc;

use super::{MethodIdentity, TypeDescriptor};
use crate::core::ports::BoundInterceptor;

/// Property key: whether instances must be proxied
pub const PROXY_KEY: &str = "proxy";

/// Property key: distinct interceptor instances in the type's committed chains
pub const INTERCEPTORS_KEY: &str = "interceptors";

/// Property key: distinct intercepted method identities
pub const METHODS_KEY: &str = "methods";

/// A value in the extended property bag
#[derive(Debug, Clone)]
pub enum PropertyValue {
    /// A flag
    Bool(bool),
    /// Resolved interceptor instances
    Interceptors(Vec<BoundInterceptor>),
    /// Method identities
    Methods(Vec<MethodIdentity>),
}

/// Open-ended annotations attached to component metadata
pub type ExtendedProperties = HashMap<String, PropertyValue>;

/// Metadata for one registered component
#[derive(Debug, Clone)]
pub struct ComponentMetadata {
    implementation: Arc<TypeDescriptor>,
    contracts: Vec<Arc<TypeDescriptor>>,
    /// Listener annotations
    pub extended_properties: ExtendedProperties,
}

impl ComponentMetadata {
    /// Metadata for an implementation type exposed under no contracts
    #[must_use]
    pub fn new(implementation: Arc<TypeDescriptor>) -> Self {
        Self {
            implementation,
            contracts: Vec::new(),
            extended_properties: ExtendedProperties::new(),
        }
    }

    /// Expose the component under a contract
    #[must_use]
    pub fn with_contract(mut self, contract: Arc<TypeDescriptor>) -> Self {
        self.contracts.push(contract);
        self
    }

    /// The implementation type
    #[must_use]
    pub const fn implementation(&self) -> &Arc<TypeDescriptor> {
        &self.implementation
    }

    /// Contracts the component is exposed under
    #[must_use]
    pub fn contracts(&self) -> &[Arc<TypeDescriptor>] {
        &self.contracts
    }

    /// Whether a proxy must wrap instances of this component
    ///
    /// `false` until an interception listener has marked the metadata.
    #[must_use]
    pub fn proxy_required(&self) -> bool {
        matches!(self.extended_properties.get(PROXY_KEY), Some(PropertyValue::Bool(true)))
    }

    /// Interceptor instances recorded for this component
    #[must_use]
    pub fn interceptors(&self) -> &[BoundInterceptor] {
        match self.extended_properties.get(INTERCEPTORS_KEY) {
            Some(PropertyValue::Interceptors(list)) => list,
            _ => &[],
        }
    }

    /// Intercepted method identities recorded for this component
    #[must_use]
    pub fn intercepted_methods(&self) -> &[MethodIdentity] {
        match self.extended_properties.get(METHODS_KEY) {
            Some(PropertyValue::Methods(list)) => list,
            _ => &[],
        }
    }
}
