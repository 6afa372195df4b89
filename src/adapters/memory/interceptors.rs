//! In-memory interceptor repository

use std::collections::BTreeMap;

use crate::core::models::MethodKey;
use crate::core::ports::{InterceptorChain, InterceptorRepository};

/// Interceptor repository backed by an ordered map
#[derive(Debug, Clone, Default)]
pub struct InMemoryInterceptorRepository {
    chains: BTreeMap<MethodKey, InterceptorChain>,
}

impl InMemoryInterceptorRepository {
    /// Create an empty repository
    #[must_use]
    pub const fn new() -> Self {
        Self {
            chains: BTreeMap::new(),
        }
    }

    /// Number of methods with a committed chain
    #[must_use]
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Whether nothing has been committed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

impl InterceptorRepository for InMemoryInterceptorRepository {
    fn get(&self, key: &MethodKey) -> Option<&InterceptorChain> {
        self.chains.get(key)
    }

    fn commit(&mut self, chain: InterceptorChain) -> bool {
        if self.contains(chain.key()) {
            return false;
        }
        self.chains.insert(chain.key().clone(), chain);
        true
    }

    fn chains(&self) -> Vec<InterceptorChain> {
        self.chains.values().cloned().collect()
    }
}
