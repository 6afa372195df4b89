//! Interceptor repository port
//!
//! Defines the interface for storing per-method interceptor chains.

use super::super::models::{AdviceId, MethodKey};
use super::BoundInterceptor;

/// Ordered interceptors around one method of one implementation type
///
/// Immutable once built.
#[derive(Debug, Clone)]
pub struct InterceptorChain {
    key: MethodKey,
    links: Vec<BoundInterceptor>,
}

impl InterceptorChain {
    /// Build a chain for a method
    #[must_use]
    pub const fn new(key: MethodKey, links: Vec<BoundInterceptor>) -> Self {
        Self { key, links }
    }

    /// The method this chain wraps
    #[must_use]
    pub const fn key(&self) -> &MethodKey {
        &self.key
    }

    /// Interceptors, outermost first
    #[must_use]
    pub fn links(&self) -> &[BoundInterceptor] {
        &self.links
    }

    /// Advice identifiers, outermost first
    #[must_use]
    pub fn advice_ids(&self) -> Vec<&AdviceId> {
        self.links.iter().map(|l| &l.advice).collect()
    }

    /// Number of interceptors
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the chain has no interceptors
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Store of committed interceptor chains, keyed by method
///
/// A method key is committed at most once; later commits for a key that
/// already holds a non-empty chain are ignored.
pub trait InterceptorRepository: Send + Sync {
    /// The chain committed for a method, if any
    fn get(&self, key: &MethodKey) -> Option<&InterceptorChain>;

    /// Commit a chain; returns `false` (and changes nothing) if the key
    /// already holds a non-empty chain
    fn commit(&mut self, chain: InterceptorChain) -> bool;

    /// All committed chains, ordered by key
    fn chains(&self) -> Vec<InterceptorChain>;

    /// Whether a non-empty chain is committed for a method
    fn contains(&self, key: &MethodKey) -> bool {
        self.get(key).is_some_and(|chain| !chain.is_empty())
    }
}
