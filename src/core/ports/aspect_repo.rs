//! Aspect repository port
//!
//! Defines the interface for storing registered aspects.

use std::sync::Arc;

use super::super::models::AspectDescriptor;

/// Process-wide store of registered aspects
///
/// Registration appends without de-duplication: a type described both by
/// type-level and method-level declarations, or registered twice, contributes
/// one aspect per registration and every copy is returned by [`aspects`].
///
/// [`aspects`]: AspectRepository::aspects
pub trait AspectRepository: Send + Sync {
    /// Append an aspect
    fn register(&mut self, aspect: AspectDescriptor);

    /// Snapshot of all aspects, in registration order
    fn aspects(&self) -> Vec<Arc<AspectDescriptor>>;

    /// Number of registered aspects
    fn len(&self) -> usize {
        self.aspects().len()
    }

    /// Whether no aspect has been registered
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
