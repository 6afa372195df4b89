//! In-memory aspect repository

use std::sync::Arc;

use crate::core::models::AspectDescriptor;
use crate::core::ports::AspectRepository;

/// Aspect repository backed by a vector, in registration order
#[derive(Debug, Clone, Default)]
pub struct InMemoryAspectRepository {
    aspects: Vec<Arc<AspectDescriptor>>,
}

impl InMemoryAspectRepository {
    /// Create an empty repository
    #[must_use]
    pub const fn new() -> Self {
        Self {
            aspects: Vec::new(),
        }
    }
}

impl AspectRepository for InMemoryAspectRepository {
    fn register(&mut self, aspect: AspectDescriptor) {
        self.aspects.push(Arc::new(aspect));
    }

    fn aspects(&self) -> Vec<Arc<AspectDescriptor>> {
        self.aspects.clone()
    }

    fn len(&self) -> usize {
        self.aspects.len()
    }
}
