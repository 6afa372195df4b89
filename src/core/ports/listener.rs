//! Component listener port
//!
//! The hook a component container calls for every registered component.

use super::super::models::{ComponentMetadata, RegistrationError, RegistrationReport};

/// Observer of component metadata registration
pub trait ComponentListener {
    /// Inspect and annotate freshly registered metadata
    fn on_metadata_registered(
        &mut self,
        metadata: &mut ComponentMetadata,
    ) -> Result<RegistrationReport, RegistrationError>;
}
