//! Advice factory port
//!
//! Turns advice identifiers into interceptor instances.

use thiserror::Error;

use super::super::models::AdviceId;
use super::SharedInterceptor;

/// Why an advice identifier could not be resolved
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdviceError {
    /// No factory is registered under the identifier
    #[error("no interceptor factory registered for '{0}'")]
    Unknown(AdviceId),

    /// The factory ran but failed
    #[error("factory for '{advice}' failed: {reason}")]
    Construction {
        /// The advice being built
        advice: AdviceId,
        /// Failure description
        reason: String,
    },
}

/// Source of interceptor instances
pub trait AdviceFactory: Send + Sync {
    /// Build a fresh interceptor for an advice identifier
    fn create(&self, advice: &AdviceId) -> Result<SharedInterceptor, AdviceError>;
}
