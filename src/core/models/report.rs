//! Registration outcomes
//!
//! Fatal failures are [`RegistrationError`]s. Everything else that went
//! wrong but did not stop the analysis is a [`RegistrationWarning`] in the
//! [`RegistrationReport`].

use serde::Serialize;
use thiserror::Error;

use super::{AdviceId, MethodIdentity, MethodKey, ModelError, SelectorError};

/// Fatal registration failure for one component type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    /// A target selector failed while being evaluated
    #[error(transparent)]
    Selector(#[from] SelectorError),

    /// A declared binding could not be turned into an aspect
    #[error("invalid bindings for {type_name}: {source}")]
    InvalidBinding {
        /// The bound type
        type_name: String,
        /// The model error
        source: ModelError,
    },
}

/// Non-fatal problem found while registering a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegistrationWarning {
    /// An advice identifier could not be turned into an interceptor;
    /// it was left out of every chain for this type
    AdviceUnavailable {
        /// The type being registered
        type_name: String,
        /// The failing advice
        advice: AdviceId,
        /// Why resolution failed
        reason: String,
    },

    /// A method binding selected no interceptable method
    UnmatchedBinding {
        /// The bound type
        type_name: String,
        /// The method name in the binding
        method: String,
    },
}

impl std::fmt::Display for RegistrationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AdviceUnavailable {
                type_name,
                advice,
                reason,
            } => write!(f, "{type_name}: advice '{advice}' unavailable: {reason}"),
            Self::UnmatchedBinding { type_name, method } => {
                write!(f, "{type_name}: binding for '{method}' matches no public or protected method")
            },
        }
    }
}

/// Summary of one metadata registration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationReport {
    /// Full name of the implementation type
    pub implementation: String,

    /// Whether instances must be proxied
    pub proxy_required: bool,

    /// Distinct intercepted method identities
    pub intercepted_methods: Vec<MethodIdentity>,

    /// Chains committed during this registration
    pub committed: Vec<MethodKey>,

    /// Methods whose chain already existed and was left untouched
    pub skipped: Vec<MethodKey>,

    /// Non-fatal problems
    pub warnings: Vec<RegistrationWarning>,
}

impl RegistrationReport {
    /// Report for a type that needs no proxy
    #[must_use]
    pub fn not_intercepted(implementation: impl Into<String>, warnings: Vec<RegistrationWarning>) -> Self {
        Self {
            implementation: implementation.into(),
            warnings,
            ..Self::default()
        }
    }
}
