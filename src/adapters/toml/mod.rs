//! TOML manifests describing a weaving model
//!
//! A manifest (`*.weave.toml`) carries what a host program would otherwise
//! supply in code: type metadata, registered components, the binding table,
//! advice declarations and global aspects.
//!
//! - [`manifest`] - file format, reading and discovery
//! - [`loader`] - turn manifests into domain models

pub mod loader;
pub mod manifest;

use std::path::PathBuf;

use thiserror::Error;

use crate::core::models::ModelError;

pub use loader::{WeaveModel, load_paths};
pub use manifest::{MANIFEST_SUFFIX, Manifest, find_manifests, load_file};

/// Errors raised while reading or resolving manifests
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The file could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        /// The manifest path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file is not valid TOML for the manifest format
    #[error("cannot parse {path}: {source}")]
    Parse {
        /// The manifest path
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },

    /// A declaration names a type that no manifest describes
    #[error("{owner} refers to unknown type '{reference}'")]
    UnknownType {
        /// What holds the reference
        owner: String,
        /// The missing type name
        reference: String,
    },

    /// The same type is described twice
    #[error("type '{0}' is declared more than once")]
    DuplicateType(String),

    /// A type inherits from itself
    #[error("inheritance cycle through '{0}'")]
    Cycle(String),

    /// An aspect or pointcut declaration is invalid
    #[error("{context}: {source}")]
    Model {
        /// Which declaration failed
        context: String,
        /// The model error
        source: ModelError,
    },
}
