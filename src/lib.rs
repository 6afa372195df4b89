//! aspectweave - Aspect-oriented method interception for component containers
//!
//! This library decides, when a component type is registered, which of its
//! methods are intercepted and by which ordered chain of advice, and runs
//! those chains around real calls afterwards.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod advice;
pub mod analysis;
pub mod config;
pub mod core;
pub mod output;
