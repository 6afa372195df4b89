//! Core domain logic for aspectweave
//!
//! This module contains the interception core with no I/O dependencies.
//! External collaborators are reached through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (types, patterns, aspects, bindings, metadata)
//! - `services/` - Matching, chain building, registration and dispatch
//! - `ports/` - Trait definitions for repositories, advice and interceptors

pub mod models;
pub mod ports;
pub mod services;
