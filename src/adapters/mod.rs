//! Adapter implementations for port traits
//!
//! This module contains concrete implementations at the edges of the core:
//!
//! - `memory/` - in-memory aspect and interceptor repositories
//! - `toml/` - `*.weave.toml` manifest loading

pub mod memory;
pub mod toml;
