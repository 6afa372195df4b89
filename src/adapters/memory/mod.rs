//! In-memory repositories
//!
//! Implements `AspectRepository` and `InterceptorRepository` with plain
//! collections. These are the repositories the registrar uses unless a host
//! supplies its own.

mod aspects;
mod interceptors;

pub use aspects::InMemoryAspectRepository;
pub use interceptors::InMemoryInterceptorRepository;
