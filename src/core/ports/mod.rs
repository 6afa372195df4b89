//! Port traits (interfaces) at the boundaries of the interception core
//!
//! - [`AspectRepository`] - where registered aspects live
//! - [`InterceptorRepository`] - where committed chains live
//! - [`AdviceFactory`] - how advice identifiers become interceptors
//! - [`Interceptor`] - the call-time contract advice implements
//! - [`ComponentListener`] - the registration hook a container calls
//!
//! In-memory repositories live in `adapters::memory`; the factory registry
//! lives in `advice`.

mod advice;
mod aspect_repo;
mod interceptor;
mod interceptor_repo;
mod listener;

pub use advice::{AdviceError, AdviceFactory};
pub use aspect_repo::AspectRepository;
pub use interceptor::{
    BoundInterceptor, CallContext, Interceptor, InvocationError, Proceed, RealMethod,
    SharedInterceptor,
};
pub use interceptor_repo::{InterceptorChain, InterceptorRepository};
pub use listener::ComponentListener;
