//! Domain models for aspectweave
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`TypeDescriptor`] / [`MethodDescriptor`] - static type metadata
//! - [`MethodSignaturePattern`] - "which methods"
//! - [`PointCut`] / [`AspectDescriptor`] - "which methods, on which types, with what advice"
//! - [`BindingTable`] - explicit per-type and per-method declarations
//! - [`ComponentMetadata`] - what the container registers and listeners annotate
//! - [`RegistrationReport`] - what a registration produced

mod access;
mod aspect;
mod binding;
mod metadata;
mod report;
mod signature;
mod type_info;

pub use access::{Access, AccessMask};
pub use aspect::{
    AdviceId, AspectDescriptor, ModelError, PointCut, SelectorError, SelectorFn, TargetSelector,
    TypePattern,
};
pub use binding::{BindingTable, MethodBinding, TypeBindings};
pub use metadata::{
    ComponentMetadata, ExtendedProperties, INTERCEPTORS_KEY, METHODS_KEY, PROXY_KEY, PropertyValue,
};
pub use report::{RegistrationError, RegistrationReport, RegistrationWarning};
pub use signature::{CutPointKind, Depth, MethodSignaturePattern};
pub use type_info::{MethodDescriptor, MethodIdentity, MethodKey, TypeDescriptor};
