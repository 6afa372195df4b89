//! Type and method metadata
//!
//! The interception core never inspects live types. Hosts describe each
//! component type once, up front, with these descriptors:
//!
//! - [`TypeDescriptor`] - a type with its base type, interfaces and methods
//! - [`MethodDescriptor`] - one declared method
//! - [`MethodIdentity`] - name plus parameter types, the stable identity key
//! - [`MethodKey`] - a method identity on one implementation type
//!
//! # Examples
//!
//! ```
//! use aspectweave::core::models::{Access, MethodDescriptor, TypeDescriptor};
//!
//! let foo = TypeDescriptor::new("App.Foo")
//!     .with_method(MethodDescriptor::new("Save", "System.Void").param("System.Int32"))
//!     .with_method(MethodDescriptor::new("Flush", "System.Void").access(Access::Private));
//!
//! assert_eq!(foo.methods().len(), 2);
//! assert_eq!(foo.methods()[0].declaring_type, "App.Foo");
//! assert_eq!(foo.methods()[0].identity().to_string(), "Save(System.Int32)");
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use serde::Serialize;

use super::Access;

/// A single declared method
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    /// Method name (case-sensitive)
    pub name: String,

    /// Full name of the return type
    pub return_type: String,

    /// Full names of the parameter types, in declaration order
    pub parameter_types: Vec<String>,

    /// Declared access level
    pub access: Access,

    /// Full name of the type that declares this method
    ///
    /// Filled in by [`TypeDescriptor::with_method`].
    pub declaring_type: String,
}

impl MethodDescriptor {
    /// Create a public method with no parameters
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            parameter_types: Vec::new(),
            access: Access::Public,
            declaring_type: String::new(),
        }
    }

    /// Append a parameter type
    #[must_use]
    pub fn param(mut self, type_name: impl Into<String>) -> Self {
        self.parameter_types.push(type_name.into());
        self
    }

    /// Set the access level
    #[must_use]
    pub const fn access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    /// The identity of this method: name plus parameter types
    #[must_use]
    pub fn identity(&self) -> MethodIdentity {
        MethodIdentity {
            name: self.name.clone(),
            parameter_types: self.parameter_types.clone(),
        }
    }
}

/// Stable identity of a method: name plus ordered parameter type names
///
/// Two declarations with the same identity (for example an interface method
/// and the class method implementing it) are the same join point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MethodIdentity {
    /// Method name
    pub name: String,

    /// Parameter type names, in order
    pub parameter_types: Vec<String>,
}

impl std::fmt::Display for MethodIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.parameter_types.join(", "))
    }
}

/// A method identity bound to one implementation type
///
/// This is the key under which interceptor chains are stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MethodKey {
    /// Full name of the implementation type
    pub implementation: String,

    /// The method on that type
    pub method: MethodIdentity,
}

impl MethodKey {
    /// Create a key for a method on an implementation type
    pub fn new(implementation: impl Into<String>, method: MethodIdentity) -> Self {
        Self {
            implementation: implementation.into(),
            method,
        }
    }
}

impl std::fmt::Display for MethodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.implementation, self.method)
    }
}

/// Static description of a type
///
/// Equality is by full name: a process never holds two different
/// descriptions of the same type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    full_name: String,
    base: Option<Arc<TypeDescriptor>>,
    interfaces: Vec<Arc<TypeDescriptor>>,
    methods: Vec<MethodDescriptor>,
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.full_name == other.full_name
    }
}

impl Eq for TypeDescriptor {}

impl TypeDescriptor {
    /// Create a type with no base, interfaces or methods
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            base: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Set the base type
    #[must_use]
    pub fn with_base(mut self, base: Arc<Self>) -> Self {
        self.base = Some(base);
        self
    }

    /// Add an implemented interface
    #[must_use]
    pub fn with_interface(mut self, interface: Arc<Self>) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Add a declared method, recording this type as its declaring type
    #[must_use]
    pub fn with_method(mut self, mut method: MethodDescriptor) -> Self {
        method.declaring_type.clone_from(&self.full_name);
        self.methods.push(method);
        self
    }

    /// Full name, e.g. `App.Services.Foo`
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Namespace portion of the full name (empty for top-level types)
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.full_name.rfind('.').map_or("", |pos| &self.full_name[..pos])
    }

    /// Name without the namespace
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.full_name.rfind('.').map_or(self.full_name.as_str(), |pos| &self.full_name[pos + 1..])
    }

    /// Base type, if any
    #[must_use]
    pub fn base(&self) -> Option<&Self> {
        self.base.as_deref()
    }

    /// Directly implemented interfaces
    #[must_use]
    pub fn interfaces(&self) -> &[Arc<Self>] {
        &self.interfaces
    }

    /// Methods declared directly on this type
    #[must_use]
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Distance from this type to an ancestor in its hierarchy
    ///
    /// The type itself is level 0, its base type and direct interfaces are
    /// level 1, and so on. When a type is reachable along several paths the
    /// shortest one wins. Returns `None` for types outside the hierarchy.
    #[must_use]
    pub fn inheritance_level(&self, type_name: &str) -> Option<u32> {
        let mut queue: VecDeque<(&Self, u32)> = VecDeque::from([(self, 0)]);
        while let Some((current, level)) = queue.pop_front() {
            if current.full_name == type_name {
                return Some(level);
            }
            if let Some(base) = current.base() {
                queue.push_back((base, level + 1));
            }
            for interface in &current.interfaces {
                queue.push_back((interface, level + 1));
            }
        }
        None
    }
}

impl std::fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_name)
    }
}
