//! Interception binding table
//!
//! The explicit, statically built declaration of which types and methods
//! are intercepted and by which advice. Hosts populate it at configuration
//! time (by hand or from a manifest); the registrar turns each entry into
//! an aspect when the bound type's metadata is registered.
//!
//! # Examples
//!
//! ```
//! use aspectweave::core::models::{BindingTable, MethodBinding};
//!
//! let table = BindingTable::new()
//!     .bind_type("App.Foo", ["trace"])
//!     .bind_method("App.Foo", MethodBinding::new("Save", ["audit"]).with_parameters(["System.Int32"]));
//!
//! let foo = table.get("App.Foo").unwrap();
//! assert_eq!(foo.advices.len(), 1);
//! assert_eq!(foo.methods.len(), 1);
//! assert!(table.get("App.Bar").is_none());
//! ```

use std::collections::HashMap;

use super::{AdviceId, Depth, MethodDescriptor};

/// Advice bound to methods of one type, selected by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodBinding {
    /// Method name
    pub name: String,

    /// Parameter types; `None` binds every overload
    pub parameter_types: Option<Vec<String>>,

    /// Advice to run around the method
    pub advices: Vec<AdviceId>,
}

impl MethodBinding {
    /// Bind advice to every overload of `name`
    pub fn new<I, A>(name: impl Into<String>, advices: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<AdviceId>,
    {
        Self {
            name: name.into(),
            parameter_types: None,
            advices: advices.into_iter().map(Into::into).collect(),
        }
    }

    /// Narrow the binding to one overload
    #[must_use]
    pub fn with_parameters<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameter_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Whether a declared method is selected by this binding
    #[must_use]
    pub fn selects(&self, method: &MethodDescriptor) -> bool {
        method.name == self.name
            && self.parameter_types.as_ref().is_none_or(|params| *params == method.parameter_types)
    }
}

/// All bindings declared for one implementation type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeBindings {
    /// Type-level advice applied to every eligible method
    pub advices: Vec<AdviceId>,

    /// Hierarchy bound for type-level advice; `None` uses the configured default
    pub depth: Option<Depth>,

    /// Method-level bindings
    pub methods: Vec<MethodBinding>,
}

/// Bindings for every configured type, keyed by full type name
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    types: HashMap<String, TypeBindings>,
}

impl BindingTable {
    /// Empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add type-level advice for a type
    #[must_use]
    pub fn bind_type<I, A>(mut self, type_name: impl Into<String>, advices: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<AdviceId>,
    {
        let entry = self.types.entry(type_name.into()).or_default();
        for advice in advices {
            let advice = advice.into();
            if !entry.advices.contains(&advice) {
                entry.advices.push(advice);
            }
        }
        self
    }

    /// Set the type-level depth bound for a type
    #[must_use]
    pub fn with_depth(mut self, type_name: impl Into<String>, depth: Depth) -> Self {
        self.types.entry(type_name.into()).or_default().depth = Some(depth);
        self
    }

    /// Add a method-level binding for a type
    #[must_use]
    pub fn bind_method(mut self, type_name: impl Into<String>, binding: MethodBinding) -> Self {
        self.insert_method(type_name, binding);
        self
    }

    /// Add a method-level binding in place
    pub fn insert_method(&mut self, type_name: impl Into<String>, binding: MethodBinding) {
        self.types.entry(type_name.into()).or_default().methods.push(binding);
    }

    /// Replace all bindings for a type in place
    pub fn insert(&mut self, type_name: impl Into<String>, bindings: TypeBindings) {
        self.types.insert(type_name.into(), bindings);
    }

    /// Bindings for a type
    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&TypeBindings> {
        self.types.get(type_name)
    }

    /// Number of bound types
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no type is bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
