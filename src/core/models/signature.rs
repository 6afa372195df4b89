//! Method signature patterns
//!
//! A [`MethodSignaturePattern`] describes which methods a pointcut selects.
//! Every field is optional; an unset field matches anything.

use serde::{Deserialize, Serialize};

use super::{AccessMask, MethodDescriptor};

/// Where an interception declaration was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutPointKind {
    /// Declared on a single method; matches that method's signature exactly
    Method,
    /// Declared on a whole type; matches members up to a depth bound
    #[default]
    Type,
}

/// How far up a type's hierarchy a type-level pattern reaches
///
/// Level 0 is the implementation type itself, level 1 its base type and
/// direct interfaces, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Depth {
    /// Any level
    #[default]
    Unlimited,
    /// Levels `0..=n`
    Levels(u32),
}

impl Depth {
    /// Whether a member discovered at `level` is within this bound
    #[must_use]
    pub const fn admits(self, level: u32) -> bool {
        match self {
            Self::Unlimited => true,
            Self::Levels(max) => level <= max,
        }
    }
}

impl From<Option<u32>> for Depth {
    fn from(value: Option<u32>) -> Self {
        value.map_or(Self::Unlimited, Self::Levels)
    }
}

impl std::fmt::Display for Depth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unlimited => write!(f, "unlimited"),
            Self::Levels(n) => write!(f, "{n}"),
        }
    }
}

/// Structural pattern over method metadata
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MethodSignaturePattern {
    /// Exact method name
    pub method: Option<String>,

    /// Full name of the return type
    pub return_type: Option<String>,

    /// Full names of the parameter types, order-sensitive, exact arity
    pub parameter_types: Option<Vec<String>>,

    /// Access levels accepted
    pub access: AccessMask,

    /// Method-level or type-level declaration
    pub kind: CutPointKind,

    /// Hierarchy bound (consulted for type-level patterns only)
    pub depth: Depth,
}

impl MethodSignaturePattern {
    /// Pattern with every field unset: a type-level wildcard
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Type-level pattern bounded by `depth`
    #[must_use]
    pub fn type_level(depth: Depth) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }

    /// Method-level pattern pinned to the exact signature of `method`
    #[must_use]
    pub fn for_method(method: &MethodDescriptor) -> Self {
        Self {
            method: Some(method.name.clone()),
            return_type: Some(method.return_type.clone()),
            parameter_types: Some(method.parameter_types.clone()),
            access: AccessMask::ALL,
            kind: CutPointKind::Method,
            depth: Depth::Unlimited,
        }
    }

    /// Restrict to a method name
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.method = Some(name.into());
        self
    }

    /// Restrict to a return type
    #[must_use]
    pub fn returning(mut self, type_name: impl Into<String>) -> Self {
        self.return_type = Some(type_name.into());
        self
    }

    /// Restrict to an exact parameter type list
    #[must_use]
    pub fn with_parameters<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameter_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict access levels
    #[must_use]
    pub const fn with_access(mut self, access: AccessMask) -> Self {
        self.access = access;
        self
    }

    /// Set the hierarchy bound
    #[must_use]
    pub const fn with_depth(mut self, depth: Depth) -> Self {
        self.depth = depth;
        self
    }

    /// Set the declaration kind
    #[must_use]
    pub const fn with_kind(mut self, kind: CutPointKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether the pattern can match anything at all
    ///
    /// An empty access mask accepts no method, and a method-level pattern
    /// must name its method.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        if self.access.is_empty() {
            return false;
        }
        match self.kind {
            CutPointKind::Method => self.method.as_deref().is_some_and(|m| !m.is_empty()),
            CutPointKind::Type => true,
        }
    }
}

impl std::fmt::Display for MethodSignaturePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ret = self.return_type.as_deref().unwrap_or("*");
        let name = self.method.as_deref().unwrap_or("*");
        match &self.parameter_types {
            Some(params) => write!(f, "{ret} {name}({})", params.join(", ")),
            None => write!(f, "{ret} {name}(..)"),
        }
    }
}
