//! Aspects, pointcuts and advice identifiers
//!
//! An aspect says "for types like these, intercept methods like those with
//! this behavior". It is made of:
//!
//! - a [`TargetSelector`] choosing the implementation types
//! - one or more [`PointCut`]s, each a signature pattern plus the
//!   [`AdviceId`]s to run around matched methods
//!
//! # Examples
//!
//! ```
//! use aspectweave::core::models::{
//!     AspectDescriptor, MethodSignaturePattern, PointCut, TargetSelector, TypeDescriptor,
//! };
//!
//! let selector = TargetSelector::parse("glob:App.Services.*").unwrap();
//! let pointcut = PointCut::new(MethodSignaturePattern::any().named("Save"), ["audit"]).unwrap();
//! let aspect = AspectDescriptor::new(selector, vec![pointcut]).unwrap();
//!
//! assert!(aspect.target().accepts(&TypeDescriptor::new("App.Services.Orders")).unwrap());
//! assert!(!aspect.target().accepts(&TypeDescriptor::new("App.Web.Home")).unwrap());
//! ```

use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{MethodSignaturePattern, TypeDescriptor};

/// Errors raised when building aspect models
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// An aspect was declared without pointcuts
    #[error("aspect targeting {0} has no pointcuts")]
    NoPointCuts(String),

    /// A pointcut was declared without advice
    #[error("pointcut {0} names no advice")]
    NoAdvice(String),

    /// A type pattern could not be compiled
    #[error("invalid type pattern '{pattern}': {reason}")]
    InvalidTypePattern {
        /// The pattern source
        pattern: String,
        /// Why it failed to compile
        reason: String,
    },
}

/// Error raised by a host-supplied selector predicate
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("selector '{selector}' failed on {type_name}: {reason}")]
pub struct SelectorError {
    /// Name of the failing selector
    pub selector: String,
    /// Type being evaluated
    pub type_name: String,
    /// Failure description
    pub reason: String,
}

/// Identifier naming an interceptor implementation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdviceId(String);

impl AdviceId {
    /// Create an advice identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AdviceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AdviceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for AdviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A signature pattern plus the advice to apply to matching methods
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PointCut {
    signature: MethodSignaturePattern,
    advices: Vec<AdviceId>,
}

impl PointCut {
    /// Create a pointcut; at least one advice is required
    pub fn new<I, A>(signature: MethodSignaturePattern, advices: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = A>,
        A: Into<AdviceId>,
    {
        let advices: Vec<AdviceId> = advices.into_iter().map(Into::into).collect();
        if advices.is_empty() {
            return Err(ModelError::NoAdvice(signature.to_string()));
        }
        Ok(Self { signature, advices })
    }

    /// The signature pattern
    #[must_use]
    pub const fn signature(&self) -> &MethodSignaturePattern {
        &self.signature
    }

    /// Advice identifiers, in declaration order
    #[must_use]
    pub fn advices(&self) -> &[AdviceId] {
        &self.advices
    }
}

/// A compiled structural predicate over type names
#[derive(Debug, Clone)]
pub enum TypePattern {
    /// Shell-style glob over the full type name: `App.Services.*`
    Glob(glob::Pattern),

    /// Regular expression over the full type name
    Regex(Regex),
}

impl TypePattern {
    /// Compile a glob pattern
    pub fn glob(pattern: &str) -> Result<Self, ModelError> {
        glob::Pattern::new(pattern).map(Self::Glob).map_err(|e| ModelError::InvalidTypePattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
    }

    /// Compile a regular expression
    pub fn regex(pattern: &str) -> Result<Self, ModelError> {
        Regex::new(pattern).map(Self::Regex).map_err(|e| ModelError::InvalidTypePattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
    }

    /// The pattern source
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Glob(g) => g.as_str(),
            Self::Regex(r) => r.as_str(),
        }
    }

    /// Whether the type's full name matches
    #[must_use]
    pub fn matches(&self, ty: &TypeDescriptor) -> bool {
        match self {
            Self::Glob(g) => g.matches(ty.full_name()),
            Self::Regex(r) => r.is_match(ty.full_name()),
        }
    }
}

impl PartialEq for TypePattern {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Glob(_), Self::Glob(_)) | (Self::Regex(_), Self::Regex(_))
        ) && self.as_str() == other.as_str()
    }
}

/// Host-supplied fallible predicate over types
pub type SelectorFn = dyn Fn(&TypeDescriptor) -> Result<bool, SelectorError> + Send + Sync;

/// Chooses which implementation types an aspect applies to
#[derive(Clone)]
pub enum TargetSelector {
    /// Exactly one type, by full name
    Single(String),

    /// A family of types matching a name pattern
    Pattern(TypePattern),

    /// A named host predicate; errors are fatal for the type being registered
    Predicate {
        /// Name used in diagnostics
        name: String,
        /// The predicate
        predicate: Arc<SelectorFn>,
    },
}

impl TargetSelector {
    /// Parse a selector string
    ///
    /// - `glob:<pattern>` - glob over the full type name
    /// - `regex:<pattern>` - regular expression over the full type name
    /// - anything else - exact full type name
    pub fn parse(s: &str) -> Result<Self, ModelError> {
        let s = s.trim();
        if let Some(pattern) = s.strip_prefix("glob:") {
            return TypePattern::glob(pattern).map(Self::Pattern);
        }
        if let Some(pattern) = s.strip_prefix("regex:") {
            return TypePattern::regex(pattern).map(Self::Pattern);
        }
        Ok(Self::Single(s.to_string()))
    }

    /// Wrap a host predicate
    pub fn predicate<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&TypeDescriptor) -> Result<bool, SelectorError> + Send + Sync + 'static,
    {
        Self::Predicate {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Whether the selector accepts a type
    pub fn accepts(&self, ty: &TypeDescriptor) -> Result<bool, SelectorError> {
        match self {
            Self::Single(name) => Ok(ty.full_name() == name),
            Self::Pattern(pattern) => Ok(pattern.matches(ty)),
            Self::Predicate { predicate, .. } => predicate(ty),
        }
    }
}

impl PartialEq for TargetSelector {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Single(a), Self::Single(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a == b,
            (
                Self::Predicate { predicate: a, .. },
                Self::Predicate { predicate: b, .. },
            ) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Debug for TargetSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(name) => f.debug_tuple("Single").field(name).finish(),
            Self::Pattern(p) => f.debug_tuple("Pattern").field(&p.as_str()).finish(),
            Self::Predicate { name, .. } => f.debug_tuple("Predicate").field(name).finish(),
        }
    }
}

impl std::fmt::Display for TargetSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(name) => write!(f, "{name}"),
            Self::Pattern(TypePattern::Glob(g)) => write!(f, "glob:{}", g.as_str()),
            Self::Pattern(TypePattern::Regex(r)) => write!(f, "regex:{}", r.as_str()),
            Self::Predicate { name, .. } => write!(f, "predicate:{name}"),
        }
    }
}

/// A target selector plus its pointcuts
///
/// Immutable once built; owned by the aspect repository.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectDescriptor {
    target: TargetSelector,
    pointcuts: Vec<PointCut>,
}

impl AspectDescriptor {
    /// Create an aspect; at least one pointcut is required
    pub fn new(target: TargetSelector, pointcuts: Vec<PointCut>) -> Result<Self, ModelError> {
        if pointcuts.is_empty() {
            return Err(ModelError::NoPointCuts(target.to_string()));
        }
        Ok(Self { target, pointcuts })
    }

    /// The target selector
    #[must_use]
    pub const fn target(&self) -> &TargetSelector {
        &self.target
    }

    /// Pointcuts, in declaration order
    #[must_use]
    pub fn pointcuts(&self) -> &[PointCut] {
        &self.pointcuts
    }
}
