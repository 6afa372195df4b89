//! Signature matcher - compares one pattern against one method
//!
//! This module contains pure matching logic with no I/O dependencies.

use log::trace;

use crate::core::models::{
    CutPointKind, Depth, MethodDescriptor, MethodSignaturePattern, TypeDescriptor,
};

/// Check if a signature pattern matches a method of an implementation type
///
/// All of the following must hold; an unset or empty pattern field always
/// holds:
///
/// - the method is public or protected (private members never match)
/// - the method's access level is in the pattern's access mask
/// - the name is equal (case-sensitive)
/// - the return type full name is equal
/// - the parameter type full names are equal, in order, with equal arity
/// - for type-level patterns, the declaring type sits within the pattern's
///   depth bound in the implementation's hierarchy
///
/// A malformed pattern (see [`MethodSignaturePattern::is_well_formed`])
/// matches nothing. The function is total and pure.
#[must_use]
pub fn matches_signature(
    pattern: &MethodSignaturePattern,
    method: &MethodDescriptor,
    implementation: &TypeDescriptor,
) -> bool {
    matches_at_level(pattern, method, implementation.inheritance_level(&method.declaring_type))
}

/// [`matches_signature`] for a method whose hierarchy level is already known
///
/// `level` is the distance from the implementation type to the method's
/// declaring type, or `None` when the declaring type is unrelated. Such
/// methods only match an unbounded type-level pattern.
#[must_use]
pub fn matches_at_level(
    pattern: &MethodSignaturePattern,
    method: &MethodDescriptor,
    level: Option<u32>,
) -> bool {
    if !pattern.is_well_formed() {
        trace!("pattern {pattern} is malformed; matches nothing");
        return false;
    }

    if !method.access.is_interceptable() || !pattern.access.contains(method.access) {
        return false;
    }

    if !field_matches(pattern.method.as_deref(), &method.name) {
        return false;
    }

    if !field_matches(pattern.return_type.as_deref(), &method.return_type) {
        return false;
    }

    if let Some(params) = &pattern.parameter_types
        && *params != method.parameter_types
    {
        return false;
    }

    match pattern.kind {
        CutPointKind::Method => true,
        CutPointKind::Type => level.map_or(pattern.depth == Depth::Unlimited, |l| pattern.depth.admits(l)),
    }
}

/// Exact comparison, with `None` and `""` acting as wildcards
fn field_matches(expected: Option<&str>, actual: &str) -> bool {
    match expected {
        None | Some("") => true,
        Some(expected) => expected == actual,
    }
}
