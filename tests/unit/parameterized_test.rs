//! Parameterized tests using test-case
//!
//! These tests use test-case to run the same test logic with different inputs.

use std::sync::Arc;

use aspectweave::core::models::{
    Access, AccessMask, CutPointKind, Depth, MethodDescriptor, MethodSignaturePattern, TargetSelector,
    TypeDescriptor,
};
use aspectweave::core::services::matches_signature;
use test_case::test_case;

// =============================================================================
// Access filtering
// =============================================================================

#[test_case(AccessMask::PUBLIC, Access::Public, true ; "public mask accepts public")]
#[test_case(AccessMask::PUBLIC, Access::Protected, false ; "public mask rejects protected")]
#[test_case(AccessMask::PUBLIC_PROTECTED, Access::Protected, true ; "public protected mask accepts protected")]
#[test_case(AccessMask::ALL, Access::Private, false ; "private never matches")]
#[test_case(AccessMask::NONE, Access::Public, false ; "empty mask accepts nothing")]
fn test_access_filter(mask: AccessMask, access: Access, expected: bool) {
    let method = MethodDescriptor::new("Save", "System.Void").param("System.Int32").access(access);
    let ty = TypeDescriptor::new("App.Foo").with_method(method.clone());
    let pattern = MethodSignaturePattern::any()
        .named("Save")
        .returning("System.Void")
        .with_parameters(["System.Int32"])
        .with_access(mask);
    assert_eq!(matches_signature(&pattern, &ty.methods()[0], &ty), expected);
}

#[test_case("public", Some(Access::Public) ; "public")]
#[test_case("Protected", Some(Access::Protected) ; "case insensitive")]
#[test_case("internal", Some(Access::Internal) ; "internal")]
#[test_case("friend", None ; "unknown")]
fn test_access_parsing(input: &str, expected: Option<Access>) {
    assert_eq!(input.parse::<Access>().ok(), expected);
}

// =============================================================================
// Field matching
// =============================================================================

#[test_case(None, None, None, true ; "all wildcards")]
#[test_case(Some("Save"), None, None, true ; "name only")]
#[test_case(Some("Load"), None, None, false ; "wrong name")]
#[test_case(None, Some("System.String"), None, false ; "wrong return type")]
#[test_case(None, None, Some(vec![]), false ; "arity mismatch")]
#[test_case(None, None, Some(vec!["System.Int64"]), false ; "parameter type mismatch")]
#[test_case(Some(""), Some(""), None, true ; "empty strings are wildcards")]
fn test_field_matching(name: Option<&str>, returns: Option<&str>, params: Option<Vec<&str>>, expected: bool) {
    let ty = TypeDescriptor::new("App.Foo").with_method(MethodDescriptor::new("Save", "System.Void").param("System.Int32"));
    let mut pattern = MethodSignaturePattern::any();
    pattern.method = name.map(str::to_string);
    pattern.return_type = returns.map(str::to_string);
    pattern.parameter_types = params.map(|p| p.into_iter().map(str::to_string).collect());
    assert_eq!(matches_signature(&pattern, &ty.methods()[0], &ty), expected);
}

// =============================================================================
// Depth
// =============================================================================

#[test_case(CutPointKind::Type, Depth::Levels(0), false ; "type pattern at depth zero skips base")]
#[test_case(CutPointKind::Type, Depth::Levels(1), true ; "type pattern at depth one reaches base")]
#[test_case(CutPointKind::Type, Depth::Unlimited, true ; "unlimited type pattern reaches base")]
#[test_case(CutPointKind::Method, Depth::Levels(0), true ; "method pattern ignores depth")]
fn test_depth(kind: CutPointKind, depth: Depth, expected: bool) {
    let base = Arc::new(TypeDescriptor::new("App.Base").with_method(MethodDescriptor::new("Close", "System.Void")));
    let ty = TypeDescriptor::new("App.Foo").with_base(Arc::clone(&base));
    let pattern = MethodSignaturePattern::any().named("Close").with_kind(kind).with_depth(depth);
    assert_eq!(matches_signature(&pattern, &base.methods()[0], &ty), expected);
}

// =============================================================================
// Target selectors
// =============================================================================

#[test_case("App.Foo", "App.Foo", true ; "exact name")]
#[test_case("App.Foo", "App.FooBar", false ; "exact name is not a prefix")]
#[test_case("glob:App.*", "App.Foo", true ; "glob")]
#[test_case("glob:*.Repositories.*", "App.Web.Home", false ; "glob mismatch")]
#[test_case("regex:^App\\.(Foo|Bar)$", "App.Bar", true ; "regex")]
#[test_case("regex:^App\\.(Foo|Bar)$", "App.Baz", false ; "regex mismatch")]
fn test_target_selector(selector: &str, type_name: &str, expected: bool) {
    let selector = TargetSelector::parse(selector).unwrap();
    assert_eq!(selector.accepts(&TypeDescriptor::new(type_name)).unwrap(), expected);
}
