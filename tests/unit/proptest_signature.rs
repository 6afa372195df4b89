//! Property-based tests for signature and join-point matching
//!
//! Uses proptest to verify properties that should hold for all inputs.

use aspectweave::core::models::{
    Access, AccessMask, MethodDescriptor, MethodSignaturePattern, PointCut, TypeDescriptor,
};
use aspectweave::core::services::{candidate_methods, match_join_points, matches_signature};
use proptest::prelude::*;

fn access() -> impl Strategy<Value = Access> {
    prop_oneof![
        Just(Access::Public),
        Just(Access::Protected),
        Just(Access::Internal),
        Just(Access::Private),
    ]
}

fn method() -> impl Strategy<Value = MethodDescriptor> {
    (
        "[A-Z][a-z]{1,8}",
        "System\\.(Void|Int32|String)",
        prop::collection::vec("System\\.(Int32|String|Boolean)", 0..3),
        access(),
    )
        .prop_map(|(name, ret, params, access)| {
            params
                .into_iter()
                .fold(MethodDescriptor::new(name, ret), MethodDescriptor::param)
                .access(access)
        })
}

fn type_with_methods() -> impl Strategy<Value = TypeDescriptor> {
    prop::collection::vec(method(), 0..8)
        .prop_map(|methods| methods.into_iter().fold(TypeDescriptor::new("App.Generated"), TypeDescriptor::with_method))
}

proptest! {
    /// A pattern with every field unset matches exactly the public and
    /// protected methods
    #[test]
    fn wildcard_matches_interceptable_methods_only(ty in type_with_methods()) {
        let pattern = MethodSignaturePattern::any();
        for m in ty.methods() {
            prop_assert_eq!(matches_signature(&pattern, m, &ty), m.access.is_interceptable());
        }
    }

    /// A method-level pattern built from a method always matches it, unless
    /// the method is private or internal
    #[test]
    fn exact_pattern_matches_its_method(m in method()) {
        let ty = TypeDescriptor::new("App.Generated").with_method(m);
        let m = &ty.methods()[0];
        let pattern = MethodSignaturePattern::for_method(m);
        prop_assert_eq!(matches_signature(&pattern, m, &ty), m.access.is_interceptable());
    }

    /// Restricting to public never matches a protected method
    #[test]
    fn public_only_rejects_protected(m in method()) {
        let ty = TypeDescriptor::new("App.Generated").with_method(m.access(Access::Protected));
        let pattern = MethodSignaturePattern::for_method(&ty.methods()[0]).with_access(AccessMask::PUBLIC);
        prop_assert!(!matches_signature(&pattern, &ty.methods()[0], &ty));
    }

    /// Matching is deterministic
    #[test]
    fn join_points_are_deterministic(ty in type_with_methods(), name in "[A-Z][a-z]{1,8}") {
        let by_name = PointCut::new(MethodSignaturePattern::any().named(name), ["a"]).unwrap();
        let public = PointCut::new(MethodSignaturePattern::any().with_access(AccessMask::PUBLIC), ["b"]).unwrap();
        let pointcuts = [&by_name, &public];

        let candidates = candidate_methods(&ty, &[]);
        let first: Vec<_> = match_join_points(&ty, &candidates, &pointcuts)
            .iter()
            .map(|jp| (jp.identity(), jp.pointcuts.len()))
            .collect();
        let second: Vec<_> = match_join_points(&ty, &candidates, &pointcuts)
            .iter()
            .map(|jp| (jp.identity(), jp.pointcuts.len()))
            .collect();
        prop_assert_eq!(first, second);
    }

    /// Candidates never contain two methods with the same identity
    #[test]
    fn candidates_are_unique(ty in type_with_methods()) {
        let candidates = candidate_methods(&ty, &[]);
        let mut identities: Vec<_> = candidates.iter().map(|m| m.identity()).collect();
        let total = identities.len();
        identities.sort();
        identities.dedup();
        prop_assert_eq!(identities.len(), total);
    }
}
