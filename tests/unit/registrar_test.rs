//! Tests for component registration
//!
//! Registration derives aspects from the binding table, matches them against
//! the component's methods and commits one interceptor chain per method.

use std::sync::Arc;

use aspectweave::advice::{AdviceRegistry, LoggingInterceptor};
use aspectweave::config::WeaveConfig;
use aspectweave::core::models::{
    Access, AccessMask, AspectDescriptor, BindingTable, ComponentMetadata, Depth, MethodBinding,
    MethodDescriptor, MethodKey, MethodSignaturePattern, PROXY_KEY, PointCut, PropertyValue, RegistrationError,
    RegistrationWarning, SelectorError, TargetSelector, TypeDescriptor,
};
use aspectweave::core::ports::{AspectRepository, ComponentListener, InterceptorRepository};
use aspectweave::core::services::AopRegistrar;

use crate::common::{INT, STRING, VOID, bar, foo, foo_with_contract, ifoo, logging_registry, save};

fn save_binding(advices: &[&str]) -> BindingTable {
    BindingTable::new().bind_method(
        "App.Foo",
        MethodBinding::new("Save", advices.iter().copied()).with_parameters([INT]),
    )
}

fn key(implementation: &str, method: &MethodDescriptor) -> MethodKey {
    MethodKey::new(implementation, method.identity())
}

fn chain_ids(registrar: &AopRegistrar, key: &MethodKey) -> Vec<String> {
    registrar
        .interceptors()
        .get(key)
        .map(|c| c.advice_ids().iter().map(ToString::to_string).collect())
        .unwrap_or_default()
}

// =============================================================================
// Method-level bindings
// =============================================================================

#[test]
fn method_binding_marks_proxy_and_builds_chain() {
    let mut registrar = AopRegistrar::new(logging_registry(&["audit"]), save_binding(&["audit"]), WeaveConfig::default());
    let mut metadata = ComponentMetadata::new(Arc::new(foo()));

    let report = registrar.on_metadata_registered(&mut metadata).unwrap();

    assert!(metadata.proxy_required());
    assert_eq!(metadata.intercepted_methods(), &[save().identity()]);
    assert_eq!(metadata.interceptors().len(), 1);
    assert_eq!(metadata.interceptors()[0].advice.as_str(), "audit");
    assert_eq!(report.committed, vec![key("App.Foo", &save())]);
    assert!(report.warnings.is_empty());
    assert_eq!(chain_ids(&registrar, &key("App.Foo", &save())), vec!["audit"]);
}

#[test]
fn unbound_type_is_marked_unproxied_and_commits_nothing() {
    let mut registrar = AopRegistrar::new(logging_registry(&["audit"]), save_binding(&["audit"]), WeaveConfig::default());
    let mut metadata = ComponentMetadata::new(Arc::new(bar()));

    let report = registrar.on_metadata_registered(&mut metadata).unwrap();

    assert!(!metadata.proxy_required());
    assert!(!report.proxy_required);
    assert!(matches!(metadata.extended_properties.get(PROXY_KEY), Some(PropertyValue::Bool(false))));
    assert_eq!(metadata.extended_properties.len(), 1);
    assert!(metadata.interceptors().is_empty());
    assert!(registrar.interceptors().chains().is_empty());
    assert!(registrar.aspects().is_empty());
}

#[test]
fn interface_and_class_declarations_share_one_chain() {
    let contract = ifoo();
    let mut registrar = AopRegistrar::new(logging_registry(&["audit"]), save_binding(&["audit"]), WeaveConfig::default());
    let mut metadata =
        ComponentMetadata::new(Arc::new(foo_with_contract(&contract))).with_contract(Arc::clone(&contract));

    let report = registrar.on_metadata_registered(&mut metadata).unwrap();

    assert_eq!(report.intercepted_methods.len(), 1);
    assert_eq!(registrar.interceptors().chains().len(), 1);
}

#[test]
fn binding_for_missing_method_is_reported() {
    let bindings = BindingTable::new().bind_method("App.Foo", MethodBinding::new("Delete", ["audit"]));
    let mut registrar = AopRegistrar::new(logging_registry(&["audit"]), bindings, WeaveConfig::default());
    let mut metadata = ComponentMetadata::new(Arc::new(foo()));

    let report = registrar.on_metadata_registered(&mut metadata).unwrap();

    assert!(!report.proxy_required);
    assert_eq!(
        report.warnings,
        vec![RegistrationWarning::UnmatchedBinding {
            type_name: "App.Foo".into(),
            method: "Delete".into(),
        }]
    );
}

#[test]
fn binding_without_parameters_covers_every_overload() {
    let ty = TypeDescriptor::new("App.Foo")
        .with_method(save())
        .with_method(MethodDescriptor::new("Save", VOID).param(STRING));
    let bindings = BindingTable::new().bind_method("App.Foo", MethodBinding::new("Save", ["audit"]));
    let mut registrar = AopRegistrar::new(logging_registry(&["audit"]), bindings, WeaveConfig::default());

    let report = registrar.on_metadata_registered(&mut ComponentMetadata::new(Arc::new(ty))).unwrap();

    assert_eq!(report.intercepted_methods.len(), 2);
    assert_eq!(report.committed.len(), 2);
}

// =============================================================================
// Type-level bindings
// =============================================================================

#[test]
fn type_binding_covers_public_and_protected_methods() {
    let bindings = BindingTable::new().bind_type("App.Foo", ["trace"]);
    let mut registrar = AopRegistrar::new(logging_registry(&["trace"]), bindings, WeaveConfig::default());
    let mut metadata = ComponentMetadata::new(Arc::new(foo()));

    registrar.on_metadata_registered(&mut metadata).unwrap();

    let names: Vec<&str> = metadata.intercepted_methods().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Save", "Load", "Flush"]);
}

#[test]
fn type_binding_respects_configured_access() {
    let mut config = WeaveConfig::default();
    config.weaving.type_level_access = vec![Access::Public];
    let bindings = BindingTable::new().bind_type("App.Foo", ["trace"]);
    let mut registrar = AopRegistrar::new(logging_registry(&["trace"]), bindings, config);
    let mut metadata = ComponentMetadata::new(Arc::new(foo()));

    registrar.on_metadata_registered(&mut metadata).unwrap();

    assert!(!metadata.intercepted_methods().iter().any(|m| m.name == "Flush"));
    assert_eq!(metadata.intercepted_methods().len(), 2);
}

#[test]
fn type_binding_depth_limits_inherited_methods() {
    let grand = Arc::new(TypeDescriptor::new("App.Grand").with_method(MethodDescriptor::new("Old", VOID)));
    let base = Arc::new(
        TypeDescriptor::new("App.Base")
            .with_base(grand)
            .with_method(MethodDescriptor::new("Inherited", VOID)),
    );
    let ty = Arc::new(TypeDescriptor::new("App.Foo").with_base(base).with_method(save()));

    let names_at = |depth: Option<Depth>| {
        let mut bindings = BindingTable::new().bind_type("App.Foo", ["trace"]);
        if let Some(depth) = depth {
            bindings = bindings.with_depth("App.Foo", depth);
        }
        let mut registrar = AopRegistrar::new(logging_registry(&["trace"]), bindings, WeaveConfig::default());
        let mut metadata = ComponentMetadata::new(Arc::clone(&ty));
        registrar.on_metadata_registered(&mut metadata).unwrap();
        metadata.intercepted_methods().iter().map(|m| m.name.clone()).collect::<Vec<_>>()
    };

    assert_eq!(names_at(Some(Depth::Levels(0))), vec!["Save"]);
    assert_eq!(names_at(Some(Depth::Levels(1))), vec!["Save", "Inherited"]);
    assert_eq!(names_at(None), vec!["Save", "Inherited", "Old"]);
}

#[test]
fn type_binding_depth_counts_exposed_contracts_as_one_level() {
    let extra = Arc::new(TypeDescriptor::new("App.IExtra").with_method(MethodDescriptor::new("Extra", VOID)));
    let ty = Arc::new(TypeDescriptor::new("App.Foo").with_method(save()));

    let names_at = |depth: Depth| {
        let bindings = BindingTable::new().bind_type("App.Foo", ["trace"]).with_depth("App.Foo", depth);
        let mut registrar = AopRegistrar::new(logging_registry(&["trace"]), bindings, WeaveConfig::default());
        let mut metadata = ComponentMetadata::new(Arc::clone(&ty)).with_contract(Arc::clone(&extra));
        registrar.on_metadata_registered(&mut metadata).unwrap();
        metadata.intercepted_methods().iter().map(|m| m.name.clone()).collect::<Vec<_>>()
    };

    assert_eq!(names_at(Depth::Levels(0)), vec!["Save"]);
    assert_eq!(names_at(Depth::Levels(1)), vec!["Save", "Extra"]);
}

#[test]
fn type_and_method_bindings_combine_in_declaration_order() {
    let bindings = BindingTable::new()
        .bind_type("App.Foo", ["trace"])
        .bind_method("App.Foo", MethodBinding::new("Save", ["audit"]));
    let mut registrar =
        AopRegistrar::new(logging_registry(&["trace", "audit"]), bindings, WeaveConfig::default());

    registrar.on_metadata_registered(&mut ComponentMetadata::new(Arc::new(foo()))).unwrap();

    assert_eq!(chain_ids(&registrar, &key("App.Foo", &save())), vec!["trace", "audit"]);
    let load = MethodDescriptor::new("Load", STRING);
    assert_eq!(chain_ids(&registrar, &key("App.Foo", &load)), vec!["trace"]);
}

// =============================================================================
// Advice resolution
// =============================================================================

#[test]
fn shared_advice_is_one_instance_across_chains() {
    let bindings = BindingTable::new()
        .bind_method("App.Foo", MethodBinding::new("Save", ["audit"]))
        .bind_method("App.Foo", MethodBinding::new("Load", ["audit"]));
    let mut registrar = AopRegistrar::new(logging_registry(&["audit"]), bindings, WeaveConfig::default());
    let mut metadata = ComponentMetadata::new(Arc::new(foo()));

    registrar.on_metadata_registered(&mut metadata).unwrap();

    let chains = registrar.interceptors().chains();
    assert_eq!(chains.len(), 2);
    assert!(chains[0].links()[0].same_instance(&chains[1].links()[0]));
    assert_eq!(metadata.interceptors().len(), 1);
}

#[test]
fn failed_advice_is_isolated() {
    let advices = AdviceRegistry::builder()
        .register("good", || Ok(Arc::new(LoggingInterceptor::new("good"))))
        .register_shared("bad", || Err("constructor panicked".to_string()))
        .build();
    let mut registrar = AopRegistrar::new(advices, save_binding(&["good", "bad"]), WeaveConfig::default());
    let mut metadata = ComponentMetadata::new(Arc::new(foo()));

    let report = registrar.on_metadata_registered(&mut metadata).unwrap();

    assert!(metadata.proxy_required());
    assert_eq!(chain_ids(&registrar, &key("App.Foo", &save())), vec!["good"]);
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(
        &report.warnings[0],
        RegistrationWarning::AdviceUnavailable { advice, .. } if advice.as_str() == "bad"
    ));
}

#[test]
fn unknown_advice_everywhere_still_marks_proxy() {
    let mut registrar = AopRegistrar::new(AdviceRegistry::builder().build(), save_binding(&["ghost"]), WeaveConfig::default());
    let mut metadata = ComponentMetadata::new(Arc::new(foo()));

    let report = registrar.on_metadata_registered(&mut metadata).unwrap();

    assert!(metadata.proxy_required());
    assert!(report.committed.is_empty());
    assert!(registrar.interceptors().chains().is_empty());
    assert_eq!(report.warnings.len(), 1);
}

// =============================================================================
// Idempotence and global aspects
// =============================================================================

#[test]
fn registering_twice_leaves_repository_unchanged() {
    let mut registrar = AopRegistrar::new(logging_registry(&["audit"]), save_binding(&["audit"]), WeaveConfig::default());
    let ty = Arc::new(foo());

    registrar.on_metadata_registered(&mut ComponentMetadata::new(Arc::clone(&ty))).unwrap();
    let before: Vec<(MethodKey, usize)> =
        registrar.interceptors().chains().iter().map(|c| (c.key().clone(), c.len())).collect();

    let second = registrar.on_metadata_registered(&mut ComponentMetadata::new(ty)).unwrap();
    let after: Vec<(MethodKey, usize)> =
        registrar.interceptors().chains().iter().map(|c| (c.key().clone(), c.len())).collect();

    assert_eq!(before, after);
    assert!(second.committed.is_empty());
    assert_eq!(second.skipped.len(), 1);
}

#[test]
fn reregistered_metadata_exposes_committed_instances() {
    let mut registrar = AopRegistrar::new(logging_registry(&["audit"]), save_binding(&["audit"]), WeaveConfig::default());
    let ty = Arc::new(foo());

    registrar.on_metadata_registered(&mut ComponentMetadata::new(Arc::clone(&ty))).unwrap();
    let mut again = ComponentMetadata::new(ty);
    registrar.on_metadata_registered(&mut again).unwrap();

    let chain = registrar.interceptors().get(&key("App.Foo", &save())).unwrap();
    assert!(again.proxy_required());
    assert_eq!(again.interceptors().len(), 1);
    assert!(again.interceptors()[0].same_instance(&chain.links()[0]));
}

#[test]
fn equal_pointcuts_from_several_aspects_contribute_once() {
    let mut registrar = AopRegistrar::new(
        logging_registry(&["trace"]),
        BindingTable::new().bind_type("App.Foo", ["trace"]),
        WeaveConfig::default(),
    );
    let same_as_binding = MethodSignaturePattern::type_level(Depth::Unlimited)
        .with_access(WeaveConfig::default().type_level_access());
    let pointcut = PointCut::new(same_as_binding, ["trace"]).unwrap();
    registrar.register_aspect(AspectDescriptor::new(TargetSelector::parse("glob:App.*").unwrap(), vec![pointcut]).unwrap());

    registrar.on_metadata_registered(&mut ComponentMetadata::new(Arc::new(foo()))).unwrap();

    assert_eq!(chain_ids(&registrar, &key("App.Foo", &save())), vec!["trace"]);
}

#[test]
fn distinct_pointcuts_naming_one_advice_append_it_each_time() {
    let bindings = BindingTable::new()
        .bind_type("App.Foo", ["trace"])
        .bind_method("App.Foo", MethodBinding::new("Save", ["trace"]));
    let mut registrar = AopRegistrar::new(logging_registry(&["trace"]), bindings, WeaveConfig::default());
    let mut metadata = ComponentMetadata::new(Arc::new(foo()));

    registrar.on_metadata_registered(&mut metadata).unwrap();

    assert_eq!(chain_ids(&registrar, &key("App.Foo", &save())), vec!["trace", "trace"]);
    assert_eq!(metadata.interceptors().len(), 1);
}

#[test]
fn global_pattern_aspect_applies_to_matching_types() {
    let mut registrar = AopRegistrar::new(logging_registry(&["trace"]), BindingTable::new(), WeaveConfig::default());
    let pointcut = PointCut::new(MethodSignaturePattern::any().with_access(AccessMask::PUBLIC), ["trace"]).unwrap();
    registrar.register_aspect(AspectDescriptor::new(TargetSelector::parse("glob:App.F*").unwrap(), vec![pointcut]).unwrap());

    let mut foo_meta = ComponentMetadata::new(Arc::new(foo()));
    let mut bar_meta = ComponentMetadata::new(Arc::new(bar()));
    registrar.on_metadata_registered(&mut foo_meta).unwrap();
    registrar.on_metadata_registered(&mut bar_meta).unwrap();

    assert!(foo_meta.proxy_required());
    assert_eq!(foo_meta.intercepted_methods().len(), 2);
    assert!(!bar_meta.proxy_required());
}

#[test]
fn failing_selector_is_fatal_for_the_type() {
    let mut registrar = AopRegistrar::new(logging_registry(&["trace"]), BindingTable::new(), WeaveConfig::default());
    let selector = TargetSelector::predicate("flaky", |ty| {
        Err(SelectorError {
            selector: "flaky".into(),
            type_name: ty.full_name().into(),
            reason: "lookup failed".into(),
        })
    });
    let pointcut = PointCut::new(MethodSignaturePattern::any(), ["trace"]).unwrap();
    registrar.register_aspect(AspectDescriptor::new(selector, vec![pointcut]).unwrap());

    let mut metadata = ComponentMetadata::new(Arc::new(foo()));
    let err = registrar.on_metadata_registered(&mut metadata).unwrap_err();

    assert!(matches!(err, RegistrationError::Selector(_)));
    assert!(!metadata.proxy_required());
}
