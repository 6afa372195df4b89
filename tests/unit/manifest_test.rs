//! Tests for loading manifests and analysing them end to end

use aspectweave::adapters::toml::{ManifestError, load_paths};
use aspectweave::analysis::analyze;
use aspectweave::core::models::{Depth, RegistrationWarning};

use crate::common::{FOO_MANIFEST, TestManifests};

#[test]
fn foo_manifest_intercepts_save_only() {
    let manifests = TestManifests::new();
    let path = manifests.add("app.weave.toml", FOO_MANIFEST);

    let (result, table) = analyze(load_paths(&[path]).unwrap()).unwrap();

    assert!(result.passed);
    assert_eq!(result.components_analyzed, 2);
    assert_eq!(result.proxied, 1);
    assert_eq!(table.len(), 1);

    let foo = &result.components[0];
    assert_eq!(foo.implementation, "App.Foo");
    assert!(foo.proxy_required);
    assert_eq!(foo.methods.len(), 1);
    assert_eq!(foo.methods[0].method, "Save(System.Int32)");
    assert_eq!(foo.methods[0].chain, vec!["audit"]);

    let bar = &result.components[1];
    assert!(!bar.proxy_required);
    assert!(bar.methods.is_empty());
}

#[test]
fn manifests_in_a_directory_are_merged() {
    let manifests = TestManifests::new();
    manifests.add("types/app.weave.toml", FOO_MANIFEST);
    manifests.add(
        "aspects.weave.toml",
        r#"
[weaving]
type_level_depth = 0

[[aspect]]
target = "regex:^App\\.(Foo|Bar)$"

[[aspect.pointcut]]
access = ["public"]
advices = ["trace"]

[[advice]]
id = "trace"
kind = "logging"
"#,
    );

    let model = load_paths(&[manifests.path().to_path_buf()]).unwrap();
    assert_eq!(model.config.type_level_depth(), Depth::Levels(0));

    let (result, _) = analyze(model).unwrap();
    let foo = &result.components[0];
    let save = foo.methods.iter().find(|m| m.method == "Save(System.Int32)").unwrap();
    assert_eq!(save.chain, vec!["trace", "audit"]);
    assert!(result.components[1].proxy_required);
}

#[test]
fn undeclared_advice_is_a_warning() {
    let manifests = TestManifests::new();
    let path = manifests.add("app.weave.toml", &FOO_MANIFEST.replace("id = \"audit\"", "id = \"other\""));

    let (result, table) = analyze(load_paths(&[path]).unwrap()).unwrap();

    assert!(!result.passed);
    assert_eq!(result.warning_count, 1);
    assert!(matches!(
        &result.components[0].warnings[0],
        RegistrationWarning::AdviceUnavailable { advice, .. } if advice.as_str() == "audit"
    ));
    assert!(table.is_empty());
}

#[test]
fn dangling_component_is_rejected() {
    let manifests = TestManifests::new();
    let path = manifests.add("bad.weave.toml", "[[component]]\nimplementation = \"App.Nowhere\"");

    let err = load_paths(&[path]).unwrap_err();
    assert!(matches!(err, ManifestError::UnknownType { .. }));
}

#[test]
fn malformed_toml_is_rejected() {
    let manifests = TestManifests::new();
    let path = manifests.add("bad.weave.toml", "[[type]\nname = 1");

    let err = load_paths(&[path]).unwrap_err();
    assert!(matches!(err, ManifestError::Parse { .. }));
}
