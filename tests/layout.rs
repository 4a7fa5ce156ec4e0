#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Integration tests for binding and validating install layouts on disk.

mod common;

use std::path::PathBuf;

use toolstrap::error::LayoutError;
use toolstrap::layout::app::{
    APP_EXECUTABLE, APP_ROOT, WRAPPER_CONFIG_DIR, WRAPPER_SCRIPT, app_spec, app_spec_vars,
};
use toolstrap::layout::{LayoutSpec, Mode, NodeSpec, SpecDir, TemplateVars};
use toolstrap::platform::Platform;

fn godel_spec() -> LayoutSpec {
    let tree = NodeSpec::dir("godel-{version}").child(
        NodeSpec::dir("bin").child(
            NodeSpec::dir("{os}-{arch}").child(NodeSpec::file("godel").alias("executable")),
        ),
    );
    LayoutSpec::new(tree, &["executable"]).unwrap()
}

fn godel_vars() -> TemplateVars {
    let platform = Platform::detect();
    TemplateVars::new()
        .with("version", "0.0.1")
        .with("os", platform.os.to_string())
        .with("arch", platform.arch.to_string())
}

#[test]
fn validated_root_resolves_executable() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("godel-0.0.1");
    let exe = root
        .join("bin")
        .join(Platform::detect().token())
        .join("godel");
    common::touch(&exe);

    let dir = SpecDir::bind(&root, &godel_spec(), &godel_vars(), Mode::Validate).unwrap();

    assert_eq!(dir.path("executable"), exe);
    assert_eq!(dir.root(), root);
}

#[test]
fn wrong_root_name_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("testRoot");
    std::fs::create_dir(&root).unwrap();

    for mode in [Mode::Validate, Mode::SpecOnly] {
        let err = SpecDir::bind(&root, &godel_spec(), &godel_vars(), mode).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("{} is not a path to godel-0.0.1", root.display())
        );
    }

    let err = SpecDir::bind("testRoot", &godel_spec(), &godel_vars(), Mode::SpecOnly).unwrap_err();
    assert_eq!(err.to_string(), "testRoot is not a path to godel-0.0.1");
}

#[test]
fn missing_executable_names_first_missing_path() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("godel-0.0.1");
    std::fs::create_dir_all(root.join("bin")).unwrap();

    let err = SpecDir::bind(&root, &godel_spec(), &godel_vars(), Mode::Validate).unwrap_err();

    let expected = PathBuf::from("godel-0.0.1")
        .join("bin")
        .join(Platform::detect().token());
    assert!(matches!(&err, LayoutError::MissingPath { path } if *path == expected));
    assert_eq!(err.to_string(), format!("{} does not exist", expected.display()));
}

#[test]
fn spec_only_does_not_touch_disk() {
    let dir = SpecDir::bind(
        "/nonexistent/godel-0.0.1",
        &godel_spec(),
        &godel_vars(),
        Mode::SpecOnly,
    )
    .unwrap();
    assert!(dir.path("executable").starts_with("/nonexistent/godel-0.0.1/bin"));
    assert_eq!(dir.mode(), Mode::SpecOnly);
}

#[test]
fn full_app_install_validates_with_wrapper() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("godel-1.2.3");
    let platform = Platform::detect();
    for rel in [
        format!("bin/{}/godel", platform.token()),
        "wrapper/godelw".to_string(),
        "wrapper/godel/bin/godelw".to_string(),
    ] {
        common::touch(&root.join(rel));
    }
    std::fs::create_dir_all(root.join("wrapper/godel/config")).unwrap();

    let spec = app_spec().unwrap();
    let dir = SpecDir::bind(&root, &spec, &app_spec_vars("godel", "1.2.3"), Mode::Validate)
        .unwrap();

    assert_eq!(dir.path(APP_ROOT), root);
    assert_eq!(
        dir.path(APP_EXECUTABLE),
        root.join("bin").join(platform.token()).join("godel")
    );
    assert_eq!(dir.path(WRAPPER_SCRIPT), root.join("wrapper/godelw"));
    assert_eq!(dir.path(WRAPPER_CONFIG_DIR), root.join("wrapper/godel/config"));
}

#[test]
fn incomplete_wrapper_fails_validation() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("godel-1.2.3");
    common::touch(&root.join("bin").join(Platform::detect().token()).join("godel"));
    common::touch(&root.join("wrapper/godelw"));

    let err = SpecDir::bind(
        &root,
        &app_spec().unwrap(),
        &app_spec_vars("godel", "1.2.3"),
        Mode::Validate,
    )
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        format!(
            "{} does not exist",
            PathBuf::from("godel-1.2.3/wrapper/godel").display()
        )
    );
}

#[test]
fn fresh_install_location_is_computed_under_parent() {
    let tmp = tempfile::tempdir().unwrap();
    let spec = app_spec().unwrap();
    let dir = SpecDir::under(tmp.path(), &spec, &app_spec_vars("godel", "2.0.0")).unwrap();

    assert_eq!(dir.root(), tmp.path().join("godel-2.0.0"));
    assert!(!dir.root().exists());
}
