//! Generator config integration tests
//!
//! Covers loading from disk (with and without per-user options), round
//! trips through the saved form, and inheritance from a project scope.

mod fixtures;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tulsigen::config::per_user_filename;
use tulsigen::{
    normalize_path_filters, BazelLocator, BuildLabel, ConfigError, GeneratorConfig, OptionSet,
    Parameter, ProjectScope, ProvenanceTier,
};

fn no_discovery() -> Option<PathBuf> {
    None
}

fn explicit() -> Option<&'static Path> {
    Some(Path::new("/explicit/bazel"))
}

// === Loading ===

#[test]
fn test_load_demo_fixture() {
    let config = GeneratorConfig::load(&fixtures::demo_config_path(), explicit()).unwrap();

    assert_eq!(config.project_name(), "Demo App");
    assert_eq!(config.default_filename(), "Demo_App.tulsigen");
    assert_eq!(config.xcode_project_filename(), "Demo_App.xcodeproj");
    assert_eq!(config.build_target_labels().len(), 2);
    assert_eq!(
        config.additional_file_paths(),
        Some(&["app/BUILD".to_string(), "lib/BUILD".to_string()][..])
    );
    assert_eq!(
        config
            .options()
            .target_value_for("GenerateRunfiles", "//app:AppTests"),
        Some("NO")
    );
    assert_eq!(
        config.bazel_url_parameter().source,
        ProvenanceTier::ExplicitlyProvided
    );
}

#[test]
fn test_load_missing_file() {
    let result = GeneratorConfig::load(Path::new("/nonexistent/Missing.tulsigen"), explicit());
    assert_eq!(result, Err(ConfigError::BadInputFilePath));
}

#[test]
fn test_load_legacy_filters() {
    let config = GeneratorConfig::load(&fixtures::legacy_config_path(), explicit()).unwrap();

    // The absolute filesystem path is dropped.
    assert_eq!(
        config.path_filters(),
        &BTreeSet::from([
            "app".to_string(),
            "lib/bazel-tulsi-includes/x/x/...".to_string()
        ])
    );
    assert_eq!(config.default_filename(), "Legacy_App.tulsigen");
}

#[test]
fn test_load_applies_per_user_options() {
    let (dir, config_path) = fixtures::scratch_copy("Demo.tulsigen");
    fs::write(
        dir.path().join(per_user_filename()),
        r#"{"tulsi_options": {"BazelPath": {"p": "/home/bazel"}, "GenerateRunfiles": {"p": "NO"}}}"#,
    )
    .unwrap();

    let config = GeneratorConfig::load(&config_path, None).unwrap();

    assert_eq!(config.bazel_url(), Path::new("/home/bazel"));
    assert_eq!(config.bazel_url_parameter().source, ProvenanceTier::FromOptions);
    // The overlay replaces the whole option entry, target values included.
    assert_eq!(config.options().value_for("GenerateRunfiles"), Some("NO"));
    assert_eq!(
        config
            .options()
            .target_value_for("GenerateRunfiles", "//app:AppTests"),
        Some("NO")
    );
    assert!(config.options().get("GenerateRunfiles").unwrap().targets.is_empty());
}

#[test]
fn test_load_unreadable_per_user_options() {
    let (dir, config_path) = fixtures::scratch_copy("Demo.tulsigen");
    // A directory exists at the per-user path but cannot be read as a file.
    fs::create_dir(dir.path().join(per_user_filename())).unwrap();

    let result = GeneratorConfig::load(&config_path, explicit());
    match result {
        Err(ConfigError::FailedToReadAdditionalOptionsData(detail)) => {
            assert!(detail.starts_with("Could not read file at path"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_load_uses_locator_fallback() {
    let (dir, config_path) = fixtures::scratch_copy("Demo.tulsigen");
    fs::create_dir(dir.path().join("tools")).unwrap();
    fs::write(dir.path().join("tools/bazel"), "#!/bin/sh\n").unwrap();

    let locator = BazelLocator::new(Some(dir.path())).with_search_path("");
    let config = GeneratorConfig::load_with_locator(&config_path, None, &locator).unwrap();

    assert_eq!(config.bazel_url(), dir.path().join("tools/bazel"));
    assert_eq!(config.bazel_url_parameter().source, ProvenanceTier::Fallback);
}

#[test]
fn test_load_does_not_treat_config_dir_as_workspace() {
    let (dir, config_path) = fixtures::scratch_copy("Demo.tulsigen");
    fs::create_dir(dir.path().join("tools")).unwrap();
    fs::write(dir.path().join("tools/bazel"), "#!/bin/sh\n").unwrap();

    // Whatever PATH holds, the wrapper next to the config is never picked.
    if let Ok(config) = GeneratorConfig::load(&config_path, None) {
        assert_ne!(config.bazel_url(), dir.path().join("tools/bazel"));
    }
}

// === Saving ===

#[test]
fn test_saved_form_is_canonical() {
    let original = fixtures::read_fixture(&fixtures::demo_config_path());
    let config = GeneratorConfig::load(&fixtures::demo_config_path(), explicit()).unwrap();

    let saved = config.save().unwrap();
    assert_eq!(String::from_utf8(saved).unwrap(), String::from_utf8(original).unwrap());
}

#[test]
fn test_save_is_deterministic() {
    let config = GeneratorConfig::load(&fixtures::legacy_config_path(), explicit()).unwrap();
    assert_eq!(config.save().unwrap(), config.save().unwrap());
    assert_eq!(
        config.save_per_user_settings().unwrap(),
        config.save_per_user_settings().unwrap()
    );
}

#[test]
fn test_per_user_split() {
    let config = GeneratorConfig::load(&fixtures::legacy_config_path(), explicit()).unwrap();

    let shareable = String::from_utf8(config.save().unwrap()).unwrap();
    assert!(!shareable.contains("BazelPath"));

    let per_user = config.save_per_user_settings().unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&per_user).unwrap();
    assert_eq!(value["tulsi_options"]["BazelPath"]["p"], "/usr/local/bin/bazel");
}

#[test]
fn test_round_trip() {
    let config = GeneratorConfig::new(
        "Round Trip",
        vec![BuildLabel::new("//z:z"), BuildLabel::new("//a:a")],
        BTreeSet::from(["a".to_string(), "z/sub".to_string()]),
        Some(vec!["z/BUILD".to_string(), "a/BUILD".to_string()]),
        OptionSet::new()
            .with_project_value("IncludeBuildSources", "YES")
            .with_target_value("BazelBuildOptionsDebug", "//a:a", "--x"),
        Parameter::new(PathBuf::from("/rt/bazel"), ProvenanceTier::Fallback),
    )
    .unwrap();

    let saved = config.save().unwrap();
    let decoded = GeneratorConfig::from_json_with_locator(
        &saved,
        None,
        Some(config.bazel_url()),
        no_discovery,
    )
    .unwrap();

    assert_eq!(decoded.project_name(), config.project_name());
    let labels = |c: &GeneratorConfig| -> BTreeSet<BuildLabel> {
        c.build_target_labels().iter().cloned().collect()
    };
    assert_eq!(labels(&decoded), labels(&config));
    assert_eq!(decoded.path_filters(), config.path_filters());
    assert_eq!(decoded.additional_file_paths(), config.additional_file_paths());
    assert_eq!(decoded.options(), config.options());
    assert_eq!(decoded.bazel_url(), config.bazel_url());
}

#[test]
fn test_per_user_none_without_per_user_options() {
    let config = GeneratorConfig::load(&fixtures::demo_config_path(), explicit()).unwrap();
    assert_eq!(config.save_per_user_settings().unwrap(), None);
}

// === Normalization ===

#[test]
fn test_normalize_legacy_example() {
    let filters = normalize_path_filters(["//foo/bar:target", "//foo/bar/_tulsi-includes/x/x/"]);
    assert_eq!(
        filters,
        BTreeSet::from([
            "foo/bar".to_string(),
            "foo/bar/bazel-tulsi-includes/x/x/".to_string()
        ])
    );
    assert_eq!(normalize_path_filters(&filters), filters);
}

#[test]
fn test_appended_filters_saved_sorted() {
    let config = GeneratorConfig::load(&fixtures::demo_config_path(), explicit()).unwrap();
    let extended = config.appending_path_filters(normalize_path_filters(["//aaa:lib"]));

    let value: serde_json::Value = serde_json::from_slice(&extended.save().unwrap()).unwrap();
    assert_eq!(
        value["sourceFilters"],
        serde_json::json!(["aaa", "app", "lib/bazel-tulsi-includes/x/x/..."])
    );
}

// === Inheritance ===

#[test]
fn test_inheritance_from_project() {
    let config = GeneratorConfig::load(&fixtures::demo_config_path(), explicit()).unwrap();
    let project = ProjectScope::new(
        OptionSet::new()
            .with_project_value("BazelBuildOptionsDebug", "--project-flag")
            .with_project_value("IncludeBuildSources", "YES"),
        "/project/bazel",
    );

    let resolved = config.resolving_inherited_settings(&project);

    assert_eq!(resolved.bazel_url(), Path::new("/explicit/bazel"));
    assert_eq!(
        resolved.options().value_for("BazelBuildOptionsDebug"),
        Some("--project-flag --config=dbg")
    );
    assert_eq!(resolved.options().value_for("IncludeBuildSources"), Some("YES"));
    assert!(resolved.options().is_inherited("IncludeBuildSources"));

    // Inherited values stay out of the saved document.
    let saved: serde_json::Value = serde_json::from_slice(&resolved.save().unwrap()).unwrap();
    assert!(saved["tulsi_options"].get("IncludeBuildSources").is_none());
    // Expanded values are saved as written.
    assert_eq!(
        saved["tulsi_options"]["BazelBuildOptionsDebug"]["p"],
        "$(inherited) --config=dbg"
    );
}
