use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use crate::{ConfigError, DependencySpec, WorkspaceConfig, CONFIG_FILE_NAME};

#[test]
fn test_defaults_describe_stock_workspace() {
    let config = WorkspaceConfig::default();
    let names: Vec<_> = config.dependencies.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["freeglut", "cjson"]);
    assert_eq!(config.dependencies[0].branch.as_deref(), Some("v3.6.0"));
    assert_eq!(config.project.name, "solar_system");
    assert_eq!(config.project.configuration, "Release");
    assert_eq!(config.project.arch, "x64");
    assert_eq!(config.assets.source_extension, "jpg");
    assert_eq!(config.assets.target_extension, "bmp");
    assert!(config.toolchain.init_script.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_document_is_default() {
    assert_eq!(WorkspaceConfig::parse("").unwrap(), WorkspaceConfig::default());
    assert_eq!(WorkspaceConfig::parse("  \n").unwrap(), WorkspaceConfig::default());
}

#[test]
fn test_partial_document_keeps_other_defaults() {
    let yaml = r#"
project:
  configuration: Debug
dependencies:
  - name: glm
    repository: https://github.com/g-truc/glm.git
    revision: "1.0.1"
    generator_args: ["-DGLM_BUILD_TESTS=OFF"]
assets:
  target_extension: png
"#;
    let config = WorkspaceConfig::parse(yaml).unwrap();
    assert_eq!(config.project.configuration, "Debug");
    assert_eq!(config.project.name, "solar_system");
    assert_eq!(config.dependencies.len(), 1);
    assert_eq!(config.dependencies[0].generator_args, vec!["-DGLM_BUILD_TESTS=OFF"]);
    assert!(config.dependencies[0].branch.is_none());
    assert_eq!(config.assets.source_extension, "jpg");
    assert_eq!(config.assets.target_extension, "png");
    assert_eq!(config.layout.build_dir, "build");
}

#[test]
fn test_explicit_empty_dependency_list() {
    let config = WorkspaceConfig::parse("dependencies: []\n").unwrap();
    assert!(config.dependencies.is_empty());
}

#[test]
fn test_load_prefers_root_file() {
    let temp = tempdir().unwrap();
    fs::write(
        temp.path().join(CONFIG_FILE_NAME),
        "toolchain:\n  init_script: /opt/msvc/vcvarsall.bat\n",
    )
    .unwrap();

    let config = WorkspaceConfig::load(temp.path(), None).unwrap();
    assert_eq!(
        config.toolchain.init_script,
        Some(PathBuf::from("/opt/msvc/vcvarsall.bat"))
    );
    assert_eq!(config.source_path, Some(temp.path().join(CONFIG_FILE_NAME)));
}

#[test]
fn test_load_without_file_uses_defaults() {
    let temp = tempdir().unwrap();
    let config = WorkspaceConfig::load(temp.path(), None).unwrap();
    assert!(config.source_path.is_none());
    assert_eq!(config.dependencies.len(), 2);
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let temp = tempdir().unwrap();
    let missing = temp.path().join("nope.yaml");
    assert!(matches!(
        WorkspaceConfig::load(temp.path(), Some(&missing)),
        Err(ConfigError::NotFound(p)) if p == missing
    ));
}

#[test]
fn test_malformed_yaml_reports_path() {
    let temp = tempdir().unwrap();
    let path = temp.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "dependencies: {name: [").unwrap();
    let err = WorkspaceConfig::load(temp.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains(CONFIG_FILE_NAME));
}

#[test]
fn test_duplicate_dependency_rejected() {
    let mut config = WorkspaceConfig::default();
    config
        .dependencies
        .push(DependencySpec::new("cjson", "https://example.com/cjson.git", "abc"));
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("more than once"));
}

#[test]
fn test_path_like_dependency_name_rejected() {
    let mut config = WorkspaceConfig::default();
    config.dependencies = vec![DependencySpec::new("../escape", "https://x/y.git", "abc")];
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_identical_extensions_rejected() {
    let mut config = WorkspaceConfig::default();
    config.assets.target_extension = "JPG".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}
