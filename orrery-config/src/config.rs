//! Workspace configuration schema.
//!
//! Every field has a default, so an empty or missing `orrery.yaml` describes
//! the stock solar-system workspace.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root structure of `orrery.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkspaceConfig {
    /// The renderer project built from the workspace root
    #[serde(default)]
    pub project: ProjectSettings,

    /// Third-party source dependencies, provisioned in declaration order
    #[serde(default = "default_dependencies")]
    pub dependencies: Vec<DependencySpec>,

    /// Native toolchain discovery and build commands
    #[serde(default)]
    pub toolchain: ToolchainSettings,

    /// Texture conversion settings
    #[serde(default)]
    pub assets: AssetSettings,

    /// Directory names under the workspace root
    #[serde(default)]
    pub layout: LayoutSettings,

    /// File this configuration was read from, if any
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            project: ProjectSettings::default(),
            dependencies: default_dependencies(),
            toolchain: ToolchainSettings::default(),
            assets: AssetSettings::default(),
            layout: LayoutSettings::default(),
            source_path: None,
        }
    }
}

/// A third-party source dependency pinned to an exact revision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DependencySpec {
    pub name: String,
    pub repository: String,
    /// Commit or tag checked out after cloning
    pub revision: String,
    /// Branch or tag passed to `git clone --branch`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Extra arguments appended to the project generator invocation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generator_args: Vec<String>,
}

impl DependencySpec {
    pub fn new(
        name: impl Into<String>,
        repository: impl Into<String>,
        revision: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            repository: repository.into(),
            revision: revision.into(),
            branch: None,
            generator_args: Vec::new(),
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }
}

fn default_dependencies() -> Vec<DependencySpec> {
    vec![
        DependencySpec::new(
            "freeglut",
            "https://github.com/freeglut/freeglut.git",
            "96c4b993aab2c1139d940aa6fc9d8955d4e019fa",
        )
        .with_branch("v3.6.0"),
        DependencySpec::new("cjson", "https://github.com/DaveGamble/cJSON.git", "v1.7.18"),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectSettings {
    /// Project and build target name; also the renderer executable's base name
    #[serde(default = "default_project_name")]
    pub name: String,

    #[serde(default = "default_configuration")]
    pub configuration: String,

    #[serde(default = "default_arch")]
    pub arch: String,
}

fn default_project_name() -> String {
    "solar_system".to_string()
}

fn default_configuration() -> String {
    "Release".to_string()
}

fn default_arch() -> String {
    "x64".to_string()
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            name: default_project_name(),
            configuration: default_configuration(),
            arch: default_arch(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolchainSettings {
    /// Directory holding one subdirectory per installed toolchain version
    #[serde(default = "default_install_root")]
    pub install_root: PathBuf,

    /// Editions searched inside a version directory, in preference order
    #[serde(default = "default_editions")]
    pub editions: Vec<String>,

    /// Explicit environment initialization script; skips discovery when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_script: Option<PathBuf>,

    #[serde(default = "default_generator")]
    pub generator: String,

    #[serde(default = "default_builder")]
    pub builder: String,
}

fn default_install_root() -> PathBuf {
    PathBuf::from(r"C:\Program Files\Microsoft Visual Studio")
}

fn default_editions() -> Vec<String> {
    ["Community", "Professional", "Enterprise", "BuildTools"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_generator() -> String {
    "cmake".to_string()
}

fn default_builder() -> String {
    "msbuild".to_string()
}

impl Default for ToolchainSettings {
    fn default() -> Self {
        Self {
            install_root: default_install_root(),
            editions: default_editions(),
            init_script: None,
            generator: default_generator(),
            builder: default_builder(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetSettings {
    /// Extension of source images, without the dot
    #[serde(default = "default_source_extension")]
    pub source_extension: String,

    /// Extension the renderer loads, without the dot
    #[serde(default = "default_target_extension")]
    pub target_extension: String,

    /// Constants file passed to the renderer, relative to the data directory
    #[serde(default = "default_constants_file")]
    pub constants_file: String,
}

fn default_source_extension() -> String {
    "jpg".to_string()
}

fn default_target_extension() -> String {
    "bmp".to_string()
}

fn default_constants_file() -> String {
    "constants.json".to_string()
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            source_extension: default_source_extension(),
            target_extension: default_target_extension(),
            constants_file: default_constants_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LayoutSettings {
    #[serde(default = "default_dependencies_dir")]
    pub dependencies_dir: String,

    #[serde(default = "default_build_dir")]
    pub build_dir: String,

    #[serde(default = "default_editor_dir")]
    pub editor_dir: String,

    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_dependencies_dir() -> String {
    "dependencies".to_string()
}

fn default_build_dir() -> String {
    "build".to_string()
}

fn default_editor_dir() -> String {
    ".vscode".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            dependencies_dir: default_dependencies_dir(),
            build_dir: default_build_dir(),
            editor_dir: default_editor_dir(),
            data_dir: default_data_dir(),
        }
    }
}
