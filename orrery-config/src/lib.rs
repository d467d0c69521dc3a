//! Workspace configuration for orrery.
//!
//! Loads `orrery.yaml` from the workspace root (every field optional) and
//! derives the fixed set of workspace paths the pipeline operates on.

pub mod config;
pub mod loader;
pub mod paths;

#[cfg(test)]
mod config_tests;

pub use config::{
    AssetSettings, DependencySpec, LayoutSettings, ProjectSettings, ToolchainSettings,
    WorkspaceConfig,
};
pub use loader::{ConfigError, CONFIG_FILE_NAME};
pub use paths::WorkspacePaths;
