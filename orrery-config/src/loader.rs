// Standard library imports
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

// External crate imports
use thiserror::Error;
use tracing::debug;

// Internal imports
use crate::config::WorkspaceConfig;

/// Default configuration file name, looked up in the workspace root.
pub const CONFIG_FILE_NAME: &str = "orrery.yaml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl WorkspaceConfig {
    /// Load the workspace configuration.
    ///
    /// An explicit path must exist. Without one, `<root>/orrery.yaml` is used
    /// when present and the built-in defaults otherwise.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match explicit {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Self::load_file(path)?,
            None => {
                let local = root.join(CONFIG_FILE_NAME);
                if local.is_file() {
                    Self::load_file(&local)?
                } else {
                    debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, root.display());
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading config from: {}", path.display());
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse YAML text. An empty document yields the defaults.
    pub fn parse(contents: &str) -> Result<Self, serde_yaml_ng::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(contents)
    }

    /// Reject configurations that would make paths ambiguous.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for dep in &self.dependencies {
            if dep.name.trim().is_empty() {
                return Err(ConfigError::Invalid("dependency with empty name".to_string()));
            }
            if dep.name.contains(['/', '\\']) || dep.name == "." || dep.name == ".." {
                return Err(ConfigError::Invalid(format!(
                    "dependency name '{}' must be a plain directory name",
                    dep.name
                )));
            }
            if !seen.insert(dep.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "dependency '{}' is declared more than once",
                    dep.name
                )));
            }
            if dep.repository.trim().is_empty() || dep.revision.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "dependency '{}' needs both a repository and a revision",
                    dep.name
                )));
            }
        }

        let assets = &self.assets;
        if assets.source_extension.is_empty() || assets.target_extension.is_empty() {
            return Err(ConfigError::Invalid(
                "asset extensions must not be empty".to_string(),
            ));
        }
        if assets
            .source_extension
            .eq_ignore_ascii_case(&assets.target_extension)
        {
            return Err(ConfigError::Invalid(format!(
                "source and target extension are both '{}'",
                assets.source_extension
            )));
        }
        if self.project.name.trim().is_empty() {
            return Err(ConfigError::Invalid("project name must not be empty".to_string()));
        }
        Ok(())
    }
}
