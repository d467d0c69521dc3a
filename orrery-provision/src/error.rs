use std::path::PathBuf;

use orrery_core::CommandError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Filesystem error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to clone '{name}': {source}")]
    Clone {
        name: String,
        #[source]
        source: CommandError,
    },

    #[error("Failed to check out {revision} in '{name}': {source}")]
    Checkout {
        name: String,
        revision: String,
        #[source]
        source: CommandError,
    },

    #[error("Failed to generate the project for '{name}': {source}")]
    Configure {
        name: String,
        #[source]
        source: CommandError,
    },

    #[error("Status record {path} is unreadable ({source}); reset the dependency cache to recover")]
    StateParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write status record {path}: {source}")]
    StateWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProvisionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProvisionError::Io {
            path: path.into(),
            source,
        }
    }

    /// Output tail of the version-control or generator tool, when one ran.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            ProvisionError::Clone { source, .. }
            | ProvisionError::Checkout { source, .. }
            | ProvisionError::Configure { source, .. } => source.diagnostic(),
            _ => None,
        }
    }
}
