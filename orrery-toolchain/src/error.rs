use std::path::PathBuf;

use orrery_core::CommandError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("No toolchain with an environment script found under {root}")]
    ToolchainNotFound { root: PathBuf },

    #[error("Configured toolchain script does not exist: {0}")]
    InitScriptMissing(PathBuf),

    #[error("Failed to prepare {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Project generation failed in {dir}: {source}")]
    Generate {
        dir: PathBuf,
        #[source]
        source: CommandError,
    },

    #[error("Build of '{target}' failed: {source}")]
    Compile {
        target: String,
        #[source]
        source: CommandError,
    },
}

impl BuildError {
    /// Raw output of the failing tool, when one ran.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            BuildError::Generate { source, .. } | BuildError::Compile { source, .. } => {
                source.diagnostic()
            }
            _ => None,
        }
    }
}
