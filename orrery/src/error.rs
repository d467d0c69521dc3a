use std::path::PathBuf;

use orrery_config::ConfigError;
use orrery_core::CommandError;
use orrery_platform::PlatformError;
use orrery_provision::ProvisionError;
use orrery_toolchain::BuildError;
use orrery_workspace::ResetError;
use thiserror::Error;

/// Every failure that ends a pipeline run with exit code 1.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Cannot determine the current directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Reset(#[from] ResetError),

    #[error(transparent)]
    Provision(#[from] ProvisionError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("Renderer binary not found at {0}")]
    BinaryMissing(PathBuf),

    #[error("No planetary system found under {0}")]
    NoSystem(PathBuf),

    #[error("Renderer exited with an error: {0}")]
    Run(#[source] CommandError),
}

impl AppError {
    /// Raw output of the external tool behind this error, if any.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            AppError::Provision(e) => e.diagnostic(),
            AppError::Build(e) => e.diagnostic(),
            AppError::Run(e) => e.diagnostic(),
            _ => None,
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
