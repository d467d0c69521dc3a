//! Workspace orchestration for the solar system renderer.
//!
//! One invocation walks a fixed pipeline: optional reset, texture conversion,
//! dependency provisioning, platform detection, and on Windows the dependency
//! build, project build and renderer launch.

pub mod cli;
pub mod error;
pub mod orchestrator;

use std::env;

use orrery_config::WorkspaceConfig;
use orrery_core::SystemRunner;

pub use cli::Args;
pub use error::{AppError, AppResult};
pub use orchestrator::{Actions, Pipeline, PipelineOutcome};

/// Load the workspace configuration and run the pipeline against the host.
pub fn run(args: &Args) -> AppResult<PipelineOutcome> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => env::current_dir().map_err(AppError::WorkingDirectory)?,
    };
    let config = WorkspaceConfig::load(&root, args.config.as_deref())?;
    tracing::debug!(root = %root.display(), config = ?config.source_path, "workspace loaded");

    let runner = SystemRunner;
    Pipeline::new(&runner, root, config).execute(&args.actions())
}
