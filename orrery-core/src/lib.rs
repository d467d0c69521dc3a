//! Foundation crate for the orrery workspace tool.
//!
//! Holds the pieces every other crate leans on: running external tools,
//! probing and clearing the workspace filesystem, and console output macros.

pub mod command_stream;
pub mod error;
pub mod file_system;
pub mod output_macros;

pub use command_stream::{CommandOutcome, CommandRunner, CommandSpec, SystemRunner};
pub use error::{CommandError, TAIL_LINES};
