//! Native toolchain discovery and build driver.
//!
//! Finds the newest installed compiler toolchain (or uses a configured
//! environment script), generates projects with the configured generator and
//! compiles them with the toolchain environment loaded in the same shell.

pub mod driver;
pub mod error;
pub mod locate;
pub mod version;

pub use driver::{BuildDriver, BuildTarget, BUILD_SCRIPT_NAME};
pub use error::BuildError;
pub use locate::{discover, locate, Toolchain};
pub use version::ToolchainVersion;
