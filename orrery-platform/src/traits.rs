//! Core traits for platform abstraction.
//!
//! Each recognized platform implements [`PlatformProvider`] so the pipeline
//! never branches on operating system names itself.

/// Platform-specific knowledge the pipeline needs to build and run.
pub trait PlatformProvider: Send + Sync {
    /// Operating system family name ("Windows", "Linux", "Darwin")
    fn name(&self) -> &'static str;

    /// Whether the native build and run steps are implemented here.
    /// Platforms returning false are accepted but skip those steps.
    fn supports_native_build(&self) -> bool;

    /// Get the correct executable name for the platform (adds .exe on Windows)
    fn executable_name(&self, base: &str) -> String;

    /// Shell program and leading arguments used to run a chained command line
    fn shell_command(&self) -> (&'static str, Vec<&'static str>);

    /// Name of the project file the generator produces for `target`
    fn project_file_name(&self, target: &str) -> String;
}
