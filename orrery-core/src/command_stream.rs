// Standard library
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

// External crates
use duct::cmd;
use tracing::debug;
use which::which;

// Internal imports
use crate::error::{CommandError, TAIL_LINES};

/// A fully described external process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    inherit_stdio: bool,
}

impl CommandSpec {
    /// `program` is a bare tool name resolved on `PATH`, or a path.
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            cwd: None,
            inherit_stdio: false,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Let the child write straight to this process's stdout/stderr instead
    /// of capturing. Used for the interactive renderer.
    pub fn inherit_stdio(mut self) -> Self {
        self.inherit_stdio = true;
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub fn inherits_stdio(&self) -> bool {
        self.inherit_stdio
    }

    /// Human readable command line, used in logs and diagnostics.
    pub fn display(&self) -> String {
        let mut line = self.program.to_string_lossy().into_owned();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Result of a process that was started and ran to completion.
///
/// A non-zero exit is NOT an error at this level: the caller decides with
/// [`CommandOutcome::check`] whether it should propagate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub command: String,
    pub code: Option<i32>,
    pub output: String,
}

impl CommandOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turn a non-zero exit into a [`CommandError::Failed`] carrying the
    /// tail of the captured output.
    pub fn check(self) -> Result<Self, CommandError> {
        if self.success() {
            return Ok(self);
        }
        Err(CommandError::Failed {
            diagnostic: output_tail(&self.output, TAIL_LINES),
            command: self.command,
            code: self.code,
        })
    }
}

/// Seam between the pipeline and the external tools it drives.
pub trait CommandRunner {
    /// Run the command to completion. `Err` only when the process could not
    /// be started; exit status is reported through the outcome.
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutcome, CommandError>;
}

/// Runs commands on the host through `duct`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutcome, CommandError> {
        let command = spec.display();
        debug!(command = %command, cwd = ?spec.cwd(), "running external command");

        let mut expression = cmd(spec.program(), spec.arguments()).unchecked();
        if let Some(dir) = spec.cwd() {
            expression = expression.dir(dir);
        }
        if !spec.inherits_stdio() {
            expression = expression.stderr_to_stdout().stdout_capture();
        }

        let output = expression.run().map_err(|source| CommandError::Spawn {
            command: command.clone(),
            source,
        })?;

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        for line in text.lines() {
            debug!("{}", line);
        }

        Ok(CommandOutcome {
            command,
            code: output.status.code(),
            output: text,
        })
    }
}

/// Last `lines` lines of `output`, in their original order.
pub fn output_tail(output: &str, lines: usize) -> String {
    let tail: Vec<&str> = output.lines().rev().take(lines).collect();
    tail.into_iter().rev().collect::<Vec<_>>().join("\n")
}

/// Checks if a command-line tool is available in the system's PATH.
pub fn is_tool_installed(tool_name: &str) -> bool {
    which(tool_name).is_ok()
}

/// In-process stand-in for [`SystemRunner`] that records every invocation.
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing {
    use super::*;
    use std::cell::RefCell;

    type Handler = Box<dyn Fn(&CommandSpec) -> Result<CommandOutcome, CommandError>>;

    pub struct RecordingRunner {
        calls: RefCell<Vec<CommandSpec>>,
        handler: Handler,
    }

    impl RecordingRunner {
        /// Every command succeeds with empty output.
        pub fn succeeding() -> Self {
            Self::with_handler(|spec| Ok(RecordingRunner::exit(spec, 0, "")))
        }

        pub fn with_handler<F>(handler: F) -> Self
        where
            F: Fn(&CommandSpec) -> Result<CommandOutcome, CommandError> + 'static,
        {
            Self {
                calls: RefCell::new(Vec::new()),
                handler: Box::new(handler),
            }
        }

        /// Build an outcome for `spec` with the given exit code and output.
        pub fn exit(spec: &CommandSpec, code: i32, output: &str) -> CommandOutcome {
            CommandOutcome {
                command: spec.display(),
                code: Some(code),
                output: output.to_string(),
            }
        }

        pub fn calls(&self) -> Vec<CommandSpec> {
            self.calls.borrow().clone()
        }

        /// Recorded command lines, for compact assertions.
        pub fn command_lines(&self) -> Vec<String> {
            self.calls.borrow().iter().map(CommandSpec::display).collect()
        }

        pub fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, spec: &CommandSpec) -> Result<CommandOutcome, CommandError> {
            self.calls.borrow_mut().push(spec.clone());
            (self.handler)(spec)
        }
    }
}
