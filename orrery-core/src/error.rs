use thiserror::Error;

/// Failure of an external tool invocation.
///
/// Spawn failures and non-zero exits are kept apart so callers can tell a
/// missing tool from a tool that ran and rejected its input.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Failed to start command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command failed with exit code {code:?}: {command}\n\nOutput (last 50 lines):\n{diagnostic}")]
    Failed {
        command: String,
        code: Option<i32>,
        diagnostic: String,
    },
}

impl CommandError {
    /// The raw diagnostic text produced by the tool, if it ran at all.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            CommandError::Spawn { .. } => None,
            CommandError::Failed { diagnostic, .. } => Some(diagnostic),
        }
    }
}

/// Number of trailing output lines kept as a failure diagnostic.
pub const TAIL_LINES: usize = 50;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_command_keeps_diagnostic() {
        let err = CommandError::Failed {
            command: "git clone x".to_string(),
            code: Some(128),
            diagnostic: "fatal: repository not found".to_string(),
        };
        assert_eq!(err.diagnostic(), Some("fatal: repository not found"));
        let rendered = err.to_string();
        assert!(rendered.contains("git clone x"));
        assert!(rendered.contains("Some(128)"));
        assert!(rendered.contains("fatal: repository not found"));
    }

    #[test]
    fn test_spawn_error_has_no_diagnostic() {
        let err = CommandError::Spawn {
            command: "cmake ..".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.diagnostic().is_none());
        assert!(err.to_string().contains("cmake .."));
    }
}
