//! Error types for hearth-envs

use thiserror::Error;

/// Result type alias using hearth-envs's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Environment provisioning error types
#[derive(Error, Debug)]
pub enum Error {
    /// Environment already exists
    #[error("Environment already exists at: {path}")]
    AlreadyExists { path: String },

    /// Required executable is not on PATH
    #[error("Required tool '{tool}' is not installed or not on PATH")]
    ToolNotInstalled { tool: String },

    /// Spawned process exited unsuccessfully
    #[error("Command '{command}' failed with {}", describe_exit(.code))]
    CommandFailed { command: String, code: Option<i32> },

    /// Operation requires an environment that has not been created
    #[error("Environment at {path} has not been created")]
    NotCreated { path: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an already exists error
    pub fn already_exists(path: impl Into<String>) -> Self {
        Self::AlreadyExists { path: path.into() }
    }

    /// Create a tool not installed error
    pub fn tool_not_installed(tool: impl Into<String>) -> Self {
        Self::ToolNotInstalled { tool: tool.into() }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, code: Option<i32>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            code,
        }
    }

    /// Create a not created error
    pub fn not_created(path: impl Into<String>) -> Self {
        Self::NotCreated { path: path.into() }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_message_includes_code() {
        let err = Error::command_failed("python3 -m venv .venv", Some(2));
        assert_eq!(
            err.to_string(),
            "Command 'python3 -m venv .venv' failed with exit code 2"
        );
    }

    #[test]
    fn test_command_failed_message_without_code() {
        let err = Error::command_failed("flit install", None);
        assert!(err.to_string().contains("terminated by signal"));
    }
}
