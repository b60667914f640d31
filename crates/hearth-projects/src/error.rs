//! Error types for hearth-projects

use thiserror::Error;

/// Result type alias using hearth-projects's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Project management error types
#[derive(Error, Debug)]
pub enum Error {
    /// Project already exists
    #[error("Project already exists at: {path}")]
    ProjectExists { path: String },

    /// Project not found
    #[error("Project not found: {name}")]
    ProjectNotFound { name: String },

    /// Registry returned a non-success status
    #[error("Registry request to {url} failed with status {status}")]
    RegistryRequest { status: u16, url: String },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Clone failed
    #[error("Failed to clone repository: {message}")]
    CloneFailed { message: String },

    /// Git operation failed
    #[error("Git operation failed: {message}")]
    GitOperation { message: String },

    /// Required executable is not on PATH
    #[error("Required tool '{tool}' is not installed or not on PATH")]
    ToolNotInstalled { tool: String },

    /// Scaffolding tool exited unsuccessfully
    #[error("Scaffolding failed: {message}")]
    Scaffold { message: String },

    /// Mutually exclusive or otherwise unusable arguments
    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// Interactive prompt failed
    #[error("Prompt failed: {message}")]
    Prompt { message: String },

    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] hearth_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a project exists error
    pub fn project_exists(path: impl Into<String>) -> Self {
        Self::ProjectExists { path: path.into() }
    }

    /// Create a project not found error
    pub fn project_not_found(name: impl Into<String>) -> Self {
        Self::ProjectNotFound { name: name.into() }
    }

    /// Create a registry request error
    pub fn registry_request(status: u16, url: impl Into<String>) -> Self {
        Self::RegistryRequest {
            status,
            url: url.into(),
        }
    }

    /// Create a clone failed error
    pub fn clone_failed(message: impl Into<String>) -> Self {
        Self::CloneFailed {
            message: message.into(),
        }
    }

    /// Create a git operation error
    pub fn git_operation(message: impl Into<String>) -> Self {
        Self::GitOperation {
            message: message.into(),
        }
    }

    /// Create a tool not installed error
    pub fn tool_not_installed(tool: impl Into<String>) -> Self {
        Self::ToolNotInstalled { tool: tool.into() }
    }

    /// Create a scaffold error
    pub fn scaffold(message: impl Into<String>) -> Self {
        Self::Scaffold {
            message: message.into(),
        }
    }

    /// Create an invalid arguments error
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create a prompt error
    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt {
            message: message.into(),
        }
    }
}
