//! Git operations
//!
//! Shells out to the `git` executable.

mod clone;
mod init;

pub use clone::{clone_repository, Cloner, GitCloner};
pub use init::init_repository;

#[cfg(test)]
pub use clone::MockCloner;

use crate::error::{Error, Result};
use tokio::process::Command;

/// Check that `git` is available in PATH
pub(crate) async fn check_git_available() -> Result<()> {
    let output = Command::new("git")
        .arg("--version")
        .output()
        .await
        .map_err(|_| Error::tool_not_installed("git"))?;

    if !output.status.success() {
        return Err(Error::tool_not_installed("git"));
    }

    Ok(())
}
