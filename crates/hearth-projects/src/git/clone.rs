//! Repository cloning

use crate::error::{Error, Result};
use crate::git::check_git_available;
use async_trait::async_trait;
use camino::Utf8Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Clones a repository into a destination directory
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Cloner: Send + Sync {
    async fn clone_repo(&self, url: &str, destination: &Utf8Path) -> Result<()>;
}

/// [`Cloner`] backed by `git clone`
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCloner {
    /// Suppress git's progress output
    pub quiet: bool,
}

#[async_trait]
impl Cloner for GitCloner {
    async fn clone_repo(&self, url: &str, destination: &Utf8Path) -> Result<()> {
        clone_repository(url, destination, self.quiet).await
    }
}

/// Clone a repository
///
/// # Errors
/// Returns error if:
/// - Invalid repository URL
/// - Destination already exists
/// - Git is not installed
/// - Clone operation fails
pub async fn clone_repository(url: &str, destination: &Utf8Path, quiet: bool) -> Result<()> {
    info!("Cloning repository: {} -> {}", url, destination);

    if !is_valid_repo_url(url) {
        return Err(Error::clone_failed(format!("invalid repository URL: {}", url)));
    }

    if destination.exists() {
        return Err(Error::project_exists(destination.as_str()));
    }

    check_git_available().await?;

    let mut cmd = Command::new("git");
    cmd.arg("clone");
    if quiet {
        cmd.arg("--quiet");
    }
    cmd.arg(url)
        .arg(destination.as_str())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());

    debug!("Running: git clone {}", url);
    let output = cmd.output().await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::clone_failed(stderr.trim()));
    }

    info!("Repository cloned successfully");
    Ok(())
}

/// Validate if a string is a valid repository URL
fn is_valid_repo_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("git@") || url.starts_with("http://")
}
