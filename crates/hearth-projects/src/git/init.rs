//! Repository initialization

use crate::error::{Error, Result};
use crate::git::check_git_available;
use camino::Utf8Path;
use tokio::process::Command;
use tracing::{debug, info};

/// Initialize a git repository in an existing directory
///
/// Does nothing when `path` already contains `.git`.
pub async fn init_repository(path: &Utf8Path) -> Result<()> {
    info!("Initializing git repository at: {}", path);

    if !path.is_dir() {
        return Err(Error::project_not_found(path.as_str()));
    }

    if path.join(".git").exists() {
        debug!("Git repository already exists at: {}", path);
        return Ok(());
    }

    check_git_available().await?;

    let output = Command::new("git")
        .current_dir(path)
        .args(["init", "--quiet"])
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::git_operation(format!("git init failed: {}", stderr.trim())));
    }

    info!("Repository initialized successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_directory() {
        assert!(matches!(
            init_repository(Utf8Path::new("/definitely/not/here")).await,
            Err(Error::ProjectNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_existing_repository_is_left_alone() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = Utf8Path::from_path(dir.path()).unwrap();
        std::fs::create_dir(path.join(".git")).unwrap();

        init_repository(path).await.unwrap();
        assert!(path.join(".git").read_dir().unwrap().next().is_none());
    }
}
