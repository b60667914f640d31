//! Project model and local directory enumeration

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Host that project repositories live on
pub const GITHUB_URL: &str = "https://github.com";

/// A named project, local directory and/or remote repository
///
/// Reconstructed per invocation; existence is never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    name: String,
    owner: String,
    projects_dir: Utf8PathBuf,
    path: Utf8PathBuf,
}

impl Project {
    /// A project `name` owned by `owner`, living under `projects_dir`
    ///
    /// Fails for names that would resolve outside `projects_dir` or to a
    /// hidden directory.
    pub fn new(name: &str, owner: &str, projects_dir: &Utf8Path) -> Result<Self> {
        validate_name(name)?;

        Ok(Self {
            name: name.to_string(),
            owner: owner.to_string(),
            projects_dir: projects_dir.to_owned(),
            path: projects_dir.join(name),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory the project lives in
    pub fn projects_dir(&self) -> &Utf8Path {
        &self.projects_dir
    }

    /// Conventional local path, `<projects_dir>/<name>`
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Whether the local directory exists
    pub fn exists_local(&self) -> bool {
        self.path.is_dir()
    }

    /// `https://github.com/<owner>/<name>.git`
    pub fn clone_url(&self) -> String {
        format!("{}/{}/{}.git", GITHUB_URL, self.owner, self.name)
    }

    /// `https://github.com/<owner>/<name>`
    pub fn html_url(&self) -> String {
        format!("{}/{}/{}", GITHUB_URL, self.owner, self.name)
    }
}

/// Check that `name` is a single, non-hidden path component
pub fn validate_name(name: &str) -> Result<()> {
    let problem = if name.is_empty() {
        Some("name is empty")
    } else if name.contains(['/', '\\', '\0']) {
        Some("name must not contain path separators")
    } else if name.starts_with('.') {
        Some("name must not start with '.'")
    } else {
        None
    };

    match problem {
        Some(problem) => Err(Error::invalid_arguments(format!(
            "invalid project name '{}': {}",
            name, problem
        ))),
        None => Ok(()),
    }
}

/// Names of the non-hidden directories directly under `projects_dir`
///
/// Entries whose names are not valid UTF-8 are skipped.
pub fn local_project_names(projects_dir: &Utf8Path) -> Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();

    for entry in std::fs::read_dir(projects_dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            debug!("Skipping non UTF-8 entry {:?} in {}", file_name, projects_dir);
            continue;
        };

        if name.starts_with('.') {
            continue;
        }
        if entry.path().is_dir() {
            names.insert(name.to_string());
        }
    }

    debug!("Found {} local projects in {}", names.len(), projects_dir);
    Ok(names)
}

/// Delete a project's local directory
///
/// Only directories listed by [`local_project_names`] can be removed.
pub async fn remove_project(project: &Project) -> Result<()> {
    let local = local_project_names(project.projects_dir())?;
    if !local.contains(project.name()) {
        return Err(Error::project_not_found(project.name()));
    }

    info!("Removing {}", project.path());
    tokio::fs::remove_dir_all(project.path()).await?;
    Ok(())
}
