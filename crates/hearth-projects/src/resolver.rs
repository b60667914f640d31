//! Local-first project resolution for checkout

use crate::error::Result;
use crate::git::Cloner;
use crate::project::Project;
use crate::registry::RepoRegistry;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

/// Terminal outcome of resolving a project name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Already present locally; the registry was not consulted
    Local(Project),
    /// Found on the registry and cloned to its conventional path
    Cloned(Project),
    /// Neither local nor remote
    NotFound(String),
}

impl Resolution {
    /// The resolved project, unless not found
    pub fn project(&self) -> Option<&Project> {
        match self {
            Self::Local(project) | Self::Cloned(project) => Some(project),
            Self::NotFound(_) => None,
        }
    }
}

/// Resolves project names against the projects directory, then the registry
pub struct ProjectResolver<'a> {
    projects_dir: Utf8PathBuf,
    owner: String,
    registry: &'a dyn RepoRegistry,
    cloner: &'a dyn Cloner,
}

impl<'a> ProjectResolver<'a> {
    pub fn new(
        projects_dir: &Utf8Path,
        owner: &str,
        registry: &'a dyn RepoRegistry,
        cloner: &'a dyn Cloner,
    ) -> Self {
        Self {
            projects_dir: projects_dir.to_owned(),
            owner: owner.to_string(),
            registry,
            cloner,
        }
    }

    /// Resolve `name`, cloning it when it only exists remotely
    pub async fn resolve(&self, name: &str) -> Result<Resolution> {
        let project = Project::new(name, &self.owner, &self.projects_dir)?;

        if project.exists_local() {
            debug!("Project '{}' found locally", name);
            return Ok(Resolution::Local(project));
        }

        let remote = self.registry.repo_names().await?;
        if !remote.contains(name) {
            debug!("Project '{}' not found locally or remotely", name);
            return Ok(Resolution::NotFound(name.to_string()));
        }

        info!("Project '{}' found remotely, cloning", name);
        self.cloner
            .clone_repo(&project.clone_url(), project.path())
            .await?;

        Ok(Resolution::Cloned(project))
    }
}
