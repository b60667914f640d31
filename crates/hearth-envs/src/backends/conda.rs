//! Named conda environments

use crate::backends::absolute_root;
use crate::error::{Error, Result};
use crate::runner::{CommandRunner, Invocation};
use crate::state::EnvState;
use crate::traits::Environment;
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// File `install_self` and `export_yml` operate on
pub const ENVIRONMENT_FILE: &str = "environment.yml";

/// Python requested for new conda environments
const CONDA_PYTHON: &str = "python=3";

/// A conda environment named after the project
///
/// Lives under the conda installation's `envs/` directory rather than in the
/// project root. The installation is located from the conda executable on
/// PATH when the handle is built.
pub struct Conda {
    name: String,
    root: Utf8PathBuf,
    conda: String,
    envs_dir: Option<Utf8PathBuf>,
    state: EnvState,
    runner: Arc<dyn CommandRunner>,
}

impl Conda {
    /// Create a conda environment handle, locating `conda_bin` on PATH
    pub fn new(
        name: &str,
        root: &Utf8Path,
        conda_bin: &str,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        let envs_dir = locate_envs_dir(conda_bin);
        Self::with_envs_dir(name, root, conda_bin, envs_dir, runner)
    }

    /// Create a conda environment handle with an explicit `envs/` directory
    pub fn with_envs_dir(
        name: &str,
        root: &Utf8Path,
        conda_bin: &str,
        envs_dir: Option<Utf8PathBuf>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        let mut conda = Self {
            name: name.to_string(),
            root: absolute_root(root),
            conda: conda_bin.to_string(),
            envs_dir,
            state: EnvState::Absent,
            runner,
        };
        conda.state = conda.state.observe(conda.exists());
        conda
    }

    /// Environment name
    pub fn env_name(&self) -> &str {
        &self.name
    }

    /// Directory of the environment, if conda is installed
    pub fn path(&self) -> Option<Utf8PathBuf> {
        self.envs_dir.as_ref().map(|dir| dir.join(&self.name))
    }

    /// Path of the environment's python executable, if conda is installed
    pub fn executable(&self) -> Option<Utf8PathBuf> {
        self.path().map(|p| p.join("bin").join("python"))
    }

    /// Current lifecycle state
    pub fn state(&self) -> EnvState {
        self.state
    }

    fn require_conda(&self) -> Result<Utf8PathBuf> {
        self.path()
            .ok_or_else(|| Error::tool_not_installed(self.conda.as_str()))
    }

    fn invocation(&self, silent: bool) -> Invocation {
        Invocation::new(self.conda.as_str(), &self.root).silent(silent)
    }

    async fn ensure_created(&mut self, silent: bool) -> Result<()> {
        self.state = self.state.observe(self.exists());
        if self.state.needs_create() {
            debug!("No conda environment '{}', creating it first", self.name);
            self.create(silent).await?;
        }
        Ok(())
    }

    /// Write `conda env export --from-history` output to `environment.yml`
    pub async fn export_yml(&self, silent: bool) -> Result<Utf8PathBuf> {
        self.require_conda()?;

        let invocation = self
            .invocation(silent)
            .args(["env", "export", "--name", self.name.as_str(), "--from-history"]);
        let content = self.runner.capture(&invocation).await?;

        let file = self.root.join(ENVIRONMENT_FILE);
        tokio::fs::write(&file, content).await?;

        info!("Exported {}", file);
        Ok(file)
    }
}

#[async_trait]
impl Environment for Conda {
    fn name(&self) -> &'static str {
        "conda"
    }

    fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn exists(&self) -> bool {
        self.path()
            .map(|p| p.join("conda-meta").is_dir())
            .unwrap_or(false)
    }

    async fn create(&mut self, silent: bool) -> Result<()> {
        let path = self.require_conda()?;
        if path.exists() {
            return Err(Error::already_exists(path.as_str()));
        }
        let next = self.state.observe(self.exists()).after_create(&path)?;

        info!("Creating conda environment '{}'", self.name);
        let invocation = self
            .invocation(silent)
            .args(["create", "-y", "--name", self.name.as_str(), CONDA_PYTHON]);
        self.runner.run(&invocation).await?;

        self.state = next;
        Ok(())
    }

    async fn install(&mut self, packages: &[String], silent: bool) -> Result<()> {
        let path = self.require_conda()?;
        if packages.is_empty() {
            return Ok(());
        }
        self.ensure_created(silent).await?;

        let invocation = self
            .invocation(silent)
            .args(["install", "-y", "--name", self.name.as_str()])
            .args(packages.iter().cloned());
        self.runner.run(&invocation).await?;

        self.state = self.state.after_install(&path)?;
        Ok(())
    }

    async fn install_self(&mut self, silent: bool) -> Result<()> {
        let path = self.require_conda()?;
        self.ensure_created(silent).await?;

        let invocation = self.invocation(silent).args([
            "env",
            "update",
            "--name",
            self.name.as_str(),
            "--file",
            ENVIRONMENT_FILE,
        ]);
        self.runner.run(&invocation).await?;

        self.state = self.state.after_install(&path)?;
        Ok(())
    }
}

/// Find the `envs/` directory of the conda installation owning `conda_bin`
///
/// conda lives at `<base>/bin/conda` or `<base>/condabin/conda`.
fn locate_envs_dir(conda_bin: &str) -> Option<Utf8PathBuf> {
    let exe = which::which(conda_bin).ok()?;
    let exe = exe.canonicalize().unwrap_or(exe);
    let exe = Utf8PathBuf::from_path_buf(exe).ok()?;

    let base = exe.parent()?.parent()?;
    Some(base.join("envs"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ProcessRunner;

    #[test]
    fn test_paths_under_envs_dir() {
        let env = Conda::with_envs_dir(
            "project",
            Utf8Path::new("/somewhere/project"),
            "conda",
            Some(Utf8PathBuf::from("/opt/conda/envs")),
            Arc::new(ProcessRunner),
        );

        assert_eq!(env.env_name(), "project");
        assert_eq!(env.path(), Some(Utf8PathBuf::from("/opt/conda/envs/project")));
        assert_eq!(
            env.executable(),
            Some(Utf8PathBuf::from("/opt/conda/envs/project/bin/python"))
        );
        assert!(!env.exists());
    }

    #[tokio::test]
    async fn test_missing_conda_is_tool_not_installed() {
        let mut env = Conda::with_envs_dir(
            "project",
            Utf8Path::new("/somewhere/project"),
            "mamba",
            None,
            Arc::new(ProcessRunner),
        );

        match env.create(true).await {
            Err(Error::ToolNotInstalled { tool }) => assert_eq!(tool, "mamba"),
            other => panic!("expected ToolNotInstalled, got {:?}", other.err()),
        }
        assert!(matches!(
            env.install_self(true).await,
            Err(Error::ToolNotInstalled { .. })
        ));
    }
}
