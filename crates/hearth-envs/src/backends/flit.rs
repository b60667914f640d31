//! Environments installed through flit

use crate::error::{Error, Result};
use crate::runner::{CommandRunner, Invocation};
use crate::state::EnvState;
use crate::traits::Environment;
use crate::Venv;
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;

/// A venv whose project is installed by `flit install`
pub struct Flit {
    venv: Venv,
    flit: Option<Utf8PathBuf>,
}

impl Flit {
    /// Create a flit environment, locating `flit` on PATH
    pub fn new(root: &Utf8Path, runner: Arc<dyn CommandRunner>) -> Self {
        let flit = which::which("flit")
            .ok()
            .and_then(|p| Utf8PathBuf::from_path_buf(p).ok());

        Self::with_flit(root, runner, flit)
    }

    /// Create a flit environment with an explicit flit executable
    pub fn with_flit(
        root: &Utf8Path,
        runner: Arc<dyn CommandRunner>,
        flit: Option<Utf8PathBuf>,
    ) -> Self {
        Self {
            venv: Venv::new(root, runner),
            flit,
        }
    }

    /// Path of the environment's python executable
    pub fn executable(&self) -> &Utf8Path {
        self.venv.executable()
    }

    /// The flit executable, if installed
    pub fn flit(&self) -> Option<&Utf8Path> {
        self.flit.as_deref()
    }

    /// Current lifecycle state
    pub fn state(&self) -> EnvState {
        self.venv.state()
    }
}

#[async_trait]
impl Environment for Flit {
    fn name(&self) -> &'static str {
        "flit"
    }

    fn root(&self) -> &Utf8Path {
        self.venv.root()
    }

    fn exists(&self) -> bool {
        self.venv.exists()
    }

    async fn create(&mut self, silent: bool) -> Result<()> {
        self.venv.create(silent).await
    }

    async fn install(&mut self, packages: &[String], silent: bool) -> Result<()> {
        self.venv.install(packages, silent).await
    }

    async fn install_self(&mut self, silent: bool) -> Result<()> {
        let flit = self
            .flit
            .clone()
            .ok_or_else(|| Error::tool_not_installed("flit"))?;

        self.venv.ensure_created(silent).await?;

        let invocation = Invocation::new(flit.as_str(), self.venv.root())
            .args(["install", "--deps", "develop", "--symlink", "--python"])
            .arg(self.venv.executable().as_str())
            .silent(silent);
        self.venv.runner().run(&invocation).await?;

        self.venv.mark_populated()
    }
}
