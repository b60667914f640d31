//! Plain `python -m venv` environments

use crate::backends::absolute_root;
use crate::error::{Error, Result};
use crate::runner::{CommandRunner, Invocation};
use crate::state::EnvState;
use crate::traits::Environment;
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Environment directory inside the project root
pub const VENV_DIR: &str = ".venv";

/// Marker file written by the venv module
const MARKER_FILE: &str = "pyvenv.cfg";

/// Interpreter used to create environments
const DEFAULT_PYTHON: &str = "python3";

/// A `.venv` directory in the project root
///
/// Also the building block for [`crate::Requirements`] and [`crate::Flit`],
/// which share creation and differ only in how the project is installed.
pub struct Venv {
    root: Utf8PathBuf,
    path: Utf8PathBuf,
    executable: Utf8PathBuf,
    python: String,
    state: EnvState,
    runner: Arc<dyn CommandRunner>,
}

impl Venv {
    /// Create a venv handle for the project at `root`
    pub fn new(root: &Utf8Path, runner: Arc<dyn CommandRunner>) -> Self {
        let root = absolute_root(root);
        let path = root.join(VENV_DIR);
        let executable = path.join("bin").join("python");

        let mut venv = Self {
            root,
            path,
            executable,
            python: DEFAULT_PYTHON.to_string(),
            state: EnvState::Absent,
            runner,
        };
        venv.refresh();
        venv
    }

    /// Use a different interpreter to create the environment
    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    /// Path of the `.venv` directory
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Path of the environment's python executable
    pub fn executable(&self) -> &Utf8Path {
        &self.executable
    }

    /// Current lifecycle state
    pub fn state(&self) -> EnvState {
        self.state
    }

    pub(crate) fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    fn refresh(&mut self) -> EnvState {
        self.state = self.state.observe(self.exists());
        self.state
    }

    /// Create the environment unless it is already present
    pub(crate) async fn ensure_created(&mut self, silent: bool) -> Result<()> {
        if self.refresh().needs_create() {
            debug!("No environment at {}, creating it first", self.path);
            self.create(silent).await?;
        }
        Ok(())
    }

    /// Record a completed install
    pub(crate) fn mark_populated(&mut self) -> Result<()> {
        self.state = self.state.after_install(&self.path)?;
        Ok(())
    }

    /// `<exe> -m pip install <args>`, creating the environment first if needed
    pub(crate) async fn pip_install(&mut self, args: &[String], silent: bool) -> Result<()> {
        self.ensure_created(silent).await?;

        let invocation = Invocation::new(self.executable.as_str(), &self.root)
            .args(["-m", "pip", "install"])
            .args(args.iter().cloned())
            .silent(silent);
        self.runner.run(&invocation).await?;

        self.mark_populated()
    }

    /// Upgrade pip, setuptools and wheel inside the environment
    pub async fn update_seeds(&mut self, silent: bool) -> Result<()> {
        let seeds = ["--upgrade", "pip", "setuptools", "wheel"].map(String::from);
        self.pip_install(&seeds, silent).await
    }
}

#[async_trait]
impl Environment for Venv {
    fn name(&self) -> &'static str {
        "venv"
    }

    fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn exists(&self) -> bool {
        self.path.join(MARKER_FILE).is_file()
    }

    async fn create(&mut self, silent: bool) -> Result<()> {
        if self.path.exists() {
            return Err(Error::already_exists(self.path.as_str()));
        }
        let next = self.refresh().after_create(&self.path)?;

        info!("Creating virtual environment at {}", self.path);
        let invocation = Invocation::new(self.python.as_str(), &self.root)
            .args(["-m", "venv"])
            .arg(self.path.as_str())
            .silent(silent);
        self.runner.run(&invocation).await?;

        self.state = next;
        Ok(())
    }

    async fn install(&mut self, packages: &[String], silent: bool) -> Result<()> {
        if packages.is_empty() {
            return Ok(());
        }
        self.pip_install(packages, silent).await
    }

    async fn install_self(&mut self, silent: bool) -> Result<()> {
        let args = ["-e", ".[dev]"].map(String::from);
        self.pip_install(&args, silent).await
    }
}
