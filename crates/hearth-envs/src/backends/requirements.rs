//! Environments driven by requirements files

use crate::error::Result;
use crate::runner::CommandRunner;
use crate::state::EnvState;
use crate::traits::Environment;
use crate::Venv;
use async_trait::async_trait;
use camino::Utf8Path;
use std::sync::Arc;
use tracing::debug;

const REQUIREMENTS: &str = "requirements.txt";
const REQUIREMENTS_DEV: &str = "requirements-dev.txt";

/// A venv whose project is installed from `requirements*.txt`
pub struct Requirements {
    venv: Venv,
}

impl Requirements {
    /// Create a requirements environment for the project at `root`
    pub fn new(root: &Utf8Path, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            venv: Venv::new(root, runner),
        }
    }

    /// Path of the environment's python executable
    pub fn executable(&self) -> &Utf8Path {
        self.venv.executable()
    }

    /// Current lifecycle state
    pub fn state(&self) -> EnvState {
        self.venv.state()
    }

    /// The requirements file `install_self` uses
    ///
    /// `requirements-dev.txt` wins when present, otherwise
    /// `requirements.txt`. Never both.
    pub fn requirements_file(&self) -> &'static str {
        if self.venv.root().join(REQUIREMENTS_DEV).is_file() {
            REQUIREMENTS_DEV
        } else {
            REQUIREMENTS
        }
    }
}

#[async_trait]
impl Environment for Requirements {
    fn name(&self) -> &'static str {
        "requirements file"
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
        let file = self.requirements_file();
        debug!("Installing {} from {}", self.venv.root(), file);

        let args = ["-r", file].map(String::from);
        self.venv.pip_install(&args, silent).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ProcessRunner;
    use tempfile::TempDir;

    #[test]
    fn test_requirements_identity() {
        let env = Requirements::new(Utf8Path::new("/somewhere"), Arc::new(ProcessRunner));
        assert_eq!(env.name(), "requirements file");
        assert_eq!(
            env.executable(),
            Utf8Path::new("/somewhere/.venv/bin/python")
        );
    }

    #[test]
    fn test_base_file_when_no_dev_file() {
        let dir = TempDir::new().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap();
        std::fs::write(root.join(REQUIREMENTS), "requests\n").unwrap();

        let env = Requirements::new(root, Arc::new(ProcessRunner));
        assert_eq!(env.requirements_file(), REQUIREMENTS);
    }

    #[test]
    fn test_dev_file_takes_priority() {
        let dir = TempDir::new().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap();
        std::fs::write(root.join(REQUIREMENTS), "requests\n").unwrap();
        std::fs::write(root.join(REQUIREMENTS_DEV), "-r requirements.txt\npytest\n").unwrap();

        let env = Requirements::new(root, Arc::new(ProcessRunner));
        assert_eq!(env.requirements_file(), REQUIREMENTS_DEV);
    }
}
