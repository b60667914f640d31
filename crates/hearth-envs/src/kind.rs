//! Environment kind selection and backend factory

use crate::backends::{Conda, Flit, Requirements, Venv};
use crate::runner::CommandRunner;
use crate::traits::Environment;
use camino::Utf8Path;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Supported environment backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvKind {
    Venv,
    Requirements,
    Flit,
    Conda,
}

impl EnvKind {
    /// All kinds, in detection priority order
    pub const ALL: [EnvKind; 4] = [Self::Conda, Self::Requirements, Self::Flit, Self::Venv];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Venv => "venv",
            Self::Requirements => "requirements",
            Self::Flit => "flit",
            Self::Conda => "conda",
        }
    }

    /// Infer the backend from the files present in a project root
    ///
    /// Checks `environment.yml`, then requirements files, then the
    /// `pyproject.toml` build backend, then setuptools files. Returns `None`
    /// when the project gives no usable hint, including poetry projects.
    pub fn detect(root: &Utf8Path) -> Option<Self> {
        if root.join("environment.yml").is_file() {
            return Some(Self::Conda);
        }

        if root.join("requirements-dev.txt").is_file() || root.join("requirements.txt").is_file() {
            return Some(Self::Requirements);
        }

        let pyproject = root.join("pyproject.toml");
        if pyproject.is_file() {
            match build_backend(&pyproject).as_deref() {
                Some(backend) if backend.contains("flit") => return Some(Self::Flit),
                Some(backend) if backend.contains("poetry") => return None,
                Some(_) => return Some(Self::Venv),
                None => {}
            }
        }

        if root.join("setup.cfg").is_file() || root.join("setup.py").is_file() {
            return Some(Self::Venv);
        }

        None
    }
}

impl fmt::Display for EnvKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown environment kind '{}' (expected one of: venv, requirements, flit, conda)",
                    s
                )
            })
    }
}

#[derive(Debug, Default, Deserialize)]
struct PyProject {
    #[serde(rename = "build-system")]
    build_system: Option<BuildSystem>,
}

#[derive(Debug, Default, Deserialize)]
struct BuildSystem {
    #[serde(rename = "build-backend")]
    build_backend: Option<String>,
}

fn build_backend(pyproject: &Utf8Path) -> Option<String> {
    let content = std::fs::read_to_string(pyproject).ok()?;
    match toml::from_str::<PyProject>(&content) {
        Ok(parsed) => parsed.build_system?.build_backend,
        Err(e) => {
            debug!("Ignoring unparseable {}: {}", pyproject, e);
            None
        }
    }
}

/// Build the environment backend for `kind`
///
/// `project_name` names conda environments; `conda_bin` is the conda
/// executable to use.
pub fn create_environment(
    kind: EnvKind,
    root: &Utf8Path,
    project_name: &str,
    conda_bin: &str,
    runner: Arc<dyn CommandRunner>,
) -> Box<dyn Environment> {
    match kind {
        EnvKind::Venv => Box::new(Venv::new(root, runner)),
        EnvKind::Requirements => Box::new(Requirements::new(root, runner)),
        EnvKind::Flit => Box::new(Flit::new(root, runner)),
        EnvKind::Conda => Box::new(Conda::new(project_name, root, conda_bin, runner)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ProcessRunner;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn project() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, root)
    }

    #[test]
    fn test_detect_empty_project() {
        let (_dir, root) = project();
        assert_eq!(EnvKind::detect(&root), None);
    }

    #[test]
    fn test_detect_conda_wins() {
        let (_dir, root) = project();
        std::fs::write(root.join("environment.yml"), "name: x\n").unwrap();
        std::fs::write(root.join("requirements.txt"), "black\n").unwrap();
        assert_eq!(EnvKind::detect(&root), Some(EnvKind::Conda));
    }

    #[test]
    fn test_detect_requirements() {
        let (_dir, root) = project();
        std::fs::write(root.join("requirements-dev.txt"), "pytest\n").unwrap();
        assert_eq!(EnvKind::detect(&root), Some(EnvKind::Requirements));
    }

    #[test]
    fn test_detect_build_backends() {
        let (_dir, root) = project();
        let pyproject = root.join("pyproject.toml");

        std::fs::write(
            &pyproject,
            "[build-system]\nrequires = [\"flit_core\"]\nbuild-backend = \"flit_core.buildapi\"\n",
        )
        .unwrap();
        assert_eq!(EnvKind::detect(&root), Some(EnvKind::Flit));

        std::fs::write(
            &pyproject,
            "[build-system]\nbuild-backend = \"poetry.core.masonry.api\"\n",
        )
        .unwrap();
        assert_eq!(EnvKind::detect(&root), None);

        std::fs::write(
            &pyproject,
            "[build-system]\nbuild-backend = \"setuptools.build_meta\"\n",
        )
        .unwrap();
        assert_eq!(EnvKind::detect(&root), Some(EnvKind::Venv));
    }

    #[test]
    fn test_detect_flit_anywhere_in_backend() {
        let (_dir, root) = project();
        std::fs::write(
            root.join("pyproject.toml"),
            "[build-system]\nbuild-backend = \"backend.flit_shim\"\n",
        )
        .unwrap();

        assert_eq!(EnvKind::detect(&root), Some(EnvKind::Flit));
    }

    #[test]
    fn test_detect_setup_py() {
        let (_dir, root) = project();
        std::fs::write(root.join("setup.py"), "from setuptools import setup\n").unwrap();
        assert_eq!(EnvKind::detect(&root), Some(EnvKind::Venv));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Flit".parse::<EnvKind>().unwrap(), EnvKind::Flit);
        assert!("poetry".parse::<EnvKind>().is_err());
    }

    #[test]
    fn test_factory_names() {
        let runner: Arc<dyn CommandRunner> = Arc::new(ProcessRunner);
        let root = Utf8Path::new("/somewhere/demo");

        for kind in [EnvKind::Venv, EnvKind::Requirements, EnvKind::Flit] {
            let env = create_environment(kind, root, "demo", "conda", runner.clone());
            assert_eq!(env.root(), root);
        }
        let env = create_environment(EnvKind::Venv, root, "demo", "conda", runner.clone());
        assert_eq!(env.name(), "venv");
        let env = create_environment(EnvKind::Requirements, root, "demo", "conda", runner);
        assert_eq!(env.name(), "requirements file");
    }
}
