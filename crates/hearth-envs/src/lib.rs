//! # hearth-envs
//!
//! Virtual environment provisioning for hearth projects.
//!
//! Every backend implements the [`Environment`] trait: `exists`, `create`,
//! `install` and `install_self`. Install operations lazily create the
//! environment first, following the [`EnvState`] lifecycle
//! (`Absent -> Created -> Populated`).
//!
//! Backends:
//! - [`Venv`]: plain `python3 -m venv`, installs the project in editable mode
//! - [`Requirements`]: installs from `requirements-dev.txt` or `requirements.txt`
//! - [`Flit`]: delegates to `flit install`
//! - [`Conda`]: named conda environments with `environment.yml` export
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use camino::Utf8Path;
//! use hearth_envs::{Environment, ProcessRunner, Venv};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let root = Utf8Path::new("/home/me/Development/project");
//! let mut venv = Venv::new(root, Arc::new(ProcessRunner));
//! venv.install(&["black".to_string()], true).await?;
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod error;
pub mod kind;
pub mod runner;
pub mod state;
pub mod traits;

pub use backends::{Conda, Flit, Requirements, Venv};
pub use error::{Error, Result};
pub use kind::{create_environment, EnvKind};
pub use runner::{CommandRunner, Invocation, ProcessRunner};
pub use state::EnvState;
pub use traits::Environment;
