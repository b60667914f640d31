//! Environment backend implementations

mod conda;
mod flit;
mod requirements;
mod venv;

pub use conda::Conda;
pub use flit::Flit;
pub use requirements::Requirements;
pub use venv::{Venv, VENV_DIR};

use camino::{Utf8Path, Utf8PathBuf};

/// Resolve `root` to an absolute path without requiring it to exist
pub(crate) fn absolute_root(root: &Utf8Path) -> Utf8PathBuf {
    std::path::absolute(root.as_std_path())
        .ok()
        .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
        .unwrap_or_else(|| root.to_owned())
}
