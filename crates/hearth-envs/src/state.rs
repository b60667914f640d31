//! Environment lifecycle
//!
//! An environment moves `Absent -> Created -> Populated`. `create` is only
//! legal from `Absent`; installs require at least `Created` and leave the
//! environment `Populated`. Backends refresh the state from the filesystem
//! before acting so that an environment removed out-of-band returns to
//! `Absent`.

use crate::error::{Error, Result};
use camino::Utf8Path;

/// Lifecycle state of an environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvState {
    /// Nothing on disk
    #[default]
    Absent,
    /// Interpreter exists, nothing installed by hearth yet
    Created,
    /// At least one install has completed
    Populated,
}

impl EnvState {
    /// Reconcile the tracked state with what is on disk
    pub fn observe(self, exists: bool) -> Self {
        match (exists, self) {
            (false, _) => Self::Absent,
            (true, Self::Absent) => Self::Created,
            (true, state) => state,
        }
    }

    /// Whether an install must create the environment first
    pub fn needs_create(self) -> bool {
        self == Self::Absent
    }

    /// Transition for a successful `create`
    pub fn after_create(self, path: &Utf8Path) -> Result<Self> {
        match self {
            Self::Absent => Ok(Self::Created),
            Self::Created | Self::Populated => Err(Error::already_exists(path.as_str())),
        }
    }

    /// Transition for a successful install
    pub fn after_install(self, path: &Utf8Path) -> Result<Self> {
        match self {
            Self::Absent => Err(Error::not_created(path.as_str())),
            Self::Created | Self::Populated => Ok(Self::Populated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe() {
        assert_eq!(EnvState::Populated.observe(false), EnvState::Absent);
        assert_eq!(EnvState::Absent.observe(true), EnvState::Created);
        assert_eq!(EnvState::Populated.observe(true), EnvState::Populated);
    }

    #[test]
    fn test_create_only_from_absent() {
        let path = Utf8Path::new("/p/.venv");
        assert_eq!(EnvState::Absent.after_create(path).unwrap(), EnvState::Created);
        assert!(matches!(
            EnvState::Created.after_create(path),
            Err(Error::AlreadyExists { .. })
        ));
        assert!(matches!(
            EnvState::Populated.after_create(path),
            Err(Error::AlreadyExists { .. })
        ));
    }

    #[test]
    fn test_install_requires_creation() {
        let path = Utf8Path::new("/p/.venv");
        assert!(matches!(
            EnvState::Absent.after_install(path),
            Err(Error::NotCreated { .. })
        ));
        assert_eq!(
            EnvState::Created.after_install(path).unwrap(),
            EnvState::Populated
        );
    }
}
