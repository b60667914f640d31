//! Shared utility functions for hearth crates

use crate::error::{Error, Result};
use camino::Utf8PathBuf;

/// Get the user's home directory
///
/// Prefers the HOME environment variable over `dirs::home_dir()` so that
/// overrides made by the calling shell are respected.
pub fn get_home_dir() -> Result<Utf8PathBuf> {
    let home = std::env::var("HOME")
        .ok()
        .filter(|h| !h.is_empty())
        .map(std::path::PathBuf::from)
        .or_else(dirs::home_dir)
        .ok_or_else(|| Error::configuration("Could not determine home directory"))?;

    Utf8PathBuf::try_from(home)
        .map_err(|_| Error::configuration("Home directory path is not valid UTF-8"))
}

/// Expand a leading `~` to the user's home directory
pub fn expand_tilde(path: &str) -> Result<Utf8PathBuf> {
    if path == "~" {
        return get_home_dir();
    }

    match path.strip_prefix("~/") {
        Some(rest) => Ok(get_home_dir()?.join(rest)),
        None => Ok(Utf8PathBuf::from(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_home_dir_from_env() {
        if std::env::var("HOME").is_ok() {
            let home = get_home_dir().unwrap();
            assert!(!home.as_str().is_empty());
        }
    }

    #[test]
    fn test_expand_tilde_leaves_absolute_paths() {
        assert_eq!(
            expand_tilde("/srv/projects").unwrap(),
            Utf8PathBuf::from("/srv/projects")
        );
    }

    #[test]
    fn test_expand_tilde_prefix() {
        let home = get_home_dir().unwrap();
        assert_eq!(expand_tilde("~/dev").unwrap(), home.join("dev"));
        assert_eq!(expand_tilde("~").unwrap(), home);
    }
}
