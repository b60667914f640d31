//! Configuration file loading and validation
//!
//! The configuration is loaded once per invocation and passed explicitly into
//! every component that needs it. Validation happens once, at the start of
//! each command, via [`Config::validate`].

use crate::error::{Error, Result};
use crate::templates::ConfigTemplateRegistry;
use crate::utils::{expand_tilde, get_home_dir};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::debug;

/// Default configuration file name, relative to the home directory
const CONFIG_FILE_NAME: &str = ".hearth.yaml";

/// Environment variable overriding the configuration file location
pub const CONFIG_ENV_VAR: &str = "HEARTH_CONFIG";

/// Environment variable used when `token` is not set in the file
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Default GitHub REST API base URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Valid configuration keys
pub const CONFIG_KEYS: &[&str] = &[
    "projects_dir",
    "token",
    "username",
    "conda_bin",
    "common_packages",
    "git",
    "api_url",
];

/// Loaded hearth configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Absolute path to the directory holding all local projects
    pub projects_dir: Utf8PathBuf,

    /// GitHub personal access token
    pub token: String,

    /// GitHub username owning the remote projects
    pub username: String,

    /// Name of the conda executable (e.g. "conda" or "mamba")
    pub conda_bin: String,

    /// Packages injected into every environment hearth creates
    pub common_packages: Vec<String>,

    /// Initialise a git repository for newly created projects
    pub git: bool,

    /// Base URL of the GitHub REST API
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        let projects_dir = get_home_dir()
            .map(|home| home.join("Development"))
            .unwrap_or_default();

        Self {
            projects_dir,
            token: String::new(),
            username: String::new(),
            conda_bin: "conda".to_string(),
            common_packages: Vec::new(),
            git: true,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Config {
    /// Default configuration path: `$HEARTH_CONFIG` or `~/.hearth.yaml`
    pub fn default_path() -> Result<Utf8PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.is_empty() {
                return Ok(Utf8PathBuf::from(path));
            }
        }

        Ok(get_home_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the given path, or the default location
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_owned(),
            None => Self::default_path()?,
        };

        debug!("Loading configuration from {}", path);

        let content = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config_not_found(path.as_str())
            } else {
                Error::Io(e)
            }
        })?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content
    ///
    /// Missing keys take their defaults, a leading `~` in `projects_dir` is
    /// expanded and an empty `token` falls back to `$GITHUB_TOKEN`.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml_ng::from_str(content)?
        };

        if !config.projects_dir.as_str().is_empty() {
            config.projects_dir = expand_tilde(config.projects_dir.as_str())?;
        }

        if config.token.is_empty() {
            if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
                config.token = token;
            }
        }

        Ok(config)
    }

    /// Ensure every required setting is present and usable
    ///
    /// Reports all unset required keys at once.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();

        if self.projects_dir.as_str().is_empty() {
            missing.push("projects_dir");
        }
        if self.token.is_empty() {
            missing.push("token");
        }
        if self.username.is_empty() {
            missing.push("username");
        }

        if !missing.is_empty() {
            return Err(Error::configuration(format!(
                "required setting(s) not set: {}",
                missing.join(", ")
            )));
        }

        if !self.projects_dir.is_absolute() {
            return Err(Error::configuration(format!(
                "projects_dir must be an absolute path, got '{}'",
                self.projects_dir
            )));
        }

        if !self.projects_dir.is_dir() {
            return Err(Error::configuration(format!(
                "projects_dir '{}' does not exist or is not a directory",
                self.projects_dir
            )));
        }

        Ok(())
    }

    /// Get the displayable value of a single key
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "projects_dir" => self.projects_dir.to_string(),
            "token" => self.token.clone(),
            "username" => self.username.clone(),
            "conda_bin" => self.conda_bin.clone(),
            "common_packages" => format!("[{}]", self.common_packages.join(", ")),
            "git" => self.git.to_string(),
            "api_url" => self.api_url.clone(),
            _ => return Err(Error::unknown_key(key)),
        };

        Ok(value)
    }

    /// All keys with their displayable values, token masked
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .map(|key| {
                let value = match *key {
                    "token" if !self.token.is_empty() => "********".to_string(),
                    _ => self.get(key).unwrap_or_default(),
                };
                (*key, value)
            })
            .collect()
    }

    /// Render the starter configuration file content
    pub fn starter() -> Result<String> {
        let registry = ConfigTemplateRegistry::new()?;
        registry.render_starter(&Config::default())
    }

    /// Write the starter configuration file to `path`
    pub fn write_starter(path: &Utf8Path) -> Result<()> {
        let content = Self::starter()?;

        if let Some(parent) = path.parent() {
            if !parent.as_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn valid_config(dir: &TempDir) -> Config {
        Config {
            projects_dir: Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap(),
            token: "ghp_test".to_string(),
            username: "octocat".to_string(),
            ..Config::default()
        }
    }

    #[test]
    #[serial]
    fn test_from_yaml_fills_defaults() {
        std::env::remove_var(TOKEN_ENV_VAR);
        let config = Config::from_yaml("username: octocat\nprojects_dir: /srv/projects\n").unwrap();

        assert_eq!(config.username, "octocat");
        assert_eq!(config.projects_dir, Utf8PathBuf::from("/srv/projects"));
        assert_eq!(config.conda_bin, "conda");
        assert!(config.git);
        assert!(config.common_packages.is_empty());
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.token.is_empty());
    }

    #[test]
    #[serial]
    fn test_token_falls_back_to_env() {
        std::env::set_var(TOKEN_ENV_VAR, "from-env");
        let config = Config::from_yaml("username: octocat\n").unwrap();
        std::env::remove_var(TOKEN_ENV_VAR);

        assert_eq!(config.token, "from-env");
    }

    #[test]
    #[serial]
    fn test_file_token_wins_over_env() {
        std::env::set_var(TOKEN_ENV_VAR, "from-env");
        let config = Config::from_yaml("token: from-file\n").unwrap();
        std::env::remove_var(TOKEN_ENV_VAR);

        assert_eq!(config.token, "from-file");
    }

    #[test]
    fn test_projects_dir_tilde_expanded() {
        let config = Config::from_yaml("projects_dir: ~/code\n").unwrap();
        assert_eq!(config.projects_dir, get_home_dir().unwrap().join("code"));
    }

    #[test]
    fn test_load_missing_file_is_config_not_found() {
        let dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("nope.yaml")).unwrap();

        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        let dir = TempDir::new().unwrap();
        assert!(valid_config(&dir).validate().is_ok());
    }

    #[test]
    fn test_validate_reports_all_missing_fields() {
        let config = Config {
            projects_dir: Utf8PathBuf::new(),
            token: String::new(),
            username: String::new(),
            ..Config::default()
        };

        let err = config.validate().unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(message.contains("projects_dir"));
        assert!(message.contains("token"));
        assert!(message.contains("username"));
    }

    #[test]
    fn test_validate_rejects_relative_projects_dir() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            projects_dir: Utf8PathBuf::from("relative/projects"),
            ..valid_config(&dir)
        };

        assert!(matches!(
            config.validate(),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_missing_projects_dir() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("not-there");
        let config = Config {
            projects_dir: Utf8PathBuf::from_path_buf(missing).unwrap(),
            ..valid_config(&dir)
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_get_unknown_key() {
        let config = Config::default();
        assert!(matches!(
            config.get("editor"),
            Err(Error::UnknownKey { .. })
        ));
        assert_eq!(config.get("git").unwrap(), "true");
    }

    #[test]
    fn test_entries_mask_token() {
        let dir = TempDir::new().unwrap();
        let entries = valid_config(&dir).entries();
        let token = entries.iter().find(|(k, _)| *k == "token").unwrap();

        assert_eq!(token.1, "********");
        assert_eq!(entries.len(), CONFIG_KEYS.len());
    }

    #[test]
    #[serial]
    fn test_starter_round_trips_to_defaults() {
        std::env::remove_var(TOKEN_ENV_VAR);
        let content = Config::starter().unwrap();
        let parsed = Config::from_yaml(&content).unwrap();

        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_write_starter_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("nested/.hearth.yaml")).unwrap();

        Config::write_starter(&path).unwrap();
        assert!(path.exists());
    }
}
