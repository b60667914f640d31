//! Command implementations

pub mod config;
pub mod project;
pub mod sync;

use anyhow::{Context, Result};
use camino::Utf8Path;
use dialoguer::Confirm;
use hearth_core::Config;
use hearth_projects::GitHubClient;
use tracing::debug;

/// Load the config file and check every required setting is present
pub(crate) fn load_config(path: Option<&Utf8Path>) -> Result<Config> {
    let config = Config::load(path)?;
    config.validate().context("Invalid hearth configuration")?;
    debug!("Projects directory is {}", config.projects_dir);
    Ok(config)
}

/// GitHub client for the configured account
pub(crate) fn registry(config: &Config) -> Result<GitHubClient> {
    GitHubClient::from_config(config).context("Failed to create GitHub client")
}

/// Ask a yes/no question, defaulting to no
pub(crate) fn confirm(prompt: &str) -> Result<bool> {
    debug!("Prompting: {}", prompt);
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    debug!("Answered {}", if confirmed { "yes" } else { "no" });
    Ok(confirmed)
}
