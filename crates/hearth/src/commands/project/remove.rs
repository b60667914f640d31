//! `hearth project remove` command handler

use anyhow::{bail, Result};
use camino::Utf8Path;
use hearth_core::Config;
use hearth_projects::{remove_project, Error, Project};
use tracing::debug;

use crate::cli::RemoveArgs;
use crate::commands::{confirm, load_config};
use crate::output;

pub(super) async fn run(args: RemoveArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config_path)?;
    remove(args, &config, confirm).await
}

/// Remove a local project, asking first unless `--force` was given
async fn remove<F>(args: RemoveArgs, config: &Config, confirm: F) -> Result<()>
where
    F: FnOnce(&str) -> Result<bool>,
{
    let project = Project::new(&args.name, &config.username, &config.projects_dir)?;

    if !project.exists_local() {
        return Err(Error::project_not_found(project.name()).into());
    }

    if !args.force {
        let prompt = format!(
            "This will remove '{}' from your local filesystem. This is IRREVERSIBLE! Are you sure?",
            project.name()
        );
        if !confirm(&prompt)? {
            debug!("Removal of {} declined", project.path());
            bail!("Removal of '{}' cancelled", project.name());
        }
    }

    remove_project(&project).await?;
    output::success(&format!("Removed {}", project.path()));
    Ok(())
}
