//! `hearth project list` command handler

use anyhow::Result;
use camino::Utf8Path;
use hearth_projects::{local_project_names, render_sections, ListMode, RepoRegistry};
use std::collections::BTreeSet;
use tracing::debug;

use crate::cli::ListArgs;
use crate::commands::{load_config, registry};
use crate::output;

pub(super) async fn run(args: ListArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let mode = ListMode::from_flags(args.remote, args.all)?;
    debug!("Listing projects ({:?})", mode);
    let config = load_config(config_path)?;

    let local = if mode == ListMode::Remote {
        BTreeSet::new()
    } else {
        local_project_names(&config.projects_dir)?
    };

    let remote = if mode.needs_remote() {
        let spinner = output::spinner("Fetching repositories from GitHub...");
        let names = registry(&config)?.repo_names().await;
        spinner.finish_and_clear();
        names?
    } else {
        BTreeSet::new()
    };

    for section in render_sections(mode, &local, &remote) {
        output::section(section.title, &section.names);
    }

    Ok(())
}
