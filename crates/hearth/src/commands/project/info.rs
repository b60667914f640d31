//! `hearth project info` command handler

use anyhow::Result;
use camino::Utf8Path;
use hearth_projects::{Error, Project, RepoRegistry};

use crate::cli::InfoArgs;
use crate::commands::{load_config, registry};
use crate::output;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

pub(super) async fn run(args: InfoArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let project = Project::new(&args.name, &config.username, &config.projects_dir)?;
    let client = registry(&config)?;

    let remote = match client.repo_info(project.name()).await {
        Ok(info) => Some(info),
        Err(Error::RegistryRequest { status: 404, .. }) => None,
        Err(e) => return Err(e.into()),
    };

    if remote.is_none() && !project.exists_local() {
        return Err(Error::project_not_found(project.name()).into());
    }

    let local = if project.exists_local() { "yes" } else { "no" };
    let mut rows = vec![
        ("Local path", project.path().to_string()),
        ("Local", local.to_string()),
    ];

    match remote {
        Some(info) => {
            rows.push(("Remote", project.html_url()));
            rows.push(("Name", info.name));
            rows.push((
                "Description",
                info.description.unwrap_or_else(|| "(none)".to_string()),
            ));
            rows.push(("Created", info.created_at.format(TIME_FORMAT).to_string()));
            rows.push(("Updated", info.updated_at.format(TIME_FORMAT).to_string()));
            rows.push(("Size", format!("{} KB", info.size)));
            rows.push((
                "License",
                info.license
                    .map(|l| l.name)
                    .unwrap_or_else(|| "(none)".to_string()),
            ));
        }
        None => rows.push(("Remote", "not found on GitHub".to_string())),
    }

    output::title(&format!("Project: {}", project.name()));
    output::fields(&rows);

    Ok(())
}
