//! `hearth project checkout` command handler

use anyhow::Result;
use camino::Utf8Path;
use hearth_core::Config;
use hearth_envs::{create_environment, EnvKind, ProcessRunner};
use hearth_projects::{Error, GitCloner, Project, ProjectResolver, Resolution};
use std::sync::Arc;

use crate::cli::CheckoutArgs;
use crate::commands::{load_config, registry};
use crate::output;

pub(super) async fn run(args: CheckoutArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let client = registry(&config)?;
    let cloner = GitCloner::default();
    let resolver = ProjectResolver::new(&config.projects_dir, &config.username, &client, &cloner);

    let spinner = output::spinner(&format!("Resolving {}...", args.name));
    let resolution = resolver.resolve(&args.name).await;
    spinner.finish_and_clear();

    let project = match resolution? {
        Resolution::Local(project) => {
            output::success(&format!(
                "Project '{}' is available locally at {}",
                project.name(),
                project.path()
            ));
            project
        }
        Resolution::Cloned(project) => {
            output::success(&format!(
                "Project '{}' cloned from {} to {}",
                project.name(),
                project.html_url(),
                project.path()
            ));
            project
        }
        Resolution::NotFound(name) => {
            output::info(&format!(
                "Does the project exist? To start a new one: hearth project create {}",
                name
            ));
            return Err(Error::project_not_found(name).into());
        }
    };

    if args.env {
        provision(&project, &config).await?;
    }

    Ok(())
}

/// Detect the project's environment kind and install the project into it
async fn provision(project: &Project, config: &Config) -> Result<()> {
    let Some(kind) = EnvKind::detect(project.path()) else {
        output::info("No supported environment detected, skipping environment setup");
        return Ok(());
    };

    output::info(&format!("Setting up {} environment", kind));
    let mut env = create_environment(
        kind,
        project.path(),
        project.name(),
        &config.conda_bin,
        Arc::new(ProcessRunner),
    );
    env.install_self(false).await?;

    output::success(&format!("Environment ready ({})", env.name()));
    Ok(())
}
