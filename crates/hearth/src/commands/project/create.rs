//! `hearth project create` command handler

use anyhow::{Context, Result};
use camino::Utf8Path;
use hearth_core::Config;
use hearth_envs::{Conda, Environment, ProcessRunner, Venv};
use hearth_projects::{init_repository, scaffold, Error, Project};
use std::sync::Arc;

use crate::cli::{CreateArgs, VenvChoice};
use crate::commands::load_config;
use crate::output;

pub(super) async fn run(args: CreateArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let project = Project::new(&args.name, &config.username, &config.projects_dir)?;

    if project.exists_local() {
        output::warning(&format!(
            "Project '{}' already exists locally at {}",
            project.name(),
            project.path()
        ));
        output::info(&format!(
            "To resume it, use: hearth project checkout {}",
            project.name()
        ));
        return Err(Error::project_exists(project.path().as_str()).into());
    }

    output::title(&format!("Create Project: {}", project.name()));

    match &args.cookiecutter {
        Some(url) => {
            output::info(&format!("Scaffolding from cookiecutter template {}", url));
            scaffold(url, &config.projects_dir).await?;
            if !project.exists_local() {
                output::warning(&format!(
                    "Template did not create {}; environment setup uses that path",
                    project.path()
                ));
                tokio::fs::create_dir_all(project.path()).await?;
            }
        }
        None => {
            output::fields(&[("Path", project.path().to_string())]);
            tokio::fs::create_dir(project.path())
                .await
                .with_context(|| format!("Failed to create {}", project.path()))?;

            if config.git && !args.no_git {
                init_repository(project.path()).await?;
                output::success("Initialized git repository");
            }
        }
    }

    match args.venv {
        VenvChoice::Virtualenv => create_virtualenv(&project, &config).await?,
        VenvChoice::Conda => create_conda(&project, &config).await?,
        VenvChoice::None => {
            output::info("Virtual environment not requested, skipping environment creation")
        }
    }

    output::success(&format!("Created {} at {}", project.name(), project.path()));
    Ok(())
}

async fn create_virtualenv(project: &Project, config: &Config) -> Result<()> {
    output::info(&format!("Creating virtualenv for {}", project.name()));
    let mut venv = Venv::new(project.path(), Arc::new(ProcessRunner));
    venv.create(false).await?;

    output::info("Updating seed packages (pip, setuptools, wheel)");
    venv.update_seeds(false).await?;

    install_common_packages(&mut venv, config).await
}

async fn create_conda(project: &Project, config: &Config) -> Result<()> {
    output::info(&format!("Creating conda environment '{}'", project.name()));
    let mut env = Conda::new(
        project.name(),
        project.path(),
        &config.conda_bin,
        Arc::new(ProcessRunner),
    );
    env.create(false).await?;

    install_common_packages(&mut env, config).await?;

    let file = env.export_yml(true).await?;
    output::success(&format!("Exported {}", file));
    Ok(())
}

async fn install_common_packages(env: &mut dyn Environment, config: &Config) -> Result<()> {
    if config.common_packages.is_empty() {
        return Ok(());
    }

    output::info(&format!(
        "Installing common packages: {}",
        config.common_packages.join(", ")
    ));
    env.install(&config.common_packages, false).await?;
    Ok(())
}
