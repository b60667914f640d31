//! `hearth sync` command handlers

use anyhow::{bail, Result};
use camino::Utf8Path;
use hearth_projects::{
    confirmation_prompt, Error, GitCloner, SyncEngine, SyncOptions, SyncOutcome, SyncReport,
    Universe,
};
use tracing::debug;

use crate::cli::{SyncCommands, SyncFlags};
use crate::commands::{confirm, load_config, registry};
use crate::output;

/// Run sync subcommands
pub async fn run(cmd: SyncCommands, config_path: Option<&Utf8Path>) -> Result<()> {
    let (universe, flags) = match cmd {
        SyncCommands::All(args) => (Universe::Remote, args.flags),
        SyncCommands::These(args) => {
            let names = args.names.into_iter().collect();
            (Universe::These(names), args.flags)
        }
    };
    debug!("Syncing {:?} with {} jobs", universe, flags.jobs);

    sync(universe, &flags, config_path).await
}

async fn sync(
    universe: Universe,
    flags: &SyncFlags,
    config_path: Option<&Utf8Path>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let client = registry(&config)?;
    let cloner = GitCloner { quiet: true };
    let engine = SyncEngine::new(&config.projects_dir, &config.username, &client, &cloner);

    let options = SyncOptions {
        force: flags.force,
        jobs: usize::from(flags.jobs),
    };

    let outcome = engine
        .run(&universe, &options, |pending| {
            confirm(&confirmation_prompt(pending)).map_err(|e| Error::prompt(e.to_string()))
        })
        .await?;

    finish(outcome)
}

/// Report a sync outcome; anything short of every clone succeeding is an error
fn finish(outcome: SyncOutcome) -> Result<()> {
    match outcome {
        SyncOutcome::UpToDate => {
            output::success("Your local projects are in sync, nothing to clone");
            Ok(())
        }
        SyncOutcome::Declined(pending) => {
            debug!("Sync declined with {} pending", pending.len());
            bail!("Sync cancelled, none of {} projects were cloned", pending.len())
        }
        SyncOutcome::Completed(report) => print_report(&report),
    }
}

fn print_report(report: &SyncReport) -> Result<()> {
    output::title("Sync Report");
    for name in &report.succeeded {
        output::success(&format!("Cloned {}", name));
    }
    for (name, reason) in &report.failed {
        output::failure(name, reason);
    }

    if !report.is_success() {
        bail!("{} of {} clones failed", report.failed.len(), report.total());
    }

    output::success(&format!("Cloned {} projects", report.succeeded.len()));
    Ok(())
}
