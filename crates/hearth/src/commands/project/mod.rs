//! Project management commands

mod checkout;
mod create;
mod info;
mod list;
mod remove;

use anyhow::Result;
use camino::Utf8Path;

use crate::cli::ProjectCommands;

/// Run project subcommands
pub async fn run(cmd: ProjectCommands, config_path: Option<&Utf8Path>) -> Result<()> {
    match cmd {
        ProjectCommands::Create(args) => create::run(args, config_path).await,
        ProjectCommands::Checkout(args) => checkout::run(args, config_path).await,
        ProjectCommands::List(args) => list::run(args, config_path).await,
        ProjectCommands::Remove(args) => remove::run(args, config_path).await,
        ProjectCommands::Info(args) => info::run(args, config_path).await,
    }
}
