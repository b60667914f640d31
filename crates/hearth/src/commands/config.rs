//! Config command

use anyhow::{bail, Result};
use camino::{Utf8Path, Utf8PathBuf};
use hearth_core::Config;

use crate::cli::{ConfigCommands, ConfigGetArgs, ConfigInitArgs};
use crate::output;

pub fn run(cmd: ConfigCommands, config_path: Option<&Utf8Path>) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(config_path),
        ConfigCommands::Get(args) => get(args, config_path),
        ConfigCommands::Init(args) => init(args, config_path),
    }
}

fn resolve_path(config_path: Option<&Utf8Path>) -> Result<Utf8PathBuf> {
    match config_path {
        Some(path) => Ok(path.to_owned()),
        None => Ok(Config::default_path()?),
    }
}

fn show(config_path: Option<&Utf8Path>) -> Result<()> {
    let path = resolve_path(config_path)?;
    let config = Config::load(Some(path.as_path()))?;

    let mut rows = vec![("file", path.to_string())];
    rows.extend(config.entries());

    output::title("Configuration");
    output::fields(&rows);

    if let Err(e) = config.validate() {
        output::warning(&e.to_string());
    }

    Ok(())
}

fn get(args: ConfigGetArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    println!("{}", config.get(&args.key)?);
    Ok(())
}

fn init(args: ConfigInitArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let path = resolve_path(config_path)?;

    if path.exists() && !args.force {
        bail!("File {} already exists. Use --force to overwrite.", path);
    }

    Config::write_starter(&path)?;

    output::success(&format!("Created {}", path));
    output::info("Set 'username' and 'token' before running project commands");
    Ok(())
}
