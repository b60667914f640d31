//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// hearth - manage local projects against your GitHub account
#[derive(Parser, Debug)]
#[command(name = "hearth")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the hearth config file (default: ~/.hearth.yaml)
    #[arg(short, long, global = true, env = "HEARTH_CONFIG")]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create, check out, list and remove projects
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Clone remote projects missing from the projects directory
    #[command(subcommand)]
    Sync(SyncCommands),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

// Project commands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Create a new project in the projects directory
    Create(CreateArgs),

    /// Open a project, cloning it from GitHub if only remote
    Checkout(CheckoutArgs),

    /// List local and/or remote projects
    List(ListArgs),

    /// Delete a local project directory
    Remove(RemoveArgs),

    /// Show local and remote details for a project
    Info(InfoArgs),
}

/// Virtual environment to provision for a new project
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VenvChoice {
    #[default]
    None,
    Virtualenv,
    Conda,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Project name
    pub name: String,

    /// Cookiecutter template URL to scaffold from
    #[arg(long, value_name = "URL")]
    pub cookiecutter: Option<String>,

    /// Virtual environment to create
    #[arg(long, value_enum, default_value_t = VenvChoice::None)]
    pub venv: VenvChoice,

    /// Skip `git init` even when enabled in config
    #[arg(long)]
    pub no_git: bool,
}

#[derive(Args, Debug)]
pub struct CheckoutArgs {
    /// Project name
    pub name: String,

    /// Detect and provision the project's environment after checkout
    #[arg(long)]
    pub env: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// List remote projects instead of local ones
    #[arg(short, long)]
    pub remote: bool,

    /// List local and remote projects
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Project name
    pub name: String,

    /// Skip confirmation
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Project name
    pub name: String,
}

// Sync commands
#[derive(Subcommand, Debug)]
pub enum SyncCommands {
    /// Clone every remote project not present locally
    All(SyncAllArgs),

    /// Clone the named projects that are not present locally
    These(SyncTheseArgs),
}

#[derive(Args, Debug)]
pub struct SyncFlags {
    /// Skip confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Maximum concurrent clones
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: u16,
}

#[derive(Args, Debug)]
pub struct SyncAllArgs {
    #[command(flatten)]
    pub flags: SyncFlags,
}

#[derive(Args, Debug)]
pub struct SyncTheseArgs {
    /// Project names
    #[arg(required = true)]
    pub names: Vec<String>,

    #[command(flatten)]
    pub flags: SyncFlags,
}

// Config commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,

    /// Print the value of one key
    Get(ConfigGetArgs),

    /// Write a starter config file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigGetArgs {
    /// Config key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}
