//! # hearth-projects
//!
//! Project management for the hearth CLI:
//! - [`Project`] model and local directory enumeration
//! - [`GitHubClient`] registry access behind the [`RepoRegistry`] trait
//! - [`ProjectResolver`] local-first checkout resolution
//! - [`SyncEngine`] set-difference sync of remote repositories
//! - [`listing`] sorted views of local and remote names
//! - Git clone/init and cookiecutter scaffolding

pub mod error;
pub mod git;
pub mod listing;
pub mod project;
pub mod registry;
pub mod resolver;
pub mod scaffold;
pub mod sync;

pub use error::{Error, Result};
pub use git::{clone_repository, init_repository, Cloner, GitCloner};
pub use listing::{render_sections, sort_names, ListMode, Section};
pub use project::{local_project_names, remove_project, validate_name, Project};
pub use registry::{GitHubClient, License, RepoInfo, RepoRegistry};
pub use resolver::{ProjectResolver, Resolution};
pub use scaffold::scaffold;
pub use sync::{
    confirmation_prompt, plan, SyncEngine, SyncOptions, SyncOutcome, SyncReport, Universe,
};
