//! # hearth-core
//!
//! Core library for the hearth CLI providing:
//! - Configuration file parsing (`~/.hearth.yaml`)
//! - Validation of required settings before any command runs
//! - Starter configuration rendering
//! - Shared error types

pub mod config;
pub mod error;
pub mod templates;
pub mod utils;

pub use config::{Config, CONFIG_KEYS};
pub use error::{Error, Result};
pub use utils::get_home_dir;
