//! Environment trait definitions

use crate::error::Result;
use async_trait::async_trait;
use camino::Utf8Path;

/// A virtual environment tied to one project root
///
/// `install` and `install_self` create the environment first when it is
/// absent. `create` is not idempotent: calling it when the environment is
/// already present fails with [`crate::Error::AlreadyExists`].
#[async_trait]
pub trait Environment: Send + Sync {
    /// Backend name
    fn name(&self) -> &'static str;

    /// Project root the environment belongs to
    fn root(&self) -> &Utf8Path;

    /// Whether the environment exists on disk
    fn exists(&self) -> bool;

    /// Create the environment
    async fn create(&mut self, silent: bool) -> Result<()>;

    /// Install packages into the environment
    async fn install(&mut self, packages: &[String], silent: bool) -> Result<()>;

    /// Install the project itself along with its development dependencies
    async fn install_self(&mut self, silent: bool) -> Result<()>;
}
