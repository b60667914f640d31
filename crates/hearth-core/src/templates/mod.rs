//! Template rendering for the starter configuration file
//!
//! Uses Tera to render `~/.hearth.yaml` with commented defaults.

use crate::config::Config;
use crate::error::Result;
use tera::{Context, Tera};
use tracing::debug;

/// Template registry for config file generation
pub struct ConfigTemplateRegistry {
    tera: Tera,
}

impl ConfigTemplateRegistry {
    /// Create a new template registry with the embedded template
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template("hearth.yaml", include_str!("hearth.yaml.tera"))?;

        Ok(Self { tera })
    }

    /// Render the starter config from `defaults`
    ///
    /// The token is never written out; it is left empty so the
    /// `$GITHUB_TOKEN` fallback applies until the user fills it in.
    pub fn render_starter(&self, defaults: &Config) -> Result<String> {
        debug!("Rendering starter config");

        let mut ctx = Context::new();
        ctx.insert("projects_dir", defaults.projects_dir.as_str());
        ctx.insert("username", &defaults.username);
        ctx.insert("conda_bin", &defaults.conda_bin);
        ctx.insert("common_packages", &defaults.common_packages);
        ctx.insert("git", &defaults.git);
        ctx.insert("api_url", &defaults.api_url);

        Ok(self.tera.render("hearth.yaml", &ctx)?)
    }
}
