//! Project scaffolding through cookiecutter

use crate::error::{Error, Result};
use camino::Utf8Path;
use tokio::process::Command;
use tracing::{debug, info};

const COOKIECUTTER: &str = "cookiecutter";

/// Render the cookiecutter template at `url` into `output_dir`
///
/// cookiecutter prompts for the template's variables, so stdio is inherited.
pub async fn scaffold(url: &str, output_dir: &Utf8Path) -> Result<()> {
    let cookiecutter =
        which::which(COOKIECUTTER).map_err(|_| Error::tool_not_installed(COOKIECUTTER))?;

    info!("Scaffolding from {} into {}", url, output_dir);
    debug!("Using {}", cookiecutter.display());

    let status = Command::new(cookiecutter)
        .arg(url)
        .arg("--output-dir")
        .arg(output_dir.as_str())
        .status()
        .await?;

    if !status.success() {
        return Err(Error::scaffold(format!(
            "cookiecutter exited with {}",
            status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "a signal".to_string())
        )));
    }

    Ok(())
}
