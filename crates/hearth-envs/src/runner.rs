//! Subprocess execution for environment tools
//!
//! Backends never spawn processes directly; they describe an [`Invocation`]
//! and hand it to a [`CommandRunner`]. [`ProcessRunner`] is the real
//! implementation, tests substitute a recording runner.

use crate::error::{Error, Result};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// A single external command to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name or path
    pub program: String,
    /// Arguments passed to the program
    pub args: Vec<String>,
    /// Working directory
    pub cwd: Utf8PathBuf,
    /// Discard child stdout/stderr instead of inheriting them
    pub silent: bool,
}

impl Invocation {
    /// Create an invocation of `program` running in `cwd`
    pub fn new(program: impl Into<String>, cwd: &Utf8Path) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.to_owned(),
            silent: false,
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set silent mode
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Full command line, for messages and logs
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Executes invocations on behalf of environment backends
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run to completion; non-zero exit is an error
    async fn run(&self, invocation: &Invocation) -> Result<()>;

    /// Run to completion and return captured stdout
    async fn capture(&self, invocation: &Invocation) -> Result<String>;
}

/// Runs invocations as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    fn command(invocation: &Invocation) -> Command {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null());
        cmd
    }
}

/// Translate a spawn failure, distinguishing a missing program
fn spawn_error(invocation: &Invocation, err: std::io::Error) -> Error {
    if err.kind() == std::io::ErrorKind::NotFound && which::which(&invocation.program).is_err() {
        Error::tool_not_installed(&invocation.program)
    } else {
        Error::Io(err)
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<()> {
        debug!("Running: {}", invocation.command_line());

        let mut cmd = Self::command(invocation);
        if invocation.silent {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        } else {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }

        let status = cmd
            .status()
            .await
            .map_err(|e| spawn_error(invocation, e))?;

        if !status.success() {
            return Err(Error::command_failed(
                invocation.command_line(),
                status.code(),
            ));
        }

        Ok(())
    }

    async fn capture(&self, invocation: &Invocation) -> Result<String> {
        debug!("Capturing: {}", invocation.command_line());

        let mut cmd = Self::command(invocation);
        cmd.stdout(Stdio::piped());
        if invocation.silent {
            cmd.stderr(Stdio::null());
        } else {
            cmd.stderr(Stdio::inherit());
        }

        let output = cmd
            .output()
            .await
            .map_err(|e| spawn_error(invocation, e))?;

        if !output.status.success() {
            return Err(Error::command_failed(
                invocation.command_line(),
                output.status.code(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
