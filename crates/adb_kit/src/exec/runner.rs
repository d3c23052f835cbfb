//! Running the platform tools and normalizing their results

use super::resolver::{BinaryResolver, Tool};
use super::window::suppress_console_window;
use crate::error::{KitError, Result};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Executes the external control binaries.
///
/// Every call is a single request/response round-trip: the process is
/// spawned, awaited to completion and its trimmed stdout returned. There is
/// no timeout; a hung tool hangs the caller.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run `tool` with `args`, returning trimmed stdout on success
    async fn run(&self, tool: Tool, args: &[&str]) -> Result<String>;

    /// Run a single command string on the device through `adb shell`
    async fn shell(&self, command: &str) -> Result<String> {
        self.run(Tool::Adb, &["shell", command]).await
    }
}

/// Human-readable command line used in logs and errors
pub(crate) fn command_line(tool: Tool, args: &[&str]) -> String {
    if args.is_empty() {
        tool.to_string()
    } else {
        format!("{} {}", tool, args.join(" "))
    }
}

/// Runs the real binaries found by a [`BinaryResolver`]
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    resolver: BinaryResolver,
}

impl ProcessRunner {
    /// Runner using the configured binary layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner using a custom resolver
    pub fn with_resolver(resolver: BinaryResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &BinaryResolver {
        &self.resolver
    }
}

impl CommandRunner for ProcessRunner {
    async fn run(&self, tool: Tool, args: &[&str]) -> Result<String> {
        let program = self.resolver.resolve(tool)?;
        let line = command_line(tool, args);
        debug!("Running: {} ({})", line, program.display());

        let mut cmd = Command::new(&program);
        cmd.args(args).stdin(Stdio::null());
        suppress_console_window(&mut cmd);

        let output = cmd.output().await.map_err(|e| KitError::CommandFailed {
            command: line.clone(),
            reason: e.to_string(),
            stdout: String::new(),
            stderr: String::new(),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            warn!("{} exited with {}: {}", line, output.status, stderr);
            return Err(KitError::CommandFailed {
                command: line,
                reason: output.status.to_string(),
                stdout,
                stderr,
            });
        }

        Ok(stdout)
    }
}
