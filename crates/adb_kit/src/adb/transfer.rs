//! File transfer and package management over the debug bridge

use crate::error::{KitError, Result};
use crate::exec::{CommandRunner, Tool};
use tracing::info;

fn require(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(KitError::InvalidArgument(format!("{} cannot be empty", what)));
    }
    Ok(())
}

/// Copy a local file or directory onto the device
pub async fn push<R: CommandRunner>(runner: &R, local: &str, remote: &str) -> Result<String> {
    info!("Pushing {} to {}", local, remote);
    runner
        .run(Tool::Adb, &["push", local, remote])
        .await
        .map_err(KitError::during("failed to push file"))
}

/// Copy a remote file or directory to the host, preserving timestamps and mode
pub async fn pull<R: CommandRunner>(runner: &R, remote: &str, local: &str) -> Result<String> {
    info!("Pulling {} to {}", remote, local);
    runner
        .run(Tool::Adb, &["pull", "-a", remote, local])
        .await
        .map_err(KitError::during("failed to pull file"))
}

/// Install an APK, replacing any existing installation
pub async fn install<R: CommandRunner>(runner: &R, path: &str) -> Result<String> {
    info!("Installing {}", path);
    runner
        .run(Tool::Adb, &["install", "-r", path])
        .await
        .map_err(KitError::during("failed to install package"))
}

pub async fn uninstall<R: CommandRunner>(runner: &R, package: &str) -> Result<String> {
    info!("Uninstalling {}", package);
    runner
        .run(Tool::Adb, &["shell", "pm", "uninstall", package])
        .await
        .map_err(KitError::during("failed to uninstall package"))
}

/// Send an update package to a device waiting in sideload mode
pub async fn sideload<R: CommandRunner>(runner: &R, path: &str) -> Result<String> {
    let path = path.trim();
    require(path, "file path")?;

    info!("Sideloading {}", path);
    runner
        .run(Tool::Adb, &["sideload", path])
        .await
        .map_err(KitError::during("failed to sideload package"))
}

/// Run an arbitrary command in the device shell
pub async fn shell<R: CommandRunner>(runner: &R, command: &str) -> Result<String> {
    require(command, "shell command")?;
    runner.shell(command).await
}
