//! Transport mode detection and mode-aware reboot
//!
//! A device is reachable either through the debug bridge or through the
//! bootloader, never both for long. While switching it can briefly show up
//! on both; the debug bridge wins whenever it answers.

use crate::adb;
use crate::error::{KitError, Result};
use crate::exec::{CommandRunner, Tool};
use crate::fastboot;
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

/// Which transport currently reaches the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DeviceMode {
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "adb")]
    DebugBridge,
    #[serde(rename = "fastboot")]
    Flash,
}

impl DeviceMode {
    pub fn label(&self) -> &'static str {
        match self {
            DeviceMode::Unknown => "unknown",
            DeviceMode::DebugBridge => "adb",
            DeviceMode::Flash => "fastboot",
        }
    }
}

impl fmt::Display for DeviceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Classify the connected device from fresh enumerations of both transports.
///
/// `Ok(Unknown)` means nothing is attached. An `Err` is returned only when
/// both enumerations failed to run, and stands for `Unknown` with the
/// combined cause.
pub async fn detect_mode<R: CommandRunner>(runner: &R) -> Result<DeviceMode> {
    let adb_err = match adb::list_devices(runner).await {
        Ok(devices) => {
            if devices.iter().any(|d| d.is_bridge_reachable()) {
                return Ok(DeviceMode::DebugBridge);
            }
            None
        }
        Err(e) => Some(e),
    };

    let fastboot_err = match fastboot::list_fastboot_devices(runner).await {
        Ok(devices) if !devices.is_empty() => return Ok(DeviceMode::Flash),
        Ok(_) => None,
        Err(e) => Some(e),
    };

    match (adb_err, fastboot_err) {
        (Some(adb), Some(fastboot)) => Err(KitError::ModeDetection {
            adb: Box::new(adb),
            fastboot: Box::new(fastboot),
        }),
        _ => Ok(DeviceMode::Unknown),
    }
}

/// Like [`detect_mode`], reporting detection failures as `Unknown`
pub async fn current_mode<R: CommandRunner>(runner: &R) -> DeviceMode {
    detect_mode(runner).await.unwrap_or_else(|e| {
        warn!("{}", e);
        DeviceMode::Unknown
    })
}

/// Reboot through whichever transport reaches the device.
///
/// `target` is an optional state such as `recovery`, `bootloader` or
/// `sideload`; empty means a normal reboot.
pub async fn reboot<R: CommandRunner>(runner: &R, target: &str) -> Result<String> {
    let target = target.trim();
    let mode = detect_mode(runner).await?;
    info!("Rebooting via {} into {:?}", mode, target);

    match mode {
        DeviceMode::DebugBridge => {
            let mut args = vec!["reboot"];
            if !target.is_empty() {
                args.push(target);
            }
            runner.run(Tool::Adb, &args).await
        }
        DeviceMode::Flash => fastboot::reboot(runner, target).await,
        DeviceMode::Unknown => Err(KitError::NoDevice(
            "no connected device detected in adb or fastboot mode".to_string(),
        )),
    }
}
