//! Fastboot (bootloader/flash mode) operations

use crate::device::{parse_device_lines, Device, ParseReport};
use crate::error::{KitError, Result};
use crate::exec::{CommandRunner, Tool};
use tracing::{debug, info};

/// Parse `fastboot devices` output, which has no header line
pub fn parse_fastboot_devices(output: &str) -> ParseReport<Device> {
    parse_device_lines(output.lines())
}

/// List devices waiting in the bootloader
pub async fn list_fastboot_devices<R: CommandRunner>(runner: &R) -> Result<Vec<Device>> {
    let output = runner.run(Tool::Fastboot, &["devices"]).await?;
    let report = parse_fastboot_devices(&output);
    if report.skipped > 0 {
        debug!("Skipped {} unrecognized fastboot devices line(s)", report.skipped);
    }
    Ok(report.into_items())
}

/// Reboot from the bootloader; `bootloader` uses the dedicated subcommand
pub async fn reboot<R: CommandRunner>(runner: &R, target: &str) -> Result<String> {
    match target {
        "bootloader" => runner.run(Tool::Fastboot, &["reboot-bootloader"]).await,
        "" => runner.run(Tool::Fastboot, &["reboot"]).await,
        other => runner.run(Tool::Fastboot, &["reboot", other]).await,
    }
}

/// Write an image file to a partition
pub async fn flash_partition<R: CommandRunner>(
    runner: &R,
    partition: &str,
    image: &str,
) -> Result<String> {
    let partition = partition.trim();
    let image = image.trim();
    if partition.is_empty() {
        return Err(KitError::InvalidArgument(
            "partition name cannot be empty".to_string(),
        ));
    }
    if image.is_empty() {
        return Err(KitError::InvalidArgument(
            "image path cannot be empty".to_string(),
        ));
    }

    info!("Flashing {} with {}", partition, image);
    runner
        .run(Tool::Fastboot, &["flash", partition, image])
        .await
        .map_err(KitError::during("failed to flash partition"))
}

/// Erase userdata and cache (factory reset)
pub async fn wipe_data<R: CommandRunner>(runner: &R) -> Result<String> {
    info!("Wiping user data");
    runner
        .run(Tool::Fastboot, &["-w"])
        .await
        .map_err(KitError::during("failed to wipe data"))
}
