//! Debug-bridge device enumeration

use crate::device::{parse_device_lines, Device, ParseReport};
use crate::error::Result;
use crate::exec::{CommandRunner, Tool};
use tracing::debug;

/// Parse `adb devices` output; the first line is the "List of devices attached" header
pub fn parse_adb_devices(output: &str) -> ParseReport<Device> {
    parse_device_lines(output.lines().skip(1))
}

/// List devices visible to the debug bridge, in any state
pub async fn list_devices<R: CommandRunner>(runner: &R) -> Result<Vec<Device>> {
    let output = runner.run(Tool::Adb, &["devices"]).await?;
    let report = parse_adb_devices(&output);
    if report.skipped > 0 {
        debug!("Skipped {} unrecognized adb devices line(s)", report.skipped);
    }
    Ok(report.into_items())
}
