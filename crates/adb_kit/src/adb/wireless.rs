//! Wireless debug bridge: switching to TCP/IP and connecting over the network

use crate::config::KIT_CONFIG;
use crate::error::{KitError, Result};
use crate::exec::{CommandRunner, Tool};
use tracing::{debug, info};

fn resolve_port(port: Option<u16>) -> u16 {
    port.unwrap_or(KIT_CONFIG.wireless.default_port)
}

fn address(ip: &str, port: Option<u16>) -> Result<String> {
    let ip = ip.trim();
    if ip.is_empty() {
        return Err(KitError::InvalidArgument(
            "IP address cannot be empty".to_string(),
        ));
    }
    Ok(format!("{}:{}", ip, resolve_port(port)))
}

/// Restart adbd on a USB-attached device listening on `port`
pub async fn enable_wireless<R: CommandRunner>(runner: &R, port: Option<u16>) -> Result<String> {
    let port = resolve_port(port).to_string();
    info!("Enabling TCP/IP debugging on port {}", port);
    runner
        .run(Tool::Adb, &["tcpip", &port])
        .await
        .map_err(KitError::during(
            "failed to enable tcpip (is device connected via USB?)",
        ))
}

/// Interpret `adb connect` output, which reports failures on stdout
pub fn interpret_connect_output(output: &str) -> Result<String> {
    let clean = output.trim();

    // also matches "already connected to"
    if clean.contains("connected to") {
        return Ok(clean.to_string());
    }

    if clean.is_empty() {
        return Err(KitError::Connection(
            "failed to connect. No device found or IP is wrong".to_string(),
        ));
    }

    Err(KitError::Connection(clean.to_string()))
}

/// Connect to a device at `ip:port`
pub async fn connect_wireless<R: CommandRunner>(
    runner: &R,
    ip: &str,
    port: Option<u16>,
) -> Result<String> {
    let address = address(ip, port)?;
    info!("Connecting to {}", address);

    let output = match runner.run(Tool::Adb, &["connect", &address]).await {
        Ok(output) => output,
        Err(KitError::CommandFailed { stdout, .. }) => stdout,
        Err(e) => return Err(e),
    };

    interpret_connect_output(&output)
}

/// Disconnect from `ip:port`, retrying with the bare IP if adb rejects the pair
pub async fn disconnect_wireless<R: CommandRunner>(
    runner: &R,
    ip: &str,
    port: Option<u16>,
) -> Result<String> {
    let address = address(ip, port)?;
    info!("Disconnecting from {}", address);

    let output = match runner.run(Tool::Adb, &["disconnect", &address]).await {
        Ok(output) => output,
        Err(e) if e.is_binary_missing() => return Err(e),
        Err(e) => {
            debug!("disconnect {} failed ({}), retrying with {}", address, e, ip.trim());
            runner
                .run(Tool::Adb, &["disconnect", ip.trim()])
                .await
                .map_err(KitError::during("failed to disconnect"))?
        }
    };

    if output.trim().is_empty() {
        return Ok(format!("Disconnected from {}", address));
    }
    Ok(output.trim().to_string())
}
