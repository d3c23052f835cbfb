//! Device property and metric readers
//!
//! Every reader is best effort: a failed command or unrecognized output turns
//! into a sentinel string for that one field, never an error for the whole
//! snapshot.

use crate::error::Result;
use crate::exec::{CommandRunner, Tool};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::warn;

/// Sentinel for a field that could not be read
pub const NOT_AVAILABLE: &str = "N/A";

/// Shown when neither wlan0 nor the DHCP property yields an address
pub const NOT_ON_WIFI: &str = "N/A (Not on WiFi?)";

const KIB_PER_GIB: f64 = 1024.0 * 1024.0;

lazy_static! {
    static ref WLAN_INET_RE: Regex = Regex::new(r"inet (\d+\.\d+\.\d+\.\d+)/\d+").unwrap();
    static ref MEM_TOTAL_RE: Regex = Regex::new(r"MemTotal:\s*(\d+)\s*kB").unwrap();
    static ref BATTERY_LEVEL_RE: Regex = Regex::new(r":\s*(\d+)").unwrap();
}

/// Point-in-time snapshot of a device, formatted for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub model: String,
    pub android_version: String,
    pub build_number: String,
    pub codename: String,
    pub brand: String,
    pub ip_address: String,
    pub root_status: String,
    pub ram_total: String,
    pub storage_info: String,
    pub battery_level: String,
}

/// Extract the IPv4 address from `ip addr show wlan0`
pub fn parse_wlan_ip(output: &str) -> Option<String> {
    WLAN_INET_RE
        .captures(output)
        .map(|caps| caps[1].to_string())
}

/// Total RAM from a `/proc/meminfo` MemTotal line, e.g. `7.8 GB`
pub fn parse_mem_total(output: &str) -> Option<String> {
    let caps = MEM_TOTAL_RE.captures(output)?;
    let kib: u64 = caps[1].parse().ok()?;
    Some(format!("{:.1} GB", kib_to_gib(kib)))
}

/// Used and total space from `df /data`, e.g. `2.0 GB / 8.0 GB`
///
/// The second line holds the filesystem row: name, 1K-blocks, used, ...
pub fn parse_storage(output: &str) -> Option<String> {
    let row = output.lines().nth(1)?;
    let fields: Vec<&str> = row.split_whitespace().collect();
    if fields.len() < 4 {
        return None;
    }

    let total_kib: u64 = fields[1].parse().ok()?;
    let used_kib: u64 = fields[2].parse().ok()?;

    Some(format!(
        "{:.1} GB / {:.1} GB",
        kib_to_gib(used_kib),
        kib_to_gib(total_kib)
    ))
}

/// Battery percentage from a `dumpsys battery` level line, e.g. `85%`
pub fn parse_battery_level(output: &str) -> Option<String> {
    BATTERY_LEVEL_RE
        .captures(output)
        .map(|caps| format!("{}%", &caps[1]))
}

/// `"Yes"` only when the elevated `id -u` ran and printed exactly `0`
pub fn root_status_from(result: &Result<String>) -> &'static str {
    match result {
        Ok(output) if output.trim() == "0" => "Yes",
        _ => "No",
    }
}

fn kib_to_gib(kib: u64) -> f64 {
    kib as f64 / KIB_PER_GIB
}

fn or_not_available(value: Option<String>, field: &str) -> String {
    value.unwrap_or_else(|| {
        warn!("Could not read {}", field);
        NOT_AVAILABLE.to_string()
    })
}

/// Read a system property; empty or failed lookups become `N/A`.
///
/// `getprop` prints an empty line for unset keys, so empty is treated as
/// unreadable rather than shown as a blank field.
pub async fn get_prop<R: CommandRunner>(runner: &R, key: &str) -> String {
    match runner.run(Tool::Adb, &["shell", "getprop", key]).await {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        Ok(_) => NOT_AVAILABLE.to_string(),
        Err(e) => {
            warn!("getprop {} failed: {}", key, e);
            NOT_AVAILABLE.to_string()
        }
    }
}

/// Whether `su` grants uid 0
pub async fn root_status<R: CommandRunner>(runner: &R) -> String {
    let result = runner.run(Tool::Adb, &["shell", "su", "-c", "id -u"]).await;
    root_status_from(&result).to_string()
}

/// Wi-Fi address from wlan0, then the DHCP property
pub async fn ip_address<R: CommandRunner>(runner: &R) -> String {
    if let Ok(output) = runner
        .run(Tool::Adb, &["shell", "ip", "addr", "show", "wlan0"])
        .await
    {
        if let Some(ip) = parse_wlan_ip(&output) {
            return ip;
        }
    }

    let ip = get_prop(runner, "dhcp.wlan0.ipaddress").await;
    if ip != NOT_AVAILABLE && !ip.is_empty() {
        return ip;
    }

    NOT_ON_WIFI.to_string()
}

pub async fn ram_total<R: CommandRunner>(runner: &R) -> String {
    let output = runner
        .run(Tool::Adb, &["shell", "cat /proc/meminfo | grep MemTotal"])
        .await
        .ok();
    or_not_available(output.as_deref().and_then(parse_mem_total), "total RAM")
}

pub async fn storage_info<R: CommandRunner>(runner: &R) -> String {
    let output = runner.run(Tool::Adb, &["shell", "df /data"]).await.ok();
    or_not_available(output.as_deref().and_then(parse_storage), "storage usage")
}

pub async fn battery_level<R: CommandRunner>(runner: &R) -> String {
    let output = runner.shell("dumpsys battery | grep level").await.ok();
    or_not_available(
        output.as_deref().and_then(parse_battery_level),
        "battery level",
    )
}

/// Assemble a full snapshot; individual failures only degrade their field
pub async fn device_info<R: CommandRunner>(runner: &R) -> DeviceInfo {
    DeviceInfo {
        model: get_prop(runner, "ro.product.model").await,
        android_version: get_prop(runner, "ro.build.version.release").await,
        build_number: get_prop(runner, "ro.build.id").await,
        codename: get_prop(runner, "ro.product.device").await,
        brand: get_prop(runner, "ro.product.brand").await,
        ip_address: ip_address(runner).await,
        root_status: root_status(runner).await,
        ram_total: ram_total(runner).await,
        storage_info: storage_info(runner).await,
        battery_level: battery_level(runner).await,
    }
}
