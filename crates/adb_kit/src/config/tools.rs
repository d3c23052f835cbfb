//! Tool layout configuration for locating adb/fastboot and wireless defaults

use lazy_static::lazy_static;
use std::env;
use std::path::PathBuf;

/// Where the bundled control binaries live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPathConfig {
    /// Name of the subdirectory holding the binaries, in both layouts
    pub bin_dir_name: String,
    /// Root of the development layout; `None` means the working directory
    pub dev_root: Option<PathBuf>,
}

impl Default for ToolPathConfig {
    fn default() -> Self {
        Self {
            bin_dir_name: env::var("ADBKIT_BIN_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "bin".to_string()),
            dev_root: env::var_os("ADBKIT_DEV_ROOT")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }
}

/// Defaults for the wireless debug bridge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WirelessConfig {
    pub default_port: u16,
}

impl Default for WirelessConfig {
    fn default() -> Self {
        Self {
            default_port: env::var("ADBKIT_WIRELESS_PORT")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(5555),
        }
    }
}

/// Master configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KitConfig {
    pub tools: ToolPathConfig,
    pub wireless: WirelessConfig,
}

lazy_static! {
    /// Global configuration instance, read once from the environment
    pub static ref KIT_CONFIG: KitConfig = KitConfig::default();
}
