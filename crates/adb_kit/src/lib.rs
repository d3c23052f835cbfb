//! adb_kit: device-transport layer for managing Android devices
//!
//! This library drives the `adb` and `fastboot` command-line tools:
//! - Binary discovery for development and installed layouts
//! - Process invocation with separate stdout/stderr capture
//! - Device enumeration and transport mode detection (adb vs fastboot)
//! - Device snapshot readers (properties, RAM, storage, battery, Wi-Fi IP)
//! - Remote directory listing parser
//! - File transfer, package install, sideload, reboot and wireless adb
//!
//! # Example
//!
//! ```no_run
//! use adb_kit::{DeviceBridge, DeviceMode};
//!
//! #[tokio::main]
//! async fn main() -> adb_kit::Result<()> {
//!     let bridge = DeviceBridge::default();
//!
//!     if bridge.device_mode().await? == DeviceMode::DebugBridge {
//!         let info = bridge.device_info().await;
//!         println!("{} {} ({})", info.brand, info.model, info.battery_level);
//!
//!         for entry in bridge.list_files("/sdcard/").await? {
//!             println!("{:<10} {}", entry.file_type, entry.name);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

// Core modules
pub mod error;

// Configuration module
pub mod config;

// Process layer
pub mod exec;

// Transports
pub mod adb;
pub mod device;
pub mod fastboot;

// Core functionality
pub mod bridge;
pub mod mode;

#[cfg(test)]
mod testing;

// Re-export commonly used types and functions
pub use error::{KitError, Result};

// Config re-exports
pub use config::{KitConfig, ToolPathConfig, WirelessConfig, KIT_CONFIG};

// Process re-exports
pub use exec::{BinaryResolver, CommandRunner, ProcessRunner, Tool};

// Device re-exports
pub use adb::{DeviceInfo, FileEntry, FileType, NOT_AVAILABLE, NOT_ON_WIFI};
pub use device::{Device, ParseReport};
pub use mode::{current_mode, detect_mode, DeviceMode};

// Bridge re-exports
pub use bridge::DeviceBridge;
