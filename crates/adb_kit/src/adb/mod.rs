//! ADB (Android Debug Bridge) operations
//!
//! This module provides:
//! - `devices`: Device enumeration
//! - `info`: Property and metric readers for the device snapshot
//! - `listing`: Remote directory listing
//! - `transfer`: Push/pull, package install/uninstall, sideload, shell
//! - `wireless`: TCP/IP mode and network connect/disconnect

mod devices;
mod info;
mod listing;
mod transfer;
mod wireless;

pub use devices::{list_devices, parse_adb_devices};
pub use info::{
    battery_level, device_info, get_prop, ip_address, parse_battery_level, parse_mem_total,
    parse_storage, parse_wlan_ip, ram_total, root_status, root_status_from, storage_info,
    DeviceInfo, NOT_AVAILABLE, NOT_ON_WIFI,
};
pub use listing::{list_files, parse_listing, FileEntry, FileType};
pub use transfer::{install, pull, push, shell, sideload, uninstall};
pub use wireless::{
    connect_wireless, disconnect_wireless, enable_wireless, interpret_connect_output,
};
