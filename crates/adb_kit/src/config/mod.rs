//! Configuration module for adb_kit
//!
//! This module contains:
//! - `tools`: Binary layout and wireless defaults, read from the environment

mod tools;

pub use tools::{KitConfig, ToolPathConfig, WirelessConfig, KIT_CONFIG};
