//! External process layer
//!
//! This module provides:
//! - `resolver`: Locating the bundled adb/fastboot binaries
//! - `runner`: Running them and normalizing their output
//! - `window`: Console-window suppression on Windows

mod resolver;
mod runner;
mod window;

pub use resolver::{BinaryResolver, Tool};
pub use runner::{CommandRunner, ProcessRunner};

#[cfg(test)]
pub(crate) use runner::command_line;
