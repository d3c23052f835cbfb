//! Device bridge: the single entry point used by front ends

use crate::adb::{self, DeviceInfo, FileEntry};
use crate::device::Device;
use crate::error::Result;
use crate::exec::{CommandRunner, ProcessRunner};
use crate::fastboot;
use crate::mode::{self, DeviceMode};

/// Owns the command runner and exposes every device operation.
///
/// The runner is injected at construction; nothing is looked up from global
/// state, so several bridges (or a scripted one in tests) can coexist.
#[derive(Debug, Clone)]
pub struct DeviceBridge<R = ProcessRunner> {
    runner: R,
}

impl<R: CommandRunner> DeviceBridge<R> {
    /// Create a bridge over the given runner
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Devices visible to the debug bridge
    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        adb::list_devices(&self.runner).await
    }

    /// Devices waiting in the bootloader
    pub async fn list_fastboot_devices(&self) -> Result<Vec<Device>> {
        fastboot::list_fastboot_devices(&self.runner).await
    }

    /// Snapshot of the connected device; unreadable fields are `N/A`
    pub async fn device_info(&self) -> DeviceInfo {
        adb::device_info(&self.runner).await
    }

    /// Current transport mode, or the combined error if neither tool ran
    pub async fn device_mode(&self) -> Result<DeviceMode> {
        mode::detect_mode(&self.runner).await
    }

    /// Reboot, optionally into `target` (`recovery`, `bootloader`, ...)
    pub async fn reboot(&self, target: Option<&str>) -> Result<String> {
        mode::reboot(&self.runner, target.unwrap_or_default()).await
    }

    pub async fn install(&self, path: &str) -> Result<String> {
        adb::install(&self.runner, path).await
    }

    pub async fn uninstall(&self, package: &str) -> Result<String> {
        adb::uninstall(&self.runner, package).await
    }

    /// Entries of a remote directory, in listing order
    pub async fn list_files(&self, path: &str) -> Result<Vec<FileEntry>> {
        adb::list_files(&self.runner, path).await
    }

    pub async fn push(&self, local: &str, remote: &str) -> Result<String> {
        adb::push(&self.runner, local, remote).await
    }

    pub async fn pull(&self, remote: &str, local: &str) -> Result<String> {
        adb::pull(&self.runner, remote, local).await
    }

    pub async fn sideload(&self, path: &str) -> Result<String> {
        adb::sideload(&self.runner, path).await
    }

    /// Switch a USB-attached device to TCP/IP
    pub async fn enable_wireless(&self, port: Option<u16>) -> Result<String> {
        adb::enable_wireless(&self.runner, port).await
    }

    pub async fn connect_wireless(&self, ip: &str, port: Option<u16>) -> Result<String> {
        adb::connect_wireless(&self.runner, ip, port).await
    }

    pub async fn disconnect_wireless(&self, ip: &str, port: Option<u16>) -> Result<String> {
        adb::disconnect_wireless(&self.runner, ip, port).await
    }

    pub async fn flash_partition(&self, partition: &str, image: &str) -> Result<String> {
        fastboot::flash_partition(&self.runner, partition, image).await
    }

    pub async fn wipe_data(&self) -> Result<String> {
        fastboot::wipe_data(&self.runner).await
    }

    /// Run a command string in the device shell
    pub async fn shell(&self, command: &str) -> Result<String> {
        adb::shell(&self.runner, command).await
    }
}

impl Default for DeviceBridge<ProcessRunner> {
    fn default() -> Self {
        Self::new(ProcessRunner::default())
    }
}
