//! Console-window handling for spawned tools

use tokio::process::Command;

/// `CREATE_NO_WINDOW` process creation flag
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Keep a console window from flashing up for each spawned tool
#[cfg(windows)]
pub(crate) fn suppress_console_window(cmd: &mut Command) {
    cmd.creation_flags(CREATE_NO_WINDOW);
}

/// No console window is created on this platform
#[cfg(not(windows))]
pub(crate) fn suppress_console_window(cmd: &mut Command) {
    let _ = cmd;
}
