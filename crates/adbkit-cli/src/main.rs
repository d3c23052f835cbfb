//! adbkit - Command-line interface for Android device management
//!
//! Usage:
//!     adbkit [--json] <COMMAND>
//!
//! Environment Variables:
//!     ADBKIT_BIN_DIR: Name of the directory holding adb/fastboot (default: bin)
//!     ADBKIT_DEV_ROOT: Root of the development layout (default: current directory)
//!     ADBKIT_WIRELESS_PORT: Default port for wireless adb (default: 5555)

use adb_kit::{
    BinaryResolver, Device, DeviceBridge, DeviceInfo, DeviceMode, FileEntry, FileType, KitError,
    Tool,
};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

/// Android device manager over adb and fastboot
#[derive(Parser, Debug)]
#[command(name = "adbkit")]
#[command(about = "Android device manager over adb and fastboot")]
#[command(after_help = r#"Examples:
    # Show attached devices and the transport they are in
    adbkit devices
    adbkit mode

    # Device summary as JSON
    adbkit --json info

    # Browse and transfer files
    adbkit ls /sdcard/Download/
    adbkit pull /sdcard/DCIM ./photos

    # Wireless adb
    adbkit tcpip
    adbkit connect 192.168.1.100

    # Reboot into the bootloader (works from adb or fastboot)
    adbkit reboot bootloader
"#)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List devices visible to adb
    Devices,

    /// List devices in fastboot mode
    FastbootDevices,

    /// Show which transport currently reaches the device
    Mode,

    /// Show a device summary (model, version, storage, battery, ...)
    Info,

    /// List a directory on the device
    Ls {
        #[arg(default_value = "/sdcard/")]
        path: String,
    },

    /// Copy a local file or directory to the device
    Push { local: String, remote: String },

    /// Copy a file or directory from the device
    Pull { remote: String, local: String },

    /// Install (or reinstall) an APK
    Install { path: String },

    /// Uninstall a package by name
    Uninstall { package: String },

    /// Sideload an update package to a device in recovery
    Sideload { path: String },

    /// Reboot, optionally into recovery, bootloader, sideload, ...
    Reboot { target: Option<String> },

    /// Switch the USB-attached device to wireless adb
    Tcpip { port: Option<u16> },

    /// Connect to a device over the network
    Connect { ip: String, port: Option<u16> },

    /// Disconnect a network device
    Disconnect { ip: String, port: Option<u16> },

    /// Flash an image to a partition (fastboot mode)
    Flash { partition: String, image: String },

    /// Erase user data (fastboot mode)
    Wipe {
        /// Confirm the factory reset
        #[arg(long)]
        yes: bool,
    },

    /// Run a command in the device shell
    Shell {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Check that adb and fastboot can be found
    Check,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_devices(devices: &[Device], json: bool, empty: &str) -> Result<()> {
    if json {
        return print_json(devices);
    }
    if devices.is_empty() {
        println!("{}", empty);
        return Ok(());
    }
    println!("{}", "-".repeat(60));
    for device in devices {
        let icon = if device.is_bridge_reachable() || device.status == "fastboot" {
            "\u{2713}"
        } else {
            "\u{2717}"
        };
        println!("  {} {:<30} [{}]", icon, device.serial, device.status);
    }
    Ok(())
}

fn print_info(info: &DeviceInfo) {
    println!("{}", "=".repeat(50));
    println!("Model:           {} {}", info.brand, info.model);
    println!("Codename:        {}", info.codename);
    println!("Android version: {}", info.android_version);
    println!("Build:           {}", info.build_number);
    println!("IP address:      {}", info.ip_address);
    println!("Rooted:          {}", info.root_status);
    println!("RAM:             {}", info.ram_total);
    println!("Storage:         {}", info.storage_info);
    println!("Battery:         {}", info.battery_level);
    println!("{}", "=".repeat(50));
}

fn print_listing(path: &str, entries: &[FileEntry]) {
    println!("{} ({} entries)", path, entries.len());
    for entry in entries {
        let marker = match entry.file_type {
            FileType::Directory => "/",
            FileType::Symlink => "@",
            FileType::File => "",
        };
        println!(
            "  {} {:>10} {} {:<5} {}{}",
            entry.permissions, entry.size, entry.date, entry.time, entry.name, marker
        );
    }
}

/// Print a command's output, or a fallback when the tool printed nothing
fn print_output(output: &str, fallback: &str) {
    if output.is_empty() {
        println!("\u{2713} {}", fallback);
    } else {
        println!("{}", output);
    }
}

/// Report where each tool resolves; returns false if one is missing
async fn check_tools(bridge: &DeviceBridge) -> bool {
    println!("\u{1F50D} Checking platform tools...");
    println!("{}", "-".repeat(50));

    let resolver: &BinaryResolver = bridge.runner().resolver();
    let mut all_passed = true;

    for (i, tool) in [Tool::Adb, Tool::Fastboot].into_iter().enumerate() {
        print!("{}. Checking {}... ", i + 1, tool);
        match resolver.resolve(tool) {
            Ok(path) => println!("\u{2705} OK ({})", path.display()),
            Err(e) => {
                println!("\u{274C} FAILED");
                println!("   Error: {}", e);
                if let Ok(system) = which::which(tool.name()) {
                    println!("   Found a system copy at {}", system.display());
                    println!(
                        "   Solution: copy it to {}",
                        resolver.dev_path(tool).display()
                    );
                } else {
                    println!(
                        "   Solution: install Android platform-tools and place {} in the bin directory",
                        tool
                    );
                }
                all_passed = false;
            }
        }
    }

    if all_passed {
        print!("3. Checking device mode... ");
        match bridge.device_mode().await {
            Ok(DeviceMode::Unknown) => println!("\u{2705} OK (no device attached)"),
            Ok(mode) => println!("\u{2705} OK ({})", mode),
            Err(e) => {
                println!("\u{274C} FAILED");
                println!("   Error: {}", e);
                all_passed = false;
            }
        }
    }

    println!("{}", "-".repeat(50));
    if all_passed {
        println!("\u{2705} All checks passed!");
    } else {
        println!("\u{274C} Check failed. Please fix the issues above.");
    }
    all_passed
}

async fn run(cli: Cli) -> Result<()> {
    let bridge = DeviceBridge::default();
    let json = cli.json;

    match cli.command {
        Commands::Devices => {
            let devices = bridge.list_devices().await?;
            print_devices(&devices, json, "No devices connected.")?;
        }
        Commands::FastbootDevices => {
            let devices = bridge.list_fastboot_devices().await?;
            print_devices(&devices, json, "No devices in fastboot mode.")?;
        }
        Commands::Mode => {
            let mode = bridge.device_mode().await?;
            if json {
                print_json(&mode)?;
            } else {
                println!("{}", mode);
            }
        }
        Commands::Info => {
            let info = bridge.device_info().await;
            if json {
                print_json(&info)?;
            } else {
                print_info(&info);
            }
        }
        Commands::Ls { path } => {
            let entries = bridge.list_files(&path).await?;
            if json {
                print_json(&entries)?;
            } else {
                print_listing(&path, &entries);
            }
        }
        Commands::Push { local, remote } => {
            print_output(&bridge.push(&local, &remote).await?, "Pushed");
        }
        Commands::Pull { remote, local } => {
            print_output(&bridge.pull(&remote, &local).await?, "Pulled");
        }
        Commands::Install { path } => {
            print_output(&bridge.install(&path).await?, "Installed");
        }
        Commands::Uninstall { package } => {
            print_output(&bridge.uninstall(&package).await?, "Uninstalled");
        }
        Commands::Sideload { path } => {
            print_output(&bridge.sideload(&path).await?, "Sideload finished");
        }
        Commands::Reboot { target } => {
            let output = bridge.reboot(target.as_deref()).await?;
            print_output(&output, "Rebooting");
        }
        Commands::Tcpip { port } => {
            print_output(&bridge.enable_wireless(port).await?, "TCP/IP mode enabled");
        }
        Commands::Connect { ip, port } => {
            println!("\u{2713} {}", bridge.connect_wireless(&ip, port).await?);
        }
        Commands::Disconnect { ip, port } => {
            println!("\u{2713} {}", bridge.disconnect_wireless(&ip, port).await?);
        }
        Commands::Flash { partition, image } => {
            let output = bridge
                .flash_partition(&partition, &image)
                .await
                .with_context(|| format!("flashing {} from {}", partition, image))?;
            print_output(&output, "Flash complete");
        }
        Commands::Wipe { yes } => {
            if !yes {
                return Err(anyhow!(
                    "wiping erases all user data; re-run with --yes to confirm"
                ));
            }
            print_output(&bridge.wipe_data().await?, "Wipe complete");
        }
        Commands::Shell { command } => {
            println!("{}", bridge.shell(&command.join(" ")).await?);
        }
        Commands::Check => {
            if !check_tools(&bridge).await {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match run(cli).await {
        Err(e) if e.downcast_ref::<KitError>().is_some_and(KitError::is_binary_missing) => {
            eprintln!("Error: {:#}", e);
            eprintln!("Run `adbkit check` to see where adb and fastboot are expected.");
            std::process::exit(2);
        }
        other => other,
    }
}
