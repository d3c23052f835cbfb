//! Binary discovery for the bundled platform tools

use crate::config::ToolPathConfig;
use crate::error::{KitError, Result};
use serde::Serialize;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The two external control binaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Adb,
    Fastboot,
}

impl Tool {
    /// Logical name, without any platform suffix
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Adb => "adb",
            Tool::Fastboot => "fastboot",
        }
    }

    /// File name on this platform (`adb.exe` on Windows)
    pub fn file_name(&self) -> String {
        format!("{}{}", self.name(), env::consts::EXE_SUFFIX)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Locates tool binaries in the development layout first, then next to the
/// running executable.
///
/// Roots left as `None` are looked up on every call, so a resolver built once
/// still sees the current working directory.
#[derive(Debug, Clone)]
pub struct BinaryResolver {
    dev_root: Option<PathBuf>,
    install_root: Option<PathBuf>,
    bin_dir_name: String,
}

impl BinaryResolver {
    /// Resolver with explicit development and installation roots
    pub fn new(dev_root: impl Into<PathBuf>, install_root: impl Into<PathBuf>) -> Self {
        Self {
            dev_root: Some(dev_root.into()),
            install_root: Some(install_root.into()),
            bin_dir_name: "bin".to_string(),
        }
    }

    /// Resolver driven by configuration; unset roots follow the process
    pub fn from_config(config: &ToolPathConfig) -> Self {
        Self {
            dev_root: config.dev_root.clone(),
            install_root: None,
            bin_dir_name: config.bin_dir_name.clone(),
        }
    }

    /// Override the binary subdirectory name
    pub fn with_bin_dir_name(mut self, name: impl Into<String>) -> Self {
        self.bin_dir_name = name.into();
        self
    }

    /// Candidate path in the development layout.
    ///
    /// An unreadable working directory (e.g. deleted) leaves a relative
    /// candidate, so resolution still moves on to the install layout.
    pub fn dev_path(&self, tool: Tool) -> PathBuf {
        let cwd = env::current_dir().unwrap_or_else(|e| {
            debug!("Working directory unavailable: {}", e);
            PathBuf::from(".")
        });
        let root = match &self.dev_root {
            // joining an absolute root replaces cwd entirely
            Some(root) => cwd.join(root),
            None => cwd,
        };
        self.in_bin_dir(&root, tool)
    }

    /// Candidate path in the installed layout
    pub fn prod_path(&self, tool: Tool) -> PathBuf {
        let root = match &self.install_root {
            Some(root) => root.clone(),
            None => env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf))
                .unwrap_or_else(|| PathBuf::from(".")),
        };
        self.in_bin_dir(&root, tool)
    }

    /// Return an existing path for `tool`, or name both attempted locations
    pub fn resolve(&self, tool: Tool) -> Result<PathBuf> {
        let dev_path = self.dev_path(tool);
        if dev_path.is_file() {
            debug!("Resolved {} in dev layout: {}", tool, dev_path.display());
            return Ok(dev_path);
        }

        let prod_path = self.prod_path(tool);
        if prod_path.is_file() {
            debug!("Resolved {} in install layout: {}", tool, prod_path.display());
            return Ok(prod_path);
        }

        Err(KitError::BinaryNotFound {
            name: tool.name().to_string(),
            dev_path,
            prod_path,
        })
    }

    fn in_bin_dir(&self, root: &Path, tool: Tool) -> PathBuf {
        root.join(&self.bin_dir_name).join(tool.file_name())
    }
}

impl Default for BinaryResolver {
    fn default() -> Self {
        Self::from_config(&crate::config::KIT_CONFIG.tools)
    }
}
