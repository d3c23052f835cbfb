//! Error types for device-transport operations

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KitError {
    #[error(
        "binary '{name}' not found in dev path '{}' or prod path '{}'",
        dev_path.display(),
        prod_path.display()
    )]
    BinaryNotFound {
        name: String,
        dev_path: PathBuf,
        prod_path: PathBuf,
    },

    #[error("failed to run {command}: {reason} (stderr: {stderr})")]
    CommandFailed {
        command: String,
        reason: String,
        stdout: String,
        stderr: String,
    },

    #[error("failed to detect device mode: adb error: {adb}, fastboot error: {fastboot}")]
    ModeDetection {
        adb: Box<KitError>,
        fastboot: Box<KitError>,
    },

    #[error("{action}: {source}")]
    Operation {
        action: &'static str,
        #[source]
        source: Box<KitError>,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NoDevice(String),

    #[error("{0}")]
    Connection(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl KitError {
    /// Wrap an error with the label of the operation that produced it
    pub(crate) fn during(action: &'static str) -> impl FnOnce(KitError) -> KitError {
        move |source| KitError::Operation {
            action,
            source: Box::new(source),
        }
    }

    /// True when the failure is a deployment defect rather than a device-side one
    pub fn is_binary_missing(&self) -> bool {
        match self {
            KitError::BinaryNotFound { .. } => true,
            KitError::Operation { source, .. } => source.is_binary_missing(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, KitError>;
