//! Error types for netclass

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for netclass operations
pub type Result<T> = std::result::Result<T, NetClassError>;

/// Errors raised while reading `/sys/class/net`
#[derive(Error, Debug)]
pub enum NetClassError {
    /// The sysfs mount point is not a directory
    #[error("Invalid sysfs mount point: {0}")]
    InvalidMountPoint(PathBuf),

    /// The devices root could not be listed
    #[error("Cannot read network devices root {path}: {source}")]
    RootUnreadable {
        /// Path of the devices root
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A directly requested device has no directory
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// An attribute file exists but its content has the wrong shape
    #[error("Failed to parse attribute {attribute} of device {device} ({value:?}): {reason}")]
    AttributeParse {
        /// Device name
        device: String,
        /// Attribute file name
        attribute: &'static str,
        /// Raw (trimmed) file content
        value: String,
        /// Why the content was rejected
        reason: String,
    },

    /// An attribute file exists but could not be read
    #[error("Failed to read attribute {attribute} of device {device}: {source}")]
    AttributeRead {
        /// Device name
        device: String,
        /// Attribute file name
        attribute: &'static str,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A device filter pattern is not a valid regular expression
    #[error("Invalid device pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Regex compilation error
        #[source]
        source: regex::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl NetClassError {
    /// True for [`NetClassError::DeviceNotFound`], the one outcome callers
    /// are expected to handle rather than report as a failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, NetClassError::DeviceNotFound(_))
    }
}
