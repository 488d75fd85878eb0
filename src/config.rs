//! Configuration management for netclass
//!
//! This module provides TOML persistence for the sysfs mount point and the
//! device include/exclude patterns used for bulk listing.

use crate::error::{NetClassError, Result};
use crate::filter::RegexFilter;
use crate::fs::{RealFs, DEFAULT_MOUNT_POINT};
use crate::net_class::NetClassFs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// netclass configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where sysfs is mounted
    #[serde(default)]
    pub sysfs: SysfsConfig,
    /// Which devices bulk listing reports
    #[serde(default)]
    pub devices: DeviceFilterConfig,
}

/// sysfs location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SysfsConfig {
    /// sysfs mount point
    #[serde(default = "default_mount_point")]
    pub mount_point: PathBuf,
}

/// Device name filter patterns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceFilterConfig {
    /// Only devices matching this regex are listed
    #[serde(default)]
    pub include: Option<String>,
    /// Devices matching this regex are never listed
    #[serde(default)]
    pub exclude: Option<String>,
}

fn default_mount_point() -> PathBuf {
    PathBuf::from(DEFAULT_MOUNT_POINT)
}

impl Default for SysfsConfig {
    fn default() -> Self {
        Self {
            mount_point: default_mount_point(),
        }
    }
}

impl Config {
    /// Get the default configuration directory
    ///
    /// Returns `~/.config/netclass` on Unix-like systems,
    /// or `%APPDATA%\netclass` on Windows.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(windows) {
            std::env::var("APPDATA")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
        } else {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|_| PathBuf::from(".config"))
        };

        Ok(config_dir.join("netclass"))
    }

    /// Load configuration from the default path
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let config_file = Self::default_path()?.join("config.toml");

        if !config_file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_file)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| NetClassError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::default_path()?;
        std::fs::create_dir_all(&config_dir)?;
        self.save_to(&config_dir.join("config.toml"))
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| NetClassError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Build the device filter described by `[devices]`
    pub fn device_filter(&self) -> Result<RegexFilter> {
        RegexFilter::new(
            self.devices.include.as_deref(),
            self.devices.exclude.as_deref(),
        )
    }

    /// Open the sysfs tree described by `[sysfs]`
    pub fn net_class_fs(&self) -> Result<NetClassFs<RealFs>> {
        NetClassFs::open(&self.sysfs.mount_point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::DeviceFilter;
    use crate::fs::testing::eth0_fixture;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sysfs.mount_point, PathBuf::from("/sys"));
        assert!(config.devices.include.is_none());
        assert!(config.devices.exclude.is_none());
        assert!(config.device_filter().unwrap().has_no_filters());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            sysfs: SysfsConfig {
                mount_point: PathBuf::from("/host/sys"),
            },
            devices: DeviceFilterConfig {
                include: Some("^eth".to_string()),
                exclude: Some("^veth".to_string()),
            },
        };
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized = Config::from_toml(&toml_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml("[devices]\nexclude = \"^lo$\"\n").unwrap();
        assert_eq!(config.sysfs.mount_point, PathBuf::from("/sys"));

        let filter = config.device_filter().unwrap();
        assert!(filter.ignored("lo"));
        assert!(!filter.ignored("eth0"));
    }

    #[test]
    fn test_bad_config() {
        assert!(matches!(
            Config::from_toml("[devices]\ninclude = 5\n"),
            Err(NetClassError::Config(_))
        ));

        let config = Config::from_toml("[devices]\ninclude = \"[\"\n").unwrap();
        assert!(matches!(
            config.device_filter(),
            Err(NetClassError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            devices: DeviceFilterConfig {
                include: Some("^eth0$".to_string()),
                exclude: None,
            },
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_config_drives_listing() {
        let dir = eth0_fixture();
        let config = Config {
            sysfs: SysfsConfig {
                mount_point: dir.path().to_path_buf(),
            },
            devices: DeviceFilterConfig {
                include: Some("^ppp".to_string()),
                exclude: None,
            },
        };
        let sysfs = config.net_class_fs().unwrap();
        let filter = config.device_filter().unwrap();
        assert!(sysfs.net_class_devices_filtered(&filter).unwrap().is_empty());
        assert_eq!(sysfs.net_class_devices().unwrap(), vec!["eth0".to_string()]);
    }
}
