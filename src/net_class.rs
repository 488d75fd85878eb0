//! Network device enumeration and lookup
//!
//! [`NetClassFs`] walks `<sysfs>/class/net`, where the kernel publishes one
//! entry per network interface, and turns each entry into a
//! [`NetClassIface`]. Every call reads the tree afresh; nothing is cached.
//!
//! # Examples
//!
//! ## List Interfaces
//!
//! ```no_run
//! use netclass::{NetClassFs, RealFs};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sysfs = NetClassFs::new(RealFs::default_mount()?);
//! for name in sysfs.net_class_devices()? {
//!     println!("{}", name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Filtered Snapshot
//!
//! ```no_run
//! use netclass::{NetClassFs, RealFs, RegexFilter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sysfs = NetClassFs::new(RealFs::default_mount()?);
//! let filter = RegexFilter::deny("^(lo|veth)")?;
//!
//! let mut devices: Vec<_> = sysfs.net_class_filtered(&filter)?.into_values().collect();
//! devices.sort_by(|a, b| a.name.cmp(&b.name));
//! for dev in devices {
//!     println!("{}: {} mtu={:?}", dev.name, dev.oper_state, dev.mtu);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Direct Lookup
//!
//! Lookup by name ignores any filter. A missing interface is reported as
//! [`NetClassError::DeviceNotFound`]:
//!
//! ```no_run
//! use netclass::{NetClassFs, RealFs};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sysfs = NetClassFs::new(RealFs::default_mount()?);
//! match sysfs.net_class_by_iface("wg0") {
//!     Ok(dev) => println!("wg0 is {}", dev.oper_state),
//!     Err(e) if e.is_not_found() => println!("no wg0"),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::{NetClassError, Result};
use crate::filter::DeviceFilter;
use crate::fs::{RealFs, SysFs};
use crate::iface::{parse_net_class_iface, NetClassIface};
use log::{debug, trace};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Devices root relative to the sysfs mount point
pub const NET_CLASS_PATH: &str = "class/net";

/// All parsed interfaces, keyed by name
pub type NetClass = HashMap<String, NetClassIface>;

/// Reader for the network device class of a sysfs tree
#[derive(Debug, Clone)]
pub struct NetClassFs<F = RealFs> {
    fs: F,
}

impl<F: SysFs> NetClassFs<F> {
    /// Wrap a sysfs tree
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// The underlying sysfs tree
    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    /// Names of all network devices, in listing order
    ///
    /// Regular files under the devices root (such as `bonding_masters`)
    /// are not devices and are skipped.
    pub fn net_class_devices(&self) -> Result<Vec<String>> {
        let root = Path::new(NET_CLASS_PATH);
        let entries = self
            .fs
            .list_entries(root)
            .map_err(|source| NetClassError::RootUnreadable {
                path: root.to_path_buf(),
                source,
            })?;

        let devices = entries
            .into_iter()
            .filter(|entry| !entry.is_regular_file)
            .map(|entry| entry.name)
            .inspect(|name| trace!("found network device {}", name))
            .collect();
        Ok(devices)
    }

    /// Names of network devices that `filter` does not ignore
    pub fn net_class_devices_filtered<D: DeviceFilter + ?Sized>(
        &self,
        filter: &D,
    ) -> Result<Vec<String>> {
        let devices = self.net_class_devices()?;
        if filter.has_no_filters() {
            return Ok(devices);
        }

        Ok(devices
            .into_iter()
            .filter(|name| {
                let ignored = filter.ignored(name);
                if ignored {
                    trace!("network device {} ignored by filter", name);
                }
                !ignored
            })
            .collect())
    }

    /// Parse a single named device
    ///
    /// Filters play no part here: any device that exists can be looked up.
    pub fn net_class_by_iface(&self, name: &str) -> Result<NetClassIface> {
        if !is_device_name(name) {
            return Err(NetClassError::DeviceNotFound(name.to_string()));
        }

        let dir = device_dir(name);
        if !self.fs.is_dir(&dir) {
            return Err(NetClassError::DeviceNotFound(name.to_string()));
        }

        parse_net_class_iface(&self.fs, &dir, name)
    }

    /// Parse every network device
    ///
    /// Any device that fails to parse fails the whole call.
    pub fn net_class(&self) -> Result<NetClass> {
        let devices = self.net_class_devices()?;
        self.parse_all(devices)
    }

    /// Parse every network device that `filter` does not ignore
    pub fn net_class_filtered<D: DeviceFilter + ?Sized>(&self, filter: &D) -> Result<NetClass> {
        let devices = self.net_class_devices_filtered(filter)?;
        self.parse_all(devices)
    }

    fn parse_all(&self, devices: Vec<String>) -> Result<NetClass> {
        let mut net_class = NetClass::with_capacity(devices.len());
        for name in devices {
            let iface = parse_net_class_iface(&self.fs, &device_dir(&name), &name)
                .inspect_err(|e| debug!("aborting network class read at {}: {}", name, e))?;
            net_class.insert(name, iface);
        }
        Ok(net_class)
    }
}

impl NetClassFs<RealFs> {
    /// Open the sysfs tree mounted at `mount_point`
    pub fn open(mount_point: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(RealFs::new(mount_point)?))
    }
}

fn device_dir(name: &str) -> PathBuf {
    Path::new(NET_CLASS_PATH).join(name)
}

// A name that cannot be a single directory entry cannot be a device.
fn is_device_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/')
}
