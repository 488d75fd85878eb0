//! # netclass
//!
//! Typed access to the network interface metadata the Linux kernel publishes
//! under `/sys/class/net`. Every interface becomes a [`NetClassIface`] whose
//! attributes are either parsed values or explicitly absent, so records stay
//! usable across kernels, drivers and link states that expose different
//! sets of files.
//!
//! ## Quick Start
//!
//! ```no_run
//! use netclass::{NetClassFs, RealFs};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sysfs = NetClassFs::new(RealFs::default_mount()?);
//!
//! for (name, iface) in sysfs.net_class()? {
//!     println!("{}: {} {}", name, iface.oper_state, iface.address);
//!     if let Some(speed) = iface.speed {
//!         println!("  Speed: {} Mbps", speed);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Filtering
//!
//! Bulk listing accepts any [`DeviceFilter`]. Direct lookup with
//! [`NetClassFs::net_class_by_iface`] is never filtered.
//!
//! ```no_run
//! use netclass::{NetClassFs, RealFs, RegexFilter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sysfs = NetClassFs::new(RealFs::default_mount()?);
//! let filter = RegexFilter::new(Some("^(eth|en|wl)"), None)?;
//! println!("{:?}", sysfs.net_class_devices_filtered(&filter)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - `netclass-cli` command-line tool

pub mod attribute;
pub mod config; // Configuration management with TOML persistence
pub mod error;
pub mod filter; // Device name allow/deny filters
pub mod fs; // sysfs access primitives
pub mod iface; // Per-device attribute record
pub mod net_class; // Device enumeration and lookup

// Re-export main types
pub use config::{Config, DeviceFilterConfig, SysfsConfig};
pub use error::{NetClassError, Result};
pub use filter::{DeviceFilter, NoopFilter, RegexFilter};
pub use fs::{DirEntry, RealFs, SysFs};
pub use iface::NetClassIface;
pub use net_class::{NetClass, NetClassFs};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
