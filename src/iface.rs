//! Network device record
//!
//! [`NetClassIface`] holds the attributes the kernel publishes for one
//! interface under `/sys/class/net/<iface>/`. Which files exist depends on
//! the kernel version, the driver and the link state, so every numeric field
//! is an `Option<i64>`: `None` means the file is not there, `Some(0)` means
//! the kernel reported zero.
//!
//! The record is filled from a static table ([`SCHEMA`]) that maps each
//! attribute file to the field it populates and how to parse it.
//!
//! # Example
//!
//! ```no_run
//! use netclass::{NetClassFs, RealFs};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sysfs = NetClassFs::new(RealFs::default_mount()?);
//! let eth0 = sysfs.net_class_by_iface("eth0")?;
//!
//! println!("{}: {} ({})", eth0.name, eth0.oper_state, eth0.address);
//! if let Some(mtu) = eth0.mtu {
//!     println!("MTU: {}", mtu);
//! }
//! match eth0.speed {
//!     Some(speed) => println!("Speed: {} Mbps", speed),
//!     None => println!("Speed: not reported"),
//! }
//! # Ok(())
//! # }
//! ```

use crate::attribute::{read_attribute, read_i64};
use crate::error::Result;
use crate::fs::SysFs;
use log::trace;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Interface is administratively up
pub const IFF_UP: i64 = 0x1;
/// Broadcast address is valid
pub const IFF_BROADCAST: i64 = 0x2;
/// Loopback interface
pub const IFF_LOOPBACK: i64 = 0x8;
/// Resources allocated
pub const IFF_RUNNING: i64 = 0x40;
/// Supports multicast
pub const IFF_MULTICAST: i64 = 0x1000;

/// Attributes of one network interface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetClassIface {
    /// Interface name (directory name under `/sys/class/net`)
    pub name: String,
    /// Hardware (MAC) address
    pub address: String,
    /// How the hardware address was assigned
    pub addr_assign_type: Option<i64>,
    /// Hardware address length in bytes
    pub addr_len: Option<i64>,
    /// Hardware broadcast address
    pub broadcast: String,
    /// Physical link state (1 = carrier present)
    pub carrier: Option<i64>,
    /// Number of carrier state changes
    pub carrier_changes: Option<i64>,
    /// Number of carrier up events
    pub carrier_up_count: Option<i64>,
    /// Number of carrier down events
    pub carrier_down_count: Option<i64>,
    /// Device identifier shared among ports of one device
    pub dev_id: Option<i64>,
    /// RFC 2863 dormant state
    pub dormant: Option<i64>,
    /// Duplex mode ("full", "half", "unknown")
    pub duplex: String,
    /// Interface flags (`IFF_*` bitmask)
    pub flags: Option<i64>,
    /// SNMP ifAlias
    pub if_alias: Option<String>,
    /// Interface index
    pub if_index: Option<i64>,
    /// Index of the underlying link
    pub if_link: Option<i64>,
    /// Link mode (0 = default, 1 = dormant)
    pub link_mode: Option<i64>,
    /// Maximum Transmission Unit
    pub mtu: Option<i64>,
    /// How the interface name was assigned
    pub name_assign_type: Option<i64>,
    /// Network device group
    pub net_dev_group: Option<i64>,
    /// RFC 2863 operational state
    pub oper_state: String,
    /// Physical port identifier
    pub phys_port_id: Option<String>,
    /// Physical port name
    pub phys_port_name: Option<String>,
    /// Switch identifier
    pub phys_switch_id: Option<String>,
    /// Link speed in Mbps
    pub speed: Option<i64>,
    /// Transmit queue length
    pub tx_queue_len: Option<i64>,
    /// ARPHRD hardware type
    #[serde(rename = "type")]
    pub iface_type: Option<i64>,
}

impl NetClassIface {
    /// Operational state is "up"
    pub fn is_up(&self) -> bool {
        self.oper_state == "up"
    }

    /// Carrier is reported and present
    pub fn has_carrier(&self) -> bool {
        self.carrier == Some(1)
    }

    /// Check an `IFF_*` flag; false if flags are not reported
    pub fn flag_set(&self, flag: i64) -> bool {
        self.flags.is_some_and(|flags| flags & flag != 0)
    }

    /// ifAlias, empty if not exposed
    pub fn if_alias_str(&self) -> &str {
        self.if_alias.as_deref().unwrap_or("")
    }

    /// Physical port ID, empty if not exposed
    pub fn phys_port_id_str(&self) -> &str {
        self.phys_port_id.as_deref().unwrap_or("")
    }

    /// Physical port name, empty if not exposed
    pub fn phys_port_name_str(&self) -> &str {
        self.phys_port_name.as_deref().unwrap_or("")
    }

    /// Switch ID, empty if not exposed
    pub fn phys_switch_id_str(&self) -> &str {
        self.phys_switch_id.as_deref().unwrap_or("")
    }
}

/// How an attribute file is parsed and where it lands
#[derive(Clone, Copy)]
pub enum FieldKind {
    /// Text that every device carries; absent leaves it empty
    Text(fn(&mut NetClassIface) -> &mut String),
    /// Text that only some drivers expose
    OptionalText(fn(&mut NetClassIface) -> &mut Option<String>),
    /// Signed integer, decimal or prefixed hex/octal/binary
    Integer(fn(&mut NetClassIface) -> &mut Option<i64>),
}

/// One entry of the attribute schema
#[derive(Clone, Copy)]
pub struct Attribute {
    /// File name under the device directory
    pub key: &'static str,
    /// Parser and target field
    pub kind: FieldKind,
}

const fn text(
    key: &'static str,
    field: fn(&mut NetClassIface) -> &mut String,
) -> Attribute {
    Attribute {
        key,
        kind: FieldKind::Text(field),
    }
}

const fn optional_text(
    key: &'static str,
    field: fn(&mut NetClassIface) -> &mut Option<String>,
) -> Attribute {
    Attribute {
        key,
        kind: FieldKind::OptionalText(field),
    }
}

const fn integer(
    key: &'static str,
    field: fn(&mut NetClassIface) -> &mut Option<i64>,
) -> Attribute {
    Attribute {
        key,
        kind: FieldKind::Integer(field),
    }
}

/// Every attribute file read for a device
pub static SCHEMA: &[Attribute] = &[
    integer("addr_assign_type", |i| &mut i.addr_assign_type),
    integer("addr_len", |i| &mut i.addr_len),
    text("address", |i| &mut i.address),
    text("broadcast", |i| &mut i.broadcast),
    integer("carrier", |i| &mut i.carrier),
    integer("carrier_changes", |i| &mut i.carrier_changes),
    integer("carrier_up_count", |i| &mut i.carrier_up_count),
    integer("carrier_down_count", |i| &mut i.carrier_down_count),
    integer("dev_id", |i| &mut i.dev_id),
    integer("dormant", |i| &mut i.dormant),
    text("duplex", |i| &mut i.duplex),
    integer("flags", |i| &mut i.flags),
    optional_text("ifalias", |i| &mut i.if_alias),
    integer("ifindex", |i| &mut i.if_index),
    integer("iflink", |i| &mut i.if_link),
    integer("link_mode", |i| &mut i.link_mode),
    integer("mtu", |i| &mut i.mtu),
    integer("name_assign_type", |i| &mut i.name_assign_type),
    integer("netdev_group", |i| &mut i.net_dev_group),
    text("operstate", |i| &mut i.oper_state),
    optional_text("phys_port_id", |i| &mut i.phys_port_id),
    optional_text("phys_port_name", |i| &mut i.phys_port_name),
    optional_text("phys_switch_id", |i| &mut i.phys_switch_id),
    integer("speed", |i| &mut i.speed),
    integer("tx_queue_len", |i| &mut i.tx_queue_len),
    integer("type", |i| &mut i.iface_type),
];

/// Parse every schema attribute of the device directory `dir`
///
/// Absent attributes stay unset. The first malformed attribute aborts the
/// whole record.
pub fn parse_net_class_iface<F: SysFs + ?Sized>(
    fs: &F,
    dir: &Path,
    name: &str,
) -> Result<NetClassIface> {
    let mut iface = NetClassIface {
        name: name.to_string(),
        ..Default::default()
    };

    for attr in SCHEMA {
        match attr.kind {
            FieldKind::Text(field) => {
                if let Some(value) = read_attribute(fs, dir, name, attr.key)? {
                    *field(&mut iface) = value;
                }
            }
            FieldKind::OptionalText(field) => {
                *field(&mut iface) = read_attribute(fs, dir, name, attr.key)?;
            }
            FieldKind::Integer(field) => {
                *field(&mut iface) = read_i64(fs, dir, name, attr.key)?;
            }
        }
    }

    trace!("{}: parsed {:?}", name, iface);
    Ok(iface)
}
