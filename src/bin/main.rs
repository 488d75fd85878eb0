//! CLI tool for netclass

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "netclass")]
#[command(about = "Inspect network interface attributes published under /sys/class/net", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ~/.config/netclass/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// sysfs mount point
    #[arg(long, global = true)]
    sysfs: Option<PathBuf>,

    /// Only list devices matching this regex
    #[arg(long, global = true)]
    include: Option<String>,

    /// Never list devices matching this regex
    #[arg(long, global = true)]
    exclude: Option<String>,

    /// Output format (json or text)
    #[arg(short, long, default_value = "text", global = true)]
    format: String,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// List device names (default)
    List,
    /// Show all attributes of one device
    Show {
        /// Interface name
        iface: String,
    },
    /// Show all attributes of every listed device
    Dump,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    env_logger::init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    use netclass::Config;

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(sysfs) = &cli.sysfs {
        config.sysfs.mount_point = sysfs.clone();
    }
    if cli.include.is_some() {
        config.devices.include = cli.include.clone();
    }
    if cli.exclude.is_some() {
        config.devices.exclude = cli.exclude.clone();
    }

    let sysfs = config.net_class_fs()?;
    let filter = config.device_filter()?;
    let json = cli.format == "json";

    match &cli.command {
        None | Some(Commands::List) => {
            let mut devices = sysfs.net_class_devices_filtered(&filter)?;
            devices.sort();
            if json {
                println!("{}", serde_json::to_string_pretty(&devices)?);
            } else {
                for name in devices {
                    println!("{}", name);
                }
            }
        }
        Some(Commands::Show { iface }) => {
            let device = sysfs.net_class_by_iface(iface)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&device)?);
            } else {
                print_iface(&device);
            }
        }
        Some(Commands::Dump) => {
            let mut devices: Vec<_> = sysfs.net_class_filtered(&filter)?.into_values().collect();
            devices.sort_by(|a, b| a.name.cmp(&b.name));
            if json {
                println!("{}", serde_json::to_string_pretty(&devices)?);
            } else {
                for (idx, device) in devices.iter().enumerate() {
                    if idx > 0 {
                        println!();
                    }
                    print_iface(device);
                }
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_iface(iface: &netclass::NetClassIface) {
    fn opt(value: Option<i64>) -> String {
        value.map_or_else(|| "-".to_string(), |v| v.to_string())
    }

    println!("=== {} ===", iface.name);
    println!("State: {} (carrier {})", iface.oper_state, opt(iface.carrier));
    println!("Address: {} (broadcast {})", iface.address, iface.broadcast);
    println!("Duplex: {}", iface.duplex);
    println!("Speed: {}", opt(iface.speed));
    println!("MTU: {}", opt(iface.mtu));
    match iface.flags {
        Some(flags) => println!("Flags: {:#x}", flags),
        None => println!("Flags: -"),
    }
    println!("Index: {} (link {})", opt(iface.if_index), opt(iface.if_link));
    println!("Type: {}", opt(iface.iface_type));
    println!("TX queue: {}", opt(iface.tx_queue_len));
    println!(
        "Carrier changes: {} (up {}, down {})",
        opt(iface.carrier_changes),
        opt(iface.carrier_up_count),
        opt(iface.carrier_down_count)
    );
    println!("Group: {}", opt(iface.net_dev_group));
    if let Some(alias) = &iface.if_alias {
        println!("Alias: {}", alias);
    }
    if let Some(port) = &iface.phys_port_name {
        println!("Port: {}", port);
    }
    if let Some(id) = &iface.phys_port_id {
        println!("Port ID: {}", id);
    }
    if let Some(id) = &iface.phys_switch_id {
        println!("Switch ID: {}", id);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI features not enabled. Please compile with --features cli");
    std::process::exit(1);
}
