pub mod hash;
pub mod hosts;
pub mod scan;
pub mod watch;

use std::str::FromStr;

use clap::{ArgAction, Parser, Subcommand};
use pnet::util::MacAddr;
use presence_common::fingerprint::UserId;
use presence_common::network::mac;

#[derive(Parser)]
#[command(name = "presence")]
#[command(about = "Tells who is home by the devices answering on the local network.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Report fixed addresses instead of resolving over ARP
    #[arg(long, global = true)]
    pub stub: bool,

    /// Show debug output
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the hosts an address block expands to
    #[command(alias = "h")]
    Hosts { range: String },
    /// Resolve every host of a block once and list the answering devices
    #[command(alias = "s")]
    Scan {
        #[arg(short, long)]
        interface: String,
        #[arg(short, long)]
        range: String,
    },
    /// Fingerprint a hardware address for a device registry
    Hash {
        mac: String,
        /// Salt to use instead of a random one
        #[arg(long)]
        salt: Option<String>,
    },
    /// Scan periodically and report who is present
    #[command(alias = "w")]
    Watch {
        #[arg(short, long)]
        interface: String,
        #[arg(short, long)]
        range: String,
        /// Minutes between scans
        #[arg(long, default_value_t = 5)]
        interval: u64,
        /// Registered device as <user>=<mac>, repeatable
        #[arg(short, long = "device")]
        devices: Vec<DeviceArg>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// `<user>=<mac>` pair given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceArg {
    pub user: UserId,
    pub mac: MacAddr,
}

impl FromStr for DeviceArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (user, addr) = s
            .split_once('=')
            .ok_or_else(|| format!("expected <user>=<mac>, got '{s}'"))?;
        let user: u64 = user
            .trim()
            .parse()
            .map_err(|_| format!("'{user}' is not a numeric user id"))?;
        let mac: MacAddr = mac::parse(addr.trim())
            .map_err(|_| format!("'{addr}' is not a hardware address"))?;

        Ok(Self {
            user: UserId(user),
            mac,
        })
    }
}
