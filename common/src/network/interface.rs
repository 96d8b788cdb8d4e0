use std::net::Ipv4Addr;

use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network};

/// Why an interface cannot carry ARP resolution.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViabilityError {
    /// The interface is operationally down.
    IsDown,
    /// The interface is the loopback device.
    IsLoopback,
    /// The interface does not have a MAC address.
    NoMacAddress,
    /// The interface does not support broadcast (required for ARP).
    NotBroadcast,
    /// The interface is a point-to-point link (e.g., a VPN).
    IsPointToPoint,
}

impl std::fmt::Display for ViabilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason: &str = match self {
            ViabilityError::IsDown => "interface is down",
            ViabilityError::IsLoopback => "interface is a loopback device",
            ViabilityError::NoMacAddress => "interface has no hardware address",
            ViabilityError::NotBroadcast => "interface does not support broadcast",
            ViabilityError::IsPointToPoint => "interface is a point-to-point link",
        };
        f.write_str(reason)
    }
}

pub trait NetworkInterfaceExtension {
    fn get_ipv4_nets(&self) -> Vec<Ipv4Network>;
    /// Address used as the sender protocol address of ARP requests.
    fn ipv4_source(&self) -> Option<Ipv4Addr>;
}

impl NetworkInterfaceExtension for NetworkInterface {
    fn get_ipv4_nets(&self) -> Vec<Ipv4Network> {
        self.ips
            .iter()
            .filter_map(|ip| match ip {
                IpNetwork::V4(ipv4) => Some(*ipv4),
                IpNetwork::V6(_) => None,
            })
            .collect()
    }

    fn ipv4_source(&self) -> Option<Ipv4Addr> {
        self.get_ipv4_nets()
            .into_iter()
            .map(|net| net.ip())
            .find(|ip| !ip.is_loopback())
    }
}

/// Looks up a system interface by its exact name.
pub fn find_by_name(name: &str) -> Option<NetworkInterface> {
    find_in(name, &datalink::interfaces())
}

pub fn find_in(name: &str, interfaces: &[NetworkInterface]) -> Option<NetworkInterface> {
    interfaces.iter().find(|intf| intf.name == name).cloned()
}

/// Checks the flags ARP needs. Only a missing MAC makes probing impossible,
/// the other failures just mean nobody will answer.
pub fn check_arp_capable(interface: &NetworkInterface) -> Result<(), ViabilityError> {
    if interface.mac.is_none() {
        return Err(ViabilityError::NoMacAddress);
    }
    if interface.is_loopback() {
        return Err(ViabilityError::IsLoopback);
    }
    if !interface.is_up() {
        return Err(ViabilityError::IsDown);
    }
    if !interface.is_broadcast() {
        return Err(ViabilityError::NotBroadcast);
    }
    if interface.is_point_to_point() {
        return Err(ViabilityError::IsPointToPoint);
    }
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
