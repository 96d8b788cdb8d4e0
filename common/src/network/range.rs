//! # Address-Range Enumeration
//!
//! Expands a CIDR block into the individual IPv4 hosts a scan probes.

use std::net::Ipv4Addr;

use pnet::ipnetwork::{Ipv4Network, Ipv6Network};

use crate::error::RangeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    /// Number of addresses in the range, both ends included.
    pub fn len(&self) -> u64 {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        if end < start {
            return 0;
        }
        u64::from(end - start) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_iter(&self) -> impl Iterator<Item = Ipv4Addr> + use<> {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(Ipv4Addr::from)
    }

    /// Drops the network and broadcast address.
    ///
    /// Ranges with fewer than two addresses have neither and are returned as is.
    pub fn without_network_and_broadcast(&self) -> Self {
        if self.len() < 2 {
            return *self;
        }
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        Self::new(Ipv4Addr::from(start + 1), Ipv4Addr::from(end - 1))
    }
}

/// Parses `<address>/<prefix>` into the full range of the block.
///
/// Host bits in the address part are ignored, so `192.168.2.7/24` covers
/// `192.168.2.0` to `192.168.2.255`.
pub fn parse_cidr(block: &str) -> Result<Ipv4Range, RangeError> {
    let block = block.trim();
    if !block.contains('/') {
        return Err(RangeError::MissingPrefix(block.to_string()));
    }
    if block.parse::<Ipv6Network>().is_ok() {
        return Err(RangeError::NotIpv4(block.to_string()));
    }

    let network: Ipv4Network = block.parse().map_err(|source| RangeError::Invalid {
        block: block.to_string(),
        source,
    })?;
    Ok(Ipv4Range::new(network.network(), network.broadcast()))
}

/// Lists every probeable host of `block` in ascending order.
///
/// The first (network) and last (broadcast) address are removed when the
/// block holds at least two addresses. A `/32` is returned unfiltered.
pub fn hosts_from_cidr(block: &str) -> Result<Vec<Ipv4Addr>, RangeError> {
    let range: Ipv4Range = parse_cidr(block)?.without_network_and_broadcast();
    if range.is_empty() {
        return Ok(Vec::new());
    }
    Ok(range.to_iter().collect())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
