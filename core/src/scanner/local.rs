//! A **local area network (LAN)** scanner.
//!
//! Resolves every host of the configured block with ARP on one interface.
//! Requires **root privileges** to open a raw link-layer channel.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use pnet::datalink::NetworkInterface;
use pnet::util::MacAddr;
use tracing::{debug, warn};

use presence_common::error::ScanError;
use presence_common::network::interface::{self, ViabilityError};
use presence_common::network::range;
use presence_common::scanning::NetworkScanner;

use crate::resolver::{ArpClient, REQUEST_TIMEOUT};

pub struct LocalScanner {
    per_request: Duration,
}

impl Default for LocalScanner {
    fn default() -> Self {
        Self {
            per_request: REQUEST_TIMEOUT,
        }
    }
}

#[async_trait]
impl NetworkScanner for LocalScanner {
    async fn scan(&self, interface: &str, range: &str) -> Result<Vec<MacAddr>, ScanError> {
        let intf: NetworkInterface = interface::find_by_name(interface)
            .ok_or_else(|| ScanError::InterfaceNotFound(interface.to_string()))?;
        let hosts: Vec<Ipv4Addr> = range::hosts_from_cidr(range)?;

        match interface::check_arp_capable(&intf) {
            Ok(()) => {}
            Err(ViabilityError::NoMacAddress) => {
                return Err(ScanError::NoHardwareAddress(intf.name));
            }
            Err(reason) => warn!("{}: {reason}, replies are unlikely", intf.name),
        }

        let client = ArpClient::open(&intf, self.per_request)?;
        debug!("Resolving {} hosts of {range} on {}", hosts.len(), intf.name);

        let found: Vec<MacAddr> = super::collect(client.probe(), hosts, self.per_request).await;
        client.close();

        Ok(found)
    }

    fn name(&self) -> &'static str {
        "arp"
    }
}
