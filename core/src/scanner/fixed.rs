use async_trait::async_trait;
use pnet::util::MacAddr;
use tracing::debug;

use presence_common::error::ScanError;
use presence_common::scanning::NetworkScanner;

/// Addresses reported by [`FixedScanner`] on every scan.
pub const FIXED_ADDRESSES: [MacAddr; 2] = [
    MacAddr(0xde, 0xad, 0xbe, 0xef, 0xde, 0xad),
    MacAddr(0xab, 0xcd, 0xef, 0x01, 0x23, 0x45),
];

/// Stand-in for hosts without raw link-layer access. Ignores interface and
/// range and always reports [`FIXED_ADDRESSES`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedScanner;

#[async_trait]
impl NetworkScanner for FixedScanner {
    async fn scan(&self, interface: &str, range: &str) -> Result<Vec<MacAddr>, ScanError> {
        debug!("Skipping ARP scan of {range} on {interface}, reporting fixed addresses");
        Ok(FIXED_ADDRESSES.to_vec())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}
