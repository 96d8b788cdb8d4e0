use async_trait::async_trait;
use pnet::util::MacAddr;

use crate::error::ScanError;

/// Finds the hardware addresses currently answering inside an address block.
///
/// Implemented by the ARP scanner and by a fixed stub for hosts without raw
/// link-layer access. Which one runs is decided once at startup.
#[async_trait]
pub trait NetworkScanner: Send + Sync {
    async fn scan(&self, interface: &str, range: &str) -> Result<Vec<MacAddr>, ScanError>;

    fn name(&self) -> &'static str;
}
