//! Link-layer frames used for address resolution.

pub mod arp;
pub mod ethernet;

use pnet::packet::ethernet::EtherType;
use thiserror::Error;

pub const MIN_ETH_FRAME_NO_FCS: usize = 60;
pub const ARP_LEN: usize = 28;
pub const ETH_HDR_LEN: usize = 14;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PacketError {
    #[error("buffer too small: need {need} bytes, got {got}")]
    Buffer { need: usize, got: usize },
    #[error("truncated or invalid ethernet frame (len {0})")]
    TruncatedEthernet(usize),
    #[error("truncated or invalid ARP packet (payload len {0})")]
    TruncatedArp(usize),
    #[error("not an ARP frame (ethertype {0})")]
    NotArp(EtherType),
    #[error("ARP packet is not a reply")]
    NotReply,
}
