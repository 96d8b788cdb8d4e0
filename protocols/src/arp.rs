use std::net::Ipv4Addr;

use pnet::packet::Packet;
use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, ArpPacket, MutableArpPacket};
use pnet::packet::ethernet::{EtherTypes, EthernetPacket};
use pnet::util::MacAddr;

use crate::{ARP_LEN, ETH_HDR_LEN, MIN_ETH_FRAME_NO_FCS, PacketError, ethernet};

/// Sender of an ARP reply: who owns which address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArpReply {
    pub sender_addr: Ipv4Addr,
    pub sender_mac: MacAddr,
}

/// Builds a broadcast "who-has `target_addr`" frame, padded to the minimum
/// ethernet frame size.
pub fn create_request(
    src_mac: MacAddr,
    src_addr: Ipv4Addr,
    target_addr: Ipv4Addr,
) -> Result<Vec<u8>, PacketError> {
    let mut buffer = vec![0u8; MIN_ETH_FRAME_NO_FCS];
    ethernet::make_header(&mut buffer, src_mac, MacAddr::broadcast(), EtherTypes::Arp)?;
    request_payload(&mut buffer, src_mac, src_addr, target_addr)?;
    Ok(buffer)
}

pub fn request_payload(
    buffer: &mut [u8],
    src_mac: MacAddr,
    src_addr: Ipv4Addr,
    target_addr: Ipv4Addr,
) -> Result<(), PacketError> {
    let need: usize = ETH_HDR_LEN + ARP_LEN;
    let got: usize = buffer.len();
    if got < need {
        return Err(PacketError::Buffer { need, got });
    }
    let mut arp = MutableArpPacket::new(&mut buffer[ETH_HDR_LEN..need])
        .ok_or(PacketError::Buffer { need, got })?;
    arp.set_hardware_type(ArpHardwareTypes::Ethernet);
    arp.set_protocol_type(EtherTypes::Ipv4);
    arp.set_hw_addr_len(6);
    arp.set_proto_addr_len(4);
    arp.set_operation(ArpOperations::Request);
    arp.set_sender_hw_addr(src_mac);
    arp.set_target_hw_addr(MacAddr::zero());
    arp.set_sender_proto_addr(src_addr);
    arp.set_target_proto_addr(target_addr);
    Ok(())
}

/// Extracts the answering host from a received frame.
///
/// Anything other than an ethernet-carried ARP reply is rejected.
pub fn parse_reply(frame: &[u8]) -> Result<ArpReply, PacketError> {
    let eth: EthernetPacket = ethernet::get_packet_from_u8(frame)?;
    if eth.get_ethertype() != EtherTypes::Arp {
        return Err(PacketError::NotArp(eth.get_ethertype()));
    }
    let arp = ArpPacket::new(eth.payload()).ok_or(PacketError::TruncatedArp(eth.payload().len()))?;
    if arp.get_operation() != ArpOperations::Reply {
        return Err(PacketError::NotReply);
    }
    Ok(ArpReply {
        sender_addr: arp.get_sender_proto_addr(),
        sender_mac: arp.get_sender_hw_addr(),
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
