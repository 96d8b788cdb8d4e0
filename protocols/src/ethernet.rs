use pnet::packet::ethernet::{EtherType, EthernetPacket, MutableEthernetPacket};
use pnet::util::MacAddr;

use crate::{ETH_HDR_LEN, PacketError};

pub fn make_header(
    buffer: &mut [u8],
    src_mac: MacAddr,
    dst_mac: MacAddr,
    ether_type: EtherType,
) -> Result<(), PacketError> {
    let got: usize = buffer.len();
    let mut eth = MutableEthernetPacket::new(buffer).ok_or(PacketError::Buffer {
        need: ETH_HDR_LEN,
        got,
    })?;
    eth.set_destination(dst_mac);
    eth.set_source(src_mac);
    eth.set_ethertype(ether_type);
    Ok(())
}

pub fn get_packet_from_u8(bytes: &[u8]) -> Result<EthernetPacket<'_>, PacketError> {
    EthernetPacket::new(bytes).ok_or(PacketError::TruncatedEthernet(bytes.len()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use pnet::packet::ethernet::EtherTypes;

    #[test]
    fn make_header_writes_addresses_and_type() {
        let mut buffer = [0u8; ETH_HDR_LEN];
        let src = MacAddr::new(1, 2, 3, 4, 5, 6);
        make_header(&mut buffer, src, MacAddr::broadcast(), EtherTypes::Arp).unwrap();

        let eth = get_packet_from_u8(&buffer).unwrap();
        assert_eq!(eth.get_source(), src);
        assert_eq!(eth.get_destination(), MacAddr::broadcast());
        assert_eq!(eth.get_ethertype(), EtherTypes::Arp);
    }

    #[test]
    fn make_header_rejects_short_buffer() {
        let mut buffer = [0u8; ETH_HDR_LEN - 1];
        let err = make_header(&mut buffer, MacAddr::zero(), MacAddr::zero(), EtherTypes::Arp)
            .unwrap_err();
        assert_eq!(err, PacketError::Buffer { need: ETH_HDR_LEN, got: ETH_HDR_LEN - 1 });
    }

    #[test]
    fn get_packet_from_u8_rejects_short_frame() {
        assert_eq!(get_packet_from_u8(&[0u8; 3]).unwrap_err(), PacketError::TruncatedEthernet(3));
    }
}
