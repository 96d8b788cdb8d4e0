use std::str::FromStr;

use pnet::util::MacAddr;

/// The one textual form of a hardware address used for hashing.
///
/// Lowercase, colon separated, two hex digits per octet. Registration and
/// scanning must both go through this function or fingerprints never match.
pub fn canonical(mac: MacAddr) -> String {
    let MacAddr(a, b, c, d, e, f) = mac;
    format!("{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{f:02x}")
}

/// Parses user input such as `AA:BB:CC:DD:EE:FF` or `aa-bb-cc-dd-ee-ff`.
pub fn parse(input: &str) -> Result<MacAddr, <MacAddr as FromStr>::Err> {
    input.trim().replace('-', ":").parse::<MacAddr>()
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

    #[test]
    fn canonical_is_lowercase_and_zero_padded() {
        let mac = MacAddr::new(0xAA, 0x0B, 0xCC, 0x01, 0xEE, 0x00);
        assert_eq!(canonical(mac), "aa:0b:cc:01:ee:00");
    }

    #[test]
    fn parse_accepts_uppercase_and_dashes() {
        let expected = MacAddr::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff);
        assert_eq!(parse("AA:BB:CC:DD:EE:FF").unwrap(), expected);
        assert_eq!(parse(" aa-bb-cc-dd-ee-ff ").unwrap(), expected);
    }

    #[test]
    fn parse_then_canonical_normalises_input() {
        let mac = parse("De:Ad:Be:Ef:De:Ad").unwrap();
        assert_eq!(canonical(mac), "de:ad:be:ef:de:ad");
    }

    #[test]
    fn parse_rejects_short_address() {
        assert!(parse("aa:bb:cc:dd:ee").is_err());
    }
}
