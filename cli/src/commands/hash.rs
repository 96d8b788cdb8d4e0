use pnet::util::MacAddr;
use presence_common::error::RegistryError;
use presence_common::fingerprint;
use presence_common::network::mac;

use crate::terminal::print;

/// Prints what a registry has to store for `addr`.
pub fn hash(addr: &str, salt: Option<String>) -> anyhow::Result<()> {
    let parsed: MacAddr =
        mac::parse(addr).map_err(|_| RegistryError::InvalidAddress(addr.to_string()))?;
    let salt: String = salt.unwrap_or_else(fingerprint::generate_salt);
    let salted_hash: String = fingerprint::hash_mac(parsed, &salt);

    print::aligned_line("Address", mac::canonical(parsed));
    print::aligned_line("Salt", salt);
    print::aligned_line("Hash", salted_hash);

    Ok(())
}
