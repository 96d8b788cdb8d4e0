//! # Device Fingerprints
//!
//! A registered device is stored as the salted, iterated SHA-256 hash of its
//! hardware address. The raw address never leaves the process; presence is
//! decided by re-hashing discovered addresses with each stored salt.

use std::fmt;

use pnet::util::MacAddr;
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::network::mac;

/// Rounds of SHA-256 applied per fingerprint.
pub const HASH_ITERATIONS: usize = 1000;

/// Length of freshly generated salts.
pub const SALT_LEN: usize = 16;

/// Opaque identifier of the user owning a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A registered device as persisted by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceFingerprint {
    pub owner: UserId,
    pub salted_hash: String,
    pub salt: String,
    /// Display name chosen by the owner.
    pub name: Option<String>,
}

impl DeviceFingerprint {
    /// Fingerprints `mac` for `owner` with a fresh random salt.
    pub fn register(owner: UserId, mac: MacAddr, name: Option<String>) -> Self {
        let mut fingerprint = Self::with_salt(owner, mac, generate_salt());
        fingerprint.name = name;
        fingerprint
    }

    pub fn with_salt(owner: UserId, mac: MacAddr, salt: impl Into<String>) -> Self {
        let salt: String = salt.into();
        Self {
            owner,
            salted_hash: hash_mac(mac, &salt),
            salt,
            name: None,
        }
    }

    /// Whether `mac` is the address this fingerprint was created from.
    pub fn matches(&self, mac: MacAddr) -> bool {
        hash_mac(mac, &self.salt) == self.salted_hash
    }
}

/// `iterated_hash(salt ++ canonical(mac), HASH_ITERATIONS)`.
pub fn hash_mac(mac: MacAddr, salt: &str) -> String {
    let input: String = format!("{salt}{}", mac::canonical(mac));
    iterated_hash(&input, HASH_ITERATIONS)
}

/// Applies SHA-256 `rounds` times. Every round hashes the lowercase hex
/// encoding of the previous digest; the first round hashes `input` itself.
pub fn iterated_hash(input: &str, rounds: usize) -> String {
    let mut hash: String = input.to_owned();
    for _ in 0..rounds {
        hash = hex::encode(Sha256::digest(hash.as_bytes()));
    }
    hash
}

pub fn generate_salt() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(SALT_LEN)
        .map(char::from)
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
