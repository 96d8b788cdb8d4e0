//! Matching discovered hardware addresses against registered fingerprints.

use pnet::util::MacAddr;

use presence_common::fingerprint::{DeviceFingerprint, UserId};

/// Returns the fingerprints matched by `found`.
///
/// Each address consumes at most one fingerprint and each fingerprint is
/// matched at most once, so duplicate addresses never produce duplicate
/// results. Output order is unspecified.
pub fn match_devices(found: &[MacAddr], mut registered: Vec<DeviceFingerprint>) -> Vec<DeviceFingerprint> {
    let mut matched: Vec<DeviceFingerprint> = Vec::new();

    for &mac in found {
        if registered.is_empty() {
            break;
        }
        if let Some(idx) = registered.iter().position(|fp| fp.matches(mac)) {
            matched.push(registered.swap_remove(idx));
        }
    }

    matched
}

/// Owners of the matched fingerprints, sorted and without repeats.
pub fn match_present(found: &[MacAddr], registered: Vec<DeviceFingerprint>) -> Vec<UserId> {
    let mut owners: Vec<UserId> = match_devices(found, registered)
        .into_iter()
        .map(|fp| fp.owner)
        .collect();
    owners.sort_unstable();
    owners.dedup();
    owners
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
