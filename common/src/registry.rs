use crate::fingerprint::DeviceFingerprint;

/// Source of registered device fingerprints.
///
/// The engine only reads: one snapshot per scan cycle.
pub trait DeviceRegistry: Send + Sync {
    fn list_fingerprints(&self) -> anyhow::Result<Vec<DeviceFingerprint>>;
}
