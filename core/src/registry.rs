//! An in-process device registry.
//!
//! Stores fingerprints only. Addresses handed to [`MemoryRegistry`] are
//! hashed on the way in and never kept.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use pnet::util::MacAddr;

use presence_common::error::RegistryError;
use presence_common::fingerprint::{DeviceFingerprint, UserId};
use presence_common::network::mac;
use presence_common::registry::DeviceRegistry;

#[derive(Debug, Default)]
pub struct MemoryRegistry {
    devices: RwLock<Vec<DeviceFingerprint>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `mac` for `owner`. If the owner already has this device only
    /// its name is updated. Returns `true` when a new fingerprint was stored.
    pub fn add_or_update(&self, owner: UserId, mac: MacAddr, name: Option<String>) -> bool {
        let mut devices = self.write();
        if let Some(existing) = devices
            .iter_mut()
            .find(|fp| fp.owner == owner && fp.matches(mac))
        {
            existing.name = name;
            return false;
        }
        devices.push(DeviceFingerprint::register(owner, mac, name));
        true
    }

    /// Like [`add_or_update`](Self::add_or_update) for a textual address.
    pub fn add_parsed(&self, owner: UserId, addr: &str, name: Option<String>) -> Result<bool, RegistryError> {
        let mac: MacAddr =
            mac::parse(addr).map_err(|_| RegistryError::InvalidAddress(addr.to_string()))?;
        Ok(self.add_or_update(owner, mac, name))
    }

    /// Stores a fingerprint produced elsewhere (e.g. by `presence hash`).
    pub fn insert(&self, fingerprint: DeviceFingerprint) {
        self.write().push(fingerprint);
    }

    /// Removes the owner's fingerprint for `mac`, matched by re-hashing.
    pub fn remove(&self, owner: UserId, mac: MacAddr) -> Result<(), RegistryError> {
        let mut devices = self.write();
        let idx = devices
            .iter()
            .position(|fp| fp.owner == owner && fp.matches(mac))
            .ok_or(RegistryError::UnknownDevice(owner.0))?;
        devices.remove(idx);
        Ok(())
    }

    /// Display names of the owner's devices; unnamed devices show as `None`.
    pub fn devices_of(&self, owner: UserId) -> Vec<Option<String>> {
        self.read()
            .iter()
            .filter(|fp| fp.owner == owner)
            .map(|fp| fp.name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<DeviceFingerprint>> {
        self.devices.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<DeviceFingerprint>> {
        self.devices.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DeviceRegistry for MemoryRegistry {
    fn list_fingerprints(&self) -> anyhow::Result<Vec<DeviceFingerprint>> {
        Ok(self.read().clone())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
