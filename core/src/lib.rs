//! # Presence Core
//!
//! The detection engine: ARP resolution, the scan orchestrator, fingerprint
//! matching, the presence cache and the scan scheduler.
//!
//! Most callers only need [`monitor::PresenceMonitor`] together with a
//! scanner from [`scanner::select`] and a [`presence_common::registry::DeviceRegistry`].

pub mod cache;
pub mod matcher;
pub mod monitor;
pub mod registry;
pub mod resolver;
pub mod scanner;
pub mod vendors;
