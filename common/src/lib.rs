//! # Presence Common
//!
//! Shared building blocks of the presence workspace: the domain types passed
//! between crates, typed errors, scan settings, and the traits that separate
//! the detection engine from its collaborators.
//!
//! * **[`network`]**: address-block enumeration, MAC canonicalisation, interface lookup.
//! * **[`fingerprint`]**: salted iterated hashing of hardware addresses.
//! * **[`registry`]** / **[`scanning`]** / **[`vendors`]**: collaborator traits.

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod log;
pub mod network;
pub mod registry;
pub mod scanning;
pub mod vendors;

#[doc(hidden)]
pub use tracing as __tracing;
