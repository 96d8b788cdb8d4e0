use pnet::ipnetwork::IpNetworkError;
use thiserror::Error;

/// The address block could not be turned into a list of hosts.
#[derive(Debug, Error)]
pub enum RangeError {
    #[error("'{0}' is not in CIDR notation (expected <address>/<prefix>)")]
    MissingPrefix(String),
    #[error("'{0}' is an IPv6 block, only IPv4 blocks can be resolved")]
    NotIpv4(String),
    #[error("invalid address block '{block}': {source}")]
    Invalid {
        block: String,
        #[source]
        source: IpNetworkError,
    },
}

/// Failure of one scan. Fatal to the cycle that hit it, never to the process.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("network interface '{0}' not found")]
    InterfaceNotFound(String),
    #[error(transparent)]
    InvalidRange(#[from] RangeError),
    #[error("network interface '{0}' has no hardware address")]
    NoHardwareAddress(String),
    #[error("failed to open link-layer channel on {interface}: {source}")]
    Channel {
        interface: String,
        #[source]
        source: std::io::Error,
    },
    #[error("non-ethernet channel for {0}")]
    UnsupportedChannel(String),
}

/// Rejected registry mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("'{0}' is not a hardware address")]
    InvalidAddress(String),
    #[error("user {0} has no device with that address")]
    UnknownDevice(u64),
}
