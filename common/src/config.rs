use std::time::Duration;

/// Interval used when none is configured. Scan intervals are minutes apart.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Lower bound for the scheduler interval; a zero interval would spin.
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Parameters of one scan cycle, captured once when scanning starts.
///
/// The address block is kept as text: it is validated by the enumerator at
/// scan time, so a bad block fails each cycle instead of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    /// Name of the network interface to probe on (e.g. `eth0`).
    pub interface: String,
    /// Address block in CIDR notation (e.g. `192.168.2.0/24`).
    pub range: String,
    /// Time between the end of one cycle and the start of the next.
    pub interval: Duration,
}

impl ScanSettings {
    pub fn new(interface: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            range: range.into(),
            interval: DEFAULT_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(MIN_INTERVAL);
        self
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
