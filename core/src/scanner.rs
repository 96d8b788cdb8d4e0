//! The scan orchestrator.
//!
//! [`collect`] fans out one probe task per host and gathers the answers under
//! a global deadline. [`LocalScanner`] wires it to a real ARP client;
//! [`FixedScanner`] stands in where raw link-layer access is missing.
//! [`select`] picks one of them once at startup.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use pnet::util::MacAddr;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use presence_common::scanning::NetworkScanner;

use crate::resolver::Probe;

mod fixed;
mod local;

pub use fixed::FixedScanner;
pub use local::LocalScanner;

/// Added on top of the summed per-request timeouts.
pub const COLLECTION_GRACE: Duration = Duration::from_secs(2);

/// `hosts × per_request + COLLECTION_GRACE`.
pub fn collection_deadline(hosts: usize, per_request: Duration) -> Duration {
    let hosts: u32 = u32::try_from(hosts).unwrap_or(u32::MAX);
    per_request.saturating_mul(hosts).saturating_add(COLLECTION_GRACE)
}

/// Probes every host concurrently and returns the addresses that answered,
/// in arrival order.
///
/// Each task owns its own completion slot in the [`JoinSet`]. Once the
/// deadline passes, unfinished tasks are detached: they run to their own
/// timeout but nobody reads their result.
pub async fn collect<P>(probe: Arc<P>, hosts: Vec<Ipv4Addr>, per_request: Duration) -> Vec<MacAddr>
where
    P: Probe + ?Sized + 'static,
{
    let deadline: Instant = Instant::now() + collection_deadline(hosts.len(), per_request);
    let mut slots: JoinSet<Option<MacAddr>> = JoinSet::new();

    for addr in hosts {
        let probe = Arc::clone(&probe);
        slots.spawn(async move { probe.resolve(addr).await });
    }

    let mut found: Vec<MacAddr> = Vec::new();
    loop {
        match tokio::time::timeout_at(deadline, slots.join_next()).await {
            Ok(Some(Ok(Some(mac)))) => found.push(mac),
            Ok(Some(Ok(None))) => {}
            Ok(Some(Err(e))) => warn!("probe task failed: {e}"),
            Ok(None) => break,
            Err(_elapsed) => {
                debug!(abandoned = slots.len(), "collection deadline reached");
                break;
            }
        }
    }
    slots.detach_all();

    found
}

/// Chooses the scanner implementation for this process.
///
/// Raw ARP needs link-layer sockets: unavailable on Windows and without root.
/// In those cases the fixed stub keeps the rest of the system running.
pub fn select(force_stub: bool) -> Arc<dyn NetworkScanner> {
    if force_stub {
        info!("Using fixed scanner as requested");
        return Arc::new(FixedScanner);
    }
    if cfg!(windows) {
        warn!("ARP resolution is not supported on this platform, reporting fixed addresses");
        return Arc::new(FixedScanner);
    }
    if !is_root::is_root() {
        warn!("Not running as root, ARP resolution disabled, reporting fixed addresses");
        return Arc::new(FixedScanner);
    }
    Arc::new(LocalScanner::default())
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
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PER_REQUEST: Duration = Duration::from_millis(500);

    enum Answer {
        After(Duration, MacAddr),
        Silent(Duration),
        Never,
    }

    struct ScriptedProbe {
        answers: HashMap<Ipv4Addr, Answer>,
        calls: AtomicUsize,
    }

    impl ScriptedProbe {
        fn new(answers: Vec<(u8, Answer)>) -> Arc<Self> {
            let answers = answers
                .into_iter()
                .map(|(last, answer)| (Ipv4Addr::new(10, 0, 0, last), answer))
                .collect();
            Arc::new(Self {
                answers,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Probe for ScriptedProbe {
        async fn resolve(&self, addr: Ipv4Addr) -> Option<MacAddr> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.answers.get(&addr) {
                Some(Answer::After(delay, mac)) => {
                    tokio::time::sleep(*delay).await;
                    Some(*mac)
                }
                Some(Answer::Silent(delay)) => {
                    tokio::time::sleep(*delay).await;
                    None
                }
                Some(Answer::Never) => std::future::pending().await,
                None => None,
            }
        }
    }

    fn hosts(last_octets: &[u8]) -> Vec<Ipv4Addr> {
        last_octets.iter().map(|&d| Ipv4Addr::new(10, 0, 0, d)).collect()
    }

    fn mac(last: u8) -> MacAddr {
        MacAddr::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, last)
    }

    #[test]
    fn collection_deadline_scales_with_hosts() {
        assert_eq!(collection_deadline(0, PER_REQUEST), COLLECTION_GRACE);
        assert_eq!(collection_deadline(254, PER_REQUEST), Duration::from_secs(129));
    }

    #[tokio::test(start_paused = true)]
    async fn collect_returns_replies_in_arrival_order() {
        let probe = ScriptedProbe::new(vec![
            (1, Answer::After(Duration::from_millis(300), mac(1))),
            (2, Answer::Silent(PER_REQUEST)),
            (3, Answer::After(Duration::from_millis(100), mac(3))),
        ]);
        let found = collect(probe.clone(), hosts(&[1, 2, 3]), PER_REQUEST).await;
        assert_eq!(found, vec![mac(3), mac(1)]);
        assert_eq!(probe.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn collect_finishes_early_when_all_probes_done() {
        let probe = ScriptedProbe::new(vec![(1, Answer::After(Duration::from_millis(10), mac(1)))]);
        let started = Instant::now();
        let found = collect(probe, hosts(&[1, 2]), PER_REQUEST).await;
        assert_eq!(found, vec![mac(1)]);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn collect_stops_at_global_deadline() {
        let probe = ScriptedProbe::new(vec![
            (1, Answer::After(Duration::from_millis(50), mac(1))),
            (2, Answer::Never),
            (3, Answer::After(Duration::from_secs(60), mac(3))),
        ]);
        let started = Instant::now();
        let found = collect(probe, hosts(&[1, 2, 3]), PER_REQUEST).await;

        assert_eq!(found, vec![mac(1)], "late replies must be discarded");
        let deadline = collection_deadline(3, PER_REQUEST);
        assert!(started.elapsed() >= deadline);
        assert!(started.elapsed() < deadline + Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn collect_with_no_hosts_returns_immediately() {
        let probe = ScriptedProbe::new(vec![]);
        let found = collect(probe.clone(), Vec::new(), PER_REQUEST).await;
        assert!(found.is_empty());
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn select_honours_forced_stub() {
        let scanner = select(true);
        assert_eq!(scanner.name(), FixedScanner.name());
    }
}
