//! # Presence Monitor
//!
//! Ties scanner, registry and cache together. One cycle is
//! scan → load fingerprints → match → swap the cache. Cycles run serially on a
//! single background task started by [`PresenceMonitor::start_scanning`].
//!
//! A failed cycle is logged and changes nothing: users keep the presence of
//! the last successful cycle until the next interval retries.

use std::sync::Arc;

use anyhow::Context;
use pnet::util::MacAddr;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use presence_common::config::ScanSettings;
use presence_common::fingerprint::{DeviceFingerprint, UserId};
use presence_common::registry::DeviceRegistry;
use presence_common::scanning::NetworkScanner;

use crate::cache::PresenceCache;
use crate::matcher;

/// Counts from one successful cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Addresses that answered.
    pub discovered: usize,
    /// Fingerprints the registry returned.
    pub registered: usize,
    /// Distinct users marked present.
    pub present: usize,
}

#[derive(Clone)]
pub struct PresenceMonitor {
    cache: Arc<PresenceCache>,
    scanner: Arc<dyn NetworkScanner>,
    registry: Arc<dyn DeviceRegistry>,
    reports: Arc<watch::Sender<Option<CycleReport>>>,
}

impl PresenceMonitor {
    pub fn new(scanner: Arc<dyn NetworkScanner>, registry: Arc<dyn DeviceRegistry>) -> Self {
        let (reports, _) = watch::channel(None);
        Self {
            cache: Arc::new(PresenceCache::new()),
            scanner,
            registry,
            reports: Arc::new(reports),
        }
    }

    pub fn cache(&self) -> &PresenceCache {
        &self.cache
    }

    pub fn is_user_present(&self, user: UserId) -> bool {
        self.cache.is_present(user)
    }

    /// Receives the report of every successful cycle.
    pub fn subscribe(&self) -> watch::Receiver<Option<CycleReport>> {
        self.reports.subscribe()
    }

    /// Runs one cycle. On error the cache is left as it was.
    pub async fn run_cycle(&self, settings: &ScanSettings) -> anyhow::Result<CycleReport> {
        let found: Vec<MacAddr> = self
            .scanner
            .scan(&settings.interface, &settings.range)
            .await
            .with_context(|| format!("scanning {} on {}", settings.range, settings.interface))?;

        let registered: Vec<DeviceFingerprint> = self
            .registry
            .list_fingerprints()
            .context("loading registered devices")?;

        let report_registered: usize = registered.len();
        let report_discovered: usize = found.len();
        // Up to found × registered × 1000 SHA-256 rounds: keep it off the workers.
        let present: Vec<UserId> =
            tokio::task::spawn_blocking(move || matcher::match_present(&found, registered))
                .await
                .context("matching discovered devices")?;
        self.cache.replace(present.iter().copied());

        let report = CycleReport {
            discovered: report_discovered,
            registered: report_registered,
            present: present.len(),
        };
        self.reports.send_replace(Some(report));

        Ok(report)
    }

    /// Runs the first cycle, then keeps scanning every `settings.interval` in
    /// the background until the returned handle is stopped.
    pub async fn start_scanning(&self, settings: ScanSettings) -> ScanHandle {
        info!(
            "Watching {} on {} with the {} scanner",
            settings.range,
            settings.interface,
            self.scanner.name()
        );
        self.logged_cycle(&settings).await;

        let monitor: PresenceMonitor = self.clone();
        let task: JoinHandle<()> = tokio::spawn(async move {
            loop {
                tokio::time::sleep(settings.interval).await;
                monitor.logged_cycle(&settings).await;
            }
        });

        ScanHandle { task }
    }

    async fn logged_cycle(&self, settings: &ScanSettings) {
        match self.run_cycle(settings).await {
            Ok(report) => info!(
                discovered = report.discovered,
                registered = report.registered,
                present = report.present,
                "Scan cycle complete"
            ),
            Err(e) => {
                error!("Scan cycle failed, keeping previous presence: {e:#}");
                debug!(online = self.cache.len(), "presence unchanged");
            }
        }
    }
}

/// Owns the background scan task.
pub struct ScanHandle {
    task: JoinHandle<()>,
}

impl ScanHandle {
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Aborts the scheduler and waits until it has stopped. A cycle in
    /// progress is dropped without touching the cache.
    pub async fn stop(self) {
        self.task.abort();
        let _ = self.task.await;
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
