use std::sync::Arc;

use colored::*;
use presence_common::config::ScanSettings;
use presence_common::fingerprint::UserId;
use presence_common::scanning::NetworkScanner;
use presence_common::{info, warn};
use presence_core::monitor::{CycleReport, PresenceMonitor};
use presence_core::registry::MemoryRegistry;

use crate::commands::DeviceArg;
use crate::terminal::{colors, print};

/// Registers `devices`, then reports presence after every cycle until Ctrl-C.
pub async fn watch(
    scanner: Arc<dyn NetworkScanner>,
    settings: ScanSettings,
    devices: Vec<DeviceArg>,
) -> anyhow::Result<()> {
    let registry: Arc<MemoryRegistry> = Arc::new(MemoryRegistry::new());
    for device in &devices {
        registry.add_or_update(device.user, device.mac, None);
    }
    if registry.is_empty() {
        warn!("No devices registered, every user will show as absent");
    }

    let mut users: Vec<UserId> = devices.iter().map(|d| d.user).collect();
    users.sort_unstable();
    users.dedup();

    let monitor = PresenceMonitor::new(scanner, registry.clone());
    let mut reports = monitor.subscribe();
    let handle = monitor.start_scanning(settings).await;

    let first: Option<CycleReport> = *reports.borrow_and_update();
    print_presence(&monitor, &registry, &users, first);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            changed = reports.changed() => {
                if changed.is_err() {
                    break;
                }
                let report: Option<CycleReport> = *reports.borrow_and_update();
                print_presence(&monitor, &registry, &users, report);
            }
            _ = &mut shutdown => {
                print::blank();
                info!("Stopping presence watch");
                break;
            }
        }
    }

    handle.stop().await;
    Ok(())
}

fn print_presence(
    monitor: &PresenceMonitor,
    registry: &MemoryRegistry,
    users: &[UserId],
    report: Option<CycleReport>,
) {
    print::header("presence");
    if let Some(report) = report {
        print::print_status(format!(
            "{} answered, {} registered, {} present",
            report.discovered, report.registered, report.present
        ));
    }
    for &user in users {
        let state: ColoredString = if monitor.is_user_present(user) {
            "present".color(colors::PRESENT).bold()
        } else {
            "absent".color(colors::ABSENT)
        };
        let devices: usize = registry.devices_of(user).len();
        print::aligned_line(&format!("user {user}"), format!("{state} ({devices} devices)"));
    }
}
