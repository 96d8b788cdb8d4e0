#![cfg(test)]
//! Whole-cycle scenarios: enumeration, ARP over an in-memory link, matching
//! and the presence cache, wired the way the binary wires them.

use async_trait::async_trait;
use pnet::datalink::{dummy, Channel};
use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, ArpPacket, MutableArpPacket};
use pnet::packet::ethernet::{EtherTypes, EthernetPacket, MutableEthernetPacket};
use pnet::packet::Packet;
use pnet::util::MacAddr;
use presence_common::config::ScanSettings;
use presence_common::error::{RangeError, ScanError};
use presence_common::fingerprint::{DeviceFingerprint, UserId};
use presence_common::network::range;
use presence_common::scanning::NetworkScanner;
use presence_core::monitor::{CycleReport, PresenceMonitor};
use presence_core::registry::MemoryRegistry;
use presence_core::resolver::ArpClient;
use presence_core::scanner::{self, FixedScanner};
use std::collections::HashMap;
use std::io;
use std::net::Ipv4Addr;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

const LOCAL_MAC: MacAddr = MacAddr(0x02, 0x00, 0x00, 0x00, 0x00, 0x01);
const LOCAL_ADDR: Ipv4Addr = Ipv4Addr::new(192, 168, 2, 1);
const PHONE: MacAddr = MacAddr(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff);
const LAPTOP: MacAddr = MacAddr(0x10, 0x20, 0x30, 0x40, 0x50, 0x60);
const PER_REQUEST: Duration = Duration::from_millis(50);
const BLOCK: &str = "192.168.2.0/24";

/// Scans over a `pnet` dummy link where a responder thread answers for
/// the configured hosts.
struct LinkScanner {
    answering: HashMap<Ipv4Addr, MacAddr>,
}

impl LinkScanner {
    fn new(answering: &[(u8, MacAddr)]) -> Arc<Self> {
        let answering = answering
            .iter()
            .map(|&(last, mac)| (Ipv4Addr::new(192, 168, 2, last), mac))
            .collect();
        Arc::new(Self { answering })
    }
}

#[async_trait]
impl NetworkScanner for LinkScanner {
    async fn scan(&self, _interface: &str, range: &str) -> Result<Vec<MacAddr>, ScanError> {
        let hosts: Vec<Ipv4Addr> = range::hosts_from_cidr(range)?;

        let intf = dummy::dummy_interface(0);
        let mut cfg = dummy::Config::default();
        let inject = cfg.inject_handle().expect("fresh config has an inject handle");
        let sent = cfg.read_handle().expect("fresh config has a read handle");
        let (tx, rx) = match dummy::channel(&intf, cfg) {
            Ok(Channel::Ethernet(tx, rx)) => (tx, rx),
            Ok(_) => return Err(ScanError::UnsupportedChannel(intf.name)),
            Err(source) => {
                return Err(ScanError::Channel {
                    interface: intf.name,
                    source,
                })
            }
        };

        let answering = self.answering.clone();
        thread::spawn(move || respond(sent, inject, answering));

        let client = ArpClient::from_channel(LOCAL_MAC, LOCAL_ADDR, tx, rx, PER_REQUEST)
            .map_err(|source| ScanError::Channel {
                interface: intf.name.clone(),
                source,
            })?;
        let found = scanner::collect(client.probe(), hosts, PER_REQUEST).await;
        client.close();

        Ok(found)
    }

    fn name(&self) -> &'static str {
        "dummy-link"
    }
}

/// Answers every request for a known host until the client goes away.
fn respond(
    sent: mpsc::Receiver<Box<[u8]>>,
    inject: mpsc::Sender<io::Result<Box<[u8]>>>,
    answering: HashMap<Ipv4Addr, MacAddr>,
) {
    while let Ok(frame) = sent.recv() {
        let Some(eth) = EthernetPacket::new(&frame) else {
            continue;
        };
        let Some(request) = ArpPacket::new(eth.payload()) else {
            continue;
        };
        let target = request.get_target_proto_addr();
        if let Some(&mac) = answering.get(&target) {
            if inject.send(Ok(reply(target, mac))).is_err() {
                return;
            }
        }
    }
}

fn reply(sender_ip: Ipv4Addr, sender_mac: MacAddr) -> Box<[u8]> {
    let mut buffer = vec![0u8; 42];
    {
        let mut eth = MutableEthernetPacket::new(&mut buffer).unwrap();
        eth.set_destination(LOCAL_MAC);
        eth.set_source(sender_mac);
        eth.set_ethertype(EtherTypes::Arp);
    }
    let mut arp = MutableArpPacket::new(&mut buffer[14..]).unwrap();
    arp.set_hardware_type(ArpHardwareTypes::Ethernet);
    arp.set_protocol_type(EtherTypes::Ipv4);
    arp.set_hw_addr_len(6);
    arp.set_proto_addr_len(4);
    arp.set_operation(ArpOperations::Reply);
    arp.set_sender_hw_addr(sender_mac);
    arp.set_sender_proto_addr(sender_ip);
    arp.set_target_hw_addr(LOCAL_MAC);
    arp.set_target_proto_addr(LOCAL_ADDR);
    buffer.into_boxed_slice()
}

fn registry() -> Arc<MemoryRegistry> {
    let registry = Arc::new(MemoryRegistry::new());
    registry.insert(DeviceFingerprint::with_salt(UserId(1), PHONE, "s1"));
    registry.insert(DeviceFingerprint::with_salt(UserId(2), LAPTOP, "s2"));
    registry
}

fn settings() -> ScanSettings {
    ScanSettings::new("dummy0", BLOCK)
}

#[test]
fn block_and_fingerprint_fixtures() {
    let hosts = range::hosts_from_cidr(BLOCK).unwrap();
    assert_eq!(hosts.len(), 254);
    assert_eq!(hosts.first(), Some(&Ipv4Addr::new(192, 168, 2, 1)));
    assert_eq!(hosts.last(), Some(&Ipv4Addr::new(192, 168, 2, 254)));

    let phone = DeviceFingerprint::with_salt(UserId(1), PHONE, "s1");
    assert_eq!(
        phone.salted_hash,
        "aaf35b61935e68b44704029acda734fce88e230f432bd6208716a9d78e7a23a9"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn answering_device_marks_its_owner_present() {
    let scanner = LinkScanner::new(&[(10, PHONE), (77, MacAddr(0x0e, 0, 0, 0, 0, 0x77))]);
    let monitor = PresenceMonitor::new(scanner, registry());

    let report = monitor.run_cycle(&settings()).await.unwrap();

    assert_eq!(
        report,
        CycleReport {
            discovered: 2,
            registered: 2,
            present: 1
        }
    );
    assert!(monitor.is_user_present(UserId(1)));
    assert!(!monitor.is_user_present(UserId(2)));
    assert!(!monitor.is_user_present(UserId(3)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn silent_network_leaves_everyone_absent() {
    let monitor = PresenceMonitor::new(LinkScanner::new(&[]), registry());

    let report = monitor.run_cycle(&settings()).await.unwrap();

    assert_eq!(report.discovered, 0);
    assert!(monitor.cache().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn user_leaving_is_absent_after_next_cycle() {
    let registry = registry();
    let present = PresenceMonitor::new(LinkScanner::new(&[(10, PHONE), (11, LAPTOP)]), registry.clone());
    present.run_cycle(&settings()).await.unwrap();
    assert_eq!(present.cache().online(), vec![UserId(1), UserId(2)]);

    // Same cache, a network where only the laptop still answers.
    let monitor = PresenceMonitor::new(LinkScanner::new(&[(11, LAPTOP)]), registry);
    monitor.cache().replace(present.cache().online());
    monitor.run_cycle(&settings()).await.unwrap();

    assert!(!monitor.is_user_present(UserId(1)));
    assert!(monitor.is_user_present(UserId(2)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn misconfigured_block_fails_cycle_and_keeps_presence() {
    let monitor = PresenceMonitor::new(LinkScanner::new(&[(10, PHONE)]), registry());
    monitor.run_cycle(&settings()).await.unwrap();

    let bad = ScanSettings::new("dummy0", "192.168.2.0");
    let err = monitor.run_cycle(&bad).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ScanError>(),
        Some(ScanError::InvalidRange(RangeError::MissingPrefix(_)))
    ));
    assert!(monitor.is_user_present(UserId(1)));
}

#[tokio::test(start_paused = true)]
async fn fixed_scanner_drives_the_scheduler() {
    let registry = registry();
    registry.add_or_update(UserId(5), MacAddr(0xde, 0xad, 0xbe, 0xef, 0xde, 0xad), None);
    let monitor = PresenceMonitor::new(Arc::new(FixedScanner), registry);

    let handle = monitor
        .start_scanning(settings().with_interval(Duration::from_secs(300)))
        .await;

    assert!(monitor.is_user_present(UserId(5)));
    assert!(!monitor.is_user_present(UserId(1)));

    tokio::time::sleep(Duration::from_secs(301)).await;
    assert!(monitor.is_user_present(UserId(5)));
    assert!(handle.is_running());
    handle.stop().await;
}
