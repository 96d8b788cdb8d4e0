//! Single-address ARP resolution.
//!
//! An [`ArpClient`] owns one link-layer channel on an interface for the
//! duration of a scan. Probes handed out by [`ArpClient::probe`] register a
//! waiter for their target address, broadcast a request and wait at most the
//! per-request timeout. A background listener thread reads frames and wakes
//! the waiter whose address answered.

use std::collections::HashMap;
use std::io;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use pnet::datalink::{self, Channel, Config, DataLinkReceiver, DataLinkSender, NetworkInterface};
use pnet::util::MacAddr;
use tokio::sync::oneshot;
use tracing::{debug, trace, warn};

use presence_common::error::ScanError;
use presence_common::network::interface::NetworkInterfaceExtension;
use presence_protocols::arp;

/// How long one probe waits for its reply.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(500);

/// Read timeout of the channel, bounds how long closing takes to be noticed.
const READ_TIMEOUT: Duration = Duration::from_millis(50);

/// Resolves one host address to the hardware address answering for it.
#[async_trait]
pub trait Probe: Send + Sync {
    /// `None` when nothing answered in time. A missing reply is not an error.
    async fn resolve(&self, addr: Ipv4Addr) -> Option<MacAddr>;
}

type Channels = (Box<dyn DataLinkSender>, Box<dyn DataLinkReceiver>);

struct Shared {
    src_mac: MacAddr,
    src_addr: Ipv4Addr,
    timeout: Duration,
    tx: Mutex<Option<Box<dyn DataLinkSender>>>,
    waiters: Mutex<HashMap<Ipv4Addr, oneshot::Sender<MacAddr>>>,
    closed: AtomicBool,
}

/// Resolution context on one interface. Closed on [`ArpClient::close`] or drop.
pub struct ArpClient {
    shared: Arc<Shared>,
}

/// Handle used by probe tasks. Outlives the client harmlessly: once the
/// client is closed every resolve returns `None`.
#[derive(Clone)]
pub struct ArpProbe {
    shared: Arc<Shared>,
}

impl ArpClient {
    pub fn open(interface: &NetworkInterface, timeout: Duration) -> Result<Self, ScanError> {
        let src_mac: MacAddr = interface
            .mac
            .ok_or_else(|| ScanError::NoHardwareAddress(interface.name.clone()))?;
        let src_addr: Ipv4Addr = interface.ipv4_source().unwrap_or(Ipv4Addr::UNSPECIFIED);
        let (tx, rx) = open_eth_channel(interface, &channel_config(), datalink::channel)?;

        Self::from_channel(src_mac, src_addr, tx, rx, timeout).map_err(|source| {
            ScanError::Channel {
                interface: interface.name.clone(),
                source,
            }
        })
    }

    /// Builds a client on an already opened channel pair.
    pub fn from_channel(
        src_mac: MacAddr,
        src_addr: Ipv4Addr,
        tx: Box<dyn DataLinkSender>,
        rx: Box<dyn DataLinkReceiver>,
        timeout: Duration,
    ) -> io::Result<Self> {
        let shared = Arc::new(Shared {
            src_mac,
            src_addr,
            timeout,
            tx: Mutex::new(Some(tx)),
            waiters: Mutex::new(HashMap::new()),
            closed: AtomicBool::new(false),
        });

        let listener = Arc::clone(&shared);
        thread::Builder::new()
            .name("arp-listener".into())
            .spawn(move || listener.listen(rx))?;

        Ok(Self { shared })
    }

    pub fn probe(&self) -> Arc<ArpProbe> {
        Arc::new(ArpProbe {
            shared: Arc::clone(&self.shared),
        })
    }

    /// Releases the channel. Idempotent.
    pub fn close(&self) {
        self.shared.close();
    }

    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::Acquire)
    }
}

impl Drop for ArpClient {
    fn drop(&mut self) {
        self.shared.close();
    }
}

#[async_trait]
impl Probe for ArpProbe {
    async fn resolve(&self, addr: Ipv4Addr) -> Option<MacAddr> {
        if self.shared.closed.load(Ordering::Acquire) {
            return None;
        }

        let (waiter_tx, waiter_rx) = oneshot::channel();
        lock(&self.shared.waiters).insert(addr, waiter_tx);

        if let Err(e) = self.shared.send_request(addr) {
            debug!("ARP request to {addr} not sent: {e:#}");
            lock(&self.shared.waiters).remove(&addr);
            return None;
        }

        match tokio::time::timeout(self.shared.timeout, waiter_rx).await {
            Ok(Ok(mac)) => Some(mac),
            _ => {
                lock(&self.shared.waiters).remove(&addr);
                None
            }
        }
    }
}

impl Shared {
    fn send_request(&self, target: Ipv4Addr) -> anyhow::Result<()> {
        let frame: Vec<u8> = arp::create_request(self.src_mac, self.src_addr, target)?;
        let mut tx = lock(&self.tx);
        let sender = tx.as_mut().context("resolution context is closed")?;
        match sender.send_to(&frame, None) {
            Some(Err(e)) => Err(e).context("sending ARP request"),
            _ => Ok(()),
        }
    }

    fn listen(&self, mut rx: Box<dyn DataLinkReceiver>) {
        while !self.closed.load(Ordering::Acquire) {
            match rx.next() {
                Ok(frame) => self.dispatch(frame),
                Err(e) if is_transient(&e) => {}
                Err(e) => {
                    warn!("link-layer receive failed, stopping listener: {e}");
                    break;
                }
            }
        }
        trace!("ARP listener stopped");
    }

    fn dispatch(&self, frame: &[u8]) {
        let Ok(reply) = arp::parse_reply(frame) else {
            return;
        };
        if let Some(waiter) = lock(&self.waiters).remove(&reply.sender_addr) {
            let _ = waiter.send(reply.sender_mac);
        }
    }

    fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        lock(&self.tx).take();
        lock(&self.waiters).clear();
    }
}

fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn channel_config() -> Config {
    Config {
        read_timeout: Some(READ_TIMEOUT),
        ..Default::default()
    }
}

fn open_eth_channel<F>(
    intf: &NetworkInterface,
    cfg: &Config,
    channel_opener: F,
) -> Result<Channels, ScanError>
where
    F: FnOnce(&NetworkInterface, Config) -> io::Result<Channel>,
{
    match channel_opener(intf, *cfg) {
        Ok(Channel::Ethernet(tx, rx)) => Ok((tx, rx)),
        Ok(_) => Err(ScanError::UnsupportedChannel(intf.name.clone())),
        Err(source) => Err(ScanError::Channel {
            interface: intf.name.clone(),
            source,
        }),
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
