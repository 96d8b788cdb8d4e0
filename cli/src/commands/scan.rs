use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use colored::*;
use pnet::util::MacAddr;
use presence_common::network::mac;
use presence_common::scanning::NetworkScanner;
use presence_common::success;
use presence_common::vendors::VendorRepository;
use presence_core::vendors::OuiVendors;

use crate::terminal::{colors, print, spinner};

pub async fn scan(scanner: Arc<dyn NetworkScanner>, interface: &str, range: &str) -> anyhow::Result<()> {
    let started: Instant = Instant::now();
    let spinner = spinner::start(format!("Resolving {range} on {interface}..."));
    let found = scanner.scan(interface, range).await;
    drop(spinner);

    let found: Vec<MacAddr> =
        found.with_context(|| format!("{} scan of {range} failed", scanner.name()))?;

    if found.is_empty() {
        print::header("zero devices answered");
        print::no_results("NO DEVICES FOUND");
        return Ok(());
    }

    print::header("answering devices");
    print_devices(&found, &OuiVendors);

    let count: ColoredString = format!("{} devices", found.len()).bold().green();
    let elapsed: ColoredString = format!("{:.2}s", started.elapsed().as_secs_f64()).bold().yellow();
    print::fat_separator();
    success!("Scan complete: {count} answered in {elapsed}");

    Ok(())
}

fn print_devices(found: &[MacAddr], vendors: &dyn VendorRepository) {
    for (idx, addr) in found.iter().enumerate() {
        print::tree_head(idx, &mac::canonical(*addr));
        let vendor: ColoredString = match vendors.get_vendor(*addr) {
            Some(name) => name.color(colors::TEXT_DEFAULT),
            None => "Unknown".dimmed(),
        };
        print::as_tree_one_level(&[("Vendor", vendor)]);
        if idx + 1 != found.len() {
            print::blank();
        }
    }
}
