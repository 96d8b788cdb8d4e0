use std::net::Ipv4Addr;

use presence_common::network::range;

use crate::terminal::print;

pub fn hosts(block: &str) -> anyhow::Result<()> {
    let hosts: Vec<Ipv4Addr> = range::hosts_from_cidr(block)?;

    print::aligned_line("Block", block);
    print::aligned_line("Hosts", hosts.len().to_string());
    if let (Some(first), Some(last)) = (hosts.first(), hosts.last()) {
        print::aligned_line("First", first.to_string());
        print::aligned_line("Last", last.to_string());
    }

    Ok(())
}
