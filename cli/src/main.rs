mod commands;
mod terminal;

use std::time::Duration;

use commands::{CommandLine, Commands, hash, hosts, scan, watch};
use presence_common::config::ScanSettings;
use presence_core::scanner;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose);

    match commands.command {
        Commands::Hosts { range } => {
            print::header("address block");
            hosts::hosts(&range)?;
        }
        Commands::Hash { mac, salt } => {
            print::header("device fingerprint");
            hash::hash(&mac, salt)?;
        }
        Commands::Scan { interface, range } => {
            print::header("starting scanner");
            let scanner = scanner::select(commands.stub);
            scan::scan(scanner, &interface, &range).await?;
        }
        Commands::Watch {
            interface,
            range,
            interval,
            devices,
        } => {
            print::header("starting presence watch");
            let settings = ScanSettings::new(interface, range)
                .with_interval(Duration::from_secs(interval.saturating_mul(60)));
            let scanner = scanner::select(commands.stub);
            watch::watch(scanner, settings, devices).await?;
        }
    }

    print::end_of_program();
    Ok(())
}
