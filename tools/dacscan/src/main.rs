use std::error::Error;

use clap::Parser;
use dacscan_app::{
    DiscoveryConfig,
    access::check_device_access,
    scan::{ScanConfig, host_name, scan_cards},
};

mod report;

#[derive(Parser)]
#[command(
    version,
    about = "Print the channel counts, rates and formats each output interface accepts",
    long_about = "Print the channel counts, rates and formats each output interface accepts.\n\n\
        Each interface is opened for interleaved output at standard rates and formats with one \
        to eight channels. Interfaces that are in use can not be checked, and HDMI interfaces \
        need a connected, powered on sink. The user needs access to the sound devices, usually \
        by being a member of the \"audio\" group."
)]
struct Args {
    #[arg(short = 'e', help = "Display extended information about cards and interfaces")]
    extended: bool,
    #[arg(short = 'v', action = clap::ArgAction::Count, help = "Increase log verbosity, may be repeated")]
    verbose: u8,
    #[arg(
        short = 'c',
        default_value = "8",
        help = "Highest channel count to probe (at most 31)"
    )]
    max_channels: u8,
    #[arg(short = 'a', help = "Probe every output interface, not just hw, hdmi and iec958")]
    all: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    report::print_access(check_device_access());

    let config = ScanConfig {
        include_all: args.all,
        discovery: DiscoveryConfig::default().with_max_channels(args.max_channels),
        ..Default::default()
    };
    log::debug!("{config:?}");
    // Enumerating devices can emit junk to the terminal on some platforms, so finish all
    // probing before printing the report.
    let mut cards = scan_cards(&config)?;

    println!("  --- Audio Host: {}.", host_name());
    println!("  --- Sound Cards: {}.", cards.len());
    for card in cards.iter_mut() {
        report::print_card(card, args.extended);
    }
    Ok(())
}
