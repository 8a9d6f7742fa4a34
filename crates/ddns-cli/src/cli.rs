//! Command-line argument definitions using clap.

use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, Subcommand};
use ddns_core::Operation;
use ddns_core::update::DEFAULT_TTL;

/// Maintain dynamic DNS records with TSIG-signed RFC 2136 updates
///
/// Key, zone and server come from DDNS_KEY_NAME, DDNS_KEY_SECRET,
/// DDNS_DOMAIN and DDNS_SERVER.
#[derive(Parser, Debug)]
#[command(name = "ddns")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Add or replace the address record of a host
    Add(AddArgs),

    /// Delete every record of a host
    Delete(DeleteArgs),

    /// List the zone's A records
    Get(GetArgs),
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct AddArgs {
    /// Specify a hostname
    #[arg(short = 'n', long, value_parser = NonEmptyStringValueParser::new())]
    pub host: String,

    /// TTL (default: 3600)
    #[arg(short = 't', long, default_value_t = DEFAULT_TTL)]
    pub ttl: u32,

    /// IP address
    #[arg(short = 'i', long)]
    pub ipaddr: String,
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct DeleteArgs {
    /// Specify a hostname
    #[arg(short = 'n', long, value_parser = NonEmptyStringValueParser::new())]
    pub host: String,
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct GetArgs {
    /// Print the records as a JSON array
    #[arg(long)]
    pub json: bool,
}

impl Commands {
    /// The executor operation for this command
    pub fn operation(&self) -> Operation {
        match self {
            Commands::Add(args) => Operation::Add {
                host: args.host.clone(),
                ttl: args.ttl,
                ipaddr: args.ipaddr.clone(),
            },
            Commands::Delete(args) => Operation::Delete {
                host: args.host.clone(),
            },
            Commands::Get(_) => Operation::Get,
        }
    }
}
