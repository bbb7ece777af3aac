//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use crate::commands::{list::ListArgs, watch::WatchArgs};

/// Browse and watch a polaroid photo feed.
#[derive(Parser, Debug)]
#[command(name = "polaroid")]
#[command(author, version = env!("POLAROID_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the feed once and print it
    List(ListArgs),

    /// Keep the feed mounted and print every change
    Watch(WatchArgs),
}

/// Where records are read from.
#[derive(Args, Debug)]
pub struct StoreArgs {
    /// Store URL: a hosted project URL or a file:// directory
    #[arg(long = "store", env = "POLAROID_STORE_URL")]
    pub store_url: String,

    /// API key for a hosted store
    #[arg(long, env = "POLAROID_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Collection (table) holding the photos
    #[arg(long, default_value = "links")]
    pub collection: String,

    /// Request timeout in seconds for a hosted store
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Only fetch the newest N photos
    #[arg(long)]
    pub limit: Option<u32>,
}
