//! List command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use polaroid_feed::{GalleryFeed, LoadMode};

use crate::cli::StoreArgs;
use crate::output;
use crate::store::{self, CliStore};

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Print each record as a JSON line
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,

    /// Pretty-print records as JSON
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ListArgs) -> Result<()> {
    let store = CliStore::open(&args.store)?;
    let config = store::feed_config(&args.store)?;
    let feed = GalleryFeed::new(store, config);

    feed.load(LoadMode::Foreground)
        .await
        .context("Failed to fetch photos")?;

    let state = feed.state();
    if state.records().is_empty() {
        eprintln!("{}", "No photos found.".dimmed());
        return Ok(());
    }

    for record in state.records() {
        if args.pretty {
            output::json_pretty(record)?;
        } else if args.json {
            output::json(record)?;
        } else {
            output::record(record);
        }
    }

    Ok(())
}
