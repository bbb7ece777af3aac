//! Watch command implementation.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use polaroid_feed::{FetchFailed, GalleryFeed, GalleryView};

use crate::cli::StoreArgs;
use crate::output;
use crate::store::{self, CliStore};

/// A user-triggered load still in flight.
type PendingAction<'a> = Pin<Box<dyn Future<Output = Result<usize, FetchFailed>> + 'a>>;

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Seconds between background refreshes
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    /// Output each view as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: WatchArgs) -> Result<()> {
    let store = CliStore::open(&args.store)?;
    let config =
        store::feed_config(&args.store)?.with_refresh_interval(Duration::from_secs(args.interval));

    eprintln!("{}", "Watching feed...".dimmed());
    eprintln!(
        "{}",
        "Press Enter to retry or refresh, Ctrl+C to stop.".dimmed()
    );
    eprintln!();

    let feed = GalleryFeed::new(store, config).mount();
    let mut changes = feed.subscribe();
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;
    let mut pending: Option<PendingAction<'_>> = None;

    // The first load may finish before the subscription exists.
    let mut shown = changes.borrow_and_update().view();
    show(&shown, args.json)?;

    loop {
        tokio::select! {
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = changes.borrow_and_update().view();
                if view != shown {
                    show(&view, args.json)?;
                    shown = view;
                }
            }
            () = finish(&mut pending), if pending.is_some() => pending = None,
            line = input.next_line(), if input_open => {
                match line {
                    Ok(Some(_)) if pending.is_none() => {
                        if let Some(action) = feed.state().view().action() {
                            eprintln!("{}", format!("{}...", action.label()).dimmed());
                            pending = Some(Box::pin(feed.perform(action)));
                        }
                    }
                    Ok(Some(_)) => {}
                    Ok(None) | Err(_) => input_open = false,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                eprintln!();
                eprintln!("{}", "Stopping.".dimmed());
                break;
            }
        }
    }

    drop(pending);
    feed.unmount();
    Ok(())
}

async fn finish(pending: &mut Option<PendingAction<'_>>) {
    if let Some(action) = pending.as_mut() {
        // Failures already show up as the error view.
        let _ = action.await;
    }
}

fn show(view: &GalleryView, json: bool) -> Result<()> {
    if json {
        output::json(view)
    } else {
        output::view(view);
        Ok(())
    }
}
