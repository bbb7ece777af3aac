//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use polaroid_core::PhotoRecord;
use polaroid_feed::GalleryView;

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print one record as a listing line.
pub fn record(record: &PhotoRecord) {
    println!(
        "{}  {}  {}",
        record.id.to_string().cyan(),
        record.link_target(),
        record.created_at.to_rfc3339().dimmed()
    );
}

/// Print a gallery view.
pub fn view(view: &GalleryView) {
    let now = chrono::Local::now().format("%H:%M:%S").to_string();

    match view {
        GalleryView::Loading => {
            println!("{} {}", now.dimmed(), "Loading photos...".yellow());
        }
        GalleryView::Error { message, action } => {
            error(&format!("Error: {}", message));
            eprintln!("  [{}]", action.label());
        }
        GalleryView::Empty { action, stale } => {
            println!("{} {}", now.dimmed(), "No photos found".dimmed());
            println!("  [{}]", action.label());
            if let Some(stale) = stale {
                field("  last refresh failed", stale);
            }
        }
        GalleryView::Ready { cards, stale } => {
            println!("{} {} photos", now.dimmed(), cards.len().to_string().green());
            for card in cards {
                println!("  {}  {}", card.key.cyan(), card.href);
            }
            if let Some(stale) = stale {
                field("  last refresh failed", stale);
            }
        }
    }
}
