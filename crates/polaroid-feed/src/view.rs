//! View model derived from feed state.
//!
//! Rendering is a pure function of [`FeedState`]; nothing here touches the
//! store or the refresh timer.

use serde::Serialize;

use polaroid_core::PhotoRecord;

use crate::state::{FeedState, LoadMode, Phase};

/// Browsing context card links open in.
pub const LINK_TARGET: &str = "_blank";

/// Link relation keeping the opened page from seeing the referrer or opener.
pub const LINK_REL: &str = "noopener noreferrer";

/// A user action offered by a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserAction {
    /// Try again after a failed load.
    Retry,
    /// Check again after an empty load.
    Refresh,
}

impl UserAction {
    /// Button label for this action.
    pub fn label(self) -> &'static str {
        match self {
            UserAction::Retry => "Try Again",
            UserAction::Refresh => "Refresh",
        }
    }

    /// Both actions re-run a load the user is waiting on.
    pub fn load_mode(self) -> LoadMode {
        LoadMode::Foreground
    }
}

/// One polaroid card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Stable display key.
    pub key: String,
    /// Image shown inside the frame.
    pub image_url: String,
    /// Where clicking the card goes.
    pub href: String,
    pub target: &'static str,
    pub rel: &'static str,
}

impl From<&PhotoRecord> for Card {
    fn from(record: &PhotoRecord) -> Self {
        Self {
            key: record.id.to_string(),
            image_url: record.image_url.clone(),
            href: record.link_target().to_string(),
            target: LINK_TARGET,
            rel: LINK_REL,
        }
    }
}

/// What the gallery shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum GalleryView {
    /// Spinner placeholder; no actions.
    Loading,

    /// Error message with a retry button.
    Error { message: String, action: UserAction },

    /// "No photos" message with a refresh button.
    Empty {
        action: UserAction,
        #[serde(skip_serializing_if = "Option::is_none")]
        stale: Option<String>,
    },

    /// Grid of cards, newest first.
    Ready {
        cards: Vec<Card>,
        /// Message of a background refresh that failed after this content
        /// was fetched.
        #[serde(skip_serializing_if = "Option::is_none")]
        stale: Option<String>,
    },
}

impl GalleryView {
    /// The action this view offers, if any.
    pub fn action(&self) -> Option<UserAction> {
        match self {
            GalleryView::Error { action, .. } | GalleryView::Empty { action, .. } => Some(*action),
            GalleryView::Loading | GalleryView::Ready { .. } => None,
        }
    }
}

impl FeedState {
    /// Derive the view for this state.
    pub fn view(&self) -> GalleryView {
        let stale = self.last_error().map(|e| e.message().to_string());

        match self.phase() {
            Phase::Loading => GalleryView::Loading,
            Phase::Error(error) => GalleryView::Error {
                message: error.message().to_string(),
                action: UserAction::Retry,
            },
            Phase::Empty => GalleryView::Empty {
                action: UserAction::Refresh,
                stale,
            },
            Phase::Ready => GalleryView::Ready {
                cards: self.records().iter().map(Card::from).collect(),
                stale,
            },
        }
    }
}
