//! Feed state and the transitions a load applies to it.

use serde::Serialize;

use polaroid_core::{PhotoRecord, sort_newest_first};

use crate::config::BackgroundFailurePolicy;
use crate::error::FetchFailed;

/// Whether a load is user-visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// The first load after mounting, or a user-triggered retry/refresh.
    /// Shows the loading phase while in flight.
    Foreground,

    /// A timer-driven refresh. Never shows the loading phase.
    Background,
}

/// The phase the gallery view is in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// A foreground load is in flight.
    #[default]
    Loading,

    /// The last load failed and nothing newer replaced it.
    Error(FetchFailed),

    /// The last successful load returned no records.
    Empty,

    /// The last successful load returned at least one record.
    Ready,
}

/// Records plus the phase derived from them and the last fetch outcome.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedState {
    records: Vec<PhotoRecord>,
    phase: Phase,
    last_error: Option<FetchFailed>,
}

impl FeedState {
    /// Records from the last successful load, newest first.
    pub fn records(&self) -> &[PhotoRecord] {
        &self.records
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The most recent failure not yet superseded by a successful load.
    ///
    /// Under [`BackgroundFailurePolicy::RetainContent`] this is how a failed
    /// background refresh stays observable while the previous view remains.
    pub fn last_error(&self) -> Option<&FetchFailed> {
        self.last_error.as_ref()
    }

    pub(crate) fn begin(&mut self, mode: LoadMode) {
        if mode == LoadMode::Foreground {
            self.phase = Phase::Loading;
        }
    }

    pub(crate) fn succeed(&mut self, mut records: Vec<PhotoRecord>) {
        sort_newest_first(&mut records);
        self.phase = if records.is_empty() {
            Phase::Empty
        } else {
            Phase::Ready
        };
        self.records = records;
        self.last_error = None;
    }

    pub(crate) fn fail(
        &mut self,
        mode: LoadMode,
        error: FetchFailed,
        policy: BackgroundFailurePolicy,
    ) {
        let show = match (mode, policy) {
            (LoadMode::Foreground, _) | (_, BackgroundFailurePolicy::ShowError) => true,
            // Only an error already on screen is refreshed; successful views stay.
            (LoadMode::Background, BackgroundFailurePolicy::RetainContent) => {
                matches!(self.phase, Phase::Error(_))
            }
        };

        if show {
            self.phase = Phase::Error(error.clone());
        }
        self.last_error = Some(error);
    }
}
