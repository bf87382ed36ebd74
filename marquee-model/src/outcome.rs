use std::fmt::{self, Display};

use crate::PosterUrl;

/// Step of a poll cycle a failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleStage {
    Tracking,
    Metadata,
    Render,
}

impl Display for CycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleStage::Tracking => write!(f, "tracking"),
            CycleStage::Metadata => write!(f, "metadata"),
            CycleStage::Render => write!(f, "render"),
        }
    }
}

/// Result of a single poll cycle.
///
/// None of these are fatal; a failed cycle leaves the display untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Nothing is playing
    Idle,
    /// Something is playing that has no poster mapping
    Unsupported { kind: String },
    /// Playing item lacks the identifiers needed for a lookup
    Unidentified,
    /// Metadata service has no poster for the item
    NoPoster,
    /// Poster already on screen
    Unchanged(PosterUrl),
    /// New poster pushed to the display
    Rendered(PosterUrl),
    Failed { stage: CycleStage, reason: String },
}

impl CycleOutcome {
    pub fn failed(stage: CycleStage, reason: impl Display) -> Self {
        CycleOutcome::Failed {
            stage,
            reason: reason.to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, CycleOutcome::Failed { .. })
    }

    pub fn rendered(&self) -> Option<&PosterUrl> {
        match self {
            CycleOutcome::Rendered(url) => Some(url),
            _ => None,
        }
    }
}

impl Display for CycleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleOutcome::Idle => write!(f, "nothing playing"),
            CycleOutcome::Unsupported { kind } => {
                write!(f, "unsupported item type '{kind}'")
            }
            CycleOutcome::Unidentified => {
                write!(f, "playing item has no usable identifiers")
            }
            CycleOutcome::NoPoster => write!(f, "no poster available"),
            CycleOutcome::Unchanged(url) => write!(f, "poster unchanged ({url})"),
            CycleOutcome::Rendered(url) => write!(f, "rendered {url}"),
            CycleOutcome::Failed { stage, reason } => {
                write!(f, "{stage} failed: {reason}")
            }
        }
    }
}
