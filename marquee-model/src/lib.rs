//! Core data model definitions shared across Marquee crates.

pub mod media_kind;
pub mod outcome;
pub mod poster;
pub mod watch;

pub use media_kind::MediaKind;
pub use outcome::{CycleOutcome, CycleStage};
pub use poster::{PosterRequest, PosterUrl};
pub use watch::WatchStatus;
