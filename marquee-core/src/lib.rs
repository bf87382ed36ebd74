//! # Marquee Core
//!
//! The moving parts of the now-playing poster daemon:
//!
//! - [`tracking`]: asks the tracking service what the user is watching
//! - [`metadata`]: resolves a poster URL for the watched item
//! - [`render`]: downloads, rotates and hands the poster to the viewer
//! - [`session`]: one poll cycle at a time, remembering the poster on screen
//!
//! Each step sits behind a small trait so the session can be exercised
//! without the network or a framebuffer.

pub mod error;
pub mod http;
pub mod metadata;
pub mod render;
pub mod session;
pub mod tracking;

pub use error::{ClientBuildError, MetadataError, RenderError, TrackingError};
pub use metadata::{PosterSource, TmdbPosterResolver};
pub use render::{FramebufferRenderer, PosterRenderer};
pub use session::PollSession;
pub use tracking::{TraktClient, WatchSource};
