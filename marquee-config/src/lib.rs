//! Configuration library for Marquee.
//!
//! The daemon reads a single file once at startup. Both the legacy flat
//! JSON layout (`client_id`, `tmdb_api_key`, `trakt_username`) and the
//! same keys in TOML are accepted; everything beyond the three required
//! keys has a default. Loading applies guard rails and returns any
//! non-fatal warnings alongside the effective [`Config`].

pub mod constants;
pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{ConfigFormat, ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::{
    Config, DisplayConfig, PollingConfig, Rotation, Secret, TmdbConfig,
    TraktConfig,
};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
