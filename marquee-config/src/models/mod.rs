pub mod sources;

use std::{fmt, path::PathBuf, time::Duration};

use url::Url;

/// Effective configuration after defaults and guard rails.
#[derive(Debug, Clone)]
pub struct Config {
    pub trakt: TraktConfig,
    pub tmdb: TmdbConfig,
    pub display: DisplayConfig,
    pub polling: PollingConfig,
}

#[derive(Debug, Clone)]
pub struct TraktConfig {
    pub client_id: Secret,
    pub username: String,
    pub base_url: Url,
}

#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: Secret,
    pub base_url: Url,
    pub image_base_url: Url,
    /// Size bucket of the image CDN, e.g. `original` or `w780`.
    pub poster_size: String,
}

#[derive(Debug, Clone)]
pub struct DisplayConfig {
    pub output_path: PathBuf,
    pub rotation: Rotation,
    /// Viewer program and its arguments; the output path is appended.
    pub viewer_command: Vec<String>,
    pub viewer_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct PollingConfig {
    pub interval: Duration,
    pub request_timeout: Duration,
}

/// Counter-clockwise quarter-turn applied to posters before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    None,
    #[default]
    Ccw90,
    Half,
    Ccw270,
}

impl Rotation {
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::None),
            90 => Some(Rotation::Ccw90),
            180 => Some(Rotation::Half),
            270 => Some(Rotation::Ccw270),
            _ => None,
        }
    }

    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Ccw90 => 90,
            Rotation::Half => 180,
            Rotation::Ccw270 => 270,
        }
    }
}

/// Opaque credential; never rendered by `Debug` or `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_accepts_quarter_turns_only() {
        assert_eq!(Rotation::from_degrees(90), Some(Rotation::Ccw90));
        assert_eq!(Rotation::from_degrees(-90), Some(Rotation::Ccw270));
        assert_eq!(Rotation::from_degrees(450), Some(Rotation::Ccw90));
        assert_eq!(Rotation::from_degrees(45), None);
    }

    #[test]
    fn secret_debug_is_redacted() {
        let secret = Secret::new("abc123");
        assert_eq!(format!("{secret:?}"), "Secret(***)");
        assert!(!format!("{secret}").contains("abc"));
    }
}
