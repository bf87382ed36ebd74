//! Defaults applied when the config file leaves a key out.

pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const CONFIG_PATH_ENV: &str = "MARQUEE_CONFIG";

pub const DEFAULT_TRAKT_BASE_URL: &str = "https://api.trakt.tv";
pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_POSTER_SIZE: &str = "original";

pub const DEFAULT_POLL_INTERVAL: &str = "5s";
pub const DEFAULT_REQUEST_TIMEOUT: &str = "10s";
pub const DEFAULT_VIEWER_TIMEOUT: &str = "30s";

pub const DEFAULT_ROTATION_DEGREES: u16 = 90;
pub const DEFAULT_OUTPUT_PATH: &str = "/tmp/current_poster.png";
pub const DEFAULT_VIEWER_COMMAND: &[&str] =
    &["sudo", "fbi", "-T", "1", "-d", "/dev/fb0", "-a", "-noverbose"];

/// Below this the tracker's per-user rate limit starts to bite.
pub const MIN_RECOMMENDED_POLL_SECS: u64 = 2;

/// Upper bound for every configured duration.
pub const MAX_DURATION_SECS: u64 = 24 * 60 * 60;

/// Extensions the renderer can encode and the viewer can show.
pub const OUTPUT_EXTENSIONS: &[&str] =
    &["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff"];
