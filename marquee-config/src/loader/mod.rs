pub mod error;

use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
    time::Duration,
};

use tracing::debug;
use url::Url;

use crate::{
    constants::*,
    models::{
        Config, DisplayConfig, PollingConfig, Rotation, Secret, TmdbConfig,
        TraktConfig, sources::FileConfig,
    },
    validation::{ConfigGuardRailError, ConfigWarnings, apply_guard_rails},
};
use error::ConfigLoadError;

/// On-disk syntax of the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// `.toml` selects TOML; every other extension is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Effective configuration plus non-fatal findings.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let contents =
            read_to_string(&self.path).map_err(|source| ConfigLoadError::Read {
                path: self.path.clone(),
                source,
            })?;
        let format = ConfigFormat::from_path(&self.path);
        debug!(path = %self.path.display(), ?format, "loading config file");

        let file = parse_file(&contents, format, &self.path)?;
        compose(file)
    }
}

/// Parses config text that did not come from a file.
pub fn load_from_str(
    contents: &str,
    format: ConfigFormat,
) -> Result<ConfigLoad, ConfigLoadError> {
    let file = parse_file(contents, format, Path::new("<inline>"))?;
    compose(file)
}

fn parse_file(
    contents: &str,
    format: ConfigFormat,
    path: &Path,
) -> Result<FileConfig, ConfigLoadError> {
    match format {
        ConfigFormat::Json => {
            serde_json::from_str(contents).map_err(|source| ConfigLoadError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
        ConfigFormat::Toml => {
            toml::from_str(contents).map_err(|source| ConfigLoadError::Toml {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

fn compose(file: FileConfig) -> Result<ConfigLoad, ConfigLoadError> {
    let client_id = required(file.client_id, "client_id")?;
    let api_key = required(file.tmdb_api_key, "tmdb_api_key")?;
    let username = required(file.trakt_username, "trakt_username")?;

    let degrees = file.rotation.unwrap_or(i32::from(DEFAULT_ROTATION_DEGREES));
    let rotation = Rotation::from_degrees(degrees)
        .ok_or(ConfigGuardRailError::InvalidRotation { degrees })?;

    let config = Config {
        trakt: TraktConfig {
            client_id: Secret::new(client_id.trim()),
            username: username.trim().to_string(),
            base_url: base_url(
                file.trakt_base_url.as_deref(),
                DEFAULT_TRAKT_BASE_URL,
                "trakt_base_url",
            )?,
        },
        tmdb: TmdbConfig {
            api_key: Secret::new(api_key.trim()),
            base_url: base_url(
                file.tmdb_base_url.as_deref(),
                DEFAULT_TMDB_BASE_URL,
                "tmdb_base_url",
            )?,
            image_base_url: base_url(
                file.tmdb_image_base_url.as_deref(),
                DEFAULT_TMDB_IMAGE_BASE_URL,
                "tmdb_image_base_url",
            )?,
            poster_size: file
                .poster_size
                .unwrap_or_else(|| DEFAULT_POSTER_SIZE.to_string()),
        },
        display: DisplayConfig {
            output_path: file
                .output_path
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
            rotation,
            viewer_command: file.viewer_command.unwrap_or_else(|| {
                DEFAULT_VIEWER_COMMAND.iter().map(|s| s.to_string()).collect()
            }),
            viewer_timeout: duration(
                file.viewer_timeout.as_deref(),
                DEFAULT_VIEWER_TIMEOUT,
                "viewer_timeout",
            )?,
        },
        polling: PollingConfig {
            interval: duration(
                file.poll_interval.as_deref(),
                DEFAULT_POLL_INTERVAL,
                "poll_interval",
            )?,
            request_timeout: duration(
                file.request_timeout.as_deref(),
                DEFAULT_REQUEST_TIMEOUT,
                "request_timeout",
            )?,
        },
    };

    let warnings = apply_guard_rails(&config)?;
    Ok(ConfigLoad { config, warnings })
}

fn required(
    value: Option<String>,
    field: &'static str,
) -> Result<String, ConfigLoadError> {
    value.ok_or(ConfigLoadError::MissingField { field })
}

fn duration(
    value: Option<&str>,
    default: &str,
    field: &'static str,
) -> Result<Duration, ConfigLoadError> {
    let raw = value.unwrap_or(default).trim();
    humantime::parse_duration(raw).map_err(|source| {
        ConfigLoadError::InvalidDuration {
            field,
            value: raw.to_string(),
            source,
        }
    })
}

fn base_url(
    value: Option<&str>,
    default: &str,
    field: &'static str,
) -> Result<Url, ConfigLoadError> {
    let raw = value.unwrap_or(default).trim();
    let url = Url::parse(raw)
        .map_err(|source| ConfigLoadError::InvalidUrl { field, source })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigGuardRailError::UnsupportedUrl { field }.into());
    }
    Ok(url)
}
