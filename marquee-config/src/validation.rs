use std::path::Path;

use thiserror::Error;

use super::{
    constants::{MAX_DURATION_SECS, MIN_RECOMMENDED_POLL_SECS, OUTPUT_EXTENSIONS},
    models::Config,
};

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("config key '{field}' must not be blank")]
    BlankField { field: &'static str },
    #[error("rotation must be a multiple of 90 degrees, got {degrees}")]
    InvalidRotation { degrees: i32 },
    #[error("viewer_command must name a program")]
    EmptyViewerCommand,
    #[error("'{field}' must be greater than zero")]
    ZeroDuration { field: &'static str },
    #[error("'{field}' must be at most {max_secs}s")]
    DurationTooLong { field: &'static str, max_secs: u64 },
    #[error("'{field}' must be an absolute http(s) URL")]
    UnsupportedUrl { field: &'static str },
    #[error("poster_size '{size}' is not a valid path segment")]
    InvalidPosterSize { size: String },
    #[error("output_path must name a file")]
    InvalidOutputPath,
    #[error("output_path must end in one of: {}", OUTPUT_EXTENSIONS.join(", "))]
    UnsupportedImageFormat,
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if config.trakt.client_id.is_blank() {
        return Err(ConfigGuardRailError::BlankField { field: "client_id" });
    }
    if config.tmdb.api_key.is_blank() {
        return Err(ConfigGuardRailError::BlankField {
            field: "tmdb_api_key",
        });
    }
    if config.trakt.username.is_empty() {
        return Err(ConfigGuardRailError::BlankField {
            field: "trakt_username",
        });
    }

    let size = config.tmdb.poster_size.as_str();
    if size.is_empty() || size.contains('/') || size.contains(char::is_whitespace)
    {
        return Err(ConfigGuardRailError::InvalidPosterSize {
            size: size.to_string(),
        });
    }

    match config.display.viewer_command.first() {
        Some(program) if !program.trim().is_empty() => {}
        _ => return Err(ConfigGuardRailError::EmptyViewerCommand),
    }
    let output = &config.display.output_path;
    if output.file_name().is_none() {
        return Err(ConfigGuardRailError::InvalidOutputPath);
    }
    if !has_image_extension(output) {
        return Err(ConfigGuardRailError::UnsupportedImageFormat);
    }

    for (field, value) in [
        ("poll_interval", config.polling.interval),
        ("request_timeout", config.polling.request_timeout),
        ("viewer_timeout", config.display.viewer_timeout),
    ] {
        if value.is_zero() {
            return Err(ConfigGuardRailError::ZeroDuration { field });
        }
        if value.as_secs() > MAX_DURATION_SECS {
            return Err(ConfigGuardRailError::DurationTooLong {
                field,
                max_secs: MAX_DURATION_SECS,
            });
        }
    }

    if config.polling.interval.as_secs() < MIN_RECOMMENDED_POLL_SECS {
        warnings.push_with_hint(
            format!(
                "poll_interval of {:?} is shorter than {}s",
                config.polling.interval, MIN_RECOMMENDED_POLL_SECS
            ),
            "Trakt rate-limits /users/{name}/watching per client id; the default 5s stays well clear",
        );
    }

    let stall_limit = config.polling.interval.checked_mul(4);
    if stall_limit.is_some_and(|limit| config.polling.request_timeout >= limit) {
        warnings.push_with_hint(
            format!(
                "request_timeout of {:?} allows a single stalled call to skip several poll cycles",
                config.polling.request_timeout
            ),
            "A hung Trakt or TMDB call holds the poster on screen until it times out",
        );
    }

    if !is_scratch_location(&config.display.output_path) {
        warnings.push_with_hint(
            format!(
                "output_path {} is outside a temporary directory and is overwritten on every render",
                config.display.output_path.display()
            ),
            "fbi only needs the file while it draws; /tmp or /run spares the SD card a write per poster change",
        );
    }

    Ok(warnings)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            OUTPUT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

fn is_scratch_location(path: &Path) -> bool {
    let temp = std::env::temp_dir();
    path.starts_with(&temp)
        || ["/tmp", "/run", "/dev/shm", "/var/tmp"]
            .iter()
            .any(|root| path.starts_with(root))
}
