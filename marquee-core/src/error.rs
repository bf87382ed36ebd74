use std::{path::PathBuf, process::ExitStatus, time::Duration};

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientBuildError {
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{field} cannot be used as a base URL: {url}")]
    BaseUrl { field: &'static str, url: String },

    #[error("'{field}' contains characters not allowed in an HTTP header")]
    InvalidHeader { field: &'static str },
}

#[derive(Error, Debug)]
pub enum TrackingError {
    #[error("tracking request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("tracking service rejected the client id")]
    InvalidApiKey,

    #[error("tracking service rate limited the request")]
    RateLimited,

    #[error("tracking service returned status {0}")]
    Status(StatusCode),

    #[error("unexpected watching payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("metadata request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("metadata service rejected the API key")]
    InvalidApiKey,

    #[error("metadata service rate limited the request")]
    RateLimited,

    #[error("metadata service returned status {0}")]
    Status(StatusCode),

    #[error("unexpected metadata payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("poster download failed: {0}")]
    Download(#[source] reqwest::Error),

    #[error("poster download returned status {0}")]
    DownloadStatus(StatusCode),

    #[error("poster is not a decodable image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image task panicked or was cancelled: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("failed to start viewer '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("viewer did not finish within {0:?}")]
    ViewerTimedOut(Duration),

    #[error("viewer exited with {status}: {stderr}")]
    ViewerFailed { status: ExitStatus, stderr: String },
}
