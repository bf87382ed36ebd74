//! Tracking-service client: "what is this user watching right now?"

use async_trait::async_trait;
use marquee_config::TraktConfig;
use marquee_model::WatchStatus;
use reqwest::{
    Client, StatusCode,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::{
    error::{ClientBuildError, TrackingError},
    http::{build_client, endpoint, ensure_base},
};

const API_VERSION: &str = "2";

/// Source of the current watch status.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WatchSource: Send + Sync {
    async fn currently_watching(&self) -> Result<WatchStatus, TrackingError>;
}

pub struct TraktClient {
    client: Client,
    watching_url: Url,
    headers: HeaderMap,
}

impl std::fmt::Debug for TraktClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraktClient")
            .field("watching_url", &self.watching_url.as_str())
            .finish_non_exhaustive()
    }
}

impl TraktClient {
    pub fn new(
        config: &TraktConfig,
        request_timeout: Duration,
    ) -> Result<Self, ClientBuildError> {
        Self::with_client(config, build_client(request_timeout)?)
    }

    /// Uses a caller-supplied HTTP client; timeouts are the caller's job.
    pub fn with_client(
        config: &TraktConfig,
        client: Client,
    ) -> Result<Self, ClientBuildError> {
        ensure_base(&config.base_url, "trakt_base_url")?;
        Ok(Self {
            client,
            watching_url: endpoint(
                &config.base_url,
                ["users", config.username.as_str(), "watching"],
            ),
            headers: trakt_headers(config.client_id.expose())?,
        })
    }
}

fn trakt_headers(client_id: &str) -> Result<HeaderMap, ClientBuildError> {
    let mut key = HeaderValue::from_str(client_id)
        .map_err(|_| ClientBuildError::InvalidHeader { field: "client_id" })?;
    key.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert("trakt-api-version", HeaderValue::from_static(API_VERSION));
    headers.insert("trakt-api-key", key);
    Ok(headers)
}

#[async_trait]
impl WatchSource for TraktClient {
    async fn currently_watching(&self) -> Result<WatchStatus, TrackingError> {
        let response = self
            .client
            .get(self.watching_url.clone())
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(TrackingError::Transport)?;

        let status = response.status();
        debug!(%status, "tracking service responded");
        match status {
            StatusCode::NO_CONTENT => return Ok(WatchStatus::Idle),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(TrackingError::InvalidApiKey);
            }
            StatusCode::TOO_MANY_REQUESTS => return Err(TrackingError::RateLimited),
            s if !s.is_success() => return Err(TrackingError::Status(s)),
            _ => {}
        }

        let body = response.bytes().await.map_err(TrackingError::Transport)?;
        parse_watching(&body)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TraktWatching {
    #[serde(rename = "type")]
    kind: Option<String>,
    movie: Option<TraktMedia>,
    show: Option<TraktMedia>,
    episode: Option<TraktEpisode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TraktMedia {
    ids: TraktIds,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TraktIds {
    tmdb: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TraktEpisode {
    season: Option<u32>,
}

/// Decodes a `/users/{id}/watching` body. An empty body, `null` or an
/// object without a `type` all mean nothing is playing.
pub fn parse_watching(body: &[u8]) -> Result<WatchStatus, TrackingError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(WatchStatus::Idle);
    }

    let Some(watching) = serde_json::from_slice::<Option<TraktWatching>>(body)?
    else {
        return Ok(WatchStatus::Idle);
    };

    let status = match watching.kind.as_deref() {
        None => WatchStatus::Idle,
        Some("movie") => WatchStatus::Movie {
            tmdb_id: watching.movie.and_then(|m| m.ids.tmdb),
        },
        Some("episode") => WatchStatus::Episode {
            show_tmdb_id: watching.show.and_then(|s| s.ids.tmdb),
            season: watching.episode.and_then(|e| e.season),
        },
        Some(other) => WatchStatus::Unsupported {
            kind: other.to_string(),
        },
    };
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_config::Secret;

    fn trakt_config(client_id: &str) -> TraktConfig {
        TraktConfig {
            client_id: Secret::new(client_id),
            username: "someone".to_string(),
            base_url: Url::parse("https://api.trakt.tv").unwrap(),
        }
    }

    #[test]
    fn client_id_is_sent_as_a_sensitive_header() {
        let headers = trakt_headers("trakt-client").unwrap();
        let key = headers.get("trakt-api-key").expect("api key header");
        assert_eq!(key, "trakt-client");
        assert!(key.is_sensitive());
        assert_eq!(headers.get("trakt-api-version").unwrap(), API_VERSION);
    }

    #[test]
    fn client_id_that_cannot_be_a_header_fails_construction() {
        let err = TraktClient::with_client(&trakt_config("abc\n"), Client::new())
            .unwrap_err();
        assert!(matches!(
            err,
            ClientBuildError::InvalidHeader { field: "client_id" }
        ));
    }

    #[test]
    fn movie_payload() {
        let body = br#"{"type":"movie","movie":{"ids":{"tmdb":603}}}"#;
        assert_eq!(
            parse_watching(body).unwrap(),
            WatchStatus::Movie { tmdb_id: Some(603) }
        );
    }

    #[test]
    fn episode_payload() {
        let body = br#"{"type":"episode","episode":{"season":2},"show":{"ids":{"tmdb":1399}}}"#;
        assert_eq!(
            parse_watching(body).unwrap(),
            WatchStatus::Episode {
                show_tmdb_id: Some(1399),
                season: Some(2)
            }
        );
    }

    #[test]
    fn full_payload_with_extra_fields() {
        let body = br#"{
            "expires_at": "2014-10-23T08:36:02.000Z",
            "started_at": "2014-10-23T06:44:02.000Z",
            "action": "scrobble",
            "type": "episode",
            "episode": {
                "season": 2,
                "number": 10,
                "title": "Fire and Blood",
                "ids": {"trakt": 73482, "tvdb": 4085758, "tmdb": 63062}
            },
            "show": {
                "title": "Game of Thrones",
                "year": 2011,
                "ids": {"trakt": 1390, "slug": "game-of-thrones", "tmdb": 1399, "imdb": "tt0944947"}
            }
        }"#;
        assert_eq!(
            parse_watching(body).unwrap(),
            WatchStatus::Episode {
                show_tmdb_id: Some(1399),
                season: Some(2)
            }
        );
    }

    #[test]
    fn null_tmdb_id_is_unidentified_not_an_error() {
        let body = br#"{"type":"movie","movie":{"ids":{"tmdb":null,"trakt":1}}}"#;
        assert_eq!(
            parse_watching(body).unwrap(),
            WatchStatus::Movie { tmdb_id: None }
        );
    }

    #[test]
    fn empty_and_null_bodies_are_idle() {
        assert_eq!(parse_watching(b"").unwrap(), WatchStatus::Idle);
        assert_eq!(parse_watching(b" \n").unwrap(), WatchStatus::Idle);
        assert_eq!(parse_watching(b"null").unwrap(), WatchStatus::Idle);
        assert_eq!(parse_watching(b"{}").unwrap(), WatchStatus::Idle);
    }

    #[test]
    fn other_types_are_unsupported() {
        let body = br#"{"type":"show"}"#;
        assert_eq!(
            parse_watching(body).unwrap(),
            WatchStatus::Unsupported {
                kind: "show".to_string()
            }
        );
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(matches!(
            parse_watching(b"<html>"),
            Err(TrackingError::Decode(_))
        ));
    }
}
