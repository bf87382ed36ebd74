//! Poster lookup against the metadata service.

use async_trait::async_trait;
use marquee_config::TmdbConfig;
use marquee_model::{PosterRequest, PosterUrl};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::{
    error::{ClientBuildError, MetadataError},
    http::{build_client, endpoint, ensure_base},
};

/// Resolves artwork for a watched item.
///
/// `Ok(None)` means the service answered but has no poster for the item;
/// errors are reserved for the service being unreachable or unhappy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PosterSource: Send + Sync {
    async fn resolve(
        &self,
        request: &PosterRequest,
    ) -> Result<Option<PosterUrl>, MetadataError>;
}

pub struct TmdbPosterResolver {
    client: Client,
    api_key: String,
    base_url: Url,
    image_base: String,
    poster_size: String,
}

impl std::fmt::Debug for TmdbPosterResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbPosterResolver")
            .field("base_url", &self.base_url.as_str())
            .field("image_base", &self.image_base)
            .field("poster_size", &self.poster_size)
            .finish_non_exhaustive()
    }
}

impl TmdbPosterResolver {
    pub fn new(
        config: &TmdbConfig,
        request_timeout: Duration,
    ) -> Result<Self, ClientBuildError> {
        Self::with_client(config, build_client(request_timeout)?)
    }

    pub fn with_client(
        config: &TmdbConfig,
        client: Client,
    ) -> Result<Self, ClientBuildError> {
        ensure_base(&config.base_url, "tmdb_base_url")?;
        ensure_base(&config.image_base_url, "tmdb_image_base_url")?;
        Ok(Self {
            client,
            api_key: config.api_key.expose().to_string(),
            base_url: config.base_url.clone(),
            image_base: config.image_base_url.as_str().to_string(),
            poster_size: config.poster_size.clone(),
        })
    }

    /// Catalog endpoint for `request`, without the API key.
    pub fn catalog_url(&self, request: &PosterRequest) -> Url {
        endpoint(&self.base_url, request.catalog_segments())
    }

    pub fn poster_url(&self, poster_path: &str) -> PosterUrl {
        PosterUrl::from_parts(&self.image_base, &self.poster_size, poster_path)
    }
}

#[async_trait]
impl PosterSource for TmdbPosterResolver {
    async fn resolve(
        &self,
        request: &PosterRequest,
    ) -> Result<Option<PosterUrl>, MetadataError> {
        let url = self.catalog_url(request);
        debug!(%url, %request, "resolving poster");

        let response = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(MetadataError::Transport)?;

        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            StatusCode::UNAUTHORIZED => return Err(MetadataError::InvalidApiKey),
            StatusCode::TOO_MANY_REQUESTS => return Err(MetadataError::RateLimited),
            s if !s.is_success() => return Err(MetadataError::Status(s)),
            _ => {}
        }

        let body = response.bytes().await.map_err(MetadataError::Transport)?;
        Ok(parse_poster_path(&body)?.map(|path| self.poster_url(&path)))
    }
}

#[derive(Debug, Deserialize)]
struct TmdbArtwork {
    #[serde(default)]
    poster_path: Option<String>,
}

/// Pulls `poster_path` out of a movie, show or season details body.
/// Missing, `null` and empty values all mean "no poster".
pub fn parse_poster_path(body: &[u8]) -> Result<Option<String>, MetadataError> {
    let artwork: TmdbArtwork = serde_json::from_slice(body)?;
    Ok(artwork
        .poster_path
        .map(|path| path.trim().to_string())
        .filter(|path| !path.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_config::Secret;

    fn resolver() -> TmdbPosterResolver {
        let config = TmdbConfig {
            api_key: Secret::new("tmdb-key"),
            base_url: Url::parse("https://api.themoviedb.org/3").unwrap(),
            image_base_url: Url::parse("https://image.tmdb.org/t/p").unwrap(),
            poster_size: "original".to_string(),
        };
        TmdbPosterResolver::new(&config, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn movie_poster_url() {
        let resolver = resolver();
        let path = parse_poster_path(br#"{"id":603,"poster_path":"/x.jpg"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            resolver.poster_url(&path).as_str(),
            "https://image.tmdb.org/t/p/original/x.jpg"
        );
    }

    #[test]
    fn catalog_urls_follow_request_kind() {
        let resolver = resolver();
        assert_eq!(
            resolver.catalog_url(&PosterRequest::movie(603)).as_str(),
            "https://api.themoviedb.org/3/movie/603"
        );
        assert_eq!(
            resolver.catalog_url(&PosterRequest::season(1399, 2)).as_str(),
            "https://api.themoviedb.org/3/tv/1399/season/2"
        );
        assert_eq!(
            resolver.catalog_url(&PosterRequest::show(1399)).as_str(),
            "https://api.themoviedb.org/3/tv/1399"
        );
    }

    #[test]
    fn api_key_stays_out_of_debug_output() {
        let rendered = format!("{:?}", resolver());
        assert!(!rendered.contains("tmdb-key"));
    }

    #[test]
    fn absent_poster_path_is_none() {
        assert_eq!(parse_poster_path(br#"{"id":603}"#).unwrap(), None);
        assert_eq!(
            parse_poster_path(br#"{"poster_path":null}"#).unwrap(),
            None
        );
        assert_eq!(parse_poster_path(br#"{"poster_path":""}"#).unwrap(), None);
    }

    #[test]
    fn non_object_body_is_a_decode_error() {
        assert!(matches!(
            parse_poster_path(b"42"),
            Err(MetadataError::Decode(_))
        ));
    }
}
