use std::fmt::{self, Display};

use crate::MediaKind;

/// Identity of the artwork to look up on the metadata service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PosterRequest {
    pub kind: MediaKind,
    pub tmdb_id: u64,
    /// Only meaningful for shows; narrows the lookup to season artwork.
    pub season: Option<u32>,
}

impl PosterRequest {
    pub fn movie(tmdb_id: u64) -> Self {
        Self {
            kind: MediaKind::Movie,
            tmdb_id,
            season: None,
        }
    }

    pub fn show(tmdb_id: u64) -> Self {
        Self {
            kind: MediaKind::Show,
            tmdb_id,
            season: None,
        }
    }

    pub fn season(show_tmdb_id: u64, season: u32) -> Self {
        Self {
            kind: MediaKind::Show,
            tmdb_id: show_tmdb_id,
            season: Some(season),
        }
    }

    /// Catalog path segments relative to the metadata API root, e.g.
    /// `["movie", "603"]` or `["tv", "1399", "season", "2"]`.
    pub fn catalog_segments(&self) -> Vec<String> {
        let mut segments =
            vec![self.kind.path_segment().to_string(), self.tmdb_id.to_string()];
        if let (MediaKind::Show, Some(season)) = (self.kind, self.season) {
            segments.push("season".to_string());
            segments.push(season.to_string());
        }
        segments
    }

    pub fn catalog_path(&self) -> String {
        self.catalog_segments().join("/")
    }
}

impl Display for PosterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.season {
            Some(season) if self.kind == MediaKind::Show => {
                write!(f, "{} {} season {}", self.kind, self.tmdb_id, season)
            }
            _ => write!(f, "{} {}", self.kind, self.tmdb_id),
        }
    }
}

/// Fully qualified poster image URL.
///
/// Equality is exact string equality; the render guard relies on it and
/// no normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PosterUrl(String);

impl PosterUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Joins an image base (e.g. `https://image.tmdb.org/t/p`), a size
    /// bucket (e.g. `original`) and a provider poster path (`/x.jpg`).
    pub fn from_parts(base: &str, size: &str, poster_path: &str) -> Self {
        let base = base.trim_end_matches('/');
        let size = size.trim_matches('/');
        let path = poster_path.trim_start_matches('/');
        Self(format!("{base}/{size}/{path}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PosterUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PosterUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
