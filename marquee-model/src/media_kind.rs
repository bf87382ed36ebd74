use std::fmt::{Display, Formatter};

/// Catalog kind used when asking the metadata service for artwork
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Feature film
    Movie,
    /// Television show (optionally narrowed to a season)
    Show,
}

impl MediaKind {
    /// Path segment the metadata service uses for this kind.
    pub fn path_segment(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Show => "tv",
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "Movie"),
            MediaKind::Show => write!(f, "Show"),
        }
    }
}
