use crate::PosterRequest;

/// What the tracking service reports the user is watching right now.
///
/// Identifiers are optional because the tracker happily reports items it
/// cannot cross-reference; those still count as "something is playing"
/// but cannot be resolved to a poster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchStatus {
    /// Nothing is playing
    Idle,
    Movie {
        tmdb_id: Option<u64>,
    },
    Episode {
        show_tmdb_id: Option<u64>,
        season: Option<u32>,
    },
    /// Playing something the daemon has no poster mapping for
    Unsupported {
        kind: String,
    },
}

impl WatchStatus {
    /// Poster lookup for this item, if it carries enough identity.
    ///
    /// Episodes are looked up by their season artwork. Season `0`
    /// (specials) and a missing season yield no request.
    pub fn poster_request(&self) -> Option<PosterRequest> {
        match self {
            WatchStatus::Movie { tmdb_id: Some(id) } => {
                Some(PosterRequest::movie(*id))
            }
            WatchStatus::Episode {
                show_tmdb_id: Some(id),
                season: Some(season),
            } if *season > 0 => Some(PosterRequest::season(*id, *season)),
            _ => None,
        }
    }
}
