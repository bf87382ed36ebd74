//! A single poll cycle and the one piece of state that survives it.

use marquee_config::Config;
use marquee_model::{CycleOutcome, CycleStage, PosterUrl, WatchStatus};
use tracing::debug;

use crate::{
    error::ClientBuildError,
    metadata::{PosterSource, TmdbPosterResolver},
    render::{FramebufferRenderer, PosterRenderer},
    tracking::{TraktClient, WatchSource},
};

/// Drives watch lookup, poster resolution and rendering.
///
/// Remembers the last poster that made it to the screen so an unchanged
/// item is not re-downloaded. A failed render leaves that memory alone,
/// which means the same poster is attempted again next cycle.
pub struct PollSession {
    watch: Box<dyn WatchSource>,
    posters: Box<dyn PosterSource>,
    renderer: Box<dyn PosterRenderer>,
    last_rendered: Option<PosterUrl>,
}

impl std::fmt::Debug for PollSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollSession")
            .field("last_rendered", &self.last_rendered)
            .finish_non_exhaustive()
    }
}

impl PollSession {
    pub fn new(
        watch: Box<dyn WatchSource>,
        posters: Box<dyn PosterSource>,
        renderer: Box<dyn PosterRenderer>,
    ) -> Self {
        Self {
            watch,
            posters,
            renderer,
            last_rendered: None,
        }
    }

    /// Wires the production clients from configuration.
    pub fn from_config(config: &Config) -> Result<Self, ClientBuildError> {
        let timeout = config.polling.request_timeout;
        Ok(Self::new(
            Box::new(TraktClient::new(&config.trakt, timeout)?),
            Box::new(TmdbPosterResolver::new(&config.tmdb, timeout)?),
            Box::new(FramebufferRenderer::new(config.display.clone(), timeout)?),
        ))
    }

    pub fn last_rendered(&self) -> Option<&PosterUrl> {
        self.last_rendered.as_ref()
    }

    /// Runs one full cycle. Never fails; problems come back as
    /// [`CycleOutcome::Failed`].
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let status = match self.watch.currently_watching().await {
            Ok(status) => status,
            Err(err) => return CycleOutcome::failed(CycleStage::Tracking, err),
        };
        debug!(?status, "watch status");

        let request = match (&status, status.poster_request()) {
            (WatchStatus::Idle, _) => return CycleOutcome::Idle,
            (WatchStatus::Unsupported { kind }, _) => {
                return CycleOutcome::Unsupported { kind: kind.clone() };
            }
            (_, None) => return CycleOutcome::Unidentified,
            (_, Some(request)) => request,
        };

        let poster = match self.posters.resolve(&request).await {
            Ok(Some(poster)) => poster,
            Ok(None) => return CycleOutcome::NoPoster,
            Err(err) => return CycleOutcome::failed(CycleStage::Metadata, err),
        };

        self.show(poster).await
    }

    /// Renders `poster` unless it is already on screen.
    pub async fn show(&mut self, poster: PosterUrl) -> CycleOutcome {
        if self.last_rendered.as_ref() == Some(&poster) {
            return CycleOutcome::Unchanged(poster);
        }

        match self.renderer.render(&poster).await {
            Ok(()) => {
                self.last_rendered = Some(poster.clone());
                CycleOutcome::Rendered(poster)
            }
            Err(err) => CycleOutcome::failed(CycleStage::Render, err),
        }
    }
}
