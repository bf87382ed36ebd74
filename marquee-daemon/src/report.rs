//! Turns cycle outcomes into log lines without flooding the journal
//! when the same failure repeats every few seconds.

use marquee_model::CycleOutcome;
use tracing::{Level, debug, info, warn};

#[derive(Debug, Default)]
pub struct OutcomeReporter {
    last_failure: Option<String>,
    failed_cycles: u32,
}

impl OutcomeReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs `outcome` and returns the level it was logged at.
    pub fn record(&mut self, outcome: &CycleOutcome) -> Level {
        if outcome.is_failure() {
            let message = outcome.to_string();
            self.failed_cycles = self.failed_cycles.saturating_add(1);
            let repeat = self.last_failure.as_deref() == Some(message.as_str());
            self.last_failure = Some(message);

            if repeat {
                debug!(failed_cycles = self.failed_cycles, "{outcome}");
                return Level::DEBUG;
            }
            warn!(failed_cycles = self.failed_cycles, "{outcome}");
            return Level::WARN;
        }

        let recovered = self.failed_cycles;
        self.failed_cycles = 0;
        self.last_failure = None;

        match outcome {
            CycleOutcome::Rendered(url) => {
                info!(url = %url, "now showing");
                Level::INFO
            }
            _ if recovered > 0 => {
                info!(failed_cycles = recovered, "recovered: {outcome}");
                Level::INFO
            }
            _ => {
                debug!("{outcome}");
                Level::DEBUG
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_model::{CycleStage, PosterUrl};

    #[test]
    fn repeated_failure_is_demoted() {
        let mut reporter = OutcomeReporter::new();
        let failure = CycleOutcome::failed(CycleStage::Tracking, "timed out");

        assert_eq!(reporter.record(&failure), Level::WARN);
        assert_eq!(reporter.record(&failure), Level::DEBUG);

        let other = CycleOutcome::failed(CycleStage::Metadata, "rate limited");
        assert_eq!(reporter.record(&other), Level::WARN);
    }

    #[test]
    fn recovery_is_announced_once() {
        let mut reporter = OutcomeReporter::new();
        reporter.record(&CycleOutcome::failed(CycleStage::Tracking, "timed out"));

        assert_eq!(reporter.record(&CycleOutcome::Idle), Level::INFO);
        assert_eq!(reporter.record(&CycleOutcome::Idle), Level::DEBUG);
    }

    #[test]
    fn render_is_info_and_unchanged_is_debug() {
        let mut reporter = OutcomeReporter::new();
        let url = PosterUrl::new("https://image.tmdb.org/t/p/original/x.jpg");

        assert_eq!(
            reporter.record(&CycleOutcome::Rendered(url.clone())),
            Level::INFO
        );
        assert_eq!(reporter.record(&CycleOutcome::Unchanged(url)), Level::DEBUG);
    }
}
