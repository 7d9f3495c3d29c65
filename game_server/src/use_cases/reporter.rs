use tracing::{info, warn};

use super::types::SessionUpdate;
use crate::domain::ports::{ReportError, ScoreReporter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Saved { best_score: u64 },
    Failed { message: String },
}

impl ReportOutcome {
    pub fn into_updates(self) -> Vec<SessionUpdate> {
        match self {
            ReportOutcome::Saved { best_score } => vec![
                SessionUpdate::ScoreSaved { best_score },
                SessionUpdate::RefreshRecentGames,
            ],
            ReportOutcome::Failed { message } => vec![SessionUpdate::ScoreFailed { message }],
        }
    }
}

// Submits one final score. Fires once; failures are reported, never retried.
pub struct ReportScoreUseCase<P> {
    pub reporter: P,
}

impl<P> ReportScoreUseCase<P>
where
    P: ScoreReporter,
{
    pub async fn execute(&self, token: &str, score: u64) -> ReportOutcome {
        match self.reporter.submit(token, score).await {
            Ok(outcome) if outcome.accepted => {
                info!(score, best_score = outcome.best_score, "score saved");
                ReportOutcome::Saved {
                    best_score: outcome.best_score,
                }
            }
            Ok(_) => {
                warn!(score, "score not accepted");
                ReportOutcome::Failed {
                    message: ReportError::InvalidScore.to_string(),
                }
            }
            Err(err) => {
                warn!(score, error = ?err, "score submission failed");
                ReportOutcome::Failed {
                    message: err.to_string(),
                }
            }
        }
    }
}
