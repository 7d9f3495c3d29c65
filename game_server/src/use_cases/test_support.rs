use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::ports::{ReportError, ScoreReporter, SubmitOutcome};

// Score reporter fake that records every submission and answers from a fixed script.
#[derive(Clone)]
pub(crate) struct StubReporter {
    // Best score stored "server side" before the first submit; None makes every submit fail.
    best: Arc<Mutex<Option<u64>>>,
    failure: Option<ReportError>,
    calls: Arc<Mutex<Vec<(String, u64)>>>,
}

impl StubReporter {
    pub(crate) fn accepting(best_score: u64) -> Self {
        Self {
            best: Arc::new(Mutex::new(Some(best_score))),
            failure: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn failing(error: ReportError) -> Self {
        Self {
            best: Arc::new(Mutex::new(None)),
            failure: Some(error),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, u64)> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl ScoreReporter for StubReporter {
    async fn submit(&self, token: &str, score: u64) -> Result<SubmitOutcome, ReportError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((token.to_string(), score));

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let mut best = self.best.lock().expect("best lock");
        let ratcheted = best.unwrap_or_default().max(score);
        *best = Some(ratcheted);
        Ok(SubmitOutcome {
            accepted: true,
            best_score: ratcheted,
        })
    }
}
