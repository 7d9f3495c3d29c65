use crate::domain::GameTuning;
use crate::domain::ports::{PlayerDirectory, ScoreReporter};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct AppState {
    // Resolves the bearer token sent in Join.
    pub directory: Arc<dyn PlayerDirectory>,
    // Persists final scores.
    pub reporter: Arc<dyn ScoreReporter>,
    // Gameplay constants for every new session.
    pub tuning: GameTuning,
    next_conn_id: AtomicU64,
}

impl AppState {
    pub fn new(
        directory: Arc<dyn PlayerDirectory>,
        reporter: Arc<dyn ScoreReporter>,
        tuning: GameTuning,
    ) -> Self {
        Self {
            directory,
            reporter,
            tuning,
            next_conn_id: AtomicU64::new(1),
        }
    }

    // Process-unique id for correlating connection logs.
    pub fn next_conn_id(&self) -> u64 {
        self.next_conn_id.fetch_add(1, Ordering::Relaxed)
    }
}
