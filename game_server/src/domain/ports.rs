use async_trait::async_trait;
use std::fmt;

// Result of handing a final score to the score service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub accepted: bool,
    pub best_score: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    Unauthorized,
    InvalidScore,
    Unavailable,
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Unauthorized => write!(f, "Session expired, log in again to save scores"),
            ReportError::InvalidScore => write!(f, "Score was rejected"),
            ReportError::Unavailable => write!(f, "Score service unavailable"),
        }
    }
}

// Player identity resolved from a bearer token at join time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    pub username: String,
    pub best_score: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    Unauthorized,
    Unavailable,
}

// Port for persisting a finished round's score.
#[async_trait]
pub trait ScoreReporter: Send + Sync {
    async fn submit(&self, token: &str, score: u64) -> Result<SubmitOutcome, ReportError>;
}

// Port for resolving who is playing.
#[async_trait]
pub trait PlayerDirectory: Send + Sync {
    async fn profile(&self, token: &str) -> Result<PlayerProfile, LookupError>;
}

// Shared handles are trait objects behind Arc; let use cases take them as-is.
#[async_trait]
impl<T: ScoreReporter + ?Sized> ScoreReporter for std::sync::Arc<T> {
    async fn submit(&self, token: &str, score: u64) -> Result<SubmitOutcome, ReportError> {
        (**self).submit(token, score).await
    }
}

#[async_trait]
impl<T: PlayerDirectory + ?Sized> PlayerDirectory for std::sync::Arc<T> {
    async fn profile(&self, token: &str) -> Result<PlayerProfile, LookupError> {
        (**self).profile(token).await
    }
}
