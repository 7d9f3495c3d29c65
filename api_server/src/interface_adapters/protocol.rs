use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::{LeaderboardEntry, ScoreRecord};

// Request payload for register and login. Missing fields fall through to validation.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

// Public user summary returned with a fresh token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryDto {
    pub username: String,
    pub best_score: u64,
}

// Response payload for register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummaryDto,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    pub username: String,
    pub best_score: u64,
    pub created_at: DateTime<Utc>,
}

// Response payload for the current-user lookup.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: ProfileDto,
}

// Response payload for logout.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub revoked: bool,
}

// Request payload for score submission. Kept loose so non-numeric scores map to 400.
#[derive(Debug, Deserialize)]
pub struct SubmitScoreRequest {
    #[serde(default)]
    pub score: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreResponse {
    pub ok: bool,
    pub best_score: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreItemDto {
    pub score: u64,
    pub created_at: DateTime<Utc>,
}

impl From<&ScoreRecord> for ScoreItemDto {
    fn from(record: &ScoreRecord) -> Self {
        Self {
            score: record.score,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MyScoresResponse {
    pub items: Vec<ScoreItemDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryDto {
    pub username: String,
    pub best_score: u64,
    pub recent: Vec<ScoreItemDto>,
}

impl From<&LeaderboardEntry> for LeaderboardEntryDto {
    fn from(entry: &LeaderboardEntry) -> Self {
        Self {
            username: entry.username.clone(),
            best_score: entry.best_score,
            recent: entry.recent.iter().map(ScoreItemDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub top: Vec<LeaderboardEntryDto>,
}

#[derive(Debug, Serialize)]
pub struct PlayerResponse {
    pub player: LeaderboardEntryDto,
}

// Raw limit is parsed by the use case so garbage falls back to the default.
#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    #[serde(default)]
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerQuery {
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

// Simple error envelope for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
