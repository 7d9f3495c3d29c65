use chrono::{DateTime, Utc};
use uuid::Uuid;

// Registered player account; best_score only ever goes up.
#[derive(Clone, Debug)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub best_score: u64,
    pub created_at: DateTime<Utc>,
}

// Append-only record of one finished game.
#[derive(Clone, Debug)]
pub struct ScoreRecord {
    pub id: i64,
    pub user_id: Uuid,
    pub username: String,
    pub score: u64,
    pub created_at: DateTime<Utc>,
}

// Score record before the store assigns its sequence id.
#[derive(Clone, Debug)]
pub struct NewScoreRecord {
    pub user_id: Uuid,
    pub username: String,
    pub score: u64,
    pub created_at: DateTime<Utc>,
}

// Bearer session record keyed by its opaque token.
#[derive(Clone, Debug)]
pub struct Session {
    pub user_id: Uuid,
    pub username: String,
    pub session_id: String,
    pub expires_at: u64,
}

// One leaderboard row, optionally annotated with the player's latest games.
#[derive(Clone, Debug)]
pub struct LeaderboardEntry {
    pub username: String,
    pub best_score: u64,
    pub recent: Vec<ScoreRecord>,
}
