use crate::domain::entities::{LeaderboardEntry, User};
use crate::domain::errors::ScoreError;
use crate::domain::ports::{ScoreStore, UserStore};

pub const DEFAULT_LIMIT: usize = 20;
pub const MIN_LIMIT: usize = 1;
pub const MAX_LIMIT: usize = 50;
pub const RECENT_GAMES: usize = 3;

// Leaderboard reads: top users by best score, optionally with their latest games.
pub struct LeaderboardUseCase<U, S> {
    pub users: U,
    pub scores: S,
}

impl<U, S> LeaderboardUseCase<U, S>
where
    U: UserStore,
    S: ScoreStore,
{
    // Top users, each annotated with up to three most recent games.
    pub async fn top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ScoreError> {
        let users = self.top_users(limit).await?;

        let mut entries = Vec::with_capacity(users.len());
        for user in users {
            entries.push(self.with_recent(user).await?);
        }
        Ok(entries)
    }

    // Top users without recent games (the XML leaderboard shape).
    pub async fn top_summary(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ScoreError> {
        let users = self.top_users(limit).await?;

        Ok(users
            .into_iter()
            .map(|user| LeaderboardEntry {
                username: user.username,
                best_score: user.best_score,
                recent: Vec::new(),
            })
            .collect())
    }

    // Detail view for a single player.
    pub async fn player(&self, username: &str) -> Result<LeaderboardEntry, ScoreError> {
        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(|_| ScoreError::StorageFailure)?
            .ok_or(ScoreError::UnknownPlayer)?;

        self.with_recent(user).await
    }

    async fn top_users(&self, limit: usize) -> Result<Vec<User>, ScoreError> {
        self.users
            .top_by_best_score(limit.clamp(MIN_LIMIT, MAX_LIMIT))
            .await
            .map_err(|_| ScoreError::StorageFailure)
    }

    async fn with_recent(&self, user: User) -> Result<LeaderboardEntry, ScoreError> {
        let recent = self
            .scores
            .recent_for_user(user.id, RECENT_GAMES)
            .await
            .map_err(|_| ScoreError::StorageFailure)?;

        Ok(LeaderboardEntry {
            username: user.username,
            best_score: user.best_score,
            recent,
        })
    }
}

// Absent or unparsable limits fall back to the default; numbers are clamped to [1, 50].
pub fn parse_limit(raw: Option<&str>) -> usize {
    let Some(value) = raw
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .and_then(|text| text.parse::<f64>().ok())
        .filter(|value| !value.is_nan())
    else {
        return DEFAULT_LIMIT;
    };

    value.clamp(MIN_LIMIT as f64, MAX_LIMIT as f64).floor() as usize
}
