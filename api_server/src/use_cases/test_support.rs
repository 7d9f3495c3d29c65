use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::{NewScoreRecord, ScoreRecord, Session, User};
use crate::domain::password::hash_password;
use crate::domain::ports::{Clock, ScoreStore, SessionStore, UserStore};
use crate::interface_adapters::state::{
    InMemoryScoreStore, InMemorySessionStore, InMemoryUserStore,
};

// Shared fixed time source (epoch seconds) for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) u64);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        at(self.0 as i64)
    }
}

pub(crate) fn at(epoch_seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(epoch_seconds, 0).unwrap_or_default()
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub session_insert: bool,
    pub session_get: bool,
    pub session_remove: bool,
    pub session_purge: bool,
    pub user_insert: bool,
    // Covers id, username and leaderboard lookups.
    pub user_lookup: bool,
    pub best_raise: bool,
    pub score_append: bool,
    pub score_lookup: bool,
}

// Wraps the in-memory adapters with switchable failures and inspection helpers.
#[derive(Clone, Default)]
pub(crate) struct RecordingStore {
    sessions: InMemorySessionStore,
    users: InMemoryUserStore,
    scores: InMemoryScoreStore,
    failures: FailureFlags,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) async fn insert_test_session(&self, token: impl Into<String>, session: Session) {
        let mut guard = self.sessions.sessions.lock().await;
        guard.insert(token.into(), session);
    }

    pub(crate) async fn get_test_session(&self, token: &str) -> Option<Session> {
        let guard = self.sessions.sessions.lock().await;
        guard.get(token).cloned()
    }

    pub(crate) async fn session_count(&self) -> usize {
        self.sessions.sessions.lock().await.len()
    }

    pub(crate) async fn seed_user(&self, username: &str, best_score: u64) -> User {
        self.seed_user_with_password(username, "password", best_score)
            .await
    }

    pub(crate) async fn seed_user_with_password(
        &self,
        username: &str,
        password: &str,
        best_score: u64,
    ) -> User {
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: hash_password(password).expect("expected test hash"),
            best_score,
            created_at: at(1_600_000_000),
        };
        let mut guard = self.users.users.lock().await;
        guard.insert(user.id, user.clone());
        user
    }

    pub(crate) async fn user(&self, username: &str) -> Option<User> {
        let guard = self.users.users.lock().await;
        guard.values().find(|u| u.username == username).cloned()
    }

    pub(crate) async fn seed_score(&self, user: &User, score: u64, epoch_seconds: i64) -> ScoreRecord {
        self.scores
            .append(NewScoreRecord {
                user_id: user.id,
                username: user.username.clone(),
                score,
                created_at: at(epoch_seconds),
            })
            .await
            .expect("in-memory append cannot fail")
    }

    // All score records in insertion order.
    pub(crate) async fn score_records(&self) -> Vec<ScoreRecord> {
        let guard = self.scores.table.lock().await;
        guard.records.clone()
    }
}

#[async_trait]
impl SessionStore for RecordingStore {
    async fn insert(&self, token: String, session: Session) -> Result<(), String> {
        if self.failures.session_insert {
            return Err("session insert failed".to_string());
        }
        self.sessions.insert(token, session).await
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, String> {
        if self.failures.session_get {
            return Err("session get failed".to_string());
        }
        self.sessions.get(token).await
    }

    async fn remove(&self, token: &str) -> Result<bool, String> {
        if self.failures.session_remove {
            return Err("session remove failed".to_string());
        }
        self.sessions.remove(token).await
    }

    async fn purge_expired(&self, now: u64) -> Result<usize, String> {
        if self.failures.session_purge {
            return Err("session purge failed".to_string());
        }
        self.sessions.purge_expired(now).await
    }
}

#[async_trait]
impl UserStore for RecordingStore {
    async fn insert(&self, user: User) -> Result<bool, String> {
        if self.failures.user_insert {
            return Err("user insert failed".to_string());
        }
        self.users.insert(user).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, String> {
        if self.failures.user_lookup {
            return Err("user lookup failed".to_string());
        }
        self.users.find_by_id(id).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, String> {
        if self.failures.user_lookup {
            return Err("user lookup failed".to_string());
        }
        self.users.find_by_username(username).await
    }

    async fn raise_best_score(&self, id: Uuid, score: u64) -> Result<Option<u64>, String> {
        if self.failures.best_raise {
            return Err("best score update failed".to_string());
        }
        self.users.raise_best_score(id, score).await
    }

    async fn top_by_best_score(&self, limit: usize) -> Result<Vec<User>, String> {
        if self.failures.user_lookup {
            return Err("user lookup failed".to_string());
        }
        self.users.top_by_best_score(limit).await
    }
}

#[async_trait]
impl ScoreStore for RecordingStore {
    async fn append(&self, record: NewScoreRecord) -> Result<ScoreRecord, String> {
        if self.failures.score_append {
            return Err("score append failed".to_string());
        }
        self.scores.append(record).await
    }

    async fn recent_for_user(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ScoreRecord>, String> {
        if self.failures.score_lookup {
            return Err("score lookup failed".to_string());
        }
        self.scores.recent_for_user(user_id, limit).await
    }
}
