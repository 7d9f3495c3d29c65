use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{NewScoreRecord, ScoreRecord, Session, User};

// Port for session storage used by token use cases.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, token: String, session: Session) -> Result<(), String>;
    async fn get(&self, token: &str) -> Result<Option<Session>, String>;
    async fn remove(&self, token: &str) -> Result<bool, String>;
    // Drops every session with `expires_at <= now`; returns how many were dropped.
    async fn purge_expired(&self, now: u64) -> Result<usize, String>;
}

// Port for user accounts and their best-score ratchet.
#[async_trait]
pub trait UserStore: Send + Sync {
    // Returns false when the username is already taken.
    async fn insert(&self, user: User) -> Result<bool, String>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, String>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, String>;
    // Raises best_score to `score` only when it is greater; returns the resulting best.
    async fn raise_best_score(&self, id: Uuid, score: u64) -> Result<Option<u64>, String>;
    // Ordered by best_score descending, then username ascending.
    async fn top_by_best_score(&self, limit: usize) -> Result<Vec<User>, String>;
}

// Port for the append-only score history.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn append(&self, record: NewScoreRecord) -> Result<ScoreRecord, String>;
    // Ordered by created_at descending, newest insert first on ties.
    async fn recent_for_user(&self, user_id: Uuid, limit: usize)
    -> Result<Vec<ScoreRecord>, String>;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn now_epoch_seconds(&self) -> u64 {
        u64::try_from(self.now().timestamp()).unwrap_or_default()
    }
}

// Shared handles in AppState are trait objects behind Arc; let use cases take them as-is.
#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn insert(&self, token: String, session: Session) -> Result<(), String> {
        (**self).insert(token, session).await
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, String> {
        (**self).get(token).await
    }

    async fn remove(&self, token: &str) -> Result<bool, String> {
        (**self).remove(token).await
    }

    async fn purge_expired(&self, now: u64) -> Result<usize, String> {
        (**self).purge_expired(now).await
    }
}

#[async_trait]
impl<T: UserStore + ?Sized> UserStore for Arc<T> {
    async fn insert(&self, user: User) -> Result<bool, String> {
        (**self).insert(user).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, String> {
        (**self).find_by_id(id).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, String> {
        (**self).find_by_username(username).await
    }

    async fn raise_best_score(&self, id: Uuid, score: u64) -> Result<Option<u64>, String> {
        (**self).raise_best_score(id, score).await
    }

    async fn top_by_best_score(&self, limit: usize) -> Result<Vec<User>, String> {
        (**self).top_by_best_score(limit).await
    }
}

#[async_trait]
impl<T: ScoreStore + ?Sized> ScoreStore for Arc<T> {
    async fn append(&self, record: NewScoreRecord) -> Result<ScoreRecord, String> {
        (**self).append(record).await
    }

    async fn recent_for_user(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ScoreRecord>, String> {
        (**self).recent_for_user(user_id, limit).await
    }
}
