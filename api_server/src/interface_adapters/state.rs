use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::entities::{NewScoreRecord, ScoreRecord, Session, User};
use crate::domain::ports::{Clock, ScoreStore, SessionStore, UserStore};

// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    // We use Arc<dyn Trait> so the same handlers run on memory or Postgres stores.
    pub sessions: Arc<dyn SessionStore>,
    pub users: Arc<dyn UserStore>,
    pub scores: Arc<dyn ScoreStore>,
    // Lifetime of issued bearer tokens.
    pub session_ttl_seconds: u64,
}

impl AppState {
    // Fully in-memory state; used when no database is configured and by tests.
    pub fn in_memory(session_ttl_seconds: u64) -> Self {
        Self {
            sessions: Arc::new(InMemorySessionStore::default()),
            users: Arc::new(InMemoryUserStore::default()),
            scores: Arc::new(InMemoryScoreStore::default()),
            session_ttl_seconds,
        }
    }
}

// In-memory session store adapter; tokens do not survive a restart.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    pub sessions: Arc<Mutex<HashMap<String, Session>>>,
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, token: String, session: Session) -> Result<(), String> {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(token, session);
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, String> {
        let sessions = self.sessions.lock().await;
        Ok(sessions.get(token).cloned())
    }

    async fn remove(&self, token: &str) -> Result<bool, String> {
        let mut sessions = self.sessions.lock().await;
        Ok(sessions.remove(token).is_some())
    }

    async fn purge_expired(&self, now: u64) -> Result<usize, String> {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.expires_at > now);
        Ok(before - sessions.len())
    }
}

// In-memory user store adapter.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    pub(crate) users: Arc<Mutex<HashMap<Uuid, User>>>,
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: User) -> Result<bool, String> {
        let mut users = self.users.lock().await;
        if users.values().any(|existing| existing.username == user.username) {
            return Ok(false);
        }
        users.insert(user.id, user);
        Ok(true)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, String> {
        let users = self.users.lock().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, String> {
        let users = self.users.lock().await;
        Ok(users.values().find(|user| user.username == username).cloned())
    }

    async fn raise_best_score(&self, id: Uuid, score: u64) -> Result<Option<u64>, String> {
        let mut users = self.users.lock().await;
        Ok(users.get_mut(&id).map(|user| {
            if score > user.best_score {
                user.best_score = score;
            }
            user.best_score
        }))
    }

    async fn top_by_best_score(&self, limit: usize) -> Result<Vec<User>, String> {
        let users = self.users.lock().await;
        let mut top: Vec<User> = users.values().cloned().collect();
        top.sort_by(|a, b| {
            b.best_score
                .cmp(&a.best_score)
                .then_with(|| a.username.cmp(&b.username))
        });
        top.truncate(limit);
        Ok(top)
    }
}

#[derive(Default)]
pub(crate) struct ScoreTable {
    pub(crate) next_id: i64,
    pub(crate) records: Vec<ScoreRecord>,
}

// In-memory append-only score history adapter.
#[derive(Clone, Default)]
pub struct InMemoryScoreStore {
    pub(crate) table: Arc<Mutex<ScoreTable>>,
}

#[async_trait]
impl ScoreStore for InMemoryScoreStore {
    async fn append(&self, record: NewScoreRecord) -> Result<ScoreRecord, String> {
        let mut table = self.table.lock().await;
        table.next_id += 1;
        let record = ScoreRecord {
            id: table.next_id,
            user_id: record.user_id,
            username: record.username,
            score: record.score,
            created_at: record.created_at,
        };
        table.records.push(record.clone());
        Ok(record)
    }

    async fn recent_for_user(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ScoreRecord>, String> {
        let table = self.table.lock().await;
        let mut recent: Vec<ScoreRecord> = table
            .records
            .iter()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect();
        recent.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        recent.truncate(limit);
        Ok(recent)
    }
}

// System clock adapter used by use cases.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
