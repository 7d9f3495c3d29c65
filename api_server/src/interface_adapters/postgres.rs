use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{NewScoreRecord, ScoreRecord, User};
use crate::domain::ports::{ScoreStore, UserStore};

// PostgreSQL adapter for user accounts.
#[derive(Clone)]
pub struct PostgresUserStore {
    pub db: PgPool,
}

// PostgreSQL adapter for the append-only score history.
#[derive(Clone)]
pub struct PostgresScoreStore {
    pub db: PgPool,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: String,
    best_score: i64,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            best_score: to_score(row.best_score),
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ScoreRow {
    id: i64,
    user_id: Uuid,
    username: String,
    score: i64,
    created_at: DateTime<Utc>,
}

impl From<ScoreRow> for ScoreRecord {
    fn from(row: ScoreRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            username: row.username,
            score: to_score(row.score),
            created_at: row.created_at,
        }
    }
}

// Columns are constrained to non-negative values.
fn to_score(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

// Scores are capped at 2^53-1 before they reach the store.
fn to_column(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn db_error(operation: &'static str, err: sqlx::Error) -> String {
    tracing::error!(operation, error = %err, "postgres query failed");
    err.to_string()
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn insert(&self, user: User) -> Result<bool, String> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, best_score, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(to_column(user.best_score))
        .bind(user.created_at)
        .execute(&self.db)
        .await
        .map_err(|e| db_error("insert_user", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, String> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, best_score, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| db_error("find_user_by_id", e))?;

        Ok(row.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, String> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, best_score, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| db_error("find_user_by_username", e))?;

        Ok(row.map(User::from))
    }

    async fn raise_best_score(&self, id: Uuid, score: u64) -> Result<Option<u64>, String> {
        // Single statement so concurrent submits cannot lower the best.
        let best = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE users
            SET best_score = GREATEST(best_score, $2)
            WHERE id = $1
            RETURNING best_score
            "#,
        )
        .bind(id)
        .bind(to_column(score))
        .fetch_optional(&self.db)
        .await
        .map_err(|e| db_error("raise_best_score", e))?;

        Ok(best.map(to_score))
    }

    async fn top_by_best_score(&self, limit: usize) -> Result<Vec<User>, String> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, best_score, created_at
            FROM users
            ORDER BY best_score DESC, username COLLATE "C" ASC
            LIMIT $1
            "#,
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.db)
        .await
        .map_err(|e| db_error("top_by_best_score", e))?;

        Ok(rows.into_iter().map(User::from).collect())
    }
}

#[async_trait]
impl ScoreStore for PostgresScoreStore {
    async fn append(&self, record: NewScoreRecord) -> Result<ScoreRecord, String> {
        let row = sqlx::query_as::<_, ScoreRow>(
            r#"
            INSERT INTO scores (user_id, username, score, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, username, score, created_at
            "#,
        )
        .bind(record.user_id)
        .bind(&record.username)
        .bind(to_column(record.score))
        .bind(record.created_at)
        .fetch_one(&self.db)
        .await
        .map_err(|e| db_error("append_score", e))?;

        Ok(row.into())
    }

    async fn recent_for_user(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ScoreRecord>, String> {
        let rows = sqlx::query_as::<_, ScoreRow>(
            r#"
            SELECT id, user_id, username, score, created_at
            FROM scores
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.db)
        .await
        .map_err(|e| db_error("recent_scores", e))?;

        Ok(rows.into_iter().map(ScoreRecord::from).collect())
    }
}
