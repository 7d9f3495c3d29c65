use uuid::Uuid;

use crate::domain::entities::{Session, User};
use crate::domain::errors::AuthError;
use crate::domain::ports::{Clock, SessionStore};

// Token and account summary handed back after register or login.
#[derive(Debug)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: u64,
    pub username: String,
    pub best_score: u64,
}

// Stores a fresh opaque token for the user and returns it. Expired tokens are swept first.
pub(crate) async fn issue_session<C, S>(
    clock: &C,
    sessions: &S,
    ttl_seconds: u64,
    user: &User,
) -> Result<IssuedSession, AuthError>
where
    C: Clock,
    S: SessionStore,
{
    let now = clock.now_epoch_seconds();
    match sessions.purge_expired(now).await {
        Ok(0) => {}
        Ok(purged) => tracing::debug!(purged, "expired sessions purged"),
        Err(err) => tracing::warn!(error = %err, "expired session purge failed"),
    }

    let token = Uuid::new_v4().to_string();
    let expires_at = now + ttl_seconds;

    let session = Session {
        user_id: user.id,
        username: user.username.clone(),
        session_id: Uuid::new_v4().to_string(),
        expires_at,
    };

    sessions
        .insert(token.clone(), session)
        .await
        .map_err(|_| AuthError::StorageFailure)?;

    Ok(IssuedSession {
        token,
        expires_at,
        username: user.username.clone(),
        best_score: user.best_score,
    })
}
