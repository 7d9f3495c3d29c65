use uuid::Uuid;

use crate::domain::entities::Session;
use crate::domain::errors::AuthError;
use crate::domain::ports::{Clock, SessionStore};

// Caller identity resolved from a bearer token.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
    pub session_id: String,
    pub expires_at: u64,
}

// Token verification use case with injected dependencies.
pub struct VerifyTokenUseCase<C, S> {
    pub clock: C,
    pub store: S,
}

impl<C, S> VerifyTokenUseCase<C, S>
where
    C: Clock,
    S: SessionStore,
{
    pub async fn execute(&self, token: &str) -> Result<Identity, AuthError> {
        if token.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        let session = self
            .store
            .get(token)
            .await
            .map_err(|_| AuthError::StorageFailure)?
            .ok_or(AuthError::InvalidToken)?;

        if session.expires_at <= self.clock.now_epoch_seconds() {
            // Best-effort cleanup of expired session.
            let _ = self.store.remove(token).await;
            return Err(AuthError::SessionExpired);
        }

        Ok(map_session(session))
    }
}

fn map_session(session: Session) -> Identity {
    Identity {
        user_id: session.user_id,
        username: session.username,
        session_id: session.session_id,
        expires_at: session.expires_at,
    }
}
