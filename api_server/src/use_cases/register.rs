use uuid::Uuid;

use crate::domain::entities::User;
use crate::domain::errors::AuthError;
use crate::domain::password::hash_password_blocking;
use crate::domain::ports::{Clock, SessionStore, UserStore};
use crate::interface_adapters::protocol::CredentialsRequest;
use crate::use_cases::issue_session::{IssuedSession, issue_session};

pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 24;
pub const MIN_PASSWORD_LEN: usize = 6;

// Account registration use case with injected dependencies.
pub struct RegisterUseCase<C, U, S> {
    pub clock: C,
    pub users: U,
    pub sessions: S,
    pub ttl_seconds: u64,
}

impl<C, U, S> RegisterUseCase<C, U, S>
where
    C: Clock,
    U: UserStore,
    S: SessionStore,
{
    pub async fn execute(&self, payload: CredentialsRequest) -> Result<IssuedSession, AuthError> {
        let username = validate_username(&payload.username)?;
        validate_password(&payload.password)?;

        let password_hash = hash_password_blocking(payload.password).await?;
        let user = User {
            id: Uuid::new_v4(),
            username,
            password_hash,
            best_score: 0,
            created_at: self.clock.now(),
        };

        let inserted = self
            .users
            .insert(user.clone())
            .await
            .map_err(|_| AuthError::StorageFailure)?;
        if !inserted {
            return Err(AuthError::UsernameTaken);
        }

        issue_session(&self.clock, &self.sessions, self.ttl_seconds, &user).await
    }
}

// Usernames are stored trimmed; length is counted in characters.
pub(crate) fn validate_username(value: &str) -> Result<String, AuthError> {
    let username = value.trim();
    let len = username.chars().count();

    if len < MIN_USERNAME_LEN {
        return Err(AuthError::UsernameTooShort);
    }
    if len > MAX_USERNAME_LEN {
        return Err(AuthError::UsernameTooLong);
    }

    Ok(username.to_string())
}

fn validate_password(value: &str) -> Result<(), AuthError> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::PasswordTooShort);
    }
    Ok(())
}
