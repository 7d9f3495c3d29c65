use crate::domain::errors::AuthError;
use crate::domain::password::verify_password_blocking;
use crate::domain::ports::{Clock, SessionStore, UserStore};
use crate::interface_adapters::protocol::CredentialsRequest;
use crate::use_cases::issue_session::{IssuedSession, issue_session};

// Password login use case with injected dependencies.
pub struct LoginUseCase<C, U, S> {
    pub clock: C,
    pub users: U,
    pub sessions: S,
    pub ttl_seconds: u64,
}

impl<C, U, S> LoginUseCase<C, U, S>
where
    C: Clock,
    U: UserStore,
    S: SessionStore,
{
    pub async fn execute(&self, payload: CredentialsRequest) -> Result<IssuedSession, AuthError> {
        let username = payload.username.trim();

        // Unknown user and wrong password are indistinguishable to the caller.
        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(|_| AuthError::StorageFailure)?
            .ok_or(AuthError::BadCredentials)?;

        if !verify_password_blocking(payload.password, user.password_hash.clone()).await? {
            return Err(AuthError::BadCredentials);
        }

        issue_session(&self.clock, &self.sessions, self.ttl_seconds, &user).await
    }
}
