// bcrypt password hashes. Hashing is CPU-bound, so request paths use the blocking-pool wrappers.

use crate::domain::errors::AuthError;

#[cfg(not(test))]
const COST: u32 = 10;
#[cfg(test)]
const COST: u32 = 4; // bcrypt minimum cost (bcrypt::MIN_COST is private)

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, COST)
}

// Malformed stored hashes never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    bcrypt::verify(password, stored).unwrap_or(false)
}

pub async fn hash_password_blocking(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|_| AuthError::HashingFailure)?
        .map_err(|_| AuthError::HashingFailure)
}

pub async fn verify_password_blocking(password: String, stored: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .map_err(|_| AuthError::HashingFailure)
}
