// HTTP handlers and the shared domain-error to response mapping.

pub mod auth;
pub mod scores;

use axum::{Json, http::StatusCode};
use tracing::error;

use crate::domain::errors::{AuthError, ScoreError};
use crate::interface_adapters::protocol::{ErrorResponse, HealthResponse};
use crate::use_cases::register::{MAX_USERNAME_LEN, MIN_PASSWORD_LEN, MIN_USERNAME_LEN};

pub(crate) type ApiError = (StatusCode, Json<ErrorResponse>);

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

// Helper to build a JSON error response.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn server_error(context: &'static str) -> ApiError {
    error!(context, "storage failure");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
}

pub(crate) fn map_auth_error(err: AuthError) -> ApiError {
    match err {
        AuthError::UsernameTooShort => error_response(
            StatusCode::BAD_REQUEST,
            format!("Username too short (min {MIN_USERNAME_LEN})"),
        ),
        AuthError::UsernameTooLong => error_response(
            StatusCode::BAD_REQUEST,
            format!("Username too long (max {MAX_USERNAME_LEN})"),
        ),
        AuthError::PasswordTooShort => error_response(
            StatusCode::BAD_REQUEST,
            format!("Password too short (min {MIN_PASSWORD_LEN})"),
        ),
        AuthError::UsernameTaken => error_response(StatusCode::CONFLICT, "Username already taken"),
        AuthError::BadCredentials => error_response(StatusCode::UNAUTHORIZED, "Bad credentials"),
        // Token problems stay generic so callers cannot probe for accounts.
        AuthError::InvalidToken | AuthError::SessionExpired | AuthError::UnknownUser => {
            error_response(StatusCode::UNAUTHORIZED, "Unauthorized")
        }
        AuthError::StorageFailure | AuthError::HashingFailure => server_error("auth"),
    }
}

pub(crate) fn map_score_error(err: ScoreError) -> ApiError {
    match err {
        ScoreError::InvalidScore => error_response(StatusCode::BAD_REQUEST, "Invalid score"),
        ScoreError::UnknownUser => error_response(StatusCode::UNAUTHORIZED, "Unauthorized"),
        ScoreError::UnknownPlayer => error_response(StatusCode::NOT_FOUND, "Player not found"),
        ScoreError::StorageFailure => server_error("scores"),
    }
}
