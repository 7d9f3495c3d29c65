use axum::{Json, extract::State, http::StatusCode};

use crate::interface_adapters::auth::AuthenticatedUser;
use crate::interface_adapters::handlers::{ApiError, map_auth_error};
use crate::interface_adapters::protocol::{
    AuthResponse, CredentialsRequest, LogoutResponse, MeResponse, ProfileDto, UserSummaryDto,
};
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::use_cases::current_user::CurrentUserUseCase;
use crate::use_cases::issue_session::IssuedSession;
use crate::use_cases::login::LoginUseCase;
use crate::use_cases::logout::LogoutUseCase;
use crate::use_cases::register::RegisterUseCase;

// Handler for creating an account; answers with a fresh token.
#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let use_case = RegisterUseCase {
        clock: SystemClock,
        users: state.users.clone(),
        sessions: state.sessions.clone(),
        ttl_seconds: state.session_ttl_seconds,
    };

    let issued = use_case.execute(payload).await.map_err(map_auth_error)?;
    tracing::info!(username = %issued.username, "user registered");

    Ok((StatusCode::CREATED, Json(auth_response(issued))))
}

// Handler for exchanging credentials for a token.
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let use_case = LoginUseCase {
        clock: SystemClock,
        users: state.users.clone(),
        sessions: state.sessions.clone(),
        ttl_seconds: state.session_ttl_seconds,
    };

    let issued = use_case.execute(payload).await.map_err(map_auth_error)?;

    Ok(Json(auth_response(issued)))
}

pub async fn me(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
) -> Result<Json<MeResponse>, ApiError> {
    let use_case = CurrentUserUseCase {
        users: state.users.clone(),
    };

    let user = use_case
        .execute(caller.user_id)
        .await
        .map_err(map_auth_error)?;

    Ok(Json(MeResponse {
        user: ProfileDto {
            username: user.username,
            best_score: user.best_score,
            created_at: user.created_at,
        },
    }))
}

// Handler for revoking the caller's own token.
pub async fn logout(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
) -> Result<Json<LogoutResponse>, ApiError> {
    let use_case = LogoutUseCase {
        store: state.sessions.clone(),
    };

    let result = use_case
        .execute(&caller.token)
        .await
        .map_err(map_auth_error)?;

    Ok(Json(LogoutResponse {
        revoked: result.revoked,
    }))
}

fn auth_response(issued: IssuedSession) -> AuthResponse {
    AuthResponse {
        token: issued.token,
        user: UserSummaryDto {
            username: issued.username,
            best_score: issued.best_score,
        },
    }
}
