use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use crate::interface_adapters::handlers::map_auth_error;
use crate::interface_adapters::protocol::ErrorResponse;
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::use_cases::verify_token::VerifyTokenUseCase;

const BEARER_PREFIX: &str = "Bearer ";

// Caller resolved from `Authorization: Bearer <token>`; rejects with 401 otherwise.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
    // Raw token, kept so logout can revoke it.
    pub token: String,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).unwrap_or_default().to_string();

        let use_case = VerifyTokenUseCase {
            clock: SystemClock,
            store: state.sessions.clone(),
        };
        let identity = use_case.execute(&token).await.map_err(map_auth_error)?;

        Ok(Self {
            user_id: identity.user_id,
            username: identity.username,
            token,
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/auth/me");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        let (parts, _) = builder
            .body(())
            .expect("expected request to build")
            .into_parts();
        parts
    }

    #[test]
    fn bearer_token_is_extracted_from_authorization_header() {
        assert_eq!(bearer_token(&parts_with(Some("Bearer abc-123"))), Some("abc-123"));
    }

    #[test]
    fn other_schemes_and_missing_headers_yield_no_token() {
        assert_eq!(bearer_token(&parts_with(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&parts_with(None)), None);
    }
}
