use axum::{
    Json,
    extract::{Path, Query, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};

use std::sync::Arc;

use crate::domain::ports::{ScoreStore, UserStore};
use crate::interface_adapters::auth::AuthenticatedUser;
use crate::interface_adapters::handlers::{ApiError, map_score_error};
use crate::interface_adapters::protocol::{
    LeaderboardEntryDto, LeaderboardResponse, LimitQuery, MyScoresResponse, PlayerQuery,
    PlayerResponse, ScoreItemDto, SubmitScoreRequest, SubmitScoreResponse,
};
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::interface_adapters::xml::{self, XML_CONTENT_TYPE};
use crate::use_cases::leaderboard::{LeaderboardUseCase, parse_limit};
use crate::use_cases::my_scores::MyScoresUseCase;
use crate::use_cases::submit_score::SubmitScoreUseCase;

// Handler for recording a finished game and applying the best-score ratchet.
#[tracing::instrument(skip_all, fields(username = %caller.username))]
pub async fn submit_score(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Json(payload): Json<SubmitScoreRequest>,
) -> Result<Json<SubmitScoreResponse>, ApiError> {
    let use_case = SubmitScoreUseCase {
        clock: SystemClock,
        users: state.users.clone(),
        scores: state.scores.clone(),
    };

    let outcome = use_case
        .execute(caller.user_id, &payload.score)
        .await
        .map_err(map_score_error)?;
    tracing::info!(
        score = outcome.score,
        best_score = outcome.best_score,
        "score recorded"
    );

    Ok(Json(SubmitScoreResponse {
        ok: true,
        best_score: outcome.best_score,
    }))
}

pub async fn my_scores(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
) -> Result<Json<MyScoresResponse>, ApiError> {
    let use_case = MyScoresUseCase {
        scores: state.scores.clone(),
    };

    let records = use_case
        .execute(caller.user_id)
        .await
        .map_err(map_score_error)?;

    Ok(Json(MyScoresResponse {
        items: records.iter().map(ScoreItemDto::from).collect(),
    }))
}

pub async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let limit = parse_limit(query.limit.as_deref());

    let entries = leaderboard_use_case(&state)
        .top(limit)
        .await
        .map_err(map_score_error)?;

    Ok(Json(LeaderboardResponse {
        top: entries.iter().map(LeaderboardEntryDto::from).collect(),
    }))
}

pub async fn leaderboard_xml(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Response, ApiError> {
    let limit = parse_limit(query.limit.as_deref());

    let entries = leaderboard_use_case(&state)
        .top_summary(limit)
        .await
        .map_err(map_score_error)?;

    Ok(([(CONTENT_TYPE, XML_CONTENT_TYPE)], xml::leaderboard_xml(&entries)).into_response())
}

// Per-player detail view; `?format=xml` switches the representation.
pub async fn player(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<PlayerQuery>,
) -> Result<Response, ApiError> {
    let entry = leaderboard_use_case(&state)
        .player(&username)
        .await
        .map_err(map_score_error)?;

    if query
        .format
        .as_deref()
        .is_some_and(|format| format.eq_ignore_ascii_case("xml"))
    {
        let body = xml::player_xml(&entry);
        return Ok(([(CONTENT_TYPE, XML_CONTENT_TYPE)], body).into_response());
    }

    Ok(Json(PlayerResponse {
        player: LeaderboardEntryDto::from(&entry),
    })
    .into_response())
}

fn leaderboard_use_case(
    state: &AppState,
) -> LeaderboardUseCase<Arc<dyn UserStore>, Arc<dyn ScoreStore>> {
    LeaderboardUseCase {
        users: state.users.clone(),
        scores: state.scores.clone(),
    }
}
