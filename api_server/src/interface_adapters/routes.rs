use crate::interface_adapters::handlers::auth::{login, logout, me, register};
use crate::interface_adapters::handlers::health;
use crate::interface_adapters::handlers::scores::{
    leaderboard, leaderboard_xml, my_scores, player, submit_score,
};
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
        .route("/scores/submit", post(submit_score))
        .route("/my-scores", get(my_scores))
        .route("/leaderboard", get(leaderboard))
        .route("/leaderboard.xml", get(leaderboard_xml))
        .route("/players/{username}", get(player))
        .with_state(state)
}
