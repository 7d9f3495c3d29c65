// Shared one-time bootstrapping for integration tests: a stub score API plus the game server.
#![allow(dead_code)]

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

pub const VALID_TOKEN: &str = "valid-token";
pub const PLAYER_NAME: &str = "alice";
pub const STORED_BEST: u64 = 40;

// Base URL of the game server, published once the server thread has bound its port.
static SERVER_URL: OnceLock<String> = OnceLock::new();
static SERVER_READY: OnceLock<()> = OnceLock::new();

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| token == VALID_TOKEN)
}

async fn stub_me(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized" })));
    }
    (
        StatusCode::OK,
        Json(json!({
            "user": {
                "username": PLAYER_NAME,
                "bestScore": STORED_BEST,
                "createdAt": "2026-01-01T00:00:00Z"
            }
        })),
    )
}

async fn stub_submit(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized" })));
    }
    let Some(score) = body.get("score").and_then(Value::as_u64) else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "Invalid score" })));
    };
    (
        StatusCode::OK,
        Json(json!({ "ok": true, "bestScore": score.max(STORED_BEST) })),
    )
}

fn stub_api() -> Router {
    Router::new()
        .route("/auth/me", get(stub_me))
        .route("/scores/submit", post(stub_submit))
}

// Ensure the stub API and game server are running and return the game server base URL.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // Dedicated OS thread so the servers outlive individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                let api_listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind stub api port");
                let api_addr = api_listener.local_addr().expect("stub api addr");
                tokio::spawn(async move {
                    axum::serve(api_listener, stub_api())
                        .await
                        .expect("stub api failed");
                });

                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let state =
                    game_server::build_state(format!("http://{api_addr}")).expect("game state");
                let _ = published_url_thread.set(format!("http://{addr}"));
                game_server::run(listener, state)
                    .await
                    .expect("server failed");
            });
        });
        wait_for_server_url_and_readiness(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

pub fn ws_url() -> String {
    let base = ensure_server();
    format!("ws://{}/ws", base.trim_start_matches("http://"))
}

fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_URL.set(base_url.clone());

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    // Retry briefly to avoid racing the bind/accept.
    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}
