// Framework bootstrap for the game server runtime.

use crate::domain::GameTuning;
use crate::frameworks::config;
use crate::interface_adapters::clients::api::ApiClient;
use crate::interface_adapters::http::health;
use crate::interface_adapters::net::ws_handler;
use crate::interface_adapters::state::AppState;

use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::{io::Result, sync::Arc};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ws", get(ws_handler))
        .with_state(state)
}

pub async fn run(listener: tokio::net::TcpListener, state: Arc<AppState>) -> Result<()> {
    let address = listener.local_addr()?;
    let app = app(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let state = build_state(config::api_service_url())?;
    let address = SocketAddr::from(([0, 0, 0, 0], config::http_port()));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, state).await
}

// One API client serves both identity lookups and score submission.
pub fn build_state(api_base_url: String) -> Result<Arc<AppState>> {
    let api_timeout = config::api_timeout();
    let api_client = ApiClient::new(api_base_url.clone(), api_timeout)
        .map_err(|e| std::io::Error::other(format!("failed to initialize api client: {e}")))?;
    tracing::debug!(
        api_base_url = %api_base_url,
        api_timeout_ms = api_timeout.as_millis(),
        "api client configured"
    );

    let api_client = Arc::new(api_client);
    Ok(Arc::new(AppState::new(
        api_client.clone(),
        api_client,
        GameTuning::default(),
    )))
}
