// Framework bootstrap for the API server runtime.

use crate::frameworks::{config, db};
use crate::interface_adapters::postgres::{PostgresScoreStore, PostgresUserStore};
use crate::interface_adapters::routes::app;
use crate::interface_adapters::state::{AppState, InMemorySessionStore};

use std::io::Result;
use std::net::SocketAddr;
use std::sync::Arc;

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

pub async fn run(listener: tokio::net::TcpListener, state: AppState) -> Result<()> {
    let address = listener.local_addr()?;
    let app = app(state);

    tracing::info!(%address, "listening");

    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let state = build_state().await?;
    let address = SocketAddr::from(([0, 0, 0, 0], config::http_port()));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, state).await
}

async fn build_state() -> Result<AppState> {
    let ttl = config::session_ttl_seconds();

    let Some(database_url) = config::database_url() else {
        tracing::warn!("DATABASE_URL not set; using in-memory stores");
        return Ok(AppState::in_memory(ttl));
    };

    let pool = db::connect_pool(&database_url)
        .await
        .map_err(|e| std::io::Error::other(format!("failed to connect to postgres: {e}")))?;
    db::run_migrations(&pool)
        .await
        .map_err(|e| std::io::Error::other(format!("failed to run migrations: {e}")))?;
    tracing::info!(session_ttl_seconds = ttl, "postgres stores ready");

    Ok(AppState {
        sessions: Arc::new(InMemorySessionStore::default()),
        users: Arc::new(PostgresUserStore { db: pool.clone() }),
        scores: Arc::new(PostgresScoreStore { db: pool }),
        session_ttl_seconds: ttl,
    })
}
