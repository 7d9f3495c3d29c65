use std::env;

// Runtime/server settings read from the environment.

pub fn http_port() -> u16 {
    env::var("API_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000)
}

// When unset the server runs on in-memory stores.
pub fn database_url() -> Option<String> {
    env::var("DATABASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
}

pub fn session_ttl_seconds() -> u64 {
    env::var("SESSION_TTL_SECONDS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|ttl| *ttl > 0)
        .unwrap_or(DEFAULT_SESSION_TTL_SECONDS)
}

// Seven days.
pub const DEFAULT_SESSION_TTL_SECONDS: u64 = 7 * 24 * 60 * 60;
pub const DB_MAX_CONNECTIONS: u32 = 5;
