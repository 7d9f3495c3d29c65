use std::{env, time::Duration};

// Runtime/server settings (not gameplay tuning).

pub fn http_port() -> u16 {
    env::var("GAME_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3001)
}

pub fn api_service_url() -> String {
    env::var("API_SERVICE_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string())
}

pub fn api_timeout() -> Duration {
    let millis = env::var("API_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(1500);
    Duration::from_millis(millis)
}
