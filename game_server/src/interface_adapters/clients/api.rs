use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::ports::{
    LookupError, PlayerDirectory, PlayerProfile, ReportError, ScoreReporter, SubmitOutcome,
};

#[derive(Debug, Serialize)]
struct SubmitScoreRequest {
    score: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitScoreResponse {
    ok: bool,
    best_score: u64,
}

#[derive(Debug, Deserialize)]
struct MeResponse {
    user: ProfileDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileDto {
    username: String,
    #[serde(default)]
    best_score: u64,
}

// Thin reqwest client for the score API: identity lookup and score submission.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PlayerDirectory for ApiClient {
    async fn profile(&self, token: &str) -> Result<PlayerProfile, LookupError> {
        let url = format!("{}/auth/me", self.base_url);
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|_| LookupError::Unavailable)?;

        match response.status() {
            status if status.is_success() => {
                let body = response
                    .json::<MeResponse>()
                    .await
                    .map_err(|_| LookupError::Unavailable)?;
                Ok(PlayerProfile {
                    username: body.user.username,
                    best_score: body.user.best_score,
                })
            }
            StatusCode::UNAUTHORIZED => Err(LookupError::Unauthorized),
            _ => Err(LookupError::Unavailable),
        }
    }
}

#[async_trait]
impl ScoreReporter for ApiClient {
    async fn submit(&self, token: &str, score: u64) -> Result<SubmitOutcome, ReportError> {
        let url = format!("{}/scores/submit", self.base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&SubmitScoreRequest { score })
            .send()
            .await
            .map_err(|_| ReportError::Unavailable)?;

        match response.status() {
            status if status.is_success() => {
                let body = response
                    .json::<SubmitScoreResponse>()
                    .await
                    .map_err(|_| ReportError::Unavailable)?;
                Ok(SubmitOutcome {
                    accepted: body.ok,
                    best_score: body.best_score,
                })
            }
            StatusCode::UNAUTHORIZED => Err(ReportError::Unauthorized),
            StatusCode::BAD_REQUEST => Err(ReportError::InvalidScore),
            _ => Err(ReportError::Unavailable),
        }
    }
}
