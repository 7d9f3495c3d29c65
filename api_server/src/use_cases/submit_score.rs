use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::NewScoreRecord;
use crate::domain::errors::ScoreError;
use crate::domain::ports::{Clock, ScoreStore, UserStore};

// Largest integer a JSON client can send without losing precision.
pub const MAX_SCORE: u64 = (1 << 53) - 1;

// Result of an accepted submission.
#[derive(Debug)]
pub struct SubmitScoreOutcome {
    pub score: u64,
    pub best_score: u64,
}

// Score submission use case: append the record, then ratchet the best score.
pub struct SubmitScoreUseCase<C, U, S> {
    pub clock: C,
    pub users: U,
    pub scores: S,
}

impl<C, U, S> SubmitScoreUseCase<C, U, S>
where
    C: Clock,
    U: UserStore,
    S: ScoreStore,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        raw_score: &Value,
    ) -> Result<SubmitScoreOutcome, ScoreError> {
        let score = parse_score(raw_score)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|_| ScoreError::StorageFailure)?
            .ok_or(ScoreError::UnknownUser)?;

        // No idempotency key: every accepted submit appends a record.
        self.scores
            .append(NewScoreRecord {
                user_id: user.id,
                username: user.username.clone(),
                score,
                created_at: self.clock.now(),
            })
            .await
            .map_err(|_| ScoreError::StorageFailure)?;

        let best_score = self
            .users
            .raise_best_score(user.id, score)
            .await
            .map_err(|_| ScoreError::StorageFailure)?
            .ok_or(ScoreError::UnknownUser)?;

        Ok(SubmitScoreOutcome { score, best_score })
    }
}

// Accepts JSON numbers and numeric strings holding a finite, non-negative integer.
pub fn parse_score(raw: &Value) -> Result<u64, ScoreError> {
    let value = match raw {
        Value::Number(number) => number.as_f64(),
        Value::String(text) if !text.trim().is_empty() => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or(ScoreError::InvalidScore)?;

    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > MAX_SCORE as f64 {
        return Err(ScoreError::InvalidScore);
    }

    Ok(value as u64)
}
