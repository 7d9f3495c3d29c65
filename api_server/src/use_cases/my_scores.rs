use uuid::Uuid;

use crate::domain::entities::ScoreRecord;
use crate::domain::errors::ScoreError;
use crate::domain::ports::ScoreStore;

pub const MY_SCORES_LIMIT: usize = 40;

// Recent games of the calling user, newest first.
pub struct MyScoresUseCase<S> {
    pub scores: S,
}

impl<S> MyScoresUseCase<S>
where
    S: ScoreStore,
{
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<ScoreRecord>, ScoreError> {
        self.scores
            .recent_for_user(user_id, MY_SCORES_LIMIT)
            .await
            .map_err(|_| ScoreError::StorageFailure)
    }
}
