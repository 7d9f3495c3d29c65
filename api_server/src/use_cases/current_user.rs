use uuid::Uuid;

use crate::domain::entities::User;
use crate::domain::errors::AuthError;
use crate::domain::ports::UserStore;

// Loads the account behind a verified token.
pub struct CurrentUserUseCase<U> {
    pub users: U,
}

impl<U> CurrentUserUseCase<U>
where
    U: UserStore,
{
    pub async fn execute(&self, user_id: Uuid) -> Result<User, AuthError> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(|_| AuthError::StorageFailure)?
            .ok_or(AuthError::UnknownUser)
    }
}
