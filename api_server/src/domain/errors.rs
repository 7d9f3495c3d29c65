// Domain-level errors for account and token workflows.
#[derive(Debug)]
pub enum AuthError {
    UsernameTooShort,
    UsernameTooLong,
    PasswordTooShort,
    UsernameTaken,
    BadCredentials,
    InvalidToken,
    SessionExpired,
    UnknownUser,
    StorageFailure,
    HashingFailure,
}

// Domain-level errors for score submission and leaderboard reads.
#[derive(Debug)]
pub enum ScoreError {
    InvalidScore,
    UnknownUser,
    UnknownPlayer,
    StorageFailure,
}
