// Use cases layer: account, token and score workflows for the API server.

pub mod current_user;
pub mod issue_session;
pub mod leaderboard;
pub mod login;
pub mod logout;
pub mod my_scores;
pub mod register;
pub mod submit_score;
pub mod verify_token;

#[cfg(test)]
pub(crate) mod test_support;
