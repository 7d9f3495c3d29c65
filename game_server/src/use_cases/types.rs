// Use-case level inputs/outputs for a game session.

use crate::domain::{Direction, GameOverReason, GameSnapshot};

// Discrete player intents, already decoded from key presses or structured turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Start,
    TogglePause,
    Turn(Direction),
}

// Everything a session pushes back towards its client.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    Frame(GameSnapshot),
    GameOver { score: u64, reason: GameOverReason },
    ScoreSaved { best_score: u64 },
    ScoreFailed { message: String },
    RefreshRecentGames,
}

// Authenticated player bound to one connection.
#[derive(Debug, Clone)]
pub struct SessionPlayer {
    pub token: String,
    pub username: String,
    pub best_score: u64,
}
