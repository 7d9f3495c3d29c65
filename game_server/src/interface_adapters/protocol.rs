// Wire protocol DTOs and conversions for public game server messages.

use crate::domain::{Direction, GameOverReason, GamePhase, GameSnapshot, GridPosition};
use crate::use_cases::SessionUpdate;
use serde::{Deserialize, Serialize};

/// Messages the server sends to connected clients over the WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    // Verified player identity, sent once after Join is accepted.
    Identity { username: String, best_score: u64 },
    // Board state after every engine change.
    Frame(FrameDto),
    GameOver { score: u64, reason: GameOverReasonDto },
    ScoreSaved { best_score: u64 },
    // Non-fatal; the round result stays on screen.
    ScoreFailed { message: String },
    // Hint for the client to reload its recent games list.
    RefreshRecentGames,
}

/// Messages the client sends to the server over the WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    // Must be the first message on a connection.
    Join(JoinPayload),
    Start,
    TogglePause,
    // Raw key name as reported by the browser.
    Key(KeyPayload),
    Turn(TurnPayload),
}

#[derive(Debug, Clone, Deserialize)]
pub struct JoinPayload {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeyPayload {
    pub key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TurnPayload {
    pub direction: DirectionDto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionDto {
    Up,
    Down,
    Left,
    Right,
}

impl From<DirectionDto> for Direction {
    fn from(direction: DirectionDto) -> Self {
        match direction {
            DirectionDto::Up => Direction::Up,
            DirectionDto::Down => Direction::Down,
            DirectionDto::Left => Direction::Left,
            DirectionDto::Right => Direction::Right,
        }
    }
}

impl From<Direction> for DirectionDto {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => DirectionDto::Up,
            Direction::Down => DirectionDto::Down,
            Direction::Left => DirectionDto::Left,
            Direction::Right => DirectionDto::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseDto {
    Idle,
    Running,
    Paused,
    Over,
}

impl From<GamePhase> for PhaseDto {
    fn from(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Idle => PhaseDto::Idle,
            GamePhase::Running => PhaseDto::Running,
            GamePhase::Paused => PhaseDto::Paused,
            GamePhase::Over => PhaseDto::Over,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReasonDto {
    Wall,
    SelfCollision,
}

impl From<GameOverReason> for GameOverReasonDto {
    fn from(reason: GameOverReason) -> Self {
        match reason {
            GameOverReason::Wall => GameOverReasonDto::Wall,
            GameOverReason::SelfCollision => GameOverReasonDto::SelfCollision,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellDto {
    pub x: i32,
    pub y: i32,
}

impl From<GridPosition> for CellDto {
    fn from(cell: GridPosition) -> Self {
        Self {
            x: cell.x,
            y: cell.y,
        }
    }
}

/// Flattened board state for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct FrameDto {
    // Head first.
    pub snake: Vec<CellDto>,
    pub food: Option<CellDto>,
    pub direction: DirectionDto,
    pub score: u64,
    pub phase: PhaseDto,
    pub paused: bool,
    pub tick_ms: u64,
}

impl From<GameSnapshot> for FrameDto {
    fn from(snapshot: GameSnapshot) -> Self {
        Self {
            paused: snapshot.paused(),
            snake: snapshot.snake.into_iter().map(CellDto::from).collect(),
            food: snapshot.food.map(CellDto::from),
            direction: snapshot.direction.into(),
            score: snapshot.score,
            phase: snapshot.phase.into(),
            tick_ms: snapshot.tick_delay.as_millis() as u64,
        }
    }
}

impl From<SessionUpdate> for ServerMessage {
    fn from(update: SessionUpdate) -> Self {
        match update {
            SessionUpdate::Frame(snapshot) => ServerMessage::Frame(snapshot.into()),
            SessionUpdate::GameOver { score, reason } => ServerMessage::GameOver {
                score,
                reason: reason.into(),
            },
            SessionUpdate::ScoreSaved { best_score } => ServerMessage::ScoreSaved { best_score },
            SessionUpdate::ScoreFailed { message } => ServerMessage::ScoreFailed { message },
            SessionUpdate::RefreshRecentGames => ServerMessage::RefreshRecentGames,
        }
    }
}
