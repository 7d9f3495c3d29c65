// Engine outputs: phases, snapshots, events and tick outcomes.

use std::time::Duration;

use super::grid::{Direction, GridPosition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Idle,
    Running,
    Paused,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    Wall,
    SelfCollision,
}

// Read-only view of the game handed to renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    // Head first.
    pub snake: Vec<GridPosition>,
    pub food: Option<GridPosition>,
    pub direction: Direction,
    pub score: u64,
    pub phase: GamePhase,
    pub tick_delay: Duration,
}

impl GameSnapshot {
    pub fn paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Render(GameSnapshot),
    // Emitted exactly once per round, when the phase becomes Over.
    Terminal {
        final_score: u64,
        reason: GameOverReason,
        snapshot: GameSnapshot,
    },
}

// Receives every event the engine produces.
pub trait EventSink {
    fn emit(&mut self, event: EngineEvent);
}

impl EventSink for Vec<EngineEvent> {
    fn emit(&mut self, event: EngineEvent) {
        self.push(event);
    }
}

// What a tick did, so the driver can reschedule its timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Skipped,
    Moved,
    Ate { delay: Duration },
    Over { final_score: u64, reason: GameOverReason },
}
