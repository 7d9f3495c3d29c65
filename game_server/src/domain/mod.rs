// Domain layer: grid, engine rules, events and outbound ports.

pub mod engine;
pub mod events;
pub mod grid;
pub mod ports;
pub mod tuning;

pub use engine::GameEngine;
pub use events::{EngineEvent, EventSink, GameOverReason, GamePhase, GameSnapshot, TickOutcome};
pub use grid::{Direction, GridPosition};
pub use tuning::GameTuning;
