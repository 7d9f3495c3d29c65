use rand::Rng;
use std::time::Duration;

use super::types::PlayerCommand;
use crate::domain::{Direction, EventSink, GameEngine};

// Maps key presses to commands and routes commands into the engine.
pub struct InputController;

impl InputController {
    // Case-insensitive; unknown keys are ignored.
    pub fn command_for_key(key: &str) -> Option<PlayerCommand> {
        if key == " " {
            return Some(PlayerCommand::TogglePause);
        }

        match key.trim().to_ascii_lowercase().as_str() {
            "arrowup" | "w" => Some(PlayerCommand::Turn(Direction::Up)),
            "arrowdown" | "s" => Some(PlayerCommand::Turn(Direction::Down)),
            "arrowleft" | "a" => Some(PlayerCommand::Turn(Direction::Left)),
            "arrowright" | "d" => Some(PlayerCommand::Turn(Direction::Right)),
            "space" | "spacebar" => Some(PlayerCommand::TogglePause),
            "enter" => Some(PlayerCommand::Start),
            _ => None,
        }
    }

    // Returns the delay to arm the tick timer with when the command (re)started a round.
    pub fn apply<R, S>(command: PlayerCommand, engine: &mut GameEngine<R, S>) -> Option<Duration>
    where
        R: Rng,
        S: EventSink,
    {
        match command {
            PlayerCommand::Turn(direction) => {
                engine.set_pending_direction(direction);
                None
            }
            PlayerCommand::TogglePause => {
                engine.toggle_pause();
                None
            }
            PlayerCommand::Start => Some(engine.start()),
        }
    }
}
