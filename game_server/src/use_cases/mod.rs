// Use cases layer: input mapping, tick scheduling, game sessions and score reporting.

pub mod input;
pub mod reporter;
pub mod session;
pub mod timer;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use input::InputController;
pub use session::{GameSession, SessionSummary};
pub use types::{PlayerCommand, SessionPlayer, SessionUpdate};
