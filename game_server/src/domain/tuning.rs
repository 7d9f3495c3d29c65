use std::time::Duration;

use super::grid::{Direction, GridPosition};

// Gameplay constants for a single round.
#[derive(Debug, Clone)]
pub struct GameTuning {
    pub grid_size: i32,
    pub food_score: u64,
    pub base_delay: Duration,
    pub min_delay: Duration,
    // One millisecond is shaved off the delay per this many points.
    pub points_per_speedup: u64,
    // Head first.
    pub initial_snake: Vec<GridPosition>,
    pub initial_direction: Direction,
}

impl Default for GameTuning {
    fn default() -> Self {
        Self {
            grid_size: 20,
            food_score: 10,
            base_delay: Duration::from_millis(120),
            min_delay: Duration::from_millis(60),
            points_per_speedup: 30,
            initial_snake: vec![
                GridPosition::new(6, 10),
                GridPosition::new(5, 10),
                GridPosition::new(4, 10),
            ],
            initial_direction: Direction::Right,
        }
    }
}

impl GameTuning {
    // max(min, base - floor(score / points_per_speedup)) milliseconds.
    pub fn delay_for_score(&self, score: u64) -> Duration {
        let speedup = Duration::from_millis(score / self.points_per_speedup.max(1));
        self.base_delay
            .saturating_sub(speedup)
            .max(self.min_delay)
    }
}
