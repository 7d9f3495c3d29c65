use rand::Rng;
use std::collections::VecDeque;
use std::time::Duration;

use super::events::{EngineEvent, EventSink, GameOverReason, GamePhase, GameSnapshot, TickOutcome};
use super::grid::{Direction, GridPosition};
use super::tuning::GameTuning;

// Single-player snake simulation. Owns its state, its randomness and its event sink.
pub struct GameEngine<R, S> {
    tuning: GameTuning,
    rng: R,
    sink: S,
    snake: VecDeque<GridPosition>,
    direction: Direction,
    pending_direction: Direction,
    food: Option<GridPosition>,
    score: u64,
    phase: GamePhase,
    tick_delay: Duration,
}

impl<R, S> GameEngine<R, S>
where
    R: Rng,
    S: EventSink,
{
    pub fn new(tuning: GameTuning, rng: R, sink: S) -> Self {
        let snake = tuning.initial_snake.iter().copied().collect();
        let direction = tuning.initial_direction;
        let tick_delay = tuning.base_delay;
        Self {
            tuning,
            rng,
            sink,
            snake,
            direction,
            pending_direction: direction,
            food: None,
            score: 0,
            phase: GamePhase::Idle,
            tick_delay,
        }
    }

    // Resets every field and enters Running. Valid from any phase.
    // Returns the delay the driver should arm its timer with.
    pub fn start(&mut self) -> Duration {
        self.snake = self.tuning.initial_snake.iter().copied().collect();
        self.direction = self.tuning.initial_direction;
        self.pending_direction = self.direction;
        self.score = 0;
        self.tick_delay = self.tuning.base_delay;
        self.food = self.place_food();
        self.phase = GamePhase::Running;

        self.render();
        self.tick_delay
    }

    // Running <-> Paused; no-op otherwise. Returns whether the phase changed.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            GamePhase::Idle | GamePhase::Over => return false,
        };

        self.render();
        true
    }

    // Last write wins; the opposite-direction guard runs at tick time.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        self.pending_direction = direction;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != GamePhase::Running {
            return TickOutcome::Skipped;
        }

        if !self.pending_direction.is_opposite(self.direction) {
            self.direction = self.pending_direction;
        }

        let Some(head) = self.snake.front().copied() else {
            return self.finish(GameOverReason::SelfCollision);
        };
        let next = head.step(self.direction);

        if !next.in_bounds(self.tuning.grid_size) {
            return self.finish(GameOverReason::Wall);
        }
        // Checked against the full body, tail included.
        if self.snake.contains(&next) {
            return self.finish(GameOverReason::SelfCollision);
        }

        self.snake.push_front(next);

        let outcome = if self.food == Some(next) {
            self.score += self.tuning.food_score;
            self.food = self.place_food();
            self.tick_delay = self.tuning.delay_for_score(self.score);
            TickOutcome::Ate {
                delay: self.tick_delay,
            }
        } else {
            self.snake.pop_back();
            TickOutcome::Moved
        };

        self.render();
        outcome
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            snake: self.snake.iter().copied().collect(),
            food: self.food,
            direction: self.direction,
            score: self.score,
            phase: self.phase,
            tick_delay: self.tick_delay,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn tick_delay(&self) -> Duration {
        self.tick_delay
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn finish(&mut self, reason: GameOverReason) -> TickOutcome {
        self.phase = GamePhase::Over;
        let final_score = self.score;
        let snapshot = self.snapshot();
        self.sink.emit(EngineEvent::Terminal {
            final_score,
            reason,
            snapshot,
        });
        TickOutcome::Over {
            final_score,
            reason,
        }
    }

    fn render(&mut self) {
        let snapshot = self.snapshot();
        self.sink.emit(EngineEvent::Render(snapshot));
    }

    // Rejection sampling over the grid; None only when the snake fills every cell.
    fn place_food(&mut self) -> Option<GridPosition> {
        let cells = (self.tuning.grid_size * self.tuning.grid_size) as usize;
        if self.snake.len() >= cells {
            return None;
        }

        loop {
            let candidate = GridPosition::new(
                self.rng.random_range(0..self.tuning.grid_size),
                self.rng.random_range(0..self.tuning.grid_size),
            );
            if !self.snake.contains(&candidate) {
                return Some(candidate);
            }
        }
    }
}

#[cfg(test)]
impl<R: Rng, S: EventSink> GameEngine<R, S> {
    pub(crate) fn set_body(&mut self, cells: &[GridPosition], direction: Direction) {
        self.snake = cells.iter().copied().collect();
        self.direction = direction;
        self.pending_direction = direction;
    }

    pub(crate) fn set_food(&mut self, food: GridPosition) {
        self.food = Some(food);
    }

    pub(crate) fn set_score(&mut self, score: u64) {
        self.score = score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    type TestEngine = GameEngine<StdRng, Vec<EngineEvent>>;

    fn engine(seed: u64) -> TestEngine {
        GameEngine::new(GameTuning::default(), StdRng::seed_from_u64(seed), Vec::new())
    }

    fn started(seed: u64) -> TestEngine {
        let mut engine = engine(seed);
        engine.start();
        engine.sink_mut().clear();
        engine
    }

    fn cells(points: &[(i32, i32)]) -> Vec<GridPosition> {
        points.iter().map(|&(x, y)| GridPosition::new(x, y)).collect()
    }

    // Food somewhere the snake will not reach during the test.
    fn park_food(engine: &mut TestEngine) {
        engine.set_food(GridPosition::new(0, 0));
    }

    #[test]
    fn start_resets_to_the_initial_round() {
        let mut engine = engine(1);

        let delay = engine.start();
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.snake, cells(&[(6, 10), (5, 10), (4, 10)]));
        assert_eq!(snapshot.direction, Direction::Right);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.phase, GamePhase::Running);
        assert_eq!(delay, Duration::from_millis(120));
        let food = snapshot.food.expect("expected food after start");
        assert!(!snapshot.snake.contains(&food));
        assert!(matches!(engine.sink().last(), Some(EngineEvent::Render(_))));
    }

    #[test]
    fn tick_is_a_no_op_unless_running() {
        let mut engine = engine(2);

        assert_eq!(engine.tick(), TickOutcome::Skipped);
        assert!(engine.sink().is_empty());

        engine.start();
        engine.toggle_pause();
        let before = engine.snapshot();
        assert_eq!(engine.tick(), TickOutcome::Skipped);
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn plain_move_keeps_length_and_shifts_the_body() {
        let mut engine = started(3);
        park_food(&mut engine);

        assert_eq!(engine.tick(), TickOutcome::Moved);

        assert_eq!(engine.snapshot().snake, cells(&[(7, 10), (6, 10), (5, 10)]));
        assert_eq!(engine.sink().len(), 1);
    }

    #[test]
    fn eating_grows_by_one_and_scores_ten() {
        let mut engine = started(4);
        engine.set_food(GridPosition::new(7, 10));

        let outcome = engine.tick();

        assert_eq!(
            outcome,
            TickOutcome::Ate {
                delay: Duration::from_millis(120)
            }
        );
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.snake.len(), 4);
        assert_eq!(snapshot.score, 10);
        let food = snapshot.food.expect("expected replaced food");
        assert!(!snapshot.snake.contains(&food));
    }

    #[test]
    fn eating_recomputes_the_delay_from_the_new_score() {
        let mut engine = started(5);
        engine.set_score(20);
        engine.set_food(GridPosition::new(7, 10));

        let outcome = engine.tick();

        assert_eq!(
            outcome,
            TickOutcome::Ate {
                delay: Duration::from_millis(119)
            }
        );
        assert_eq!(engine.tick_delay(), Duration::from_millis(119));
    }

    #[test]
    fn opposite_pending_direction_is_ignored() {
        let mut engine = started(6);
        park_food(&mut engine);

        engine.set_pending_direction(Direction::Left);
        engine.tick();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.direction, Direction::Right);
        assert_eq!(snapshot.snake[0], GridPosition::new(7, 10));
    }

    #[test]
    fn last_pending_direction_wins() {
        let mut engine = started(7);
        park_food(&mut engine);

        engine.set_pending_direction(Direction::Up);
        engine.set_pending_direction(Direction::Down);
        engine.tick();

        assert_eq!(engine.snapshot().snake[0], GridPosition::new(6, 11));
    }

    #[test]
    fn guard_compares_against_current_direction_not_pending() {
        let mut engine = started(8);
        park_food(&mut engine);

        // Left is opposite of the starting Right but not of the current Up.
        engine.set_pending_direction(Direction::Up);
        engine.tick();
        engine.set_pending_direction(Direction::Left);
        engine.tick();

        assert_eq!(engine.snapshot().direction, Direction::Left);
        assert_eq!(engine.snapshot().snake[0], GridPosition::new(5, 9));
    }

    #[test]
    fn leaving_the_grid_ends_the_round_with_one_terminal_event() {
        let mut engine = started(9);
        park_food(&mut engine);
        engine.set_body(&cells(&[(19, 5), (18, 5), (17, 5)]), Direction::Right);

        let outcome = engine.tick();

        assert_eq!(
            outcome,
            TickOutcome::Over {
                final_score: 0,
                reason: GameOverReason::Wall
            }
        );
        assert_eq!(engine.phase(), GamePhase::Over);
        let terminals = engine
            .sink()
            .iter()
            .filter(|event| matches!(event, EngineEvent::Terminal { .. }))
            .count();
        assert_eq!(terminals, 1);
        // Body is left untouched on game over.
        assert_eq!(engine.snapshot().snake[0], GridPosition::new(19, 5));
    }

    #[test]
    fn running_into_the_body_ends_the_round() {
        let mut engine = started(10);
        park_food(&mut engine);
        // Turning right from (5,5) lands on (6,5), which is part of the body.
        engine.set_body(
            &cells(&[(5, 5), (5, 6), (6, 6), (6, 5), (6, 4)]),
            Direction::Up,
        );
        engine.set_pending_direction(Direction::Right);

        let outcome = engine.tick();

        assert_eq!(
            outcome,
            TickOutcome::Over {
                final_score: 0,
                reason: GameOverReason::SelfCollision
            }
        );
    }

    #[test]
    fn moving_into_the_current_tail_cell_is_a_collision() {
        let mut engine = started(11);
        park_food(&mut engine);
        engine.set_body(&cells(&[(5, 5), (6, 5), (6, 6), (5, 6)]), Direction::Left);
        engine.set_pending_direction(Direction::Down);

        assert!(matches!(
            engine.tick(),
            TickOutcome::Over {
                reason: GameOverReason::SelfCollision,
                ..
            }
        ));
    }

    #[test]
    fn over_is_frozen_until_the_next_start() {
        let mut engine = started(12);
        park_food(&mut engine);
        engine.set_body(&cells(&[(19, 5), (18, 5), (17, 5)]), Direction::Right);
        engine.tick();
        engine.sink_mut().clear();

        assert_eq!(engine.tick(), TickOutcome::Skipped);
        assert!(!engine.toggle_pause());
        assert!(engine.sink().is_empty());

        engine.start();
        assert_eq!(engine.phase(), GamePhase::Running);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn toggle_pause_flips_between_running_and_paused() {
        let mut engine = started(13);

        assert!(engine.toggle_pause());
        assert_eq!(engine.phase(), GamePhase::Paused);
        match engine.sink().last() {
            Some(EngineEvent::Render(snapshot)) => assert!(snapshot.paused()),
            other => panic!("expected render event, got {other:?}"),
        }

        assert!(engine.toggle_pause());
        assert_eq!(engine.phase(), GamePhase::Running);
    }

    #[test]
    fn toggle_pause_is_ignored_while_idle() {
        let mut engine = engine(14);

        assert!(!engine.toggle_pause());
        assert_eq!(engine.phase(), GamePhase::Idle);
    }

    #[test]
    fn length_never_shrinks_and_food_never_overlaps_over_a_long_run() {
        let mut engine = started(15);
        let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];
        let mut previous_len = engine.snapshot().snake.len();

        for step in 0..400 {
            if step % 7 == 0 {
                engine.set_pending_direction(turns[(step / 7) % turns.len()]);
            }
            let before = engine.snapshot();
            let outcome = engine.tick();
            let after = engine.snapshot();

            match outcome {
                TickOutcome::Ate { .. } => {
                    assert_eq!(after.snake.len(), previous_len + 1);
                    assert_eq!(Some(after.snake[0]), before.food);
                }
                TickOutcome::Moved => assert_eq!(after.snake.len(), previous_len),
                TickOutcome::Over { .. } => {
                    engine.start();
                }
                TickOutcome::Skipped => panic!("running engine skipped a tick"),
            }

            let now = engine.snapshot();
            if let Some(food) = now.food {
                assert!(!now.snake.contains(&food));
            }
            previous_len = now.snake.len();
        }
    }

    #[test]
    fn same_seed_places_the_same_food() {
        let mut first = engine(42);
        let mut second = engine(42);

        first.start();
        second.start();

        assert_eq!(first.snapshot().food, second.snapshot().food);
    }
}
