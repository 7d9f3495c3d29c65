use rand::Rng;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::input::InputController;
use super::reporter::{ReportOutcome, ReportScoreUseCase};
use super::timer::TickTimer;
use super::types::{PlayerCommand, SessionPlayer, SessionUpdate};
use crate::domain::ports::ScoreReporter;
use crate::domain::{EngineEvent, GameEngine, TickOutcome};

// Reports arrive at most once per round, so a tiny buffer is enough.
const REPORT_CHANNEL_CAPACITY: usize = 4;

// What a finished connection played.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub rounds_started: u32,
    // Kept for display even when saving it failed.
    pub last_score: Option<u64>,
    pub best_score: u64,
}

// One connection's engine plus its single tick timer. Commands and ticks are the only mutators.
pub struct GameSession<R, P: ?Sized> {
    player: SessionPlayer,
    engine: GameEngine<R, Vec<EngineEvent>>,
    timer: TickTimer,
    reporter: Arc<P>,
    report_tx: mpsc::Sender<ReportOutcome>,
    report_rx: mpsc::Receiver<ReportOutcome>,
    pending: Vec<SessionUpdate>,
    summary: SessionSummary,
}

impl<R, P> GameSession<R, P>
where
    R: Rng,
    P: ScoreReporter + ?Sized + 'static,
{
    pub fn new(
        player: SessionPlayer,
        engine: GameEngine<R, Vec<EngineEvent>>,
        reporter: Arc<P>,
    ) -> Self {
        let (report_tx, report_rx) = mpsc::channel(REPORT_CHANNEL_CAPACITY);
        let summary = SessionSummary {
            best_score: player.best_score,
            ..SessionSummary::default()
        };
        Self {
            player,
            engine,
            timer: TickTimer::new(),
            reporter,
            report_tx,
            report_rx,
            pending: Vec::new(),
            summary,
        }
    }

    // Drives the session until the client goes away; the in-progress round is dropped.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<PlayerCommand>,
        updates: mpsc::Sender<SessionUpdate>,
    ) -> SessionSummary {
        // Let the client draw the idle board right away.
        self.pending
            .push(SessionUpdate::Frame(self.engine.snapshot()));

        loop {
            for update in self.drain_updates() {
                if updates.send(update).await.is_err() {
                    debug!("update channel closed; ending session");
                    return self.summary;
                }
            }

            tokio::select! {
                command = commands.recv() => {
                    let Some(command) = command else {
                        debug!("command channel closed; ending session");
                        return self.summary;
                    };
                    self.on_command(command);
                }
                _ = self.timer.tick() => {
                    self.on_tick();
                }
                Some(outcome) = self.report_rx.recv() => {
                    self.on_report(outcome);
                }
            }
        }
    }

    pub fn on_command(&mut self, command: PlayerCommand) {
        if let Some(delay) = InputController::apply(command, &mut self.engine) {
            self.summary.rounds_started += 1;
            self.timer.arm(delay);
            debug!(delay_ms = delay.as_millis() as u64, "round started");
        }
    }

    pub fn on_tick(&mut self) {
        match self.engine.tick() {
            TickOutcome::Ate { delay } => self.timer.arm(delay),
            TickOutcome::Over {
                final_score,
                reason,
            } => {
                self.timer.disarm();
                self.summary.last_score = Some(final_score);
                info!(
                    username = %self.player.username,
                    final_score,
                    ?reason,
                    "round over"
                );
                self.spawn_report(final_score);
            }
            TickOutcome::Moved | TickOutcome::Skipped => {}
        }
    }

    fn on_report(&mut self, outcome: ReportOutcome) {
        if let ReportOutcome::Saved { best_score } = &outcome {
            self.summary.best_score = *best_score;
            self.player.best_score = *best_score;
        }
        self.pending.extend(outcome.into_updates());
    }

    fn spawn_report(&self, final_score: u64) {
        let use_case = ReportScoreUseCase {
            reporter: Arc::clone(&self.reporter),
        };
        let token = self.player.token.clone();
        let report_tx = self.report_tx.clone();
        tokio::spawn(async move {
            let outcome = use_case.execute(&token, final_score).await;
            let _ = report_tx.send(outcome).await;
        });
    }

    // Engine events first, in emission order, then reporter results.
    pub fn drain_updates(&mut self) -> Vec<SessionUpdate> {
        let mut updates = Vec::new();
        for event in std::mem::take(self.engine.sink_mut()) {
            match event {
                EngineEvent::Render(snapshot) => updates.push(SessionUpdate::Frame(snapshot)),
                EngineEvent::Terminal {
                    final_score,
                    reason,
                    snapshot,
                } => {
                    updates.push(SessionUpdate::Frame(snapshot));
                    updates.push(SessionUpdate::GameOver {
                        score: final_score,
                        reason,
                    });
                }
            }
        }
        updates.append(&mut self.pending);
        updates
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }
}

#[cfg(test)]
impl<R, P: ?Sized> GameSession<R, P> {
    pub(crate) fn engine_mut(&mut self) -> &mut GameEngine<R, Vec<EngineEvent>> {
        &mut self.engine
    }

    pub(crate) fn timer(&self) -> &TickTimer {
        &self.timer
    }
}
