//! Simulation worker that owns the authoritative chapel state.
//!
//! Receives commands from [`crate::RuntimeHandle`], advances movement on a
//! fixed-rate frame tick, fires the ceremony director's single pending
//! wake-up, and collects gateway task results. All four sources are
//! serialised through one `select!` loop, so every mutation lands before the
//! next frame reads the actor.

mod context;

use std::collections::HashSet;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::{self, JoinError, JoinSet};
use tokio::time::{self, Instant, MissedTickBehavior, Sleep};
use tracing::{debug, error, info, warn};

use funeral_core::{
    Direction, FuneralRecord, GameMap, InteractionOutcome, RecordId, Submission, WakeRequest,
};

use crate::api::{Result, SimSnapshot, TextGateway, eulogy_or_fallback, inscription_or_fallback};
use crate::events::EventBus;
use crate::runtime::RuntimeConfig;

use context::Simulation;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Start holding a movement key.
    Press {
        direction: Direction,
        reply: oneshot::Sender<()>,
    },
    /// Stop holding a movement key.
    Release {
        direction: Direction,
        reply: oneshot::Sender<()>,
    },
    /// One interact key press.
    Interact {
        reply: oneshot::Sender<InteractionOutcome>,
    },
    CloseModal { reply: oneshot::Sender<bool> },
    /// Validate an application and start generating its eulogy.
    SubmitFuneral {
        name: String,
        cause: String,
        reply: oneshot::Sender<Result<RecordId>>,
    },
    /// Query the current state (read-only).
    Snapshot { reply: oneshot::Sender<SimSnapshot> },
    /// Stop the loop, dropping the director timer and aborting gateway tasks.
    Shutdown,
}

/// Result of a gateway task spawned by the worker.
enum TaskOutput {
    Eulogy(FuneralRecord),
    Inscription(String),
}

/// The director's single outstanding timer.
struct PendingWake {
    epoch: u64,
    sleep: Pin<Box<Sleep>>,
}

/// Resolves when the pending wake-up fires; never resolves when there is none.
async fn next_wake(pending: &mut Option<PendingWake>) -> u64 {
    match pending {
        Some(wake) => {
            wake.sleep.as_mut().await;
            let epoch = wake.epoch;
            *pending = None;
            epoch
        }
        None => std::future::pending().await,
    }
}

/// Background task that owns the simulation.
pub struct SimulationWorker {
    simulation: Simulation,
    gateway: Arc<dyn TextGateway>,
    gateway_timeout: Duration,
    frame_period: Duration,
    command_rx: mpsc::Receiver<Command>,
    tasks: JoinSet<TaskOutput>,
    submission_tasks: HashSet<task::Id>,
    pending_wake: Option<PendingWake>,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    ///
    /// `config.frame_rate` must be non-zero; the builder checks it.
    pub fn new(
        map: GameMap,
        config: &RuntimeConfig,
        gateway: Arc<dyn TextGateway>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        let mut simulation = Simulation::new(map, config.game_config.clone(), event_bus);
        let opening_wake = if config.seed_opening_ceremony {
            simulation.seed_opening_ceremony()
        } else {
            None
        };

        info!(
            target: "runtime::worker",
            frame_rate = config.frame_rate,
            gateway_timeout = ?config.gateway_timeout,
            "SimulationWorker initialized"
        );

        let mut worker = Self {
            simulation,
            gateway,
            gateway_timeout: config.gateway_timeout,
            frame_period: Duration::from_secs(1) / config.frame_rate.max(1),
            command_rx,
            tasks: JoinSet::new(),
            submission_tasks: HashSet::new(),
            pending_wake: None,
        };
        worker.arm(opening_wake);
        worker
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        let mut frames = time::interval(self.frame_period);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(Command::Shutdown) | None => break,
                    Some(cmd) => self.handle_command(cmd),
                },
                _ = frames.tick() => {
                    self.simulation.frame(Instant::now());
                }
                epoch = next_wake(&mut self.pending_wake) => {
                    let wake = self.simulation.on_wake(epoch);
                    self.arm(wake);
                }
                Some(joined) = self.tasks.join_next_with_id() => {
                    self.handle_task(joined);
                }
            }
        }

        // Nothing fires after teardown.
        self.pending_wake = None;
        let outstanding = self.tasks.len();
        self.tasks.shutdown().await;
        info!(
            target: "runtime::worker",
            aborted_tasks = outstanding,
            "SimulationWorker stopped"
        );
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Press { direction, reply } => {
                self.simulation.press(direction);
                if reply.send(()).is_err() {
                    debug!("Press reply channel closed (caller dropped)");
                }
            }
            Command::Release { direction, reply } => {
                self.simulation.release(direction);
                if reply.send(()).is_err() {
                    debug!("Release reply channel closed (caller dropped)");
                }
            }
            Command::Interact { reply } => {
                let outcome = self.simulation.interact(Instant::now());
                if let InteractionOutcome::ReadInscription { .. } = outcome {
                    self.spawn_inscription();
                }
                if reply.send(outcome).is_err() {
                    debug!("Interact reply channel closed (caller dropped)");
                }
            }
            Command::CloseModal { reply } => {
                let closed = self.simulation.close_modal();
                if reply.send(closed).is_err() {
                    debug!("CloseModal reply channel closed (caller dropped)");
                }
            }
            Command::SubmitFuneral { name, cause, reply } => {
                let result = self.handle_submission(&name, &cause);
                if reply.send(result).is_err() {
                    debug!("SubmitFuneral reply channel closed (caller dropped)");
                }
            }
            Command::Snapshot { reply } => {
                if reply.send(self.simulation.snapshot()).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
            Command::Shutdown => {}
        }
    }

    /// Validates the application, then generates its eulogy off the loop.
    fn handle_submission(&mut self, name: &str, cause: &str) -> Result<RecordId> {
        let submission = Submission::new(name, cause).inspect_err(|error| {
            debug!(target: "runtime::worker", %error, "funeral application rejected");
        })?;
        let pending = self.simulation.accept_submission(submission, Instant::now());
        let id = pending.id;

        let gateway = Arc::clone(&self.gateway);
        let limit = self.gateway_timeout;
        let handle = self.tasks.spawn(async move {
            let eulogy =
                eulogy_or_fallback(gateway.as_ref(), &pending.name, &pending.cause, limit).await;
            TaskOutput::Eulogy(pending.complete(eulogy))
        });
        self.submission_tasks.insert(handle.id());

        Ok(id)
    }

    fn spawn_inscription(&mut self) {
        let gateway = Arc::clone(&self.gateway);
        let limit = self.gateway_timeout;
        self.tasks.spawn(async move {
            TaskOutput::Inscription(inscription_or_fallback(gateway.as_ref(), limit).await)
        });
    }

    fn handle_task(&mut self, joined: std::result::Result<(task::Id, TaskOutput), JoinError>) {
        match joined {
            Ok((id, TaskOutput::Eulogy(record))) => {
                self.submission_tasks.remove(&id);
                let wake = self.simulation.complete_submission(record, Instant::now());
                self.arm(wake);
            }
            Ok((_, TaskOutput::Inscription(text))) => {
                self.simulation.notify(text, Instant::now());
            }
            Err(join_error) => {
                if self.submission_tasks.remove(&join_error.id()) {
                    self.simulation.abandon_submission();
                    warn!(
                        target: "runtime::worker",
                        error = %join_error,
                        "eulogy task ended without a record"
                    );
                } else {
                    error!(
                        target: "runtime::worker",
                        error = %join_error,
                        "gateway task failed"
                    );
                }
            }
        }
    }

    /// Replaces the pending wake-up. `None` keeps the current one.
    fn arm(&mut self, wake: Option<WakeRequest>) {
        if let Some(WakeRequest { epoch, after }) = wake {
            self.pending_wake = Some(PendingWake {
                epoch,
                sleep: Box::pin(time::sleep(after)),
            });
        }
    }
}
