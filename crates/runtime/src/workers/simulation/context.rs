//! Authoritative simulation state owned by the worker.
//!
//! Everything here is synchronous: the worker feeds in frames, commands,
//! wake-ups and task completions, and `Simulation` mutates state, publishes
//! events and reports what the worker has to wait on next.

use tokio::time::Instant;
use tracing::{debug, info};

use funeral_core::action::{self, InteractionOutcome, StepOutcome};
use funeral_core::{
    Actor, CeremonyDirector, Direction, FuneralRecord, GameConfig, GameMap, HeldKeys,
    PendingRecord, RecordId, Submission, Timestamp, Transition, WakeRequest,
};

use crate::api::SimSnapshot;
use crate::events::{ActorEvent, Event, EventBus, HintTarget, ModalKind, ModalView, UiEvent};

/// Shown while a submission waits on the gateway.
const SUBMITTING_NOTICE: &str = "Submitting to the spirits...";
/// Shown once the generated record has joined the queue.
const QUEUED_NOTICE: &str = "Added to the queue.";

#[derive(Debug, Clone)]
struct Notification {
    text: String,
    expires_at: Instant,
}

pub(crate) struct Simulation {
    map: GameMap,
    config: GameConfig,
    actor: Actor,
    held: HeldKeys,
    director: CeremonyDirector,
    modal: Option<ModalKind>,
    notification: Option<Notification>,
    hint: Option<HintTarget>,
    next_record_id: u64,
    pending_submissions: usize,
    event_bus: EventBus,
}

impl Simulation {
    pub(crate) fn new(map: GameMap, config: GameConfig, event_bus: EventBus) -> Self {
        let actor = Actor::spawn_at(map.spawn());
        let director = CeremonyDirector::new(config.ceremony.clone());

        let mut simulation = Self {
            map,
            config,
            actor,
            held: HeldKeys::empty(),
            director,
            modal: None,
            notification: None,
            hint: None,
            next_record_id: RecordId::OPENING.0 + 1,
            pending_submissions: 0,
            event_bus,
        };
        simulation.refresh_hint();
        simulation
    }

    /// Puts the opening ceremony at the head of the queue.
    pub(crate) fn seed_opening_ceremony(&mut self) -> Option<WakeRequest> {
        info!(target: "runtime::worker", "seeding opening ceremony");
        let transition = self.director.enqueue(FuneralRecord::opening(now_timestamp()));
        self.apply(transition)
    }

    // ===== frame =====

    /// One fixed-rate tick: movement, hint refresh and notification expiry.
    ///
    /// A seated actor with a movement key held stands up on this tick and
    /// starts moving on the next.
    pub(crate) fn frame(&mut self, now: Instant) {
        let suspended = self.modal.is_some();
        if !suspended && !self.held.is_empty() && self.actor.stand_up() {
            debug!(target: "runtime::worker", held = ?self.held, "held movement key stood the player up");
            self.publish_stood_up();
        } else if let StepOutcome::Moved { .. } = action::step(
            &mut self.actor,
            self.held,
            &self.map,
            self.config.move_speed,
            suspended,
        ) {
            self.refresh_hint();
        }

        if self
            .notification
            .as_ref()
            .is_some_and(|notification| now >= notification.expires_at)
        {
            self.notification = None;
            self.event_bus.publish(Event::Ui(UiEvent::NotificationCleared));
        }
    }

    fn refresh_hint(&mut self) {
        let hint = action::proximity_hint(&self.actor, &self.map, self.config.hint_radius).map(
            |(cell, target)| HintTarget {
                cell,
                id: target.id.clone(),
                kind: target.kind,
            },
        );
        if hint != self.hint {
            self.hint = hint.clone();
            self.event_bus
                .publish(Event::Actor(ActorEvent::HintChanged { hint }));
        }
    }

    // ===== input =====

    pub(crate) fn press(&mut self, direction: Direction) {
        self.held.insert(direction.key());

        if self.modal.is_none() && self.actor.stand_up() {
            debug!(target: "runtime::worker", %direction, "movement key stood the player up");
            self.publish_stood_up();
        }
    }

    pub(crate) fn release(&mut self, direction: Direction) {
        self.held.remove(direction.key());
    }

    /// Resolves an interact press.
    ///
    /// `ReadInscription` is left to the caller, which owns the gateway.
    pub(crate) fn interact(&mut self, now: Instant) -> InteractionOutcome {
        if self.modal.is_some() {
            debug!(target: "runtime::worker", "interact ignored while a modal is open");
            return InteractionOutcome::Nothing;
        }

        let outcome = action::resolve(&mut self.actor, &self.map, self.config.interact_radius);
        debug!(target: "runtime::worker", ?outcome, "interaction resolved");

        match &outcome {
            InteractionOutcome::Nothing | InteractionOutcome::ReadInscription { .. } => {}
            InteractionOutcome::StoodUp => self.publish_stood_up(),
            InteractionOutcome::SatDown { cell } => {
                self.event_bus
                    .publish(Event::Actor(ActorEvent::SatDown { cell: *cell }));
                self.refresh_hint();
            }
            InteractionOutcome::OpenSubmission => self.open_modal(ModalView::Submission),
            InteractionOutcome::OpenNoticeBoard => {
                let view = ModalView::NoticeBoard {
                    queue: self.director.queue().cloned().collect(),
                    history: self.director.history().cloned().collect(),
                };
                self.open_modal(view);
            }
            InteractionOutcome::PayRespects { idle_message } => {
                match self.director.pay_respects() {
                    Some(event) => {
                        let name = self
                            .director
                            .active()
                            .map(|record| record.name().to_string())
                            .unwrap_or_default();
                        self.event_bus.publish(Event::Ceremony(event));
                        self.notify(format!("You paid your respects to {name}."), now);
                    }
                    None => {
                        if let Some(message) = idle_message {
                            self.notify(message.clone(), now);
                        }
                    }
                }
            }
            InteractionOutcome::Notify(message) => self.notify(message.clone(), now),
        }

        outcome
    }

    fn publish_stood_up(&mut self) {
        self.event_bus.publish(Event::Actor(ActorEvent::StoodUp {
            position: self.actor.position,
        }));
        self.refresh_hint();
    }

    // ===== modals & notifications =====

    fn open_modal(&mut self, view: ModalView) {
        self.modal = Some(view.kind());
        self.actor.moving = false;
        self.event_bus
            .publish(Event::Ui(UiEvent::ModalOpened { view }));
    }

    pub(crate) fn close_modal(&mut self) -> bool {
        match self.modal.take() {
            Some(modal) => {
                self.event_bus
                    .publish(Event::Ui(UiEvent::ModalClosed { modal }));
                true
            }
            None => false,
        }
    }

    pub(crate) fn notify(&mut self, text: String, now: Instant) {
        self.notification = Some(Notification {
            text: text.clone(),
            expires_at: now + self.config.notification_duration,
        });
        self.event_bus
            .publish(Event::Ui(UiEvent::NotificationShown { text }));
    }

    // ===== ceremony =====

    /// Reserves a record id for a validated application.
    ///
    /// The returned pending record is handed to a gateway task; nothing joins
    /// the queue until [`Simulation::complete_submission`] runs.
    pub(crate) fn accept_submission(
        &mut self,
        submission: Submission,
        now: Instant,
    ) -> PendingRecord {
        let id = RecordId(self.next_record_id);
        self.next_record_id += 1;
        self.pending_submissions += 1;

        let (name, cause) = submission.into_parts();
        info!(target: "runtime::worker", %id, name = %name, cause = %cause, "funeral application accepted");

        if self.modal == Some(ModalKind::Submission) {
            self.close_modal();
        }
        self.notify(SUBMITTING_NOTICE.to_string(), now);

        PendingRecord {
            id,
            name,
            cause,
            created_at: now_timestamp(),
        }
    }

    pub(crate) fn complete_submission(
        &mut self,
        record: FuneralRecord,
        now: Instant,
    ) -> Option<WakeRequest> {
        self.pending_submissions = self.pending_submissions.saturating_sub(1);
        info!(target: "runtime::worker", id = %record.id(), name = record.name(), "funeral queued");
        let transition = self.director.enqueue(record);
        let wake = self.apply(transition);
        self.notify(QUEUED_NOTICE.to_string(), now);
        wake
    }

    /// A submission task vanished without producing a record.
    pub(crate) fn abandon_submission(&mut self) {
        self.pending_submissions = self.pending_submissions.saturating_sub(1);
    }

    pub(crate) fn on_wake(&mut self, epoch: u64) -> Option<WakeRequest> {
        let transition = self.director.on_wake(epoch);
        if transition.is_empty() {
            debug!(target: "runtime::worker", epoch, "ignoring stale director wake-up");
        }
        self.apply(transition)
    }

    fn apply(&mut self, transition: Transition) -> Option<WakeRequest> {
        for event in transition.events {
            debug!(target: "runtime::worker", ?event, "director event");
            self.event_bus.publish(Event::Ceremony(event));
        }
        transition.wake
    }

    pub(crate) fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            actor: self.actor,
            held: self.held,
            phase: self.director.phase(),
            active: self.director.active().cloned(),
            current_line: self.director.current_line().map(str::to_string),
            queue: self.director.queue().cloned().collect(),
            history: self.director.history().cloned().collect(),
            modal: self.modal,
            notification: self.notification.as_ref().map(|n| n.text.clone()),
            hint: self.hint.clone(),
            pending_submissions: self.pending_submissions,
        }
    }
}

fn now_timestamp() -> Timestamp {
    let millis = chrono::Utc::now().timestamp_millis();
    Timestamp::from_millis(u64::try_from(millis).unwrap_or_default())
}
