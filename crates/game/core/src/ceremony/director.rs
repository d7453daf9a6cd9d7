use std::collections::VecDeque;
use std::time::Duration;

use crate::config::CeremonyTimings;
use crate::state::{FuneralRecord, RecordId};

use super::DialogueCursor;

/// Stage of the ceremony subsystem. Exactly one value at any time.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectorPhase {
    #[default]
    Idle,
    Preaching,
    Amen,
    Burial,
}

/// Single timer the owner must arm; firing it calls
/// [`CeremonyDirector::on_wake`] with the same epoch.
///
/// A newer request always supersedes an older one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WakeRequest {
    pub epoch: u64,
    pub after: Duration,
}

/// Observable change produced by the director.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectorEvent {
    /// A record joined the queue at `position` (1-based).
    Enqueued {
        id: RecordId,
        name: String,
        position: usize,
    },
    CeremonyStarted {
        id: RecordId,
        name: String,
        cause: String,
    },
    DialogueLine {
        id: RecordId,
        index: usize,
        total: usize,
        text: String,
    },
    PhaseChanged {
        from: DirectorPhase,
        to: DirectorPhase,
    },
    CeremonyCompleted { id: RecordId, attendees: u32 },
    RespectsPaid { id: RecordId, attendees: u32 },
}

/// Events from one director call plus the timer to arm, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct Transition {
    pub events: Vec<DirectorEvent>,
    pub wake: Option<WakeRequest>,
}

impl Transition {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.wake.is_none()
    }
}

/// The ceremony state machine.
///
/// Owns the queue (FIFO), the active ceremony and the history
/// (newest first). Every phase entry schedules exactly one wake-up by bumping
/// the epoch; wake-ups carrying an older epoch are ignored.
///
/// Invariant: `active.is_some()` iff `phase != Idle`, and the director never
/// rests in `Idle` while the queue holds records.
#[derive(Clone, Debug)]
pub struct CeremonyDirector {
    timings: CeremonyTimings,
    phase: DirectorPhase,
    queue: VecDeque<FuneralRecord>,
    active: Option<FuneralRecord>,
    history: VecDeque<FuneralRecord>,
    dialogue: Option<DialogueCursor>,
    current_line: Option<String>,
    epoch: u64,
}

impl CeremonyDirector {
    pub fn new(timings: CeremonyTimings) -> Self {
        Self {
            timings,
            phase: DirectorPhase::Idle,
            queue: VecDeque::new(),
            active: None,
            history: VecDeque::new(),
            dialogue: None,
            current_line: None,
            epoch: 0,
        }
    }

    pub fn phase(&self) -> DirectorPhase {
        self.phase
    }

    pub fn active(&self) -> Option<&FuneralRecord> {
        self.active.as_ref()
    }

    pub fn queue(&self) -> impl ExactSizeIterator<Item = &FuneralRecord> + '_ {
        self.queue.iter()
    }

    /// Completed ceremonies, most recent first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &FuneralRecord> + '_ {
        self.history.iter()
    }

    /// Dialogue chunk currently on display.
    pub fn current_line(&self) -> Option<&str> {
        self.current_line.as_deref()
    }

    pub fn dialogue(&self) -> Option<&DialogueCursor> {
        self.dialogue.as_ref()
    }

    /// Epoch of the most recently scheduled wake-up.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Appends a completed record and promotes it right away when idle.
    pub fn enqueue(&mut self, record: FuneralRecord) -> Transition {
        let mut transition = Transition::default();
        transition.events.push(DirectorEvent::Enqueued {
            id: record.id(),
            name: record.name().to_string(),
            position: self.queue.len() + 1,
        });
        self.queue.push_back(record);
        self.evaluate_into(&mut transition);
        transition
    }

    /// Re-checks the idle promotion rule.
    ///
    /// Safe to call at any time; outside `Idle` it never touches the dialogue
    /// cursor or the pending wake-up.
    pub fn evaluate(&mut self) -> Transition {
        let mut transition = Transition::default();
        self.evaluate_into(&mut transition);
        transition
    }

    /// Handles a fired timer. Stale epochs are ignored.
    pub fn on_wake(&mut self, epoch: u64) -> Transition {
        let mut transition = Transition::default();
        if epoch != self.epoch {
            return transition;
        }

        match self.phase {
            DirectorPhase::Idle => {}
            DirectorPhase::Preaching => self.deliver_next_line(&mut transition),
            DirectorPhase::Amen => {
                self.change_phase(DirectorPhase::Burial, &mut transition);
                transition.wake = Some(self.schedule(self.timings.burial));
            }
            DirectorPhase::Burial => self.finish_ceremony(&mut transition),
        }
        transition
    }

    /// Adds a mourner to the active ceremony, if there is one.
    pub fn pay_respects(&mut self) -> Option<DirectorEvent> {
        let active = self.active.as_mut()?;
        let attendees = active.pay_respects();
        Some(DirectorEvent::RespectsPaid {
            id: active.id(),
            attendees,
        })
    }

    fn evaluate_into(&mut self, transition: &mut Transition) {
        if self.phase != DirectorPhase::Idle || self.active.is_some() {
            return;
        }
        let Some(record) = self.queue.pop_front() else {
            return;
        };

        transition.events.push(DirectorEvent::CeremonyStarted {
            id: record.id(),
            name: record.name().to_string(),
            cause: record.cause().to_string(),
        });
        self.dialogue = Some(DialogueCursor::new(
            record.eulogy(),
            self.timings.words_per_chunk,
        ));
        self.active = Some(record);
        self.change_phase(DirectorPhase::Preaching, transition);
        self.deliver_next_line(transition);
    }

    fn deliver_next_line(&mut self, transition: &mut Transition) {
        let id = self.active.as_ref().map(|record| record.id()).unwrap_or_default();
        let line = self.dialogue.as_mut().and_then(|cursor| {
            let total = cursor.total();
            cursor
                .advance()
                .map(|(index, text)| (index, total, text.to_string()))
        });

        match line {
            Some((index, total, text)) => {
                self.current_line = Some(text.clone());
                transition.events.push(DirectorEvent::DialogueLine {
                    id,
                    index,
                    total,
                    text,
                });
                transition.wake = Some(self.schedule(self.timings.chunk_dwell));
            }
            None => {
                self.current_line = None;
                self.change_phase(DirectorPhase::Amen, transition);
                transition.wake = Some(self.schedule(self.timings.amen));
            }
        }
    }

    fn finish_ceremony(&mut self, transition: &mut Transition) {
        self.dialogue = None;
        self.current_line = None;
        self.change_phase(DirectorPhase::Idle, transition);
        // Invalidate anything still in flight for the finished ceremony.
        self.epoch += 1;
        transition.wake = None;

        if let Some(record) = self.active.take() {
            transition.events.push(DirectorEvent::CeremonyCompleted {
                id: record.id(),
                attendees: record.attendees(),
            });
            self.history.push_front(record);
        }
        self.evaluate_into(transition);
    }

    fn change_phase(&mut self, to: DirectorPhase, transition: &mut Transition) {
        let from = std::mem::replace(&mut self.phase, to);
        transition
            .events
            .push(DirectorEvent::PhaseChanged { from, to });
    }

    fn schedule(&mut self, after: Duration) -> WakeRequest {
        self.epoch += 1;
        WakeRequest {
            epoch: self.epoch,
            after,
        }
    }
}

impl Default for CeremonyDirector {
    fn default() -> Self {
        Self::new(CeremonyTimings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PendingRecord, Timestamp};

    const TWELVE_WORDS: &str = "one two three four five six seven eight nine ten eleven twelve";

    fn record(id: u64, eulogy: &str) -> FuneralRecord {
        PendingRecord {
            id: RecordId(id),
            name: format!("Subject {id}"),
            cause: "Boredom".to_string(),
            created_at: Timestamp::from_millis(id),
        }
        .complete(eulogy.to_string())
    }

    fn phase_changes(events: &[DirectorEvent]) -> Vec<(DirectorPhase, DirectorPhase)> {
        events
            .iter()
            .filter_map(|event| match event {
                DirectorEvent::PhaseChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    /// Fires wake-ups until the director stops asking for one.
    fn run_to_rest(director: &mut CeremonyDirector, mut wake: Option<WakeRequest>) -> Vec<DirectorEvent> {
        let mut events = Vec::new();
        while let Some(request) = wake {
            let transition = director.on_wake(request.epoch);
            events.extend(transition.events);
            wake = transition.wake;
        }
        events
    }

    #[test]
    fn enqueue_while_idle_promotes_immediately() {
        let mut director = CeremonyDirector::default();
        let transition = director.enqueue(record(1, TWELVE_WORDS));

        assert_eq!(director.phase(), DirectorPhase::Preaching);
        assert_eq!(director.active().map(|r| r.id()), Some(RecordId(1)));
        assert_eq!(director.queue().len(), 0);
        assert_eq!(director.current_line(), Some("one two three four..."));
        assert_eq!(
            transition.wake.map(|w| w.after),
            Some(CeremonyTimings::DEFAULT_CHUNK_DWELL)
        );
        assert_eq!(
            phase_changes(&transition.events),
            [(DirectorPhase::Idle, DirectorPhase::Preaching)]
        );
    }

    #[test]
    fn each_promotion_dequeues_exactly_the_head() {
        let mut director = CeremonyDirector::default();
        let _ = director.enqueue(record(1, "a"));
        let transition = director.enqueue(record(2, "b"));

        assert_eq!(director.active().map(|r| r.id()), Some(RecordId(1)));
        assert_eq!(director.queue().map(|r| r.id()).collect::<Vec<_>>(), [RecordId(2)]);
        let started = transition
            .events
            .iter()
            .filter(|e| matches!(e, DirectorEvent::CeremonyStarted { .. }))
            .count();
        assert_eq!(started, 0);
    }

    #[test]
    fn ceremony_walks_every_phase_then_lands_in_history() {
        let mut director = CeremonyDirector::default();
        let transition = director.enqueue(record(1, TWELVE_WORDS));
        let mut events = transition.events;
        events.extend(run_to_rest(&mut director, transition.wake));

        assert_eq!(
            phase_changes(&events),
            [
                (DirectorPhase::Idle, DirectorPhase::Preaching),
                (DirectorPhase::Preaching, DirectorPhase::Amen),
                (DirectorPhase::Amen, DirectorPhase::Burial),
                (DirectorPhase::Burial, DirectorPhase::Idle),
            ]
        );
        let lines: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                DirectorEvent::DialogueLine { index, total, .. } => Some((*index, *total)),
                _ => None,
            })
            .collect();
        assert_eq!(lines, [(0, 3), (1, 3), (2, 3)]);

        assert_eq!(director.phase(), DirectorPhase::Idle);
        assert!(director.active().is_none());
        assert!(director.current_line().is_none());
        assert_eq!(director.history().next().map(|r| r.id()), Some(RecordId(1)));
    }

    #[test]
    fn dwell_times_follow_the_configured_timings() {
        let mut director = CeremonyDirector::default();
        let mut wake = director.enqueue(record(1, "short eulogy")).wake;
        let mut waits = Vec::new();
        while let Some(request) = wake {
            waits.push((director.phase(), request.after));
            wake = director.on_wake(request.epoch).wake;
        }

        assert_eq!(
            waits,
            [
                (DirectorPhase::Preaching, CeremonyTimings::DEFAULT_CHUNK_DWELL),
                (DirectorPhase::Amen, CeremonyTimings::DEFAULT_AMEN),
                (DirectorPhase::Burial, CeremonyTimings::DEFAULT_BURIAL),
            ]
        );
    }

    #[test]
    fn stale_wake_is_ignored() {
        let mut director = CeremonyDirector::default();
        let first = director.enqueue(record(1, TWELVE_WORDS)).wake.unwrap();
        let second = director.on_wake(first.epoch).wake.unwrap();
        assert_eq!(director.current_line(), Some("...five six seven eight..."));

        let replay = director.on_wake(first.epoch);
        assert!(replay.is_empty());
        assert_eq!(director.current_line(), Some("...five six seven eight..."));
        assert_eq!(director.epoch(), second.epoch);
    }

    #[test]
    fn re_evaluation_mid_sermon_does_not_restart_dialogue() {
        let mut director = CeremonyDirector::default();
        let first = director.enqueue(record(1, TWELVE_WORDS)).wake.unwrap();
        let _ = director.on_wake(first.epoch);
        let epoch = director.epoch();

        assert!(director.evaluate().is_empty());
        let _ = director.enqueue(record(2, "x"));

        assert_eq!(director.dialogue().map(|c| c.delivered()), Some(2));
        assert_eq!(director.epoch(), epoch);
        assert_eq!(director.active().map(|r| r.id()), Some(RecordId(1)));
    }

    #[test]
    fn waiting_record_is_promoted_as_soon_as_burial_ends() {
        let mut director = CeremonyDirector::default();
        let mut wake = director.enqueue(record(1, "first")).wake;
        let _ = director.enqueue(record(2, "second"));

        // Preaching -> Amen -> Burial.
        for _ in 0..2 {
            wake = director.on_wake(wake.unwrap().epoch).wake;
        }
        assert_eq!(director.phase(), DirectorPhase::Burial);

        let transition = director.on_wake(wake.unwrap().epoch);
        assert_eq!(
            phase_changes(&transition.events),
            [
                (DirectorPhase::Burial, DirectorPhase::Idle),
                (DirectorPhase::Idle, DirectorPhase::Preaching),
            ]
        );
        assert_eq!(director.phase(), DirectorPhase::Preaching);
        assert_eq!(director.active().map(|r| r.id()), Some(RecordId(2)));
        assert_eq!(director.history().map(|r| r.id()).collect::<Vec<_>>(), [RecordId(1)]);
        assert!(transition.wake.is_some());
    }

    #[test]
    fn history_is_newest_first() {
        let mut director = CeremonyDirector::default();
        let wake = director.enqueue(record(1, "first")).wake;
        let _ = director.enqueue(record(2, "second"));
        run_to_rest(&mut director, wake);

        assert_eq!(
            director.history().map(|r| r.id()).collect::<Vec<_>>(),
            [RecordId(2), RecordId(1)]
        );
    }

    #[test]
    fn respects_count_only_during_a_ceremony() {
        let mut director = CeremonyDirector::default();
        assert_eq!(director.pay_respects(), None);

        let wake = director.enqueue(record(1, "gone")).wake;
        assert_eq!(
            director.pay_respects(),
            Some(DirectorEvent::RespectsPaid {
                id: RecordId(1),
                attendees: 1
            })
        );
        let _ = director.pay_respects();

        let events = run_to_rest(&mut director, wake);
        assert!(events.contains(&DirectorEvent::CeremonyCompleted {
            id: RecordId(1),
            attendees: 2
        }));
        assert_eq!(director.history().next().map(|r| r.attendees()), Some(2));
        assert_eq!(director.pay_respects(), None);
    }

    #[test]
    fn blank_eulogy_goes_straight_to_amen() {
        let mut director = CeremonyDirector::default();
        let blank = FuneralRecord::with_raw_eulogy(RecordId(1), "  ");

        let transition = director.enqueue(blank);
        assert_eq!(director.phase(), DirectorPhase::Amen);
        assert_eq!(
            transition.wake.map(|w| w.after),
            Some(CeremonyTimings::DEFAULT_AMEN)
        );
    }
}
