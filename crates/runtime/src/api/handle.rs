//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! feeding input to the simulation or streaming events from specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use funeral_core::{Direction, InteractionOutcome, RecordId};

use super::errors::{Result, RuntimeError};
use super::snapshot::SimSnapshot;
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Start holding a movement key.
    ///
    /// Pressing while seated stands the player up (unless a modal is open).
    pub async fn press(&self, direction: Direction) -> Result<()> {
        self.request(|reply| Command::Press { direction, reply })
            .await
    }

    /// Stop holding a movement key.
    pub async fn release(&self, direction: Direction) -> Result<()> {
        self.request(|reply| Command::Release { direction, reply })
            .await
    }

    /// One interact key press. Ignored while a modal is open.
    pub async fn interact(&self) -> Result<InteractionOutcome> {
        self.request(|reply| Command::Interact { reply }).await
    }

    /// Close the open modal; returns `false` when none was open.
    pub async fn close_modal(&self) -> Result<bool> {
        self.request(|reply| Command::CloseModal { reply }).await
    }

    /// Apply for a funeral.
    ///
    /// Returns as soon as the application is accepted; the record joins the
    /// queue once its eulogy has been generated (or replaced by the fallback).
    pub async fn submit_funeral(
        &self,
        name: impl Into<String>,
        cause: impl Into<String>,
    ) -> Result<RecordId> {
        let name = name.into();
        let cause = cause.into();
        self.request(|reply| Command::SubmitFuneral { name, cause, reply })
            .await?
    }

    /// Query the current simulation state (read-only snapshot)
    pub async fn snapshot(&self) -> Result<SimSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Ceremony` - Queue, phase and dialogue changes
    /// - `Topic::Actor` - Sitting, standing and proximity hints
    /// - `Topic::Ui` - Modals and notifications
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use funeral_runtime::Topic;
    ///
    /// let mut ceremony_rx = handle.subscribe(Topic::Ceremony);
    /// while let Ok(event) = ceremony_rx.recv().await {
    ///     // Render dialogue lines
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Ask the worker to stop. Used by [`crate::Runtime::shutdown`].
    pub(crate) async fn stop_worker(&self) -> Result<()> {
        self.command_tx
            .send(Command::Shutdown)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }
}
