//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use funeral_core::DirectorEvent;

use super::types::{ActorEvent, UiEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Queue, phase and dialogue changes from the ceremony director
    Ceremony,
    /// Sitting, standing and proximity hints for the player
    Actor,
    /// Modals and transient notifications
    Ui,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Ceremony, Topic::Actor, Topic::Ui];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Ceremony(DirectorEvent),
    Actor(ActorEvent),
    Ui(UiEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Ceremony(_) => Topic::Ceremony,
            Event::Actor(_) => Topic::Actor,
            Event::Ui(_) => Topic::Ui,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Delivery is best-effort: publishing with no
/// subscribers is not an error, and slow receivers observe `Lagged`.
#[derive(Clone)]
pub struct EventBus {
    ceremony: broadcast::Sender<Event>,
    actor: broadcast::Sender<Event>,
    ui: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            ceremony: broadcast::channel(capacity).0,
            actor: broadcast::channel(capacity).0,
            ui: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Ceremony => &self.ceremony,
            Topic::Actor => &self.actor,
            Topic::Ui => &self.ui,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
