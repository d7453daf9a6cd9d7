//! Event types for different topics.
//!
//! Ceremony events are the director's own [`funeral_core::DirectorEvent`];
//! the player and presentation topics are defined here.

use serde::{Deserialize, Serialize};

use funeral_core::{FuneralRecord, GridCell, InteractableKind, PixelPos};

/// Interactable currently highlighted by the proximity hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintTarget {
    pub cell: GridCell,
    pub id: String,
    pub kind: InteractableKind,
}

/// Events about the player actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActorEvent {
    SatDown { cell: GridCell },
    /// Left a chair; `position` is the nudged position.
    StoodUp { position: PixelPos },
    /// Nearest interactable within the hint radius changed.
    HintChanged { hint: Option<HintTarget> },
}

/// Modal dialogs that suspend movement while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModalKind {
    Submission,
    NoticeBoard,
}

/// Content handed to the presentation layer when a modal opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalView {
    Submission,
    /// Read-only copy of the queue (oldest first) and history (newest first).
    NoticeBoard {
        queue: Vec<FuneralRecord>,
        history: Vec<FuneralRecord>,
    },
}

impl ModalView {
    pub fn kind(&self) -> ModalKind {
        match self {
            ModalView::Submission => ModalKind::Submission,
            ModalView::NoticeBoard { .. } => ModalKind::NoticeBoard,
        }
    }
}

/// Presentation-facing events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiEvent {
    ModalOpened { view: ModalView },
    ModalClosed { modal: ModalKind },
    NotificationShown { text: String },
    NotificationCleared,
}
