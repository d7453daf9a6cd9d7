//! Read-only view of the simulation returned by [`super::RuntimeHandle::snapshot`].
use serde::{Deserialize, Serialize};

use funeral_core::{Actor, DirectorPhase, FuneralRecord, HeldKeys};

use crate::events::{HintTarget, ModalKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub actor: Actor,
    pub held: HeldKeys,
    pub phase: DirectorPhase,
    pub active: Option<FuneralRecord>,
    /// Dialogue chunk on display while preaching.
    pub current_line: Option<String>,
    /// Oldest first.
    pub queue: Vec<FuneralRecord>,
    /// Newest first.
    pub history: Vec<FuneralRecord>,
    pub modal: Option<ModalKind>,
    pub notification: Option<String>,
    pub hint: Option<HintTarget>,
    /// Submissions still waiting on the gateway.
    pub pending_submissions: usize,
}
