//! Deterministic simulation rules for the chapel.
//!
//! `funeral-core` holds everything that does not need a clock or a thread:
//! the tile map and interactable registry, per-frame movement, interaction
//! resolution, submission validation and the ceremony director. The runtime
//! crate owns timing and drives these APIs from a single worker.
pub mod action;
pub mod ceremony;
pub mod config;
pub mod env;
pub mod state;

pub use action::{
    Direction, HeldKeys, InteractionOutcome, StepOutcome, Submission, SubmissionError,
};
pub use ceremony::{CeremonyDirector, DirectorEvent, DirectorPhase, Transition, WakeRequest};
pub use config::{CeremonyTimings, GameConfig};
pub use env::{GameMap, Interactable, InteractableKind, MapBuilder, MapDimensions, MapError, TileKind};
pub use state::{
    Actor, Facing, FuneralRecord, GridCell, PendingRecord, PixelPos, RecordId, Timestamp,
};
