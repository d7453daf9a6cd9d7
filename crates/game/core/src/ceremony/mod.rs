//! Ceremony director: queue, phase machine and timed dialogue.
//!
//! The director is a plain state machine. It never sleeps; every transition
//! hands back at most one [`WakeRequest`] and the owner decides how to wait.
mod dialogue;
mod director;

pub use dialogue::{CONTINUATION_MARKER, DialogueCursor, split_into_chunks};
pub use director::{CeremonyDirector, DirectorEvent, DirectorPhase, Transition, WakeRequest};
