//! Player-driven operations: per-frame movement, interact presses and
//! funeral applications.
//!
//! - `movement`: held keys to displacement, axis-separated collision
//! - `interact`: nearest interactable within a radius, dispatch by kind
//! - `submit`: validation of a new application before any record exists
pub mod interact;
pub mod movement;
pub mod submit;

pub use interact::{InteractionOutcome, nearest_interactable, proximity_hint, resolve};
pub use movement::{Direction, HeldKeys, StepOutcome, collides, step};
pub use submit::{Submission, SubmissionError};
