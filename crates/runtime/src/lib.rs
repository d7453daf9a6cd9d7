//! Runtime orchestration for the chapel simulation.
//!
//! This crate wires the pure rules from `funeral-core` to a clock: a single
//! worker task owns the map, the player and the ceremony director, drives
//! movement at a fixed frame rate, arms the director's timers and runs text
//! generation through a pluggable [`TextGateway`]. Consumers embed
//! [`Runtime`] and talk to it through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{
    CannedGateway, GatewayError, Result, RuntimeError, RuntimeHandle, SimSnapshot, TextGateway,
};
pub use events::{
    ActorEvent, Event, EventBus, HintTarget, ModalKind, ModalView, Topic, UiEvent,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
