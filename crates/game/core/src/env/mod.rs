//! Read-only world data.
//!
//! The spatial model is a fixed rectangular tile grid plus a registry of
//! interactables keyed by cell. Movement and interaction resolution both query
//! it; nothing mutates it once [`MapBuilder::build`] returns.
mod builder;
mod error;
mod layout;
mod map;

pub use builder::MapBuilder;
pub use error::MapError;
pub use layout::{CHAPEL_HEIGHT, CHAPEL_WIDTH};
pub use map::{GameMap, Interactable, InteractableKind, MapDimensions, TileKind};
