use crate::state::GridCell;

use super::InteractableKind;

/// Errors raised while assembling a [`super::GameMap`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("map dimensions {width}x{height} are empty")]
    EmptyDimensions { width: u32, height: u32 },

    #[error("cell {cell} lies outside the {width}x{height} grid")]
    OutOfBounds {
        cell: GridCell,
        width: u32,
        height: u32,
    },

    #[error("cell {cell} already holds a {existing} interactable")]
    DuplicateInteractable {
        cell: GridCell,
        existing: InteractableKind,
    },

    #[error("spawn cell {cell} is blocked")]
    BlockedSpawn { cell: GridCell },
}
