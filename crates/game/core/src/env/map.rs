use std::collections::BTreeMap;

use crate::state::GridCell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, cell: GridCell) -> bool {
        cell.col >= 0
            && cell.row >= 0
            && cell.col < self.width as i32
            && cell.row < self.height as i32
    }

    pub(crate) fn index(&self, cell: GridCell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.row as usize * self.width as usize + cell.col as usize)
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Terrain and furniture classes for static map tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    Floor,
    Grass,
    Path,
    Carpet,
    Door,
    Altar,
    Chair,
    Flower,
    Candle,
    Wall,
    Desk,
    Tree,
    Tombstone,
    Water,
    /// Everything outside the grid.
    Void,
}

impl TileKind {
    pub const fn is_blocking(self) -> bool {
        matches!(
            self,
            TileKind::Wall
                | TileKind::Desk
                | TileKind::Tree
                | TileKind::Tombstone
                | TileKind::Water
                | TileKind::Void
        )
    }
}

/// Closed set of things the interact key can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InteractableKind {
    Chair,
    Priest,
    Receptionist,
    NoticeBoard,
    Coffin,
    Tombstone,
    Fountain,
}

/// Static, keyed object offering a discrete action when approached.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interactable {
    pub id: String,
    pub kind: InteractableKind,
    pub message: Option<String>,
}

impl Interactable {
    pub fn new(id: impl Into<String>, kind: InteractableKind) -> Self {
        Self {
            id: id.into(),
            kind,
            message: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Immutable tile grid plus the interactable registry.
///
/// Built once through [`super::MapBuilder`]; nothing mutates it afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameMap {
    dimensions: MapDimensions,
    tiles: Vec<TileKind>,
    interactables: BTreeMap<GridCell, Interactable>,
    spawn: GridCell,
}

impl GameMap {
    pub(crate) fn from_parts(
        dimensions: MapDimensions,
        tiles: Vec<TileKind>,
        interactables: BTreeMap<GridCell, Interactable>,
        spawn: GridCell,
    ) -> Self {
        Self {
            dimensions,
            tiles,
            interactables,
            spawn,
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    /// Tile lookup; anything outside the grid reads as [`TileKind::Void`].
    pub fn tile_at(&self, col: i32, row: i32) -> TileKind {
        self.tile(GridCell::new(col, row))
    }

    pub fn tile(&self, cell: GridCell) -> TileKind {
        self.dimensions
            .index(cell)
            .and_then(|index| self.tiles.get(index).copied())
            .unwrap_or(TileKind::Void)
    }

    pub fn is_blocking(&self, cell: GridCell) -> bool {
        self.tile(cell).is_blocking()
    }

    pub fn interactable(&self, cell: GridCell) -> Option<&Interactable> {
        self.interactables.get(&cell)
    }

    /// Registry in row-major cell order.
    pub fn interactables(&self) -> impl Iterator<Item = (GridCell, &Interactable)> + '_ {
        self.interactables.iter().map(|(cell, obj)| (*cell, obj))
    }

    /// Cell the player starts on.
    pub fn spawn(&self) -> GridCell {
        self.spawn
    }
}
