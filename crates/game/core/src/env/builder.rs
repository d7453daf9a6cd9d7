use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::state::GridCell;

use super::{GameMap, Interactable, MapDimensions, MapError, TileKind};

/// Assembles a [`GameMap`] from rectangles and single placements.
///
/// Later writes overwrite earlier tiles; interactable cells may only be
/// claimed once.
#[derive(Clone, Debug)]
pub struct MapBuilder {
    dimensions: MapDimensions,
    tiles: Vec<TileKind>,
    interactables: BTreeMap<GridCell, Interactable>,
    spawn: GridCell,
}

impl MapBuilder {
    /// Starts a grid filled with `base`.
    pub fn new(width: u32, height: u32, base: TileKind) -> Result<Self, MapError> {
        let dimensions = MapDimensions::new(width, height);
        if dimensions.area() == 0 {
            return Err(MapError::EmptyDimensions { width, height });
        }

        Ok(Self {
            dimensions,
            tiles: vec![base; dimensions.area()],
            interactables: BTreeMap::new(),
            spawn: GridCell::new(0, 0),
        })
    }

    /// Fills the inclusive rectangle spanned by two corner cells.
    pub fn fill(&mut self, from: GridCell, to: GridCell, kind: TileKind) -> Result<&mut Self, MapError> {
        self.check(from)?;
        self.check(to)?;

        for row in from.row.min(to.row)..=from.row.max(to.row) {
            for col in from.col.min(to.col)..=from.col.max(to.col) {
                self.set(GridCell::new(col, row), kind);
            }
        }
        Ok(self)
    }

    /// Fills a rectangle with `floor` and rings it with walls.
    pub fn room(&mut self, from: GridCell, to: GridCell, floor: TileKind) -> Result<&mut Self, MapError> {
        self.fill(from, to, TileKind::Wall)?;
        let (left, right) = (from.col.min(to.col), from.col.max(to.col));
        let (top, bottom) = (from.row.min(to.row), from.row.max(to.row));
        if right - left >= 2 && bottom - top >= 2 {
            self.fill(
                GridCell::new(left + 1, top + 1),
                GridCell::new(right - 1, bottom - 1),
                floor,
            )?;
        }
        Ok(self)
    }

    /// Sets a single tile.
    pub fn place(&mut self, cell: GridCell, kind: TileKind) -> Result<&mut Self, MapError> {
        self.check(cell)?;
        self.set(cell, kind);
        Ok(self)
    }

    /// Registers an interactable without touching the tile underneath.
    pub fn interactable(
        &mut self,
        cell: GridCell,
        interactable: Interactable,
    ) -> Result<&mut Self, MapError> {
        self.check(cell)?;
        match self.interactables.entry(cell) {
            Entry::Occupied(existing) => Err(MapError::DuplicateInteractable {
                cell,
                existing: existing.get().kind,
            }),
            Entry::Vacant(slot) => {
                slot.insert(interactable);
                Ok(self)
            }
        }
    }

    /// Sets a tile and registers an interactable on it.
    pub fn place_interactable(
        &mut self,
        cell: GridCell,
        kind: TileKind,
        interactable: Interactable,
    ) -> Result<&mut Self, MapError> {
        self.interactable(cell, interactable)?;
        self.set(cell, kind);
        Ok(self)
    }

    pub fn spawn(&mut self, cell: GridCell) -> Result<&mut Self, MapError> {
        self.check(cell)?;
        self.spawn = cell;
        Ok(self)
    }

    pub fn build(self) -> Result<GameMap, MapError> {
        let map = GameMap::from_parts(self.dimensions, self.tiles, self.interactables, self.spawn);
        if map.is_blocking(map.spawn()) {
            return Err(MapError::BlockedSpawn { cell: map.spawn() });
        }
        Ok(map)
    }

    fn check(&self, cell: GridCell) -> Result<(), MapError> {
        if self.dimensions.contains(cell) {
            Ok(())
        } else {
            Err(MapError::OutOfBounds {
                cell,
                width: self.dimensions.width,
                height: self.dimensions.height,
            })
        }
    }

    fn set(&mut self, cell: GridCell, kind: TileKind) {
        if let Some(index) = self.dimensions.index(cell) {
            self.tiles[index] = kind;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::InteractableKind;

    #[test]
    fn room_rings_floor_with_walls() {
        let mut builder = MapBuilder::new(6, 5, TileKind::Grass).unwrap();
        builder
            .room(GridCell::new(1, 1), GridCell::new(4, 3), TileKind::Floor)
            .unwrap();
        builder.spawn(GridCell::new(0, 0)).unwrap();
        let map = builder.build().unwrap();

        assert_eq!(map.tile_at(1, 1), TileKind::Wall);
        assert_eq!(map.tile_at(4, 3), TileKind::Wall);
        assert_eq!(map.tile_at(2, 2), TileKind::Floor);
        assert_eq!(map.tile_at(3, 2), TileKind::Floor);
        assert_eq!(map.tile_at(5, 4), TileKind::Grass);
    }

    #[test]
    fn out_of_bounds_reads_as_blocking_void() {
        let map = MapBuilder::new(3, 3, TileKind::Floor).unwrap().build().unwrap();

        assert_eq!(map.tile_at(-1, 0), TileKind::Void);
        assert_eq!(map.tile_at(0, 3), TileKind::Void);
        assert_eq!(map.tile_at(3, 0), TileKind::Void);
        assert!(map.is_blocking(GridCell::new(5, 5)));
        assert!(!map.is_blocking(GridCell::new(2, 2)));
    }

    #[test]
    fn duplicate_interactable_cell_is_rejected() {
        let mut builder = MapBuilder::new(4, 4, TileKind::Floor).unwrap();
        let cell = GridCell::new(2, 1);
        builder
            .place_interactable(
                cell,
                TileKind::Chair,
                Interactable::new("chair_1_2", InteractableKind::Chair),
            )
            .unwrap();

        let err = builder
            .interactable(cell, Interactable::new("priest", InteractableKind::Priest))
            .unwrap_err();
        assert_eq!(
            err,
            MapError::DuplicateInteractable {
                cell,
                existing: InteractableKind::Chair,
            }
        );
    }

    #[test]
    fn placements_outside_grid_fail() {
        let mut builder = MapBuilder::new(4, 4, TileKind::Floor).unwrap();
        assert!(matches!(
            builder.place(GridCell::new(4, 0), TileKind::Wall),
            Err(MapError::OutOfBounds { .. })
        ));
        assert!(matches!(
            MapBuilder::new(0, 3, TileKind::Floor),
            Err(MapError::EmptyDimensions { .. })
        ));
    }

    #[test]
    fn spawn_on_wall_is_rejected() {
        let mut builder = MapBuilder::new(3, 3, TileKind::Wall).unwrap();
        builder.spawn(GridCell::new(1, 1)).unwrap();
        assert_eq!(
            builder.build().unwrap_err(),
            MapError::BlockedSpawn {
                cell: GridCell::new(1, 1)
            }
        );
    }

    #[test]
    fn registry_iterates_row_major() {
        let mut builder = MapBuilder::new(5, 5, TileKind::Floor).unwrap();
        builder
            .interactable(GridCell::new(3, 2), Interactable::new("b", InteractableKind::Fountain))
            .unwrap()
            .interactable(GridCell::new(4, 0), Interactable::new("a", InteractableKind::Fountain))
            .unwrap()
            .interactable(GridCell::new(0, 2), Interactable::new("c", InteractableKind::Fountain))
            .unwrap();
        let map = builder.build().unwrap();

        let ids: Vec<_> = map.interactables().map(|(_, obj)| obj.id.as_str()).collect();
        assert_eq!(ids, ["a", "c", "b"]);
    }
}
