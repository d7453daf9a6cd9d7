//! The authored chapel-and-graveyard layout that ships with the game.
use crate::state::GridCell;

use super::{GameMap, Interactable, InteractableKind, MapBuilder, MapError, TileKind};

pub const CHAPEL_WIDTH: u32 = 20;
pub const CHAPEL_HEIGHT: u32 = 15;

/// Paired chairs `(row, col)` facing the altar.
const CHAIRS: [(i32, i32); 8] = [
    (7, 3),
    (7, 4),
    (7, 8),
    (7, 9),
    (9, 3),
    (9, 4),
    (9, 8),
    (9, 9),
];

/// Graveyard tombstones `(col, row)`.
const TOMBSTONES: [(i32, i32); 10] = [
    (13, 3),
    (13, 6),
    (15, 3),
    (15, 6),
    (17, 4),
    (17, 8),
    (12, 12),
    (14, 13),
    (16, 13),
    (18, 12),
];

impl GameMap {
    /// Walled chapel on the west side of a grassy graveyard.
    pub fn chapel() -> Result<Self, MapError> {
        let mut map = MapBuilder::new(CHAPEL_WIDTH, CHAPEL_HEIGHT, TileKind::Grass)?;

        map.room(GridCell::new(2, 2), GridCell::new(10, 11), TileKind::Floor)?
            .fill(GridCell::new(6, 3), GridCell::new(6, 10), TileKind::Carpet)?
            .place(GridCell::new(6, 11), TileKind::Door)?
            .fill(GridCell::new(6, 12), GridCell::new(6, 14), TileKind::Path)?
            .place(GridCell::new(5, 3), TileKind::Altar)?
            .place(GridCell::new(7, 3), TileKind::Altar)?
            .place(GridCell::new(3, 3), TileKind::Candle)?
            .place(GridCell::new(9, 3), TileKind::Candle)?;

        map.interactable(
            GridCell::new(6, 4),
            Interactable::new("priest", InteractableKind::Priest)
                .with_message("I manage the queue."),
        )?
        .interactable(
            GridCell::new(6, 6),
            Interactable::new("coffin", InteractableKind::Coffin)
                .with_message("The coffin is empty. For now."),
        )?
        .place_interactable(
            GridCell::new(3, 10),
            TileKind::Desk,
            Interactable::new("receptionist", InteractableKind::Receptionist)
                .with_message("Applications here."),
        )?
        .interactable(
            GridCell::new(9, 10),
            Interactable::new("notice_board", InteractableKind::NoticeBoard)
                .with_message("History"),
        )?;

        for (row, col) in CHAIRS {
            map.place_interactable(
                GridCell::new(col, row),
                TileKind::Chair,
                Interactable::new(format!("chair_{row}_{col}"), InteractableKind::Chair),
            )?;
        }

        for (col, row) in TOMBSTONES {
            map.place_interactable(
                GridCell::new(col, row),
                TileKind::Tombstone,
                Interactable::new(format!("tombstone_{row}_{col}"), InteractableKind::Tombstone),
            )?;
        }

        map.place(GridCell::new(18, 1), TileKind::Tree)?
            .place(GridCell::new(1, 13), TileKind::Tree)?
            .place(GridCell::new(12, 9), TileKind::Flower)?
            .place_interactable(
                GridCell::new(15, 10),
                TileKind::Water,
                Interactable::new("fountain", InteractableKind::Fountain)
                    .with_message("The water whispers of those who came before."),
            )?
            .spawn(GridCell::new(6, 9))?;

        map.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapel_builds_with_expected_landmarks() {
        let map = GameMap::chapel().unwrap();

        assert_eq!(map.dimensions().width, CHAPEL_WIDTH);
        assert_eq!(map.dimensions().height, CHAPEL_HEIGHT);
        assert_eq!(map.tile_at(2, 2), TileKind::Wall);
        assert_eq!(map.tile_at(6, 11), TileKind::Door);
        assert_eq!(map.tile_at(6, 9), TileKind::Carpet);
        assert!(!map.is_blocking(map.spawn()));

        let kinds: Vec<_> = map.interactables().map(|(_, obj)| obj.kind).collect();
        assert_eq!(
            kinds.iter().filter(|k| **k == InteractableKind::Chair).count(),
            CHAIRS.len()
        );
        assert_eq!(
            kinds.iter().filter(|k| **k == InteractableKind::Tombstone).count(),
            TOMBSTONES.len()
        );
        assert_eq!(
            map.interactable(GridCell::new(6, 4)).map(|obj| obj.kind),
            Some(InteractableKind::Priest)
        );
    }
}
