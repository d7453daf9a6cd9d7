use crate::config::GameConfig;

use super::{GridCell, PixelPos};

/// Cardinal facing of an actor sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

/// Continuous-space actor: position plus the flags movement and presentation
/// read every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    /// Top-left corner of the tile-sized sprite box.
    pub position: PixelPos,
    pub facing: Facing,
    /// Presentation only; never read by movement or interaction.
    pub moving: bool,
    /// Movement-locked and snapped onto a chair.
    pub sitting: bool,
}

impl Actor {
    pub fn new(position: PixelPos) -> Self {
        Self {
            position,
            facing: Facing::Down,
            moving: false,
            sitting: false,
        }
    }

    /// Places an actor with its sprite box aligned to `cell`.
    pub fn spawn_at(cell: GridCell) -> Self {
        Self::new(cell.origin())
    }

    pub fn center(&self) -> PixelPos {
        let half = GameConfig::TILE_SIZE / 2.0;
        self.position.offset(half, half)
    }

    /// Snaps onto a chair cell, slightly lifted so the sprite overlaps the seat.
    pub fn sit_on(&mut self, chair: GridCell) {
        self.sitting = true;
        self.moving = false;
        self.facing = Facing::Down;
        self.position = chair.origin().offset(0.0, -GameConfig::SIT_LIFT);
    }

    /// Leaves a chair. Returns `false` when the actor was not sitting.
    pub fn stand_up(&mut self) -> bool {
        if !self.sitting {
            return false;
        }
        self.sitting = false;
        self.position = self.position.offset(0.0, GameConfig::STAND_NUDGE);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sitting_snaps_to_chair_and_standing_nudges_out() {
        let mut actor = Actor::spawn_at(GridCell::new(1, 1));
        actor.moving = true;
        actor.facing = Facing::Left;

        actor.sit_on(GridCell::new(4, 7));
        assert!(actor.sitting);
        assert!(!actor.moving);
        assert_eq!(actor.facing, Facing::Down);
        assert_eq!(actor.position, PixelPos::new(192.0, 326.0));

        assert!(actor.stand_up());
        assert!(!actor.sitting);
        assert_eq!(actor.position, PixelPos::new(192.0, 336.0));

        // Already standing: nothing moves.
        assert!(!actor.stand_up());
        assert_eq!(actor.position, PixelPos::new(192.0, 336.0));
    }
}
