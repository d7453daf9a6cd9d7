//! Per-frame movement integration with axis-separated collision.
use bitflags::bitflags;

use crate::config::GameConfig;
use crate::env::GameMap;
use crate::state::{Actor, Facing, GridCell, PixelPos};

bitflags! {
    /// Directional inputs currently held down.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct HeldKeys: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

/// One of the four movement keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub const fn key(self) -> HeldKeys {
        match self {
            Direction::Up => HeldKeys::UP,
            Direction::Down => HeldKeys::DOWN,
            Direction::Left => HeldKeys::LEFT,
            Direction::Right => HeldKeys::RIGHT,
        }
    }
}

impl HeldKeys {
    /// Unit-speed displacement for the held keys; opposite keys cancel and
    /// diagonals are normalised so the magnitude is always `speed`.
    pub fn displacement(self, speed: f32) -> (f32, f32) {
        let mut dx = 0.0_f32;
        let mut dy = 0.0_f32;
        if self.contains(HeldKeys::UP) {
            dy -= 1.0;
        }
        if self.contains(HeldKeys::DOWN) {
            dy += 1.0;
        }
        if self.contains(HeldKeys::LEFT) {
            dx -= 1.0;
        }
        if self.contains(HeldKeys::RIGHT) {
            dx += 1.0;
        }

        if dx == 0.0 && dy == 0.0 {
            return (0.0, 0.0);
        }
        let length = dx.hypot(dy);
        (dx / length * speed, dy / length * speed)
    }
}

/// Result of one movement frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    /// Modal open or actor seated; nothing was touched.
    Suspended,
    /// No direction held.
    Idle,
    /// At least one axis committed.
    Moved { from: PixelPos, to: PixelPos },
    /// Both axes rejected by collision.
    Blocked,
}

/// Whether the actor's feet footprint at `position` overlaps a blocking cell.
///
/// The footprint is horizontally inset to [`GameConfig::HITBOX_WIDTH`] and
/// covers the lower half of the sprite box; its four corners are sampled.
pub fn collides(map: &GameMap, position: PixelPos) -> bool {
    let inset = (GameConfig::TILE_SIZE - GameConfig::HITBOX_WIDTH) / 2.0;
    let left = position.x + inset;
    let right = position.x + GameConfig::TILE_SIZE - inset;
    let top = position.y + GameConfig::TILE_SIZE / 2.0;
    let bottom = position.y + GameConfig::TILE_SIZE - GameConfig::FEET_BOTTOM_INSET;

    [
        PixelPos::new(left, top),
        PixelPos::new(right, top),
        PixelPos::new(left, bottom),
        PixelPos::new(right, bottom),
    ]
    .into_iter()
    .any(|corner| map.is_blocking(GridCell::containing(corner)))
}

/// Facing implied by an intended displacement, or `None` when standing still.
fn facing_for(dx: f32, dy: f32) -> Option<Facing> {
    if dx.abs() > dy.abs() {
        Some(if dx > 0.0 { Facing::Right } else { Facing::Left })
    } else if dy != 0.0 {
        Some(if dy > 0.0 { Facing::Down } else { Facing::Up })
    } else {
        None
    }
}

/// Advances the actor by one frame.
///
/// X is resolved first against the current Y, then Y against the possibly
/// updated X, so an actor pushing diagonally into a wall slides along it.
pub fn step(
    actor: &mut Actor,
    held: HeldKeys,
    map: &GameMap,
    speed: f32,
    suspended: bool,
) -> StepOutcome {
    if suspended || actor.sitting {
        return StepOutcome::Suspended;
    }

    let (dx, dy) = held.displacement(speed);
    let Some(facing) = facing_for(dx, dy) else {
        actor.moving = false;
        return StepOutcome::Idle;
    };
    actor.facing = facing;
    actor.moving = true;

    let from = actor.position;
    let mut to = from;

    let candidate = PixelPos::new(from.x + dx, from.y);
    if !collides(map, candidate) {
        to.x = candidate.x;
    }
    let candidate = PixelPos::new(to.x, from.y + dy);
    if !collides(map, candidate) {
        to.y = candidate.y;
    }

    if to == from {
        return StepOutcome::Blocked;
    }
    actor.position = to;
    StepOutcome::Moved { from, to }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{MapBuilder, TileKind};

    const SPEED: f32 = GameConfig::DEFAULT_MOVE_SPEED;

    fn open_field() -> GameMap {
        MapBuilder::new(10, 10, TileKind::Floor).unwrap().build().unwrap()
    }

    /// Floor with a vertical wall along column 5.
    fn walled_field() -> GameMap {
        let mut builder = MapBuilder::new(10, 10, TileKind::Floor).unwrap();
        builder
            .fill(GridCell::new(5, 0), GridCell::new(5, 9), TileKind::Wall)
            .unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn single_key_moves_at_full_speed_on_one_axis() {
        let map = open_field();
        let mut actor = Actor::spawn_at(GridCell::new(2, 2));
        let start = actor.position;

        let outcome = step(&mut actor, HeldKeys::RIGHT, &map, SPEED, false);

        assert!(matches!(outcome, StepOutcome::Moved { .. }));
        assert_eq!(actor.position.x - start.x, SPEED);
        assert_eq!(actor.position.y - start.y, 0.0);
        assert_eq!(actor.facing, Facing::Right);
        assert!(actor.moving);
    }

    #[test]
    fn diagonal_is_normalised() {
        let map = open_field();
        let mut actor = Actor::spawn_at(GridCell::new(2, 2));
        let start = actor.position;

        step(&mut actor, HeldKeys::RIGHT | HeldKeys::DOWN, &map, SPEED, false);

        let expected = SPEED / 2.0_f32.sqrt();
        assert!((actor.position.x - start.x - expected).abs() < 1e-4);
        assert!((actor.position.y - start.y - expected).abs() < 1e-4);
        // Equal components: vertical wins.
        assert_eq!(actor.facing, Facing::Down);
    }

    #[test]
    fn opposite_keys_cancel() {
        let map = open_field();
        let mut actor = Actor::spawn_at(GridCell::new(2, 2));
        actor.facing = Facing::Left;

        let outcome = step(&mut actor, HeldKeys::LEFT | HeldKeys::RIGHT, &map, SPEED, false);

        assert_eq!(outcome, StepOutcome::Idle);
        assert_eq!(actor.facing, Facing::Left);
        assert!(!actor.moving);
    }

    #[test]
    fn wall_blocks_its_axis_but_allows_sliding() {
        let map = walled_field();
        // Footprint right edge sits at x = 4*48 + 36 = 228, wall starts at 240.
        let mut actor = Actor::spawn_at(GridCell::new(4, 4));
        actor.position.x += 10.0;
        let start = actor.position;

        // 238 + 4 would cross into the wall column.
        let outcome = step(&mut actor, HeldKeys::RIGHT, &map, SPEED, false);
        assert_eq!(outcome, StepOutcome::Blocked);
        assert_eq!(actor.position, start);
        assert_eq!(actor.facing, Facing::Right);

        step(&mut actor, HeldKeys::RIGHT | HeldKeys::DOWN, &map, SPEED, false);
        assert_eq!(actor.position.x, start.x);
        assert!(actor.position.y > start.y);
    }

    #[test]
    fn map_edge_blocks_like_a_wall() {
        let map = open_field();
        let mut actor = Actor::spawn_at(GridCell::new(0, 0));

        // Left inset is 12 px, so 3 frames at 4 px reach the edge.
        for _ in 0..3 {
            step(&mut actor, HeldKeys::LEFT, &map, SPEED, false);
        }
        assert_eq!(actor.position.x, -12.0);
        assert_eq!(
            step(&mut actor, HeldKeys::LEFT, &map, SPEED, false),
            StepOutcome::Blocked
        );
        assert_eq!(actor.position.x, -12.0);
    }

    #[test]
    fn upper_body_may_overlap_walls() {
        let mut builder = MapBuilder::new(6, 6, TileKind::Floor).unwrap();
        builder.place(GridCell::new(2, 1), TileKind::Wall).unwrap();
        let map = builder.build().unwrap();

        // Sprite box top at y = 76 overlaps the wall row, feet do not.
        let actor_pos = GridCell::new(2, 2).origin().offset(0.0, -20.0);
        assert!(!collides(&map, actor_pos));
        assert!(collides(&map, actor_pos.offset(0.0, -8.0)));
    }

    #[test]
    fn suspended_or_seated_actor_is_frozen() {
        let map = open_field();
        let mut actor = Actor::spawn_at(GridCell::new(2, 2));
        let start = actor.position;

        assert_eq!(
            step(&mut actor, HeldKeys::UP, &map, SPEED, true),
            StepOutcome::Suspended
        );
        actor.sit_on(GridCell::new(2, 2));
        let seated = actor.position;
        assert_eq!(
            step(&mut actor, HeldKeys::UP, &map, SPEED, false),
            StepOutcome::Suspended
        );
        assert_eq!(actor.position, seated);
        assert_ne!(seated, start);
    }
}
