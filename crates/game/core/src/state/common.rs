use std::cmp::Ordering;
use std::fmt;

use crate::config::GameConfig;

/// Discrete grid coordinate expressed as column and row.
///
/// Cells order row-major (by row, then column); the interactable registry
/// iterates in this order, which also decides nearest-interactable ties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCell {
    pub col: i32,
    pub row: i32,
}

impl GridCell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Returns the cell containing a continuous pixel coordinate.
    pub fn containing(point: PixelPos) -> Self {
        Self {
            col: (point.x / GameConfig::TILE_SIZE).floor() as i32,
            row: (point.y / GameConfig::TILE_SIZE).floor() as i32,
        }
    }

    /// Top-left corner of the cell in pixel space.
    pub fn origin(self) -> PixelPos {
        PixelPos::new(
            self.col as f32 * GameConfig::TILE_SIZE,
            self.row as f32 * GameConfig::TILE_SIZE,
        )
    }

    pub fn center(self) -> PixelPos {
        let half = GameConfig::TILE_SIZE / 2.0;
        self.origin().offset(half, half)
    }
}

impl Ord for GridCell {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

impl PartialOrd for GridCell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Continuous position in pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelPos {
    pub x: f32,
    pub y: f32,
}

impl PixelPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance(self, other: PixelPos) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Unique identifier of a funeral record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordId(pub u64);

impl RecordId {
    /// Reserved for the opening ceremony seeded at startup.
    pub const OPENING: Self = Self(0);
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Wall-clock instant in milliseconds since the Unix epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }
}
