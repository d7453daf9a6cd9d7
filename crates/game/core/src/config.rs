use std::time::Duration;

/// Simulation constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Pixels travelled per frame while a direction is held.
    pub move_speed: f32,
    /// Radius (pixels) within which the interact key resolves a target.
    pub interact_radius: f32,
    /// Radius (pixels) for the passive "nearest interactable" hint.
    pub hint_radius: f32,
    /// How long a transient notification stays visible.
    pub notification_duration: Duration,
    pub ceremony: CeremonyTimings,
}

impl GameConfig {
    // ===== geometry =====
    /// Edge length of one grid cell, in pixels.
    pub const TILE_SIZE: f32 = 48.0;
    /// Width of the actor's collision footprint, centred inside the tile box.
    pub const HITBOX_WIDTH: f32 = 24.0;
    /// Gap between the footprint's bottom edge and the sprite box bottom.
    pub const FEET_BOTTOM_INSET: f32 = 4.0;
    /// Vertical lift applied when snapping onto a chair.
    pub const SIT_LIFT: f32 = 10.0;
    /// Downward nudge applied when leaving a chair.
    pub const STAND_NUDGE: f32 = 10.0;

    // ===== submission limits =====
    pub const MAX_NAME_CHARS: usize = 25;
    pub const MAX_CAUSE_CHARS: usize = 40;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MOVE_SPEED: f32 = 4.0;
    pub const DEFAULT_INTERACT_RADIUS: f32 = 60.0;
    pub const DEFAULT_HINT_RADIUS: f32 = 80.0;
    pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_secs(3);

    pub fn new() -> Self {
        Self {
            move_speed: Self::DEFAULT_MOVE_SPEED,
            interact_radius: Self::DEFAULT_INTERACT_RADIUS,
            hint_radius: Self::DEFAULT_HINT_RADIUS,
            notification_duration: Self::DEFAULT_NOTIFICATION_DURATION,
            ceremony: CeremonyTimings::default(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Dwell times for the ceremony director's timer chain.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CeremonyTimings {
    /// Words per dialogue chunk while preaching.
    pub words_per_chunk: usize,
    /// How long each dialogue chunk stays on screen.
    pub chunk_dwell: Duration,
    pub amen: Duration,
    pub burial: Duration,
}

impl CeremonyTimings {
    pub const DEFAULT_WORDS_PER_CHUNK: usize = 4;
    pub const DEFAULT_CHUNK_DWELL: Duration = Duration::from_millis(2500);
    pub const DEFAULT_AMEN: Duration = Duration::from_secs(4);
    pub const DEFAULT_BURIAL: Duration = Duration::from_secs(4);
}

impl Default for CeremonyTimings {
    fn default() -> Self {
        Self {
            words_per_chunk: Self::DEFAULT_WORDS_PER_CHUNK,
            chunk_dwell: Self::DEFAULT_CHUNK_DWELL,
            amen: Self::DEFAULT_AMEN,
            burial: Self::DEFAULT_BURIAL,
        }
    }
}
