//! Sushi Chase - a top-down stealth/chase arcade game
//!
//! Core modules:
//! - `sim`: Per-tick simulation (movement, seeker AI, collisions, spawning)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 30;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Base sprite/grid unit, everything is sized off this
    pub const CHIP_SIZE: f32 = 48.0;

    /// Default play field
    pub const FIELD_WIDTH: f32 = 1280.0;
    pub const FIELD_HEIGHT: f32 = 720.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 4.5;
    pub const ESCAPE_HEIGHT: f32 = 0.76 * CHIP_SIZE;
    /// Arrival band is the middle 20% of the target marker
    pub const ARRIVAL_BAND: f32 = 0.2 * CHIP_SIZE;

    /// Seeker defaults
    pub const SEEKER_HEIGHT: f32 = 1.75 * CHIP_SIZE;
    pub const PATROL_SPEED: f32 = 2.0;
    pub const PURSUIT_SPEED: f32 = 4.0;
    pub const PATROL_DISTANCE: f32 = 300.0;
    pub const VISION_LENGTH: f32 = 300.0;
    pub const ARRIVAL_TOLERANCE: f32 = 2.0;
    pub const FACING_DEADZONE: f32 = 0.01;
    pub const ALARM_WIDTH: f32 = CHIP_SIZE / 3.0;
    pub const ALARM_OFFSET_X: f32 = 2.0 * CHIP_SIZE / 3.0;

    /// Item defaults
    pub const ITEM_WIDTH: f32 = CHIP_SIZE * 5.0 / 7.0;
    pub const ITEM_TARGET: usize = 3;

    /// Hideout (cardboard box)
    pub const HIDEOUT_WIDTH: f32 = 0.89 * CHIP_SIZE;

    /// Difficulty ramp
    pub const SEEKER_THRESHOLD: u64 = 1000;
    pub const MAX_SEEKERS: usize = 10;

    /// Bounded retries when looking for a free spawn cell
    pub const SPAWN_ATTEMPTS: u32 = 8;

    /// Undrained events kept per session; older ones are dropped first
    pub const MAX_PENDING_EVENTS: usize = 256;
}

/// Unit heading from `from` toward `to`, via the angle between them.
/// Returns `None` for a zero-length offset.
#[inline]
pub fn heading(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    if delta.length_squared() <= f32::EPSILON * f32::EPSILON {
        return None;
    }
    Some(Vec2::from_angle(delta.y.atan2(delta.x)))
}
