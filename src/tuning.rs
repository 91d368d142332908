//! Game balance and field configuration
//!
//! Loaded from JSON (any missing field falls back to its default).

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a tuning file can be rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Data-driven balance for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    /// Spawn grid cell size
    pub cell_size: f32,

    // === Player ===
    pub player_speed: f32,
    pub player_size: Vec2,
    /// Hit area while escaping (the hiding pose is shorter)
    pub escape_size: Vec2,
    /// Side of the square around the target that counts as "arrived"
    pub arrival_band: f32,

    // === Seekers ===
    pub seeker_size: Vec2,
    pub alarm_size: Vec2,
    /// Alarm indicator offset from the seeker origin
    pub alarm_offset: Vec2,
    pub patrol_speed: f32,
    pub pursuit_speed: f32,
    pub patrol_distance: f32,
    pub vision_length: f32,
    pub arrival_tolerance: f32,
    pub facing_deadzone: f32,

    // === Items / hideout ===
    pub item_target: usize,
    pub item_size: Vec2,
    pub hideout_size: Vec2,

    // === Difficulty ===
    /// Score needed for the second seeker; doubles for each one after
    pub seeker_threshold: u64,
    pub max_seekers: usize,
    pub spawn_attempts: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            cell_size: CHIP_SIZE,

            player_speed: PLAYER_SPEED,
            player_size: Vec2::splat(CHIP_SIZE),
            escape_size: Vec2::new(CHIP_SIZE, ESCAPE_HEIGHT),
            arrival_band: ARRIVAL_BAND,

            seeker_size: Vec2::new(CHIP_SIZE, SEEKER_HEIGHT),
            alarm_size: Vec2::new(ALARM_WIDTH, CHIP_SIZE),
            alarm_offset: Vec2::new(ALARM_OFFSET_X, 0.0),
            patrol_speed: PATROL_SPEED,
            pursuit_speed: PURSUIT_SPEED,
            patrol_distance: PATROL_DISTANCE,
            vision_length: VISION_LENGTH,
            arrival_tolerance: ARRIVAL_TOLERANCE,
            facing_deadzone: FACING_DEADZONE,

            item_target: ITEM_TARGET,
            item_size: Vec2::new(ITEM_WIDTH, CHIP_SIZE),
            hideout_size: Vec2::new(HIDEOUT_WIDTH, CHIP_SIZE),

            seeker_threshold: SEEKER_THRESHOLD,
            max_seekers: MAX_SEEKERS,
            spawn_attempts: SPAWN_ATTEMPTS,
        }
    }
}

impl Tuning {
    /// Field dimensions as a vector
    #[inline]
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height)
    }

    /// Number of whole grid cells along each axis (at least one)
    pub fn grid_cells(&self) -> (u32, u32) {
        let cols = (self.field_width / self.cell_size).floor().max(1.0) as u32;
        let rows = (self.field_height / self.cell_size).floor().max(1.0) as u32;
        (cols, rows)
    }

    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a tuning file, falling back to defaults on any problem
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be positive and finite",
                })
            }
        }

        positive("cell_size", self.cell_size)?;
        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        if self.field_width < self.cell_size || self.field_height < self.cell_size {
            return Err(TuningError::Invalid {
                field: "field_width/field_height",
                reason: "field must hold at least one grid cell",
            });
        }
        positive("player_speed", self.player_speed)?;
        positive("patrol_speed", self.patrol_speed)?;
        positive("pursuit_speed", self.pursuit_speed)?;
        positive("patrol_distance", self.patrol_distance)?;
        positive("vision_length", self.vision_length)?;
        positive("arrival_band", self.arrival_band)?;
        for (field, size) in [
            ("player_size", self.player_size),
            ("escape_size", self.escape_size),
            ("seeker_size", self.seeker_size),
            ("item_size", self.item_size),
            ("hideout_size", self.hideout_size),
        ] {
            positive(field, size.min_element())?;
        }
        // A full patrol step past the leg end must still land within tolerance
        if self.arrival_tolerance.is_nan() || self.arrival_tolerance < self.patrol_speed / 2.0 {
            return Err(TuningError::Invalid {
                field: "arrival_tolerance",
                reason: "must be at least half the patrol speed",
            });
        }
        if self.max_seekers == 0 {
            return Err(TuningError::Invalid {
                field: "max_seekers",
                reason: "at least one seeker is always present",
            });
        }
        let (cols, rows) = self.grid_cells();
        let cells = u64::from(cols).saturating_mul(u64::from(rows));
        if self.item_target == 0 || self.item_target as u64 > cells {
            return Err(TuningError::Invalid {
                field: "item_target",
                reason: "must be between one and the number of grid cells",
            });
        }
        if self.seeker_threshold == 0 {
            return Err(TuningError::Invalid {
                field: "seeker_threshold",
                reason: "must be positive",
            });
        }
        Ok(())
    }
}
