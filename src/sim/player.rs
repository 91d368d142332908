//! The player avatar
//!
//! One logical entity with two poses. The presenter picks a sprite from
//! `status`; the simulation only ever looks at `hit_area()`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, clamp_origin, intersects};
use super::motion::step_toward;
use crate::Tuning;

/// Which pose the avatar is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// Walking normally (or standing)
    #[default]
    Moving,
    /// Spotted and running for the hideout
    Escaping,
}

/// The player-controlled character
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left of the active hit area (shared by both poses)
    pub pos: Vec2,
    pub speed: f32,
    pub status: PlayerStatus,
    target: Option<Vec2>,
    moving_size: Vec2,
    escape_size: Vec2,
    arrival_band: f32,
    bounds: Vec2,
}

impl Player {
    /// Spawn the player centred in the field
    pub fn new(tuning: &Tuning) -> Self {
        let bounds = tuning.bounds();
        Self {
            pos: clamp_origin((bounds - tuning.player_size) / 2.0, tuning.player_size, bounds),
            speed: tuning.player_speed,
            status: PlayerStatus::Moving,
            target: None,
            moving_size: tuning.player_size,
            escape_size: tuning.escape_size,
            arrival_band: tuning.arrival_band,
            bounds,
        }
    }

    /// Spawn at a specific origin (tests, scripted hosts)
    pub fn at(tuning: &Tuning, pos: Vec2) -> Self {
        let mut player = Self::new(tuning);
        player.pos = clamp_origin(pos, player.size(), player.bounds);
        player
    }

    /// Point the avatar at a new destination, replacing any pending one
    pub fn set_target(&mut self, x: f32, y: f32) {
        self.target = Some(Vec2::new(x, y).clamp(Vec2::ZERO, self.bounds));
    }

    /// Pending destination, if any (the presenter draws a marker here)
    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    /// Advance one tick toward the pending target
    pub fn tick(&mut self) {
        let Some(target) = self.target else {
            return;
        };
        if let Some(step) = step_toward(self.pos, target, self.speed) {
            self.pos = clamp_origin(step.pos, self.size(), self.bounds);
        }
        if intersects(&self.hit_area(), &Rect::centered(target, self.arrival_band)) {
            self.target = None;
        }
    }

    /// Switch pose. The origin carries over so the hit area does not jump;
    /// returning to `Moving` also drops any pending target.
    pub fn set_status(&mut self, status: PlayerStatus) {
        self.status = status;
        if status == PlayerStatus::Moving {
            self.target = None;
        }
        // The new pose may be taller than the old one
        self.pos = clamp_origin(self.pos, self.size(), self.bounds);
    }

    /// Whether seekers can notice the player. Escaping always counts.
    pub fn is_moving(&self) -> bool {
        self.target.is_some() || self.status == PlayerStatus::Escaping
    }

    #[inline]
    pub fn is_escaping(&self) -> bool {
        self.status == PlayerStatus::Escaping
    }

    /// Size of the active pose
    pub fn size(&self) -> Vec2 {
        match self.status {
            PlayerStatus::Moving => self.moving_size,
            PlayerStatus::Escaping => self.escape_size,
        }
    }

    pub fn hit_area(&self) -> Rect {
        Rect::at(self.pos, self.size())
    }
}
