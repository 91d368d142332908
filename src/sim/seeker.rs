//! Seeker AI
//!
//! Each seeker walks straight patrol legs in a random cardinal direction
//! with a vision sensor pointing ahead. Once it spots a moving player it
//! drops the sensor, raises an alarm and chases at pursuit speed until the
//! player reaches the hideout.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, clamp_origin, within};
use super::motion::step_toward;
use crate::Tuning;

/// Behaviour state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SeekerMode {
    /// Walking patrol legs, vision sensor active
    #[default]
    Patrolling,
    /// Chasing the player, alarm shown
    Pursuing,
}

/// Sprite row the presenter should animate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Down,
    Left,
    Right,
    Up,
}

/// Cardinal direction of a patrol leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatrolDirection {
    Right,
    Left,
    Up,
    Down,
}

impl PatrolDirection {
    pub const ALL: [Self; 4] = [Self::Right, Self::Left, Self::Up, Self::Down];

    /// Uniform pick from the four directions
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Pick a facing from a unit heading.
///
/// Upward motion wins; otherwise left/right only once the horizontal
/// component clears `deadzone`, so near-vertical legs never flicker.
pub fn facing_for(heading: Vec2, deadzone: f32) -> Facing {
    if heading.y < -deadzone {
        Facing::Up
    } else if heading.x > deadzone {
        Facing::Right
    } else if heading.x < -deadzone {
        Facing::Left
    } else {
        Facing::Down
    }
}

/// Per-seeker constants lifted out of `Tuning`
#[derive(Debug, Clone, Copy)]
pub struct SeekerParams {
    pub size: Vec2,
    pub alarm_size: Vec2,
    pub alarm_offset: Vec2,
    pub patrol_speed: f32,
    pub pursuit_speed: f32,
    pub patrol_distance: f32,
    pub vision_length: f32,
    pub arrival_tolerance: f32,
    pub facing_deadzone: f32,
    pub bounds: Vec2,
}

impl From<&Tuning> for SeekerParams {
    fn from(tuning: &Tuning) -> Self {
        Self {
            size: tuning.seeker_size,
            alarm_size: tuning.alarm_size,
            alarm_offset: tuning.alarm_offset,
            patrol_speed: tuning.patrol_speed,
            pursuit_speed: tuning.pursuit_speed,
            patrol_distance: tuning.patrol_distance,
            vision_length: tuning.vision_length,
            arrival_tolerance: tuning.arrival_tolerance,
            facing_deadzone: tuning.facing_deadzone,
            bounds: tuning.bounds(),
        }
    }
}

/// A roaming enemy
#[derive(Debug, Clone)]
pub struct Seeker {
    pub id: u32,
    /// Top-left of the body
    pub pos: Vec2,
    pub speed: f32,
    pub mode: SeekerMode,
    pub facing: Facing,
    /// Direction of the current patrol leg
    pub leg: Option<PatrolDirection>,
    patrol_target: Option<Vec2>,
    vision: Rect,
    alarm: Rect,
    params: SeekerParams,
}

impl Seeker {
    /// Create a patrolling seeker with its first leg already chosen
    pub fn new(id: u32, pos: Vec2, params: SeekerParams, rng: &mut impl Rng) -> Self {
        let pos = clamp_origin(pos, params.size, params.bounds);
        let mut seeker = Self {
            id,
            pos,
            speed: params.patrol_speed,
            mode: SeekerMode::Patrolling,
            facing: Facing::Down,
            leg: None,
            patrol_target: None,
            vision: Rect::default(),
            alarm: Rect::at(pos + params.alarm_offset, params.alarm_size),
            params,
        };
        seeker.choose_leg(true, rng);
        seeker
    }

    /// Body hit area
    pub fn hit_area(&self) -> Rect {
        Rect::at(self.pos, self.params.size)
    }

    /// Vision sensor, only present while patrolling
    pub fn vision_area(&self) -> Option<Rect> {
        (self.mode == SeekerMode::Patrolling).then_some(self.vision)
    }

    /// Alarm indicator, only present while pursuing
    pub fn alarm_area(&self) -> Option<Rect> {
        (self.mode == SeekerMode::Pursuing).then_some(self.alarm)
    }

    /// Current patrol destination
    pub fn patrol_target(&self) -> Option<Vec2> {
        self.patrol_target
    }

    #[inline]
    pub fn has_discovered(&self) -> bool {
        self.mode == SeekerMode::Pursuing
    }

    /// True when the vision sensor is active and overlaps `area`
    pub fn sees(&self, area: &Rect) -> bool {
        self.vision_area().is_some_and(|vision| vision.intersects(area))
    }

    /// Pick a new patrol leg. Unless `force`d, only once the current leg's
    /// destination has been reached. Returns the new direction if one was
    /// chosen.
    pub fn choose_leg(&mut self, force: bool, rng: &mut impl Rng) -> Option<PatrolDirection> {
        if !force
            && self
                .patrol_target
                .is_some_and(|target| !within(self.pos, target, self.params.arrival_tolerance))
        {
            return None;
        }

        let direction = PatrolDirection::random(rng);
        let p = &self.params;
        let limit = (p.bounds - p.size).max(Vec2::ZERO);
        let (x, y) = (self.pos.x, self.pos.y);
        let (w, h) = (p.size.x, p.size.y);
        let (target, vision) = match direction {
            PatrolDirection::Right => (
                Vec2::new((x + p.patrol_distance).min(limit.x), y),
                Rect::new(x + w, y, p.vision_length, h),
            ),
            PatrolDirection::Left => (
                Vec2::new((x - p.patrol_distance).max(0.0), y),
                Rect::new(x - p.vision_length, y, p.vision_length, h),
            ),
            PatrolDirection::Up => (
                Vec2::new(x, (y - p.patrol_distance).max(0.0)),
                Rect::new(x, y - p.vision_length, w, p.vision_length),
            ),
            PatrolDirection::Down => (
                Vec2::new(x, (y + p.patrol_distance).min(limit.y)),
                Rect::new(x, y + h, w, p.vision_length),
            ),
        };
        self.patrol_target = Some(target);
        self.vision = vision;
        self.leg = Some(direction);
        Some(direction)
    }

    /// Switch to pursuit
    pub fn on_discover(&mut self) {
        self.mode = SeekerMode::Pursuing;
        self.speed = self.params.pursuit_speed;
    }

    /// Give up the chase and start a fresh patrol leg right away
    pub fn on_lost(&mut self, rng: &mut impl Rng) {
        self.mode = SeekerMode::Patrolling;
        self.speed = self.params.patrol_speed;
        self.choose_leg(true, rng);
    }

    /// One patrol tick: maybe pick a new leg, then walk it
    pub fn tick_patrol(&mut self, rng: &mut impl Rng) {
        self.choose_leg(false, rng);
        if let Some(target) = self.patrol_target {
            self.advance(target);
        }
    }

    /// One pursuit tick toward the target's origin
    pub fn tick_pursuit(&mut self, target_area: &Rect) {
        self.advance(target_area.origin());
    }

    /// Step the body and drag the attached sensor and alarm along
    fn advance(&mut self, target: Vec2) {
        let Some(step) = step_toward(self.pos, target, self.speed) else {
            return;
        };
        let next = clamp_origin(step.pos, self.params.size, self.params.bounds);
        let delta = next - self.pos;
        self.pos = next;
        self.vision.translate(delta);
        self.alarm.translate(delta);
        self.facing = facing_for(step.heading, self.params.facing_deadzone);
    }
}
