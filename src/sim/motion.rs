//! Target-seeking motion shared by the player and the seekers
//!
//! One primitive: move a point toward a target at a fixed speed per tick.

use glam::Vec2;

use crate::heading;

/// Result of a single motion step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Position after the step
    pub pos: Vec2,
    /// Unit heading used for the step (feeds facing selection)
    pub heading: Vec2,
}

/// Advance `current` toward `target` by `speed` along the angle between them.
///
/// Returns `None` when `current == target` (no defined heading, treated as
/// already arrived). Otherwise the step is always a full `speed` long, even
/// when that carries past a close target; arrival is the caller's tolerance
/// check.
pub fn step_toward(current: Vec2, target: Vec2, speed: f32) -> Option<Step> {
    let heading = heading(current, target)?;
    Some(Step {
        pos: current + heading * speed,
        heading,
    })
}
