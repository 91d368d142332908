//! Grid-aligned spawn placement
//!
//! Positions snap to `cell_size` cells. A handful of redraws steer clear of
//! occupied spots; after that the last draw is accepted.

use glam::Vec2;
use rand::Rng;

use super::geometry::{Rect, clamp_origin};
use crate::Tuning;

/// Uniformly random cell origin, with the box clamped inside the field
pub fn random_cell(rng: &mut impl Rng, tuning: &Tuning, size: Vec2) -> Vec2 {
    let (cols, rows) = tuning.grid_cells();
    let col = rng.random_range(0..cols);
    let row = rng.random_range(0..rows);
    let origin = Vec2::new(col as f32, row as f32) * tuning.cell_size;
    clamp_origin(origin, size, tuning.bounds())
}

/// Random cell whose box does not overlap anything in `occupied`, giving up
/// after `tuning.spawn_attempts` draws
pub fn free_cell(rng: &mut impl Rng, tuning: &Tuning, size: Vec2, occupied: &[Rect]) -> Vec2 {
    let mut pos = random_cell(rng, tuning, size);
    for _ in 1..tuning.spawn_attempts.max(1) {
        let area = Rect::at(pos, size);
        if !occupied.iter().any(|o| o.intersects(&area)) {
            return pos;
        }
        pos = random_cell(rng, tuning, size);
    }
    pos
}
