//! Collectible sushi
//!
//! Three tiers with fixed scores, drawn with a 6/24/70 weighting.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// Item tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Rare, highest score
    Toro,
    /// Common, mid score
    Salmon,
    /// Everything else
    Ebi,
}

impl ItemKind {
    /// Map a roll in `0..100` to a tier
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            0..6 => ItemKind::Toro,
            6..30 => ItemKind::Salmon,
            _ => ItemKind::Ebi,
        }
    }

    /// Weighted draw from the shared stream
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::from_roll(rng.random_range(0..100))
    }

    pub fn score(&self) -> u64 {
        match self {
            ItemKind::Toro => 2500,
            ItemKind::Salmon => 500,
            ItemKind::Ebi => 100,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Toro => "toro",
            ItemKind::Salmon => "salmon",
            ItemKind::Ebi => "ebi",
        }
    }
}

/// A collectible on the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    pub area: Rect,
}

impl Item {
    pub fn new(id: u32, kind: ItemKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            kind,
            area: Rect::at(pos, size),
        }
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.kind.score()
    }
}
