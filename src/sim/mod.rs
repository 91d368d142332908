//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per call, driven by the host's clock
//! - One seeded RNG stream per session
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod geometry;
pub mod items;
pub mod motion;
pub mod player;
pub mod seeker;
pub mod spawn;
pub mod state;
pub mod tick;

pub use geometry::{Rect, clamp_origin, intersects, within};
pub use items::{Item, ItemKind};
pub use motion::{Step, step_toward};
pub use player::{Player, PlayerStatus};
pub use seeker::{Facing, PatrolDirection, Seeker, SeekerMode, SeekerParams, facing_for};
pub use state::{GameEvent, GamePhase, GameState, Hideout};
pub use tick::{TickInput, seeker_population, tick};
