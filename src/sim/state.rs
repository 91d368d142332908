//! Session state and core simulation types
//!
//! Everything a session mutates lives in `GameState`; nothing is global, so
//! any number of sessions can run side by side.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::items::{Item, ItemKind};
use super::player::Player;
use super::seeker::{Seeker, SeekerParams};
use super::spawn::free_cell;
use super::tick::seeker_population;
use crate::Tuning;
use crate::consts::MAX_PENDING_EVENTS;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player was caught; no more ticks run
    GameOver,
}

/// Notifications for the host (HUD, audio cues, game-over screen)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged { score: u64 },
    ItemPickedUp { id: u32, kind: ItemKind, score: u64 },
    SeekerSpawned { id: u32, pos: Vec2 },
    SeekerDiscovered { id: u32 },
    HideoutReached,
    PlayerCaptured { id: u32 },
    /// Final score handed off for an optional leaderboard submission
    SessionEnded { final_score: u64 },
}

/// The cardboard box the player can dive into while escaping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hideout {
    pub area: Rect,
    /// Shown once the player has been flushed out
    pub revealed: bool,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed
    pub seed: u64,
    pub tuning: Tuning,
    /// The single random stream every draw comes from
    pub rng: Pcg32,
    /// Score (only item pickups raise it)
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: Player,
    /// Seekers (sorted by id)
    pub seekers: Vec<Seeker>,
    /// Items on the field (sorted by id)
    pub items: Vec<Item>,
    pub hideout: Hideout,
    /// Events since the host last drained them. The host should call
    /// `drain_events` every frame; past `MAX_PENDING_EVENTS` the oldest
    /// are dropped.
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// New session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// New session: player centred, first seeker placed, items stocked.
    ///
    /// Tuning that fails `Tuning::validate` is replaced by the defaults.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Rejected session tuning, using defaults: {}", e);
                Tuning::default()
            }
        };
        let player = Player::new(&tuning);
        let hideout = Hideout {
            area: Rect::at(Vec2::ZERO, tuning.hideout_size),
            revealed: false,
        };
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            player,
            seekers: Vec::new(),
            items: Vec::new(),
            hideout,
            events: Vec::new(),
            next_id: 1,
            tuning,
        };

        state.relocate_hideout();
        state.run_difficulty();
        state.top_up_items();

        log::info!(
            "Session started: seed={}, seekers={}, items={}",
            seed,
            state.seekers.len(),
            state.items.len()
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Hand the queued events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop the oldest events beyond `MAX_PENDING_EVENTS`
    pub(crate) fn trim_events(&mut self) {
        let excess = self.events.len().saturating_sub(MAX_PENDING_EVENTS);
        if excess > 0 {
            log::warn!("Event queue not drained, dropping {} oldest", excess);
            self.events.drain(..excess);
        }
    }

    /// Areas a fresh spawn should stay off
    fn occupied_areas(&self) -> Vec<Rect> {
        std::iter::once(self.player.hit_area())
            .chain(self.items.iter().map(|item| item.area))
            .collect()
    }

    /// Restock items up to the tuned target. Returns how many were added.
    pub fn top_up_items(&mut self) -> usize {
        let missing = self.tuning.item_target.saturating_sub(self.items.len());
        for _ in 0..missing {
            let occupied = self.occupied_areas();
            let kind = ItemKind::random(&mut self.rng);
            let size = self.tuning.item_size;
            let pos = free_cell(&mut self.rng, &self.tuning, size, &occupied);
            let id = self.next_entity_id();
            self.items.push(Item::new(id, kind, pos, size));
        }
        missing
    }

    /// Add `count` patrolling seekers at free cells
    pub fn spawn_seekers(&mut self, count: usize) {
        let params = SeekerParams::from(&self.tuning);
        for _ in 0..count {
            let occupied = self.occupied_areas();
            let pos = free_cell(&mut self.rng, &self.tuning, params.size, &occupied);
            let id = self.next_entity_id();
            let seeker = Seeker::new(id, pos, params, &mut self.rng);
            log::info!(
                "Seeker {} spawned at ({}, {}), score {}",
                id,
                seeker.pos.x,
                seeker.pos.y,
                self.score
            );
            self.events.push(GameEvent::SeekerSpawned { id, pos: seeker.pos });
            self.seekers.push(seeker);
        }
    }

    /// Grow the seeker population to whatever the score has earned.
    /// Returns how many were added.
    pub fn run_difficulty(&mut self) -> usize {
        let current = self.seekers.len();
        let target = seeker_population(
            current,
            self.score,
            self.tuning.seeker_threshold,
            self.tuning.max_seekers,
        );
        let added = target.saturating_sub(current);
        self.spawn_seekers(added);
        added
    }

    /// Move the hideout to a new random cell and hide it
    pub fn relocate_hideout(&mut self) {
        let occupied = [self.player.hit_area()];
        let size = self.tuning.hideout_size;
        let pos = free_cell(&mut self.rng, &self.tuning, size, &occupied);
        self.hideout.area = Rect::at(pos, size);
        self.hideout.revealed = false;
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.seekers.sort_by_key(|s| s.id);
        self.items.sort_by_key(|i| i.id);
    }
}
