//! Fixed timestep simulation tick
//!
//! Core game loop that advances one session by one frame. Step order is
//! fixed; later steps see what earlier ones did this tick.

use glam::Vec2;

use super::player::PlayerStatus;
use super::seeker::SeekerMode;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer/touch destination for the player
    pub pointer: Option<Vec2>,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the session by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    step(state, input);
    state.trim_events();
}

fn step(state: &mut GameState, input: &TickInput) {
    // Don't tick once the session has ended
    if state.phase == GamePhase::GameOver {
        return;
    }

    let pointer = if input.idle_mode {
        autopilot_target(state)
    } else {
        input.pointer
    };
    if let Some(p) = pointer {
        state.player.set_target(p.x, p.y);
    }

    state.time_ticks += 1;

    // 1. Player
    state.player.tick();

    // 2. Hideout
    if state.player.is_escaping() && state.player.hit_area().intersects(&state.hideout.area) {
        reach_hideout(state);
    }

    // 3. Seekers
    if let Some(seeker_id) = update_seekers(state) {
        capture(state, seeker_id);
        return;
    }

    // 4. Pickups
    collect_items(state);

    // 5. Restock
    state.top_up_items();

    // 6. Difficulty
    state.run_difficulty();

    state.normalize_order();
}

/// Player made it into the box: everyone loses track and the box moves
fn reach_hideout(state: &mut GameState) {
    log::debug!("Hideout reached at tick {}", state.time_ticks);
    state.player.set_status(PlayerStatus::Moving);
    for seeker in &mut state.seekers {
        seeker.on_lost(&mut state.rng);
    }
    state.relocate_hideout();
    state.events.push(GameEvent::HideoutReached);
}

/// Move every seeker and apply discovery. Returns the id of a seeker that
/// caught the player, if any.
fn update_seekers(state: &mut GameState) -> Option<u32> {
    let GameState {
        seekers,
        player,
        rng,
        events,
        hideout,
        time_ticks,
        ..
    } = state;

    for seeker in seekers.iter_mut() {
        match seeker.mode {
            SeekerMode::Pursuing => {
                seeker.tick_pursuit(&player.hit_area());
                if seeker.hit_area().intersects(&player.hit_area()) {
                    return Some(seeker.id);
                }
            }
            SeekerMode::Patrolling => {
                seeker.tick_patrol(rng);
                if player.is_moving() && seeker.sees(&player.hit_area()) {
                    log::debug!("Seeker {} spotted the player at tick {}", seeker.id, time_ticks);
                    seeker.on_discover();
                    events.push(GameEvent::SeekerDiscovered { id: seeker.id });
                    if player.status == PlayerStatus::Moving {
                        player.set_status(PlayerStatus::Escaping);
                        hideout.revealed = true;
                    }
                }
            }
        }
    }
    None
}

/// End the session
fn capture(state: &mut GameState, seeker_id: u32) {
    log::info!(
        "Player caught by seeker {} at tick {}, final score {}",
        seeker_id,
        state.time_ticks,
        state.score
    );
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::PlayerCaptured { id: seeker_id });
    state.events.push(GameEvent::SessionEnded {
        final_score: state.score,
    });
}

/// Remove every item under the player and bank its score
fn collect_items(state: &mut GameState) {
    let area = state.player.hit_area();
    let GameState {
        items,
        events,
        score,
        ..
    } = state;

    let before = *score;
    items.retain(|item| {
        if !item.area.intersects(&area) {
            return true;
        }
        *score += item.score();
        log::debug!("Picked up {} (+{})", item.kind.as_str(), item.score());
        events.push(GameEvent::ItemPickedUp {
            id: item.id,
            kind: item.kind,
            score: item.score(),
        });
        false
    });

    if *score != before {
        events.push(GameEvent::ScoreChanged { score: *score });
    }
}

/// Seeker population earned by `score`.
///
/// The first seeker is free; each further one needs the previous threshold
/// doubled (`T`, `2T`, `4T`, ...). Never shrinks below `current` and never
/// grows past `cap`.
pub fn seeker_population(current: usize, score: u64, threshold: u64, cap: usize) -> usize {
    if current >= cap {
        return current;
    }
    let mut next = current.max(1);
    while next < cap {
        let needed = u32::try_from(next - 1)
            .ok()
            .and_then(|shift| 1u64.checked_shl(shift))
            .and_then(|factor| threshold.checked_mul(factor))
            .unwrap_or(u64::MAX);
        if score < needed {
            break;
        }
        next += 1;
    }
    next.min(cap)
}

/// Demo autopilot: run for the box while escaping, otherwise go for the
/// nearest item
fn autopilot_target(state: &GameState) -> Option<Vec2> {
    if state.player.is_escaping() {
        return Some(state.hideout.area.center());
    }
    let here = state.player.hit_area().center();
    state
        .items
        .iter()
        .map(|item| item.area.center())
        .min_by(|a, b| {
            a.distance_squared(here)
                .partial_cmp(&b.distance_squared(here))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Rect;
    use crate::sim::items::{Item, ItemKind};
    use crate::sim::player::Player;
    use crate::sim::seeker::{Seeker, SeekerParams};
    use proptest::prelude::*;

    const T: u64 = 1000;
    const M: usize = 10;

    /// Session with no seekers or items in the way, player parked at `pos`
    fn quiet_state(pos: Vec2) -> GameState {
        let mut state = GameState::new(12345);
        state.seekers.clear();
        state.items.clear();
        state.player = Player::at(&state.tuning, pos);
        state.hideout.area = Rect::new(1200.0, 0.0, 42.72, 48.0);
        state.drain_events();
        state
    }

    /// Patrolling seeker whose sensor covers `area`
    fn seeker_watching(state: &mut GameState, area: Rect) -> Seeker {
        let params = SeekerParams::from(&state.tuning);
        let id = state.next_entity_id();
        loop {
            // Re-roll legs until the sensor points at the player
            let seeker = Seeker::new(id, Vec2::new(area.x - 60.0, area.y), params, &mut state.rng);
            if seeker.sees(&area) {
                return seeker;
            }
        }
    }

    #[test]
    fn test_population_ladder() {
        assert_eq!(seeker_population(1, 0, T, M), 1);
        assert_eq!(seeker_population(1, 999, T, M), 1);
        assert_eq!(seeker_population(1, T, T, M), 2);
        assert_eq!(seeker_population(1, 2 * T - 1, T, M), 2);
        assert_eq!(seeker_population(1, 2 * T, T, M), 3);
        assert_eq!(seeker_population(1, 4 * T, T, M), 4);
        assert_eq!(seeker_population(3, 4 * T, T, M), 4);
    }

    #[test]
    fn test_population_first_seeker_is_free() {
        assert_eq!(seeker_population(0, 0, T, M), 1);
    }

    #[test]
    fn test_population_never_shrinks() {
        assert_eq!(seeker_population(5, 0, T, M), 5);
    }

    #[test]
    fn test_population_capped_at_huge_scores() {
        assert_eq!(seeker_population(1, u64::MAX, T, M), M);
        assert_eq!(seeker_population(1, u64::MAX, u64::MAX, 200), 200);
        assert_eq!(seeker_population(1, u64::MAX, T, 1), 1);
    }

    proptest! {
        #[test]
        fn prop_population_bounded(
            current in 0usize..12,
            score in any::<u64>(),
            threshold in 1u64..1_000_000,
            cap in 1usize..80,
        ) {
            let n = seeker_population(current, score, threshold, cap);
            prop_assert!(n >= current.max(1).min(cap) || n == current);
            prop_assert!(n <= cap.max(current));
        }
    }

    #[test]
    fn test_scheduler_runs_in_tick() {
        let mut state = quiet_state(Vec2::new(600.0, 300.0));
        state.seekers.clear();
        state.score = 2 * T;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.seekers.len(), 3);
        assert_eq!(state.items.len(), 3);
    }

    #[test]
    fn test_player_advances_on_tick() {
        let mut state = quiet_state(Vec2::new(100.0, 100.0));
        let input = TickInput {
            pointer: Some(Vec2::new(200.0, 100.0)),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!((state.player.pos.x - 104.5).abs() < 1e-4);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_discovery_flips_player_to_escaping() {
        let mut state = quiet_state(Vec2::new(400.0, 300.0));
        state.player.set_target(400.0, 600.0);
        let area = state.player.hit_area();
        let seeker = seeker_watching(&mut state, area);
        let id = seeker.id;
        state.seekers.push(seeker);

        tick(&mut state, &TickInput::default());

        let seeker = &state.seekers[0];
        assert_eq!(seeker.mode, SeekerMode::Pursuing);
        assert!(seeker.vision_area().is_none());
        assert!(seeker.alarm_area().is_some());
        assert_eq!(state.player.status, PlayerStatus::Escaping);
        assert!(state.hideout.revealed);
        assert!(state.events.contains(&GameEvent::SeekerDiscovered { id }));
    }

    #[test]
    fn test_standing_player_is_not_discovered() {
        let mut state = quiet_state(Vec2::new(400.0, 300.0));
        let area = state.player.hit_area();
        let seeker = seeker_watching(&mut state, area);
        state.seekers.push(seeker);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.seekers[0].mode, SeekerMode::Patrolling);
        assert_eq!(state.player.status, PlayerStatus::Moving);
    }

    #[test]
    fn test_escaping_player_is_rediscovered() {
        let mut state = quiet_state(Vec2::new(400.0, 300.0));
        state.player.set_status(PlayerStatus::Escaping);
        let area = state.player.hit_area();
        let seeker = seeker_watching(&mut state, area);
        state.seekers.push(seeker);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.seekers[0].mode, SeekerMode::Pursuing);
        assert_eq!(state.player.status, PlayerStatus::Escaping);
    }

    #[test]
    fn test_hideout_resets_everyone() {
        let mut state = quiet_state(Vec2::new(400.0, 300.0));
        let params = SeekerParams::from(&state.tuning);
        for pos in [Vec2::new(1000.0, 600.0), Vec2::new(50.0, 600.0)] {
            let id = state.next_entity_id();
            let mut seeker = Seeker::new(id, pos, params, &mut state.rng);
            seeker.on_discover();
            state.seekers.push(seeker);
        }
        state.player.set_status(PlayerStatus::Escaping);
        state.hideout.area = Rect::new(410.0, 310.0, 42.72, 48.0);
        state.hideout.revealed = true;
        let old_hideout = state.hideout.area;

        tick(&mut state, &TickInput::default());

        assert_eq!(state.player.status, PlayerStatus::Moving);
        assert!(state.seekers.iter().all(|s| s.mode == SeekerMode::Patrolling));
        assert!(state.seekers.iter().all(|s| s.vision_area().is_some()));
        assert!(state.seekers.iter().all(|s| s.speed == state.tuning.patrol_speed));
        assert_ne!(state.hideout.area, old_hideout);
        assert!(!state.hideout.revealed);
        assert!(state.events.contains(&GameEvent::HideoutReached));
    }

    #[test]
    fn test_hideout_ignored_while_moving() {
        let mut state = quiet_state(Vec2::new(400.0, 300.0));
        state.hideout.area = Rect::new(410.0, 310.0, 42.72, 48.0);
        let old_hideout = state.hideout.area;

        tick(&mut state, &TickInput::default());

        assert_eq!(state.hideout.area, old_hideout);
        assert!(!state.events.contains(&GameEvent::HideoutReached));
    }

    #[test]
    fn test_capture_ends_session() {
        let mut state = quiet_state(Vec2::new(400.0, 300.0));
        let params = SeekerParams::from(&state.tuning);
        let id = state.next_entity_id();
        let mut seeker = Seeker::new(id, Vec2::new(420.0, 300.0), params, &mut state.rng);
        seeker.on_discover();
        state.seekers.push(seeker);
        state.score = 700;

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::PlayerCaptured { id }));
        assert!(
            state
                .events
                .contains(&GameEvent::SessionEnded { final_score: 700 })
        );

        // Finished sessions no longer advance
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_patrolling_seeker_does_not_capture() {
        let mut state = quiet_state(Vec2::new(400.0, 300.0));
        let params = SeekerParams::from(&state.tuning);
        let id = state.next_entity_id();
        state
            .seekers
            .push(Seeker::new(id, Vec2::new(420.0, 300.0), params, &mut state.rng));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_pickup_scores_and_leaves_gap_until_top_up() {
        let mut state = quiet_state(Vec2::new(400.0, 300.0));
        let size = state.tuning.item_size;
        let id = state.next_entity_id();
        state
            .items
            .push(Item::new(id, ItemKind::Salmon, Vec2::new(410.0, 310.0), size));
        for pos in [Vec2::new(48.0, 48.0), Vec2::new(960.0, 48.0)] {
            let other = state.next_entity_id();
            state.items.push(Item::new(other, ItemKind::Ebi, pos, size));
        }
        state.score = 250;

        collect_items(&mut state);
        assert_eq!(state.score, 750);
        assert_eq!(state.items.len(), 2);
        assert!(state.items.iter().all(|i| i.id != id));
        assert!(state.events.contains(&GameEvent::ItemPickedUp {
            id,
            kind: ItemKind::Salmon,
            score: 500
        }));
        assert!(state.events.contains(&GameEvent::ScoreChanged { score: 750 }));

        state.top_up_items();
        assert_eq!(state.items.len(), 3);
    }

    #[test]
    fn test_pickup_through_tick() {
        let mut state = quiet_state(Vec2::new(400.0, 300.0));
        let size = state.tuning.item_size;
        let id = state.next_entity_id();
        state
            .items
            .push(Item::new(id, ItemKind::Toro, Vec2::new(410.0, 310.0), size));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 2500);
        assert!(state.items.iter().all(|i| i.id != id));
        // Restocked in the same tick
        assert_eq!(state.items.len(), state.tuning.item_target);
        // 2500 >= 2T earns two more seekers on top of the free one
        assert_eq!(state.seekers.len(), 3);
    }

    #[test]
    fn test_idle_mode_heads_for_items() {
        let mut state = quiet_state(Vec2::new(400.0, 300.0));
        let size = state.tuning.item_size;
        let id = state.next_entity_id();
        state
            .items
            .push(Item::new(id, ItemKind::Ebi, Vec2::new(700.0, 300.0), size));
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(state.player.pos.x > 400.0);
    }

    #[test]
    fn test_undrained_events_stay_bounded() {
        let mut state = quiet_state(Vec2::new(600.0, 300.0));
        for score in 0..300 {
            state.events.push(GameEvent::ScoreChanged { score });
        }

        // The only new event is the free seeker joining
        tick(&mut state, &TickInput::default());

        assert_eq!(state.events.len(), crate::consts::MAX_PENDING_EVENTS);
        assert_eq!(state.events[0], GameEvent::ScoreChanged { score: 45 });
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::SeekerSpawned { .. })
        ));
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..300 {
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.seekers.len(), b.seekers.len());
        assert_eq!(a.events, b.events);
    }
}
