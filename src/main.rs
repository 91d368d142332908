//! Sushi Chase headless host
//!
//! Drives a session in demo mode on a fixed-step clock and logs the events a
//! real presenter would turn into HUD updates and audio cues.
//!
//! Usage: `sushi-chase [--tuning tuning.json] [--seed N]`

use std::path::PathBuf;

use clap::Parser;
use sushi_chase::Tuning;
use sushi_chase::consts::*;
use sushi_chase::sim::{GameEvent, GameState, TickInput, tick};

/// Simulated display refresh
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up after five minutes of play
const MAX_TICKS: u64 = 5 * 60 * SIM_HZ as u64;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON balance file; defaults are used when missing or invalid
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Session seed (wall clock when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

/// Game instance holding all state
struct Game {
    state: GameState,
    accumulator: f32,
    input: TickInput,
}

impl Game {
    fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::with_tuning(seed, tuning),
            accumulator: 0.0,
            input: TickInput {
                pointer: None,
                idle_mode: true,
            },
        }
    }

    /// Run simulation ticks for one display frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Pointer taps are one-shot
            self.input.pointer = None;
        }

        for event in self.state.drain_events() {
            report(&event);
        }
    }
}

/// Stand-in for the presentation layer's reactions
fn report(event: &GameEvent) {
    match event {
        GameEvent::ScoreChanged { score } => log::info!("Score: {}", score),
        GameEvent::ItemPickedUp { kind, score, .. } => {
            log::info!("Ate {} (+{})", kind.as_str(), score)
        }
        GameEvent::SeekerSpawned { id, pos } => {
            log::info!("Seeker {} appears at ({}, {})", id, pos.x, pos.y)
        }
        GameEvent::SeekerDiscovered { id } => log::info!("Seeker {} raises the alarm!", id),
        GameEvent::HideoutReached => log::info!("Hidden in the box, seekers lose track"),
        GameEvent::PlayerCaptured { id } => log::info!("Caught by seeker {}", id),
        GameEvent::SessionEnded { final_score } => {
            log::info!("Game over, final score {}", final_score)
        }
    }
}

/// Seed from the wall clock when none is given
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn main() {
    let args = Args::parse();
    env_logger::init();
    log::info!("Sushi Chase (headless) starting...");

    let tuning = args
        .tuning
        .map(Tuning::load_or_default)
        .unwrap_or_default();
    let seed = args.seed.unwrap_or_else(clock_seed);

    log::info!("Game initialized with seed: {}", seed);
    let mut game = Game::new(seed, tuning);

    while !game.state.is_over() && game.state.time_ticks < MAX_TICKS {
        game.update(FRAME_DT);
    }

    let summary = GameEvent::SessionEnded {
        final_score: game.state.score,
    };
    match serde_json::to_string(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to encode result: {}", e),
    }
}
