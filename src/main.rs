//! Rebound Pong headless demo
//!
//! Usage: `rebound-pong [settings.json] [ticks] [seed]`
//!
//! Plays the AI paddle against a simple bot, keeps score, and prints the final
//! frame as JSON. Set `RUST_LOG=debug` to see every paddle hit.

#[cfg(not(target_arch = "wasm32"))]
use rebound_pong::Settings;
#[cfg(not(target_arch = "wasm32"))]
use rebound_pong::sim::{GameEvent, PaddleCommand, Side, Simulation, TickInput, tick};

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_TICKS: u64 = 20_000;
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_SEED: u64 = 0x5EED;
/// Points per level before the obstacles are regenerated
#[cfg(not(target_arch = "wasm32"))]
const POINTS_PER_LEVEL: u32 = 5;

/// Match bookkeeping driven by simulation events
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
struct Scoreboard {
    ai: u32,
    player: u32,
    rallies: u32,
    longest_rally: u32,
    current_rally: u32,
}

#[cfg(not(target_arch = "wasm32"))]
impl Scoreboard {
    /// Apply one tick's events; returns the side to serve from, if any
    fn record(&mut self, events: &[GameEvent]) -> Option<Side> {
        let mut serve_from = None;
        for event in events {
            match *event {
                GameEvent::PaddleHit { .. } => self.current_rally += 1,
                GameEvent::Scored { against } => {
                    match against {
                        Side::Left => self.player += 1,
                        Side::Right => self.ai += 1,
                    }
                    self.rallies += 1;
                    self.longest_rally = self.longest_rally.max(self.current_rally);
                    self.current_rally = 0;
                    log::info!("Score: AI {} - {} Player", self.ai, self.player);
                }
                // The conceding side serves toward the other
                GameEvent::ServeToward(to) => serve_from = Some(to.opposite()),
                GameEvent::WallHit | GameEvent::ObstacleHit | GameEvent::Served { .. } => {}
            }
        }
        serve_from
    }

    fn total(&self) -> u32 {
        self.ai + self.player
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Rebound Pong (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let ticks = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TICKS);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);

    log::info!(
        "Difficulty {}, seed {seed}, {ticks} ticks",
        settings.difficulty.as_str()
    );

    let mut sim = Simulation::new(settings, seed);
    let mut board = Scoreboard::default();

    for _ in 0..ticks {
        // Bot keeps its paddle centered on the ball
        let input = TickInput::new(PaddleCommand::MoveToward(sim.ball().center().y));
        tick(&mut sim, &input);

        if let Some(from) = board.record(sim.events()) {
            if board.total() % POINTS_PER_LEVEL == 0 {
                sim.start_level(sim.level_index() + 1);
            }
            sim.serve(from);
        }
    }

    log::info!(
        "Final: AI {} - {} Player over {} rallies (longest {} hits), level {}",
        board.ai,
        board.player,
        board.rallies,
        board.longest_rally,
        sim.level_index()
    );

    match serde_json::to_string_pretty(&sim.frame()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize frame: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless demo on the web; embed the library instead
}
