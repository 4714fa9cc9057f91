//! Astro Doge entry point
//!
//! On the web this only initializes logging; the page drives the game through
//! the exported `WebGame` API. Natively it flies one headless autopilot run.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    astro_doge::platform::init();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use astro_doge::game::autopilot_wants_flap;
    use astro_doge::persistence::MemoryStore;
    use astro_doge::sim::GameMode;
    use astro_doge::{FrameRequest, Game};

    // Fixed frame length for the headless clock
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    env_logger::init();
    log::info!("Astro Doge (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - use the wasm build to play");

    let mode = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<GameMode>().ok())
        .unwrap_or_default();
    let seed = std::env::args()
        .nth(2)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(42);

    let mut game = Game::with_seed(seed, MemoryStore::new());
    game.start(mode);
    log::info!("Flying {} run with seed {}", mode.as_str(), seed);

    let mut frames = 0u32;
    if let Some(mut ticket) = game.begin_frames() {
        while frames < MAX_FRAMES {
            if autopilot_wants_flap(game.state(), game.tuning()) {
                game.trigger_impulse();
            }
            frames += 1;
            match game.frame(ticket, frames as f64 * FRAME_MS) {
                FrameRequest::Continue(next) => ticket = next,
                FrameRequest::Stop => break,
            }
            for event in game.drain_events() {
                log::debug!("{:?}", event);
            }
        }
    }

    let seconds = frames as f64 * FRAME_MS / 1000.0;
    match game.outcome() {
        Some(outcome) => println!("{}", outcome.message()),
        None => println!("Autopilot survived {:.0}s", seconds),
    }
    println!(
        "Score: {}  Best: {}  Frames: {}",
        game.score(),
        game.best_score(),
        frames
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}
