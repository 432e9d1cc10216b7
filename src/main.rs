//! PRIMAL: a top-down survival sandbox
//!
//! Wander an endless plane, harvest trees, rocks, cacti and berry bushes,
//! and keep eating before hunger wins.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod input;
mod renderer;

use macroquad::prelude::*;
use input::InputState;
use primal::config::GameConfig;
use primal::game::{GameSession, TickOutcome};
use renderer::{draw_death_screen, WorldRenderer};

/// Config file looked up in the working directory
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_PATH: &str = "primal.ron";

fn window_conf() -> Conf {
    Conf {
        window_title: format!("PRIMAL v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn load_config() -> GameConfig {
    #[cfg(not(target_arch = "wasm32"))]
    {
        match GameConfig::load_or_default(CONFIG_PATH) {
            Ok(config) => return config,
            Err(e) => log::warn!("Failed to load {}: {}, using defaults", CONFIG_PATH, e),
        }
    }
    GameConfig::default()
}

fn new_session(config: GameConfig) -> GameSession {
    let fallback_seed = macroquad::miniquad::date::now().to_bits();
    GameSession::from_config(config, fallback_seed)
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config();
    let mut session = new_session(config);
    let mut input = InputState::new();
    let mut renderer = WorldRenderer::new();

    loop {
        if session.is_ended() {
            draw_death_screen(&session);
            if is_key_pressed(KeyCode::Enter) {
                session = new_session(config);
                renderer = WorldRenderer::new();
            }
            next_frame().await;
            continue;
        }

        input.poll();
        let camera = session.camera();
        let outcome = session.update(&mut input, &camera, get_frame_time() as f64);
        renderer.sync(&session);

        match outcome {
            TickOutcome::Continue => renderer.draw(&session),
            TickOutcome::Ended => draw_death_screen(&session),
        }

        next_frame().await;
    }
}
