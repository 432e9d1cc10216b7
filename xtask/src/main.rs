//! Headless tooling for Primal
//!
//! Usage:
//!   cargo xtask check-config primal.ron      # Validate a RON config
//!   cargo xtask write-config primal.ron      # Write the default config
//!   cargo xtask simulate --ticks 3600        # Run a scripted session

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use primal::config::GameConfig;
use primal::game::input::{FrameInput, GameKey, MouseAction};
use primal::game::{GameSession, TickOutcome, Vec2};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Headless tooling for Primal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a RON config file
    CheckConfig {
        path: PathBuf,
    },
    /// Write the default config as RON
    WriteConfig {
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Run a session with scripted input and print a summary
    Simulate {
        /// Number of fixed-step ticks
        #[arg(long, default_value_t = 3600)]
        ticks: u32,
        /// World seed (overrides the config)
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Seconds per tick
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,
        /// Config file (defaults when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckConfig { path } => check_config(path),
        Commands::WriteConfig { path, force } => write_config(path, force),
        Commands::Simulate { ticks, seed, dt, config } => simulate(ticks, seed, dt, config),
    }
}

fn check_config(path: PathBuf) -> Result<()> {
    let config = GameConfig::load(&path).with_context(|| format!("Invalid config {}", path.display()))?;
    println!("{}: ok", path.display());
    println!(
        "  chunk size {}, load radius {}, unload radius {}",
        config.world.chunk_size, config.world.load_radius, config.world.unload_radius
    );
    match config.generator.seed {
        Some(seed) => println!("  world seed {}", seed),
        None => println!("  world seed picked at startup"),
    }
    Ok(())
}

fn write_config(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    GameConfig::default()
        .save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

/// Scripted player: walks a square, swings at whatever is in front of it
/// and eats berries when health gets low.
struct Script {
    window: Vec2,
}

impl Script {
    /// Direction key for the current leg of the square walk
    fn heading(tick: u32) -> GameKey {
        match (tick / 240) % 4 {
            0 => GameKey::Right,
            1 => GameKey::Up,
            2 => GameKey::Left,
            _ => GameKey::Down,
        }
    }

    fn frame(&self, session: &GameSession, tick: u32) -> FrameInput {
        let mut input = FrameInput::new(self.window).hold(Self::heading(tick));

        let inventory = session.inventory();
        let health = session.health();
        let berries = inventory.stacks().iter().position(|s| s.kind.is_edible());

        if health.get() < health.max() * 0.6 {
            if let Some(slot) = berries {
                if inventory.active_slot() != Some(slot) {
                    return input.press(GameKey::Slot(slot as u8));
                }
                return input.click(MouseAction::Secondary);
            }
        }

        // Hold a weapon when one has dropped
        if let Some(slot) = inventory.stacks().iter().position(|s| s.kind.is_weapon()) {
            if inventory.active_slot() != Some(slot) && slot < 10 {
                input = input.press(GameKey::Slot(slot as u8));
            }
        }

        if let Some(target) = self.nearest_feature(session) {
            let vp = session.camera().world_to_viewport(target);
            input = input
                .point_at(Vec2::new(vp.x, self.window.y - vp.y))
                .click(MouseAction::Primary);
        }
        input
    }

    /// Center of the closest feature in the player's chunk
    fn nearest_feature(&self, session: &GameSession) -> Option<Vec2> {
        let center = session.player().center();
        let coord = session.world().coord_for(center);
        session
            .world()
            .chunk_features(coord)
            .map(|(_, f)| f.center())
            .min_by(|a, b| a.distance_squared(center).total_cmp(&b.distance_squared(center)))
    }
}

fn simulate(ticks: u32, seed: u64, dt: f64, config: Option<PathBuf>) -> Result<()> {
    let mut config = match &config {
        Some(path) => GameConfig::load(path).with_context(|| format!("Invalid config {}", path.display()))?,
        None => GameConfig::default(),
    };
    config.generator.seed = Some(seed);

    let script = Script {
        window: Vec2::new(config.viewport.width, config.viewport.height),
    };
    let mut session = GameSession::from_config(config, seed);

    let mut harvested = 0usize;
    let mut hits = 0usize;
    let mut eaten = 0usize;
    let mut chunks_loaded = 0usize;
    let mut ran = 0u32;

    println!("Simulating {} ticks (seed {}, dt {:.4})...", ticks, seed, dt);
    for tick in 0..ticks {
        let mut input = script.frame(&session, tick);
        let camera = session.camera();
        let outcome = session.update(&mut input, &camera, dt);
        ran += 1;

        let events = session.events();
        harvested += events.feature_removed.len();
        hits += events.feature_hit.len();
        eaten += events.item_consumed.len();
        chunks_loaded += events.chunk_loaded.len();

        if outcome == TickOutcome::Ended {
            println!("Player died on tick {}", tick);
            break;
        }
    }

    let player = session.player().position();
    println!("Ran {} ticks ({:.1}s simulated)", ran, session.elapsed());
    println!("  position     ({:.0}, {:.0})", player.x, player.y);
    println!("  health       {:.1}/{:.0}", session.health().get(), session.health().max());
    println!("  hits         {}", hits);
    println!("  harvested    {}", harvested);
    println!("  eaten        {}", eaten);
    println!("  chunks       {} loaded, {} resident", chunks_loaded, session.world().loaded_chunk_count());
    println!("  features     {}", session.world().feature_count());

    let inventory = session.inventory();
    if inventory.is_empty() {
        println!("  inventory    empty");
    } else {
        for stack in inventory.stacks() {
            let marker = if stack.kind.is_weapon() { " (tool)" } else { "" };
            println!("  inventory    {} x{}{}", stack.kind.label(), stack.count, marker);
        }
    }
    Ok(())
}
