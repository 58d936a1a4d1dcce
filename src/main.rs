//! Replica engine headless demo.
//!
//! Spawns a field of healers and flyers at random positions, runs the fixed
//! tick loop, applies heal effects as they arrive and optionally dumps the
//! last frame's draw records as JSON lines.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --healers 4 --flyers 3 --ticks 300 --seed 7 --dump-json
//! ```

use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;
use log::{error, info};

use replicaengine::error::GameResult;
use replicaengine::events::heal::HealEffect;
use replicaengine::game::Game;
use replicaengine::resources::gameconfig::GameSettings;
use replicaengine::systems::render::RecordingCanvas;

/// Side of the square field instances are spawned in.
const FIELD_SIZE: f32 = 10.0;

/// Replica engine headless demo
#[derive(Parser)]
#[command(version, about = "Runs a headless field of replicated enemies.")]
struct Cli {
    /// INI settings file. Built-in defaults are used when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of healers to spawn.
    #[arg(long, default_value_t = 3)]
    healers: usize,

    /// Number of flyers to spawn.
    #[arg(long, default_value_t = 2)]
    flyers: usize,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 300)]
    ticks: u64,

    /// Seed for spawn positions and directions.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the last frame's draw records as JSON lines.
    #[arg(long)]
    dump_json: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> GameResult<()> {
    let settings = match &cli.config {
        Some(path) => GameSettings::load_from_file(path)?,
        None => GameSettings::defaults()?,
    };
    let (mut game, effects) = Game::new(settings);

    let mut rng = match cli.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    for _ in 0..cli.healers {
        let (position, direction) = random_placement(&mut rng);
        game.spawn_healer(position, direction)?;
    }
    for _ in 0..cli.flyers {
        let (position, direction) = random_placement(&mut rng);
        game.spawn_flyer(position, direction)?;
    }
    info!("spawned {} healers and {} flyers", cli.healers, cli.flyers);

    let mut emitted = 0usize;
    let mut healed = 0usize;
    for _ in 0..cli.ticks {
        game.tick();
        for effect in effects.try_iter() {
            emitted += 1;
            healed += apply_heal(&mut game, &effect)?;
        }
    }
    info!(
        "ran {} ticks: {emitted} heal effects, {healed} targets healed",
        game.frame_count()
    );

    if cli.dump_json {
        let mut canvas = RecordingCanvas::new();
        game.draw(&mut canvas);
        for record in &canvas.records {
            match serde_json::to_string(record) {
                Ok(line) => println!("{line}"),
                Err(e) => error!("failed to serialize draw record: {e}"),
            }
        }
    }
    Ok(())
}

fn random_placement(rng: &mut fastrand::Rng) -> (Vec2, Vec2) {
    let position = Vec2::new(rng.f32(), rng.f32()) * FIELD_SIZE;
    let heading = rng.f32() * std::f32::consts::TAU;
    (position, Vec2::from_angle(heading))
}

/// Heal every instance in range that was not healed yet this cycle. Returns
/// how many were healed.
fn apply_heal(game: &mut Game, effect: &HealEffect) -> GameResult<usize> {
    let data = game.healer_static()?;
    let mut data = data.borrow_mut();
    let mut count = 0;
    for target in game.entities_within(effect.origin, effect.radius) {
        if target != effect.source && data.record_healed(target) {
            count += 1;
        }
    }
    if let Ok(json) = serde_json::to_string(effect) {
        info!("heal effect {json}: {count} healed");
    }
    Ok(count)
}
