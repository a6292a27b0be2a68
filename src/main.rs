use anyhow::Result;
use clap::Parser;
use serpentine_core::metrics::{COUNTER_DEATHS, COUNTER_FOOD_EATEN, COUNTER_SEVERS};
use serpentine_data::{AiController, LiveEvent, Steering};
use serpentine_lib::model::config::AppConfig;
use serpentine_lib::model::systems::ai::AiLogic;
use serpentine_lib::model::world::{PlayerInput, World};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Seed override for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 3600)]
    ticks: u64,

    /// Simulated frames per second (defaults to world.target_fps)
    #[arg(long)]
    fps: Option<u64>,

    /// Player name
    #[arg(short, long, default_value = "Player")]
    name: String,

    /// Write the final world snapshot as JSON to this path
    #[arg(long)]
    snapshot: Option<String>,
}

fn load_config(path: &str) -> Result<AppConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(AppConfig::from_toml(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path, "Config file not found, using defaults");
            Ok(AppConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

fn main() -> Result<()> {
    serpentine_core::init_logging();
    let args = Args::parse();

    let mut config = load_config(&args.config)?;
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }
    if let Some(fps) = args.fps {
        config.world.target_fps = fps;
    }
    let dt = 1.0 / config.world.target_fps.max(1) as f64;

    let mut world = World::new(config, &args.name)?;
    let rules = std::sync::Arc::clone(&world.rules);
    let mut autopilot = match world.player_mut() {
        Some(player) => AiController::for_snake(player, &rules),
        None => anyhow::bail!("world was created without a player"),
    };

    let mut level_ups = 0;
    for _ in 0..args.ticks {
        if world.is_game_over() {
            break;
        }
        let steering = autopilot
            .update(dt, &world.snakes, &world.food, &world.rules, &mut world.rng)
            .unwrap_or(Steering::default());
        let input = PlayerInput {
            heading: steering.heading,
            boost: steering.boost,
        };

        for event in world.update(dt, input) {
            if let LiveEvent::LevelUp { level, .. } = event {
                level_ups += 1;
                tracing::info!(level, "Player reached a new level");
            }
        }
    }

    let (length, kills) = world.player().map_or((0, 0), |p| (p.length, p.kills));
    tracing::info!(
        ticks = world.tick,
        level = world.level(),
        level_ups,
        length,
        kills,
        time_alive = world.time_alive,
        game_over = world.is_game_over(),
        deaths = world.metrics.counter(COUNTER_DEATHS),
        severs = world.metrics.counter(COUNTER_SEVERS),
        food_eaten = world.metrics.counter(COUNTER_FOOD_EATEN),
        wall_ms = world.metrics.elapsed().as_millis() as u64,
        "Run finished"
    );
    for (rank, entry) in world.leaderboard(5).iter().enumerate() {
        tracing::info!(rank = rank + 1, name = %entry.name, length = entry.length, "Leaderboard");
    }

    if let Some(path) = args.snapshot {
        world.write_snapshot(&path)?;
        tracing::info!(path, "Snapshot written");
    }
    Ok(())
}
