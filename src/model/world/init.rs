use crate::model::config::AppConfig;
use crate::model::food::{self, FoodStore};
use crate::model::lifecycle;
use crate::model::systems::ai::AiLogic;
use crate::model::world::{GameState, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serpentine_core::Metrics;
use serpentine_data::{AiController, Position, SnakeId};
use std::sync::Arc;

/// Rejection-sampling attempts before falling back to the far corner.
const SPAWN_ATTEMPTS: usize = 64;

impl World {
    /// Builds a level-1 world with the player at the centre.
    pub fn new(config: AppConfig, player_name: &str) -> anyhow::Result<Self> {
        config.validate()?;
        let rules = Arc::new(config.rules_for_level(1)?);
        let world_seed = config.world.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(world_seed);

        let centre = rules.arena_size / 2.0;
        let player =
            lifecycle::create_snake_with_rng(centre, centre, true, player_name, &rules, &mut rng);

        let mut world = Self {
            config,
            rules: Arc::clone(&rules),
            tick: 0,
            state: GameState::Playing,
            time_alive: 0.0,
            snakes: vec![player],
            bots: Vec::new(),
            food: FoodStore::new(),
            respawn_timers: Vec::new(),
            metrics: Metrics::new(),
            rng,
            world_seed,
        };

        for _ in 0..rules.arena.max_food_orbs {
            food::spawn_ambient(&mut world.food, &rules, &mut world.rng);
        }
        world.spawn_bots(rules.arena.bot_count);

        tracing::info!(
            seed = world_seed,
            arena = rules.arena_size,
            bots = world.bots.len(),
            food = world.food.len(),
            fingerprint = %world.config.fingerprint(),
            "World created"
        );
        Ok(world)
    }

    /// Adds `count` bots away from the player, each pre-grown by the
    /// level's bonus. Returns the new snakes' ids.
    pub fn spawn_bots(&mut self, count: usize) -> Vec<SnakeId> {
        let rules = Arc::clone(&self.rules);
        let level = rules.level as usize;
        let growth_base = rules.difficulty.bot_growth_base * level;
        let growth_random = rules.difficulty.bot_growth_random * level;

        let mut spawned = Vec::with_capacity(count);
        for _ in 0..count {
            let at = self.bot_spawn_point();
            let name = lifecycle::random_bot_name(&mut self.rng);
            let mut snake =
                lifecycle::create_snake_with_rng(at.x, at.y, false, &name, &rules, &mut self.rng);

            let bonus = growth_base + self.rng.gen_range(0..growth_random.max(1));
            snake.target_length += bonus as f64;
            snake.length += bonus;

            let controller = AiController::for_snake(&mut snake, &rules);
            spawned.push(snake.id);
            self.snakes.push(snake);
            self.bots.push(controller);
        }
        spawned
    }

    /// Uniform point outside the clearance box around the player.
    fn bot_spawn_point(&mut self) -> Position {
        let size = self.rules.arena_size;
        let clearance = self.rules.arena.bot_spawn_clearance;
        let Some(anchor) = self.player().map(|p| p.position) else {
            return Position::new(self.rng.gen::<f64>() * size, self.rng.gen::<f64>() * size);
        };

        for _ in 0..SPAWN_ATTEMPTS {
            let at = Position::new(self.rng.gen::<f64>() * size, self.rng.gen::<f64>() * size);
            if (at.x - anchor.x).abs() >= clearance || (at.y - anchor.y).abs() >= clearance {
                return at;
            }
        }

        let far = |v: f64| if v < size / 2.0 { size - 1.0 } else { 1.0 };
        Position::new(far(anchor.x), far(anchor.y))
    }
}
