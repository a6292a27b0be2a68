pub mod macros;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serpentine_data::{AiController, Food, FoodKind, Position, Snake};
use serpentine_lib::model::config::{AppConfig, LevelRules};
use serpentine_lib::model::food::{self, FoodStore};
use serpentine_lib::model::lifecycle;
use serpentine_lib::model::systems::ai::AiLogic;
use serpentine_lib::model::world::World;

/// Default config with an empty arena: no bots, no ambient food and no
/// power-up rolls, so tests decide exactly what exists.
#[allow(dead_code)]
pub fn quiet_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.arena.bot_count = 0;
    config.arena.max_food_orbs = 0;
    config.arena.ambient_spawn_chance = 0.0;
    config.power_ups.star_chance = 0.0;
    config.power_ups.shield_chance = 0.0;
    config.power_ups.magnet_chance = 0.0;
    config
}

#[allow(dead_code)]
pub fn level_rules(level: u32) -> LevelRules {
    AppConfig::default()
        .rules_for_level(level)
        .expect("valid level")
}

#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    player: Option<SnakeBuilder>,
    bots: Vec<SnakeBuilder>,
    food: Vec<(Position, FoodKind)>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = quiet_config();
        config.world.seed = Some(42);
        Self {
            config,
            player: None,
            bots: Vec::new(),
            food: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Replaces the default centred player.
    pub fn with_player(mut self, player: SnakeBuilder) -> Self {
        self.player = Some(player);
        self
    }

    pub fn with_bot(mut self, bot: SnakeBuilder) -> Self {
        self.bots.push(bot);
        self
    }

    pub fn with_food(mut self, x: f64, y: f64, kind: FoodKind) -> Self {
        self.food.push((Position::new(x, y), kind));
        self
    }

    pub fn build(self) -> World {
        let mut world = World::new(self.config, "Player").expect("Failed to create world in test builder");
        let rules = std::sync::Arc::clone(&world.rules);

        if let Some(builder) = self.player {
            let replacement = builder.player().build(&rules, &mut world.rng);
            if let Some(player) = world.player_mut() {
                *player = replacement;
            }
        }

        for builder in self.bots {
            let mut snake = builder.build(&rules, &mut world.rng);
            let controller = AiController::for_snake(&mut snake, &rules);
            world.snakes.push(snake);
            world.bots.push(controller);
        }

        for (at, kind) in self.food {
            let rng = &mut world.rng;
            world.food.push_with(|id| match kind {
                FoodKind::Standard => food::new_standard(id, at, &rules, rng),
                power_up => food::new_power_up(id, at, power_up, &rules),
            });
        }

        world
    }
}

/// A snake laid out in a straight line behind its head.
#[allow(dead_code)]
#[derive(Clone)]
pub struct SnakeBuilder {
    x: f64,
    y: f64,
    heading: f64,
    length: usize,
    is_player: bool,
    super_time: f64,
    shield_time: f64,
    magnet_time: f64,
}

#[allow(dead_code)]
impl SnakeBuilder {
    pub fn new() -> Self {
        Self {
            x: 1000.0,
            y: 1000.0,
            heading: 0.0,
            length: 20,
            is_player: false,
            super_time: 0.0,
            shield_time: 0.0,
            magnet_time: 0.0,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn heading(mut self, heading: f64) -> Self {
        self.heading = heading;
        self
    }

    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    pub fn player(mut self) -> Self {
        self.is_player = true;
        self
    }

    pub fn with_super(mut self) -> Self {
        self.super_time = 10.0;
        self
    }

    pub fn with_shield(mut self) -> Self {
        self.shield_time = 10.0;
        self
    }

    pub fn with_magnet(mut self) -> Self {
        self.magnet_time = 12.0;
        self
    }

    pub fn build(self, rules: &LevelRules, rng: &mut ChaCha8Rng) -> Snake {
        let name = if self.is_player { "Player" } else { "Bot" };
        let mut snake = lifecycle::create_snake_with_rng(self.x, self.y, self.is_player, name, rules, rng);
        snake.heading = self.heading;
        snake.length = self.length;
        snake.target_length = self.length as f64;
        snake.radius = lifecycle::radius_for_length(self.length, &rules.snake);
        snake.segments = (0..self.length)
            .map(|k| {
                snake
                    .position
                    .offset(self.heading, -(rules.snake.segment_spacing * k as f64))
            })
            .collect();
        snake.effects.super_time = self.super_time;
        snake.effects.shield_time = self.shield_time;
        snake.effects.magnet_time = self.magnet_time;
        snake
    }
}

/// Builds loose snakes and food for exercising the core systems directly.
#[allow(dead_code)]
pub struct Arena {
    pub rules: LevelRules,
    pub rng: ChaCha8Rng,
    pub snakes: Vec<Snake>,
    pub food: FoodStore,
}

#[allow(dead_code)]
impl Arena {
    pub fn new() -> Self {
        Self::with_rules(level_rules(1))
    }

    pub fn with_rules(rules: LevelRules) -> Self {
        Self {
            rules,
            rng: ChaCha8Rng::seed_from_u64(7),
            snakes: Vec::new(),
            food: FoodStore::new(),
        }
    }

    /// Adds a snake and returns its index.
    pub fn add(&mut self, builder: SnakeBuilder) -> usize {
        let snake = builder.build(&self.rules, &mut self.rng);
        self.snakes.push(snake);
        self.snakes.len() - 1
    }

    pub fn add_food(&mut self, x: f64, y: f64, kind: FoodKind) -> serpentine_data::FoodId {
        let at = Position::new(x, y);
        let rules = &self.rules;
        let rng = &mut self.rng;
        self.food.push_with(|id| match kind {
            FoodKind::Standard => food::new_standard(id, at, rules, rng),
            power_up => food::new_power_up(id, at, power_up, rules),
        })
    }

    pub fn food_item(&self, id: serpentine_data::FoodId) -> Option<&Food> {
        self.food.get(id)
    }
}
