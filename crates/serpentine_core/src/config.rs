//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every section has a complete `Default`, so a config
//! file only needs to name the values it overrides.
//!
//! ## Level rules
//!
//! `AppConfig` is the static input. The simulation itself never reads it
//! directly: it reads a [`LevelRules`] snapshot derived for the current
//! difficulty level. A level transition builds a fresh snapshot instead of
//! rewriting shared constants in place.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! seed = 42
//! deterministic = true
//!
//! [arena]
//! size = 3000.0
//! bot_count = 10
//!
//! [snake]
//! base_speed = 200.0
//! ```

use crate::error::SimError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Run-level settings that do not affect gameplay rules.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub seed: Option<u64>,
    pub deterministic: bool,
    /// Upper bound on a single tick's elapsed time, in seconds.
    pub max_dt: f64,
    pub target_fps: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: None,
            deterministic: false,
            max_dt: 0.1,
            target_fps: 60,
        }
    }
}

/// Arena dimensions and population targets at level 1.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ArenaConfig {
    pub size: f64,
    pub max_food_orbs: usize,
    pub bot_count: usize,
    /// Bots never spawn inside this half-width box around the player.
    pub bot_spawn_clearance: f64,
    pub bot_respawn_delay: f64,
    /// Per-tick chance of one ambient food roll.
    pub ambient_spawn_chance: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            size: 4000.0,
            max_food_orbs: 400,
            bot_count: 25,
            bot_spawn_clearance: 500.0,
            bot_respawn_delay: 3.0,
            ambient_spawn_chance: 0.1,
        }
    }
}

/// Snake physics and sizing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SnakeConfig {
    pub base_speed: f64,
    pub boost_speed_mult: f64,
    /// Radians per second for the player; bots add a per-level bonus.
    pub turn_rate: f64,
    pub head_radius: f64,
    pub body_radius: f64,
    pub max_radius: f64,
    pub segment_spacing: f64,
    pub initial_length: usize,
    /// Radius gained per unit of length.
    pub growth_scale: f64,
    /// Length drained per second while boosting.
    pub boost_cost_rate: f64,
    pub min_boost_length: usize,
    /// Mouth point distance ahead of the head, in head radii.
    pub mouth_offset: f64,
    pub super_radius_bonus: f64,
    pub super_radius_wobble: f64,
    /// Angular frequency of the super wobble, radians per second of age.
    pub super_wobble_rate: f64,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            base_speed: 180.0,
            boost_speed_mult: 2.2,
            turn_rate: PI * 1.5,
            head_radius: 12.0,
            body_radius: 10.0,
            max_radius: 40.0,
            segment_spacing: 8.0,
            initial_length: 20,
            growth_scale: 0.075,
            boost_cost_rate: 2.5,
            min_boost_length: 25,
            mouth_offset: 1.3,
            super_radius_bonus: 5.0,
            super_radius_wobble: 3.0,
            super_wobble_rate: 10.0,
        }
    }
}

/// Food values, sizes and lifetimes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FoodConfig {
    pub food_value: f64,
    pub power_up_value: f64,
    pub sever_drop_value: f64,
    pub death_drop_value: f64,
    pub max_death_drops: usize,
    /// Full width of the square scatter applied to drops.
    pub drop_scatter: f64,
    /// Score and length awarded per severed segment.
    pub sever_reward_per_segment: f64,
    pub standard_radius_min: f64,
    pub standard_radius_spread: f64,
    pub drop_radius_min: f64,
    pub drop_radius_spread: f64,
    pub power_up_radius: f64,
    pub standard_life: f64,
    pub drop_life: f64,
    pub power_up_life: f64,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            food_value: 1.0,
            power_up_value: 5.0,
            sever_drop_value: 2.0,
            death_drop_value: 3.0,
            max_death_drops: 100,
            drop_scatter: 20.0,
            sever_reward_per_segment: 2.0,
            standard_radius_min: 4.0,
            standard_radius_spread: 3.0,
            drop_radius_min: 8.0,
            drop_radius_spread: 4.0,
            power_up_radius: 20.0,
            standard_life: 600.0,
            drop_life: 300.0,
            power_up_life: 200.0,
        }
    }
}

/// Power-up durations, caps and spawn odds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PowerUpConfig {
    pub star_duration: f64,
    pub shield_duration: f64,
    pub magnet_duration: f64,
    pub magnet_range: f64,
    pub magnet_pull_speed: f64,
    /// Food closer than this to a magnet head is left alone.
    pub magnet_min_distance: f64,
    pub max_stars: usize,
    pub max_shields: usize,
    pub max_magnets: usize,
    pub star_chance: f64,
    pub shield_chance: f64,
    pub magnet_chance: f64,
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        Self {
            star_duration: 10.0,
            shield_duration: 10.0,
            magnet_duration: 12.0,
            magnet_range: 250.0,
            magnet_pull_speed: 500.0,
            magnet_min_distance: 5.0,
            max_stars: 2,
            max_shields: 3,
            max_magnets: 3,
            star_chance: 0.005,
            shield_chance: 0.015,
            magnet_chance: 0.015,
        }
    }
}

/// Bot perception and behaviour, with per-level scaling coefficients.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AiConfig {
    pub base_vision: f64,
    pub vision_per_level: f64,
    pub base_reaction_delay: f64,
    pub reaction_delay_per_level: f64,
    pub min_reaction_delay: f64,
    /// Upper bound of the random extra delay added on each re-evaluation.
    pub reaction_jitter: f64,
    pub base_aggression: f64,
    pub aggression_per_level: f64,
    pub max_aggression: f64,
    pub turn_rate_per_level: f64,
    /// Length difference needed to classify a neighbour as threat or prey.
    pub size_margin: usize,
    /// Threats closer than this fraction of vision trigger flight.
    pub flee_vision_ratio: f64,
    pub wall_margin: f64,
    /// Roam drift, radians per second of elapsed time.
    pub roam_jitter: f64,
    /// Seconds of prey motion extrapolated when aiming an attack.
    pub pursuit_lead_time: f64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_vision: 400.0,
            vision_per_level: 200.0,
            base_reaction_delay: 0.2,
            reaction_delay_per_level: 0.02,
            min_reaction_delay: 0.05,
            reaction_jitter: 0.1,
            base_aggression: 0.5,
            aggression_per_level: 0.08,
            max_aggression: 0.95,
            turn_rate_per_level: 0.5,
            size_margin: 5,
            flee_vision_ratio: 0.7,
            wall_margin: 150.0,
            roam_jitter: 0.5,
            pursuit_lead_time: 1.0,
        }
    }
}

/// How the arena, economy and population scale past level 1.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DifficultyConfig {
    pub arena_base: f64,
    pub arena_per_level: f64,
    pub score_multiplier_per_level: f64,
    pub bots_base: usize,
    pub bots_per_level: usize,
    /// Player length needed to leave level L is `L² × level_threshold`.
    pub level_threshold: usize,
    pub bot_growth_base: usize,
    pub bot_growth_random: usize,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            arena_base: 5000.0,
            arena_per_level: 1500.0,
            score_multiplier_per_level: 1.0,
            bots_base: 30,
            bots_per_level: 10,
            level_threshold: 2500,
            bot_growth_base: 20,
            bot_growth_random: 30,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub arena: ArenaConfig,
    pub snake: SnakeConfig,
    pub food: FoodConfig,
    pub power_ups: PowerUpConfig,
    pub ai: AiConfig,
    pub difficulty: DifficultyConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        // World validation
        anyhow::ensure!(self.world.max_dt > 0.0, "Max dt must be positive");
        anyhow::ensure!(self.world.max_dt <= 1.0, "Max dt too large (max 1.0)");
        anyhow::ensure!(self.world.target_fps > 0, "Target FPS must be positive");
        anyhow::ensure!(self.world.target_fps <= 240, "Target FPS too high (max 240)");

        // Arena validation
        anyhow::ensure!(
            self.arena.size > 2.0 * self.ai.wall_margin,
            "Arena size must exceed twice the AI wall margin"
        );
        anyhow::ensure!(
            self.arena.max_food_orbs <= 20000,
            "Max food orbs too large (max 20000)"
        );
        anyhow::ensure!(self.arena.bot_count <= 1000, "Bot count too large (max 1000)");
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.arena.ambient_spawn_chance),
            "Ambient spawn chance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.arena.bot_respawn_delay >= 0.0,
            "Bot respawn delay must be non-negative"
        );

        // Snake validation
        anyhow::ensure!(self.snake.base_speed > 0.0, "Base speed must be positive");
        anyhow::ensure!(
            self.snake.boost_speed_mult >= 1.0,
            "Boost speed multiplier must be at least 1.0"
        );
        anyhow::ensure!(self.snake.turn_rate > 0.0, "Turn rate must be positive");
        anyhow::ensure!(self.snake.head_radius > 0.0, "Head radius must be positive");
        anyhow::ensure!(self.snake.body_radius > 0.0, "Body radius must be positive");
        anyhow::ensure!(
            self.snake.max_radius >= self.snake.head_radius,
            "Max radius must be at least the head radius"
        );
        anyhow::ensure!(
            self.snake.segment_spacing > 0.0,
            "Segment spacing must be positive"
        );
        anyhow::ensure!(
            self.snake.initial_length >= 3,
            "Initial length must be at least 3"
        );
        anyhow::ensure!(
            self.snake.growth_scale >= 0.0,
            "Growth scale must be non-negative"
        );
        anyhow::ensure!(
            self.snake.boost_cost_rate >= 0.0,
            "Boost cost rate must be non-negative"
        );

        // Food validation
        anyhow::ensure!(self.food.food_value > 0.0, "Food value must be positive");
        anyhow::ensure!(
            self.food.max_death_drops > 0,
            "Max death drops must be positive"
        );
        anyhow::ensure!(
            self.food.drop_scatter >= 0.0,
            "Drop scatter must be non-negative"
        );
        anyhow::ensure!(
            self.food.standard_life > 0.0
                && self.food.drop_life > 0.0
                && self.food.power_up_life > 0.0,
            "Food lifetimes must be positive"
        );

        // Power-up validation
        let p = &self.power_ups;
        anyhow::ensure!(
            p.star_duration >= 0.0 && p.shield_duration >= 0.0 && p.magnet_duration >= 0.0,
            "Power-up durations must be non-negative"
        );
        anyhow::ensure!(
            p.star_chance >= 0.0 && p.shield_chance >= 0.0 && p.magnet_chance >= 0.0,
            "Power-up chances must be non-negative"
        );
        anyhow::ensure!(
            p.star_chance + p.shield_chance + p.magnet_chance <= 1.0,
            "Power-up chances must sum to at most 1.0"
        );

        // AI validation
        anyhow::ensure!(self.ai.base_vision > 0.0, "Base vision must be positive");
        anyhow::ensure!(
            self.ai.min_reaction_delay > 0.0,
            "Min reaction delay must be positive"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.ai.base_aggression)
                && (0.0..=1.0).contains(&self.ai.max_aggression),
            "Aggression must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.ai.flee_vision_ratio > 0.0 && self.ai.flee_vision_ratio <= 1.0,
            "Flee vision ratio must be in (0.0, 1.0]"
        );

        // Difficulty validation
        anyhow::ensure!(
            self.difficulty.arena_base > 2.0 * self.ai.wall_margin,
            "Difficulty arena base must exceed twice the AI wall margin"
        );
        anyhow::ensure!(
            self.difficulty.level_threshold > 0,
            "Level threshold must be positive"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// Syntax and type errors surface as [`SimError::Toml`]; values that
    /// parse but fail [`AppConfig::validate`] as [`SimError::InvalidConfig`].
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config
            .validate()
            .map_err(|e| SimError::invalid_config(e.to_string()))?;
        Ok(config)
    }

    /// Hash of every gameplay-affecting section, for comparing runs.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.arena).as_bytes());
        hasher.update(format!("{:?}", self.snake).as_bytes());
        hasher.update(format!("{:?}", self.food).as_bytes());
        hasher.update(format!("{:?}", self.power_ups).as_bytes());
        hasher.update(format!("{:?}", self.ai).as_bytes());
        hasher.update(format!("{:?}", self.difficulty).as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Builds the immutable rule snapshot for a difficulty level (1-based).
    pub fn rules_for_level(&self, level: u32) -> crate::Result<LevelRules> {
        if level == 0 {
            return Err(crate::SimError::InvalidLevel(level));
        }
        let steps = f64::from(level - 1);
        let (arena_size, target_bots) = if level == 1 {
            (self.arena.size, self.arena.bot_count)
        } else {
            (
                self.difficulty.arena_base + steps * self.difficulty.arena_per_level,
                self.difficulty.bots_base + (level as usize - 1) * self.difficulty.bots_per_level,
            )
        };

        Ok(LevelRules {
            level,
            arena_size,
            score_multiplier: 1.0 + steps * self.difficulty.score_multiplier_per_level,
            target_bots,
            arena: self.arena.clone(),
            snake: self.snake.clone(),
            food: self.food.clone(),
            power_ups: self.power_ups.clone(),
            ai: self.ai.clone(),
            difficulty: self.difficulty.clone(),
        })
    }
}

/// Everything a tick needs to know about the current level. Built once per
/// level and shared read-only; never mutated while a tick runs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LevelRules {
    pub level: u32,
    pub arena_size: f64,
    pub score_multiplier: f64,
    pub target_bots: usize,
    pub arena: ArenaConfig,
    pub snake: SnakeConfig,
    pub food: FoodConfig,
    pub power_ups: PowerUpConfig,
    pub ai: AiConfig,
    pub difficulty: DifficultyConfig,
}

impl LevelRules {
    fn level_steps(&self) -> f64 {
        f64::from(self.level.saturating_sub(1))
    }

    #[must_use]
    pub fn ai_vision_radius(&self) -> f64 {
        self.ai.base_vision + self.level_steps() * self.ai.vision_per_level
    }

    #[must_use]
    pub fn ai_reaction_delay(&self) -> f64 {
        (self.ai.base_reaction_delay - f64::from(self.level) * self.ai.reaction_delay_per_level)
            .max(self.ai.min_reaction_delay)
    }

    #[must_use]
    pub fn ai_aggression(&self) -> f64 {
        (self.ai.base_aggression + f64::from(self.level) * self.ai.aggression_per_level)
            .min(self.ai.max_aggression)
    }

    #[must_use]
    pub fn ai_turn_rate(&self) -> f64 {
        self.snake.turn_rate + self.level_steps() * self.ai.turn_rate_per_level
    }

    /// Player length that triggers the next level.
    #[must_use]
    pub fn level_up_length(&self) -> usize {
        let l = self.level as usize;
        l * l * self.difficulty.level_threshold
    }
}
