use crate::config::{LevelRules, SnakeConfig};
use crate::food::{self, FoodStore};
use rand::Rng;
use serpentine_data::{Effects, Food, FoodKind, Position, Snake, SnakeId};
use std::f64::consts::TAU;
use uuid::Uuid;

const NAME_STEMS: [&str; 12] = [
    "Alpha", "Beta", "Gamma", "Delta", "Serpent", "Fang", "Venom", "Viper", "Slither", "Python",
    "Boa", "Cobra",
];

/// Behaviour attached to the plain `Snake` record.
pub trait SnakeLogic {
    /// Contact point used by every collision test: the head pushed forward
    /// along the heading.
    fn mouth(&self, cfg: &SnakeConfig) -> Position;
    fn has_super(&self) -> bool;
    fn has_shield(&self) -> bool;
    fn has_magnet(&self) -> bool;
    /// Applies growth, score and the variant's timed effect. The chain
    /// catches up on the next locomotion step.
    fn eat(&mut self, food: &Food, rules: &LevelRules);
    /// Marks the snake dead and hands its segments to the caller.
    ///
    /// Must be called at most once per snake.
    fn die(&mut self) -> Vec<Position>;
}

impl SnakeLogic for Snake {
    fn mouth(&self, cfg: &SnakeConfig) -> Position {
        self.position
            .offset(self.heading, self.radius * cfg.mouth_offset)
    }

    fn has_super(&self) -> bool {
        self.effects.super_time > 0.0
    }

    fn has_shield(&self) -> bool {
        self.effects.shield_time > 0.0
    }

    fn has_magnet(&self) -> bool {
        self.effects.magnet_time > 0.0
    }

    fn eat(&mut self, food: &Food, rules: &LevelRules) {
        let gain = food.value * rules.score_multiplier;
        self.score += gain;
        self.target_length += gain;
        self.length = length_for(self.target_length);

        let p = &rules.power_ups;
        match food.kind {
            FoodKind::Star => self.effects.super_time = p.star_duration,
            FoodKind::Shield => self.effects.shield_time = p.shield_duration,
            FoodKind::Magnet => self.effects.magnet_time = p.magnet_duration,
            FoodKind::Standard => {}
        }
    }

    fn die(&mut self) -> Vec<Position> {
        debug_assert!(self.alive, "die called twice on snake {:?}", self.id);
        self.alive = false;
        std::mem::take(&mut self.segments)
    }
}

/// Authoritative segment count for a growth accumulator. Never below one
/// segment, the head.
#[must_use]
pub fn length_for(target_length: f64) -> usize {
    target_length.floor().max(1.0) as usize
}

/// Unboosted radius for a given length, before any super bonus.
#[must_use]
pub fn radius_for_length(length: usize, cfg: &SnakeConfig) -> f64 {
    (cfg.head_radius + length as f64 * cfg.growth_scale).min(cfg.max_radius)
}

#[must_use]
pub fn random_bot_name<R: Rng>(rng: &mut R) -> String {
    let stem = NAME_STEMS[rng.gen_range(0..NAME_STEMS.len())];
    format!("{}{}", stem, rng.gen_range(0..100))
}

/// Creates a live snake at `(x, y)` with a random heading and the initial
/// chain laid out straight behind the head.
pub fn create_snake_with_rng<R: Rng>(
    x: f64,
    y: f64,
    is_player: bool,
    name: &str,
    rules: &LevelRules,
    rng: &mut R,
) -> Snake {
    let cfg = &rules.snake;
    let heading = rng.gen_range(0.0..TAU);
    let head = Position::new(x, y);
    let segments = (0..cfg.initial_length)
        .map(|i| head.offset(heading, -(cfg.segment_spacing * i as f64)))
        .collect();

    Snake {
        id: SnakeId(Uuid::from_u128(rng.gen::<u128>())),
        name: name.to_string(),
        is_player,
        alive: true,
        position: head,
        heading,
        segments,
        length: cfg.initial_length,
        target_length: cfg.initial_length as f64,
        radius: radius_for_length(cfg.initial_length, cfg),
        speed: cfg.base_speed,
        turn_rate: cfg.turn_rate,
        boosting: false,
        effects: Effects::default(),
        score: 0.0,
        kills: 0,
        age: 0.0,
    }
}

/// Turns a dead snake's chain into scattered drops, sampling evenly so a
/// huge snake never produces more than `max_death_drops` items. Returns the
/// number of drops created.
pub fn death_drops<R: Rng>(
    segments: &[Position],
    owner: SnakeId,
    store: &mut FoodStore,
    rules: &LevelRules,
    rng: &mut R,
) -> usize {
    let drop_count = segments.len().min(rules.food.max_death_drops);
    if drop_count == 0 {
        return 0;
    }
    let step = (segments.len() / drop_count).max(1);

    let mut created = 0;
    for seg in segments.iter().step_by(step).take(drop_count) {
        let at = food::scatter(*seg, rules, rng);
        store.push_with(|id| {
            food::new_drop(id, at, rules.food.death_drop_value, Some(owner), rules, rng)
        });
        created += 1;
    }
    created
}
