//! Finite-state steering for autonomous snakes.
//!
//! A controller re-evaluates its state every `reaction_delay` seconds (plus
//! jitter) and steers toward its current target on every tick in between.
//! Targets are held by id and looked up again each tick.

use crate::config::LevelRules;
use crate::food::FoodStore;
use crate::geometry::normalize_angle;
use rand::Rng;
use serpentine_data::{AiController, AiState, AiTarget, Position, Snake, Steering};
use std::f64::consts::{FRAC_PI_2, PI};

pub trait AiLogic {
    /// Builds a controller tuned for the level and applies the level's
    /// turn rate to the snake it drives.
    fn for_snake(snake: &mut Snake, rules: &LevelRules) -> Self;
    /// Advances the decision timer and produces this tick's steering.
    /// Returns `None` when the controlled snake is gone or dead.
    fn update<R: Rng>(
        &mut self,
        dt: f64,
        snakes: &[Snake],
        food: &FoodStore,
        rules: &LevelRules,
        rng: &mut R,
    ) -> Option<Steering>;
}

impl AiLogic for AiController {
    fn for_snake(snake: &mut Snake, rules: &LevelRules) -> Self {
        snake.turn_rate = rules.ai_turn_rate();
        Self {
            snake: snake.id,
            vision_radius: rules.ai_vision_radius(),
            reaction_delay: rules.ai_reaction_delay(),
            aggression: rules.ai_aggression(),
            state: AiState::Roam,
            target: AiTarget::None,
            timer: 0.0,
            wants_boost: false,
        }
    }

    fn update<R: Rng>(
        &mut self,
        dt: f64,
        snakes: &[Snake],
        food: &FoodStore,
        rules: &LevelRules,
        rng: &mut R,
    ) -> Option<Steering> {
        let me = snakes.iter().find(|s| s.id == self.snake && s.alive)?;

        self.timer -= dt;
        if self.timer <= 0.0 {
            decide(self, me, snakes, food, rules, rng);
            self.timer = self.reaction_delay + rng.gen::<f64>() * rules.ai.reaction_jitter;
        }

        let heading = wall_override(me.position, rules.arena_size, rules.ai.wall_margin)
            .unwrap_or_else(|| steer(self, me, dt, snakes, food, rules, rng));

        Some(Steering {
            heading: normalize_angle(heading),
            boost: self.wants_boost,
        })
    }
}

/// Nearest live snake satisfying `pick`, within vision.
fn nearest_snake<'a>(
    me: &Snake,
    snakes: &'a [Snake],
    vision: f64,
    pick: impl Fn(&Snake) -> bool,
) -> Option<(&'a Snake, f64)> {
    snakes
        .iter()
        .filter(|s| s.alive && s.id != me.id && pick(s))
        .map(|s| (s, me.position.distance_to(&s.position)))
        .filter(|(_, d)| *d < vision)
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

fn decide<R: Rng>(
    ctrl: &mut AiController,
    me: &Snake,
    snakes: &[Snake],
    food: &FoodStore,
    rules: &LevelRules,
    rng: &mut R,
) {
    let margin = rules.ai.size_margin;
    let vision = ctrl.vision_radius;

    let threat = nearest_snake(me, snakes, vision, |s| s.length > me.length + margin);
    let prey = nearest_snake(me, snakes, vision, |s| me.length > s.length + margin);

    if let Some((t, dist)) = threat {
        if dist < vision * rules.ai.flee_vision_ratio {
            ctrl.state = AiState::Flee;
            ctrl.target = AiTarget::Snake(t.id);
            ctrl.wants_boost = true;
            return;
        }
    }

    if let Some((p, _)) = prey {
        if rng.gen::<f64>() < ctrl.aggression {
            ctrl.state = AiState::Attack;
            ctrl.target = AiTarget::Snake(p.id);
            ctrl.wants_boost = rng.gen_bool(0.5);
            return;
        }
    }

    ctrl.wants_boost = false;
    let meal = food
        .items()
        .iter()
        .filter(|f| f.is_active())
        .map(|f| (f.id, me.position.distance_to(&f.position)))
        .filter(|(_, d)| *d < vision)
        .min_by(|a, b| a.1.total_cmp(&b.1));

    match meal {
        Some((id, _)) => {
            ctrl.state = AiState::SeekFood;
            ctrl.target = AiTarget::Food(id);
        }
        None => {
            ctrl.state = AiState::Roam;
            ctrl.target = AiTarget::None;
        }
    }
}

fn target_snake<'a>(ctrl: &AiController, snakes: &'a [Snake]) -> Option<&'a Snake> {
    match ctrl.target {
        AiTarget::Snake(id) => snakes.iter().find(|s| s.id == id && s.alive),
        _ => None,
    }
}

fn steer<R: Rng>(
    ctrl: &AiController,
    me: &Snake,
    dt: f64,
    snakes: &[Snake],
    food: &FoodStore,
    rules: &LevelRules,
    rng: &mut R,
) -> f64 {
    let here = me.position;
    let aimed = match ctrl.state {
        AiState::Roam => None,
        AiState::SeekFood => match ctrl.target {
            AiTarget::Food(id) => food
                .get(id)
                .filter(|f| f.is_active())
                .map(|f| here.bearing_to(&f.position)),
            _ => None,
        },
        AiState::Flee => target_snake(ctrl, snakes).map(|t| here.bearing_to(&t.position) + PI),
        AiState::Attack => target_snake(ctrl, snakes).map(|p| {
            let lead = p.position.offset(p.heading, p.speed * rules.ai.pursuit_lead_time);
            here.bearing_to(&lead)
        }),
    };

    aimed.unwrap_or_else(|| roam(me.heading, dt, rules, rng))
}

/// Current heading plus a small random drift.
fn roam<R: Rng>(heading: f64, dt: f64, rules: &LevelRules, rng: &mut R) -> f64 {
    let drift = rules.ai.roam_jitter * dt;
    heading + (rng.gen::<f64>() * 2.0 - 1.0) * drift
}

/// Heading that points back toward the interior when the head is inside
/// the wall margin. Checked left, right, top, bottom; the first match wins,
/// so the side walls outrank the top and bottom in a corner.
#[must_use]
pub fn wall_override(at: Position, arena_size: f64, margin: f64) -> Option<f64> {
    if at.x < margin {
        Some(0.0)
    } else if at.x > arena_size - margin {
        Some(PI)
    } else if at.y < margin {
        Some(FRAC_PI_2)
    } else if at.y > arena_size - margin {
        Some(-FRAC_PI_2)
    } else {
        None
    }
}
