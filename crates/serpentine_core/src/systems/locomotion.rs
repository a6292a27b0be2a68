//! Steering, boost economy and chain-follow relaxation.
//!
//! After [`advance`] returns, `segments[0]` is the head position and the
//! chain holds exactly `length == floor(target_length)` points.

use crate::config::{LevelRules, SnakeConfig};
use crate::geometry::{normalize_angle, shortest_delta};
use crate::lifecycle::{length_for, radius_for_length, SnakeLogic};
use serpentine_data::{Effects, Position, Snake};

/// Moves one live snake forward by `dt` seconds.
pub fn advance(snake: &mut Snake, dt: f64, desired_heading: f64, wants_boost: bool, rules: &LevelRules) {
    debug_assert!(snake.alive, "advance called on dead snake {:?}", snake.id);
    let cfg = &rules.snake;

    snake.age += dt;
    decay_effects(&mut snake.effects, dt);
    snake.radius = current_radius(snake, cfg);

    apply_boost(snake, dt, wants_boost, cfg);
    turn_toward(snake, desired_heading, dt);
    move_head(snake, dt, rules.arena_size);

    relax_chain(&mut snake.segments, snake.position, cfg.segment_spacing);
    snake.length = length_for(snake.target_length);
    fit_chain(&mut snake.segments, snake.length);
}

fn decay_effects(effects: &mut Effects, dt: f64) {
    effects.super_time = (effects.super_time - dt).max(0.0);
    effects.shield_time = (effects.shield_time - dt).max(0.0);
    effects.magnet_time = (effects.magnet_time - dt).max(0.0);
}

/// Length-scaled radius plus the pulsing super bonus.
#[must_use]
pub fn current_radius(snake: &Snake, cfg: &SnakeConfig) -> f64 {
    let base = radius_for_length(snake.length, cfg);
    if snake.has_super() {
        base + cfg.super_radius_bonus + (snake.age * cfg.super_wobble_rate).sin() * cfg.super_radius_wobble
    } else {
        base
    }
}

fn apply_boost(snake: &mut Snake, dt: f64, wants_boost: bool, cfg: &SnakeConfig) {
    snake.boosting = wants_boost && snake.length > cfg.min_boost_length;
    if !snake.boosting {
        snake.speed = cfg.base_speed;
        return;
    }

    snake.speed = cfg.base_speed * cfg.boost_speed_mult;
    snake.target_length -= cfg.boost_cost_rate * dt;
    let floor = cfg.min_boost_length as f64;
    if snake.target_length <= floor {
        snake.target_length = floor;
        snake.boosting = false;
    }
}

/// Rotates toward `desired` along the shorter arc, at most `turn_rate * dt`.
fn turn_toward(snake: &mut Snake, desired: f64, dt: f64) {
    let delta = shortest_delta(snake.heading, desired);
    let max_turn = snake.turn_rate * dt;
    snake.heading = if delta.abs() <= max_turn {
        normalize_angle(desired)
    } else {
        normalize_angle(snake.heading + max_turn.copysign(delta))
    };
}

fn move_head(snake: &mut Snake, dt: f64, arena_size: f64) {
    let next = snake.position.offset(snake.heading, snake.speed * dt);
    let lo = snake.radius;
    let hi = (arena_size - snake.radius).max(lo);
    snake.position = Position::new(next.x.clamp(lo, hi), next.y.clamp(lo, hi));
}

/// Pushes `head` onto the front and drags every follower to within
/// `spacing` of its leader. Coincident points are left where they are.
pub fn relax_chain(segments: &mut Vec<Position>, head: Position, spacing: f64) {
    segments.insert(0, head);
    for i in 1..segments.len() {
        let leader = segments[i - 1];
        let seg = &mut segments[i];
        let dx = leader.x - seg.x;
        let dy = leader.y - seg.y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist > spacing {
            let pull = (dist - spacing) / dist;
            seg.x += dx * pull;
            seg.y += dy * pull;
        }
    }
}

/// Trims the tail to `length`, or grows it by stacking copies of the last
/// point. Stacked points separate as the head pulls away.
fn fit_chain(segments: &mut Vec<Position>, length: usize) {
    if segments.len() > length {
        segments.truncate(length);
    } else if let Some(&tail) = segments.last() {
        segments.resize(length, tail);
    }
}
