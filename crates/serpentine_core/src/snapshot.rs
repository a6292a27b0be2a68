use crate::lifecycle::SnakeLogic;
use serde::{Deserialize, Serialize};
use serpentine_data::{Food, Position, Snake, SnakeId};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SnakeSnapshot {
    pub id: SnakeId,
    pub name: String,
    pub is_player: bool,
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub radius: f64,
    pub length: usize,
    pub score: f64,
    pub kills: u32,
    pub boosting: bool,
    pub super_active: bool,
    pub shield_active: bool,
    pub magnet_active: bool,
    pub segments: Vec<Position>,
}

impl From<&Snake> for SnakeSnapshot {
    fn from(snake: &Snake) -> Self {
        Self {
            id: snake.id,
            name: snake.name.clone(),
            is_player: snake.is_player,
            x: snake.position.x,
            y: snake.position.y,
            heading: snake.heading,
            radius: snake.radius,
            length: snake.length,
            score: snake.score,
            kills: snake.kills,
            boosting: snake.boosting,
            super_active: snake.has_super(),
            shield_active: snake.has_shield(),
            magnet_active: snake.has_magnet(),
            segments: snake.segments.clone(),
        }
    }
}

/// One leaderboard row.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RankEntry {
    pub id: SnakeId,
    pub name: String,
    pub length: usize,
    pub is_player: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub level: u32,
    pub arena_size: f64,
    pub time_alive: f64,
    pub game_over: bool,
    pub snakes: Vec<SnakeSnapshot>,
    pub food: Vec<Food>,
    pub leaderboard: Vec<RankEntry>,
}

/// Top `n` live snakes by length, longest first. Ties keep roster order.
#[must_use]
pub fn leaderboard(snakes: &[Snake], n: usize) -> Vec<RankEntry> {
    let mut live: Vec<&Snake> = snakes.iter().filter(|s| s.alive).collect();
    live.sort_by(|a, b| b.length.cmp(&a.length));
    live.into_iter()
        .take(n)
        .map(|s| RankEntry {
            id: s.id,
            name: s.name.clone(),
            length: s.length,
            is_player: s.is_player,
        })
        .collect()
}
