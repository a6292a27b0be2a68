use crate::model::config::{AppConfig, LevelRules};
use crate::model::food::FoodStore;
use crate::model::snapshot::{self, RankEntry, SnakeSnapshot, WorldSnapshot};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use serpentine_core::Metrics;
use serpentine_data::{AiController, Snake};
use std::path::Path;
use std::sync::Arc;

pub mod finalize;
pub mod init;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Playing,
    GameOver,
}

/// What the player wants this tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerInput {
    pub heading: f64,
    pub boost: bool,
}

/// Owns the tick clock, the snake roster, the food and the level rules.
///
/// The player stays in `snakes` after death so its final state can still
/// be read; dead bots are dropped at the end of the tick they die in.
pub struct World {
    pub config: AppConfig,
    pub rules: Arc<LevelRules>,
    pub tick: u64,
    pub state: GameState,
    pub time_alive: f64,
    pub snakes: Vec<Snake>,
    pub bots: Vec<AiController>,
    pub food: FoodStore,
    /// Seconds left until each queued bot replacement appears.
    pub respawn_timers: Vec<f64>,
    pub metrics: Metrics,
    pub rng: ChaCha8Rng,
    pub world_seed: u64,
}

impl World {
    #[must_use]
    pub fn level(&self) -> u32 {
        self.rules.level
    }

    #[must_use]
    pub fn player(&self) -> Option<&Snake> {
        self.snakes.iter().find(|s| s.is_player)
    }

    pub fn player_mut(&mut self) -> Option<&mut Snake> {
        self.snakes.iter_mut().find(|s| s.is_player)
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// Longest live snakes, longest first.
    #[must_use]
    pub fn leaderboard(&self, n: usize) -> Vec<RankEntry> {
        snapshot::leaderboard(&self.snakes, n)
    }

    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            level: self.rules.level,
            arena_size: self.rules.arena_size,
            time_alive: self.time_alive,
            game_over: self.is_game_over(),
            snakes: self
                .snakes
                .iter()
                .filter(|s| s.alive)
                .map(SnakeSnapshot::from)
                .collect(),
            food: self.food.items().to_vec(),
            leaderboard: self.leaderboard(10),
        }
    }

    /// Writes the current snapshot as pretty JSON.
    pub fn write_snapshot(&self, path: impl AsRef<Path>) -> serpentine_core::Result<()> {
        let json = serde_json::to_string_pretty(&self.snapshot())?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
