use super::geometry::Position;
use super::snake::SnakeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    HeadOn,
    BodyHit,
    SuperContact,
}

/// Things that happened during a tick, for scoring, audio and HUD hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiveEvent {
    FoodEaten {
        snake: SnakeId,
        value: f64,
        was_drop: bool,
        tick: u64,
    },
    Death {
        id: SnakeId,
        killer: Option<SnakeId>,
        cause: DeathCause,
        length: usize,
        position: Position,
        tick: u64,
    },
    Severed {
        attacker: SnakeId,
        defender: SnakeId,
        segments: usize,
        tick: u64,
    },
    Halved {
        id: SnakeId,
        by: SnakeId,
        tick: u64,
    },
    PlayerKill {
        victim: SnakeId,
        tick: u64,
    },
    LevelUp {
        level: u32,
        tick: u64,
    },
    BotSpawned {
        id: SnakeId,
        tick: u64,
    },
    GameOver {
        length: usize,
        kills: u32,
        time_alive: f64,
        tick: u64,
    },
}
