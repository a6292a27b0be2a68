use super::food::FoodId;
use super::snake::SnakeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AiState {
    #[default]
    Roam,
    SeekFood,
    Attack,
    Flee,
}

/// What the controller is currently steering relative to. Resolved by id
/// every tick, so a target that died or was eaten simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AiTarget {
    #[default]
    None,
    Snake(SnakeId),
    Food(FoodId),
}

/// Decision state for one autonomous snake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiController {
    pub snake: SnakeId,
    pub vision_radius: f64,
    /// Base seconds between re-evaluations.
    pub reaction_delay: f64,
    /// Probability of attacking visible prey on re-evaluation.
    pub aggression: f64,
    pub state: AiState,
    pub target: AiTarget,
    /// Seconds until the next re-evaluation.
    pub timer: f64,
    pub wants_boost: bool,
}

/// Per-tick intent handed to locomotion.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Steering {
    pub heading: f64,
    pub boost: bool,
}
