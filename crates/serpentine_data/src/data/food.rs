use super::geometry::Position;
use super::snake::SnakeId;
use serde::{Deserialize, Serialize};

/// Monotonic identifier handed out by the food owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FoodId(pub u64);

/// What happens besides growth when the item is eaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FoodKind {
    #[default]
    Standard,
    /// Grants the super effect.
    Star,
    Shield,
    Magnet,
}

/// A food item lying in the arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub id: FoodId,
    pub position: Position,
    /// Growth granted before the score multiplier.
    pub value: f64,
    pub radius: f64,
    pub kind: FoodKind,
    /// Spawned from combat or death rather than ambient spawning.
    pub is_drop: bool,
    /// Seconds until despawn.
    pub life: f64,
    /// Snake whose body produced this drop.
    pub owner: Option<SnakeId>,
    pub consumed: bool,
}

impl Food {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.consumed && self.life > 0.0
    }
}
