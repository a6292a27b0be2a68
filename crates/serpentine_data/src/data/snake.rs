use super::geometry::Position;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a snake. Survives removal from the live collection,
/// so stale references resolve to "absent" instead of another snake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SnakeId(pub Uuid);

/// Remaining seconds on each timed power effect.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Effects {
    pub super_time: f64,
    pub shield_time: f64,
    pub magnet_time: f64,
}

/// A serpentine agent: head geometry, the segment chain and growth state.
///
/// `segments[0]` is always the head and equals `position` once locomotion has
/// run. `length` is the authoritative segment count and tracks
/// `target_length.floor()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    pub id: SnakeId,
    pub name: String,
    pub is_player: bool,
    pub alive: bool,
    pub position: Position,
    /// Radians in `[0, 2π)`.
    pub heading: f64,
    pub segments: Vec<Position>,
    pub length: usize,
    pub target_length: f64,
    pub radius: f64,
    pub speed: f64,
    /// Maximum turn in radians per second.
    pub turn_rate: f64,
    pub boosting: bool,
    pub effects: Effects,
    pub score: f64,
    pub kills: u32,
    /// Seconds this snake has been simulated.
    pub age: f64,
}
