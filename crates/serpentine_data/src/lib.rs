//! Plain data records shared by the Serpentine simulation crates.
//!
//! Nothing in here owns behaviour beyond small accessors; the simulation
//! logic lives in `serpentine_core`.

pub mod data;

pub use data::ai::{AiController, AiState, AiTarget, Steering};
pub use data::events::{DeathCause, LiveEvent};
pub use data::food::{Food, FoodId, FoodKind};
pub use data::geometry::Position;
pub use data::snake::{Effects, Snake, SnakeId};
