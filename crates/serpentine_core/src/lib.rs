//! # Serpentine Core
//!
//! The simulation engine for Serpentine, an arena survival game in which many
//! serpentine agents move, grow and fight inside a bounded square world.
//!
//! This crate contains the tick-level logic:
//! - Locomotion and chain-follow relaxation of the segment chain
//! - The collision and combat resolver (food pickup, head-on and head-to-body rules)
//! - The finite-state AI that steers autonomous snakes
//! - Level rules, food policy and snake lifecycle helpers
//!
//! ## Architecture
//!
//! Everything runs single-threaded inside one synchronous tick. Each tick the
//! orchestrator produces steering for every snake, advances all of them, and
//! only then hands the final geometry to the resolver, so every pair is
//! adjudicated against the same post-movement state.
//!
//! ## Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use serpentine_core::config::AppConfig;
//! use serpentine_core::lifecycle::create_snake_with_rng;
//! use serpentine_core::systems::locomotion;
//!
//! let rules = AppConfig::default().rules_for_level(1).unwrap();
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let mut snake = create_snake_with_rng(2000.0, 2000.0, true, "Player", &rules, &mut rng);
//! locomotion::advance(&mut snake, 1.0 / 60.0, 0.0, false, &rules);
//! assert_eq!(snake.segments.len(), snake.length);
//! ```

/// Level rules and tunable constants
pub mod config;
/// Error types for world construction and export
pub mod error;
/// Food construction, spawn policy, ageing and magnet pull
pub mod food;
/// Angle helpers shared by locomotion, combat and AI
pub mod geometry;
/// Snake creation, eating, death and drop conversion
pub mod lifecycle;
/// Tick counters and logging setup
pub mod metrics;
/// Serializable world views for renderers and HUDs
pub mod snapshot;
/// Per-tick systems: locomotion, combat, AI
pub mod systems;

pub use config::{AppConfig, LevelRules};
pub use error::{Result, SimError};
pub use lifecycle::SnakeLogic;
pub use metrics::{init_logging, Metrics};
