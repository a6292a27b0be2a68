//! Serpentine: an arena survival simulation of growing, fighting snakes.
//!
//! The tick-level engine lives in `serpentine_core`; this crate adds the
//! orchestrating [`model::world::World`] and the headless runner.

pub mod model;
