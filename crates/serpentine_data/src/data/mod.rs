//! Core data structures for the Serpentine simulation.

pub mod ai;
pub mod events;
pub mod food;
pub mod geometry;
pub mod snake;
