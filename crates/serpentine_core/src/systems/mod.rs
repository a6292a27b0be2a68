pub mod ai;
pub mod combat;
pub mod locomotion;
