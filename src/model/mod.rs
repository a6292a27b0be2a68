pub use serpentine_core::SnakeLogic;
pub mod config {
    pub use serpentine_core::config::*;
}
pub mod food {
    pub use serpentine_core::food::*;
}
pub mod lifecycle {
    pub use serpentine_core::lifecycle::*;
}
pub mod snapshot {
    pub use serpentine_core::snapshot::*;
}
pub mod systems {
    pub use serpentine_core::systems::*;
}
pub mod state {
    pub use serpentine_data::*;
}

pub mod world;
