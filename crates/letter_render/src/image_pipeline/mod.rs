pub mod adjust;
pub mod loader;
pub mod placement;
pub mod sample;
pub mod surface;
