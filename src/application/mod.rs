// Application layer - Use cases and the ports they depend on
pub mod dashboard;
pub mod image_probe;
pub mod occupancy_source;
pub mod refresh;
