//! Balls bouncing inside a rotating square.
//!
//! The physics lives in `modules`: geometry and containment for the square,
//! wall and ball collision response, and `simulation::SimulationState` which
//! ties one frame together. Drawing and window handling stay in the binary.

pub mod modules;

pub use modules::ball::{Ball, Color};
pub use modules::config::{ConfigError, SimConfig};
pub use modules::random::{QuadRand, RandomSource, seeded};
pub use modules::simulation::{SimulationState, Snapshot, StepReport};
