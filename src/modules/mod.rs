pub mod ball;
pub mod ball_collision;
pub mod config;
pub mod containment;
pub mod geometry;
pub mod random;
pub mod render;
pub mod scale;
pub mod simulation;
pub mod wall_collision;
