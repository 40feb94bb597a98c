use serde::Serialize;

use crate::modules::geometry::{Point, Velocity};

/// Display color of a ball. Has no effect on the physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Color> for macroquad::color::Color {
    fn from(c: Color) -> Self {
        macroquad::color::Color::from_rgba(c.r, c.g, c.b, 255)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Point,
    pub vel: Velocity,
    pub radius: f64,
    pub color: Color,
}

impl Ball {
    pub fn new(pos: Point, vel: Velocity, radius: f64, color: Color) -> Self {
        Self { pos, vel, radius, color }
    }

    /// Move by one step's worth of velocity.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.vel.is_finite()
    }
}
