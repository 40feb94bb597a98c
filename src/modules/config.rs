//! Simulation settings, loaded from JSON or taken from the defaults.

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for loading and validating a [`SimConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error while reading the config file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON or wrong field types.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    /// The spawn range collapses when a ball is wider than the square.
    #[error("ball radius {radius} does not fit in a square of size {square_size}")]
    BallTooLarge { radius: f64, square_size: f64 },
    #[error("max_balls must be at least 1")]
    ZeroBallCap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub screen_width: f64,
    pub screen_height: f64,
    /// Side length of the rotating square.
    pub square_size: f64,
    /// Radians added to the square's angle every step.
    pub rotation_speed: f64,
    pub ball_radius: f64,
    /// Seconds between spawns.
    pub spawn_interval: f64,
    /// Spawn velocity components are uniform in `[-max_speed, max_speed]`.
    pub max_speed: f64,
    /// Lower bound of each color channel, upper bound is 255.
    pub color_min: u8,
    /// Spawning stops once this many balls exist. `None` means no limit.
    pub max_balls: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            square_size: 300.0,
            rotation_speed: 0.1,
            ball_radius: 15.0,
            spawn_interval: 5.0,
            max_speed: 3.0,
            color_min: 50,
            max_balls: Some(64),
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("square_size", self.square_size),
            ("rotation_speed", self.rotation_speed),
            ("ball_radius", self.ball_radius),
            ("spawn_interval", self.spawn_interval),
            ("max_speed", self.max_speed),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("square_size", self.square_size),
            ("ball_radius", self.ball_radius),
            ("spawn_interval", self.spawn_interval),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.max_speed < 0.0 {
            return Err(ConfigError::NonPositive { field: "max_speed", value: self.max_speed });
        }

        // Rounding to whole pixels can empty the spawn range even when the
        // ball nominally fits
        let (xs, ys) = self.spawn_bounds();
        if self.square_size < 2.0 * self.ball_radius || xs.is_empty() || ys.is_empty() {
            return Err(ConfigError::BallTooLarge {
                radius: self.ball_radius,
                square_size: self.square_size,
            });
        }
        if self.max_balls == Some(0) {
            return Err(ConfigError::ZeroBallCap);
        }
        Ok(())
    }

    /// Top-left corner of the unrotated square, centered on screen using
    /// whole-pixel halves.
    pub fn square_origin(&self) -> (f64, f64) {
        let half_size = (self.square_size / 2.0).floor();
        (
            (self.screen_width / 2.0).floor() - half_size,
            (self.screen_height / 2.0).floor() - half_size,
        )
    }

    /// Inclusive integer ranges for spawn positions: inside the unrotated
    /// square, at least one radius from every wall.
    pub fn spawn_bounds(&self) -> (RangeInclusive<i64>, RangeInclusive<i64>) {
        let (x, y) = self.square_origin();
        let lo = |origin: f64| (origin + self.ball_radius).ceil() as i64;
        let hi = |origin: f64| (origin + self.square_size - self.ball_radius).floor() as i64;
        (lo(x)..=hi(x), lo(y)..=hi(y))
    }
}
