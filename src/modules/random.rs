/*
Where spawn randomness comes from.

The simulation never calls a global generator directly. It is handed a
RandomSource, so tests can pass a seeded StdRng and get the same balls
every run, while the window loop can use macroquad's built-in generator.
*/

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub trait RandomSource {
    /// Uniform integer in `lo..=hi`.
    fn int_inclusive(&mut self, lo: i64, hi: i64) -> i64;
    /// Uniform float between `lo` and `hi`. Returns `lo` when they are equal.
    fn float_range(&mut self, lo: f64, hi: f64) -> f64;
    /// Uniform color channel in `min..=255`.
    fn color_channel(&mut self, min: u8) -> u8;
}

impl RandomSource for StdRng {
    fn int_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        self.gen_range(lo..=hi)
    }

    fn float_range(&mut self, lo: f64, hi: f64) -> f64 {
        self.gen_range(lo..=hi)
    }

    fn color_channel(&mut self, min: u8) -> u8 {
        self.gen_range(min..=u8::MAX)
    }
}

/// Reproducible source for tests and `--seed`.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// macroquad's global generator. Call `QuadRand::from_seed` once before use.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadRand;

impl QuadRand {
    pub fn from_seed(seed: u64) -> Self {
        macroquad::rand::srand(seed);
        Self
    }
}

impl RandomSource for QuadRand {
    fn int_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        // macroquad's integer ranges exclude the upper bound
        let value: i64 = macroquad::rand::gen_range(lo, hi + 1);
        value.clamp(lo, hi)
    }

    fn float_range(&mut self, lo: f64, hi: f64) -> f64 {
        if lo == hi {
            return lo;
        }
        macroquad::rand::gen_range(lo, hi)
    }

    fn color_channel(&mut self, min: u8) -> u8 {
        let value: i32 = macroquad::rand::gen_range(i32::from(min), 256);
        value.clamp(i32::from(min), 255) as u8
    }
}
