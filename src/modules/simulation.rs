/*
One frame of the simulation.

Order inside step() matters and is fixed:
  1. advance the rotation angle and rebuild the square
  2. maybe spawn a ball
  3. for each ball in order: move it, then bounce it off the walls
  4. resolve every ball pair (i < j), in order

Everything here is single threaded. The only parallel code is the read-only
escaped_count() diagnostic, which never touches state.
*/

use macroquad::math::DVec2;
use serde::Serialize;
use tracing::{debug, trace};

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

use crate::modules::ball::{Ball, Color};
use crate::modules::ball_collision::resolve_all_pairs;
use crate::modules::config::SimConfig;
use crate::modules::containment::is_inside;
use crate::modules::geometry::{Polygon, rotated_square_vertices};
use crate::modules::random::RandomSource;
use crate::modules::wall_collision::handle_square_collision;

/// What happened during one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub spawned: bool,
    pub wall_hits: usize,
    pub ball_hits: usize,
}

#[derive(Debug, Clone)]
pub struct SimulationState {
    config: SimConfig,
    balls: Vec<Ball>,
    angle: f64,
    last_spawn: f64,
}

impl SimulationState {
    /// Empty state at angle 0. The first ball appears one spawn interval
    /// after `start_time`.
    pub fn new(config: SimConfig, start_time: f64) -> Self {
        Self {
            config,
            balls: Vec::new(),
            angle: 0.0,
            last_spawn: start_time,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// The square at the current angle.
    pub fn polygon(&self) -> Polygon {
        let (x, y) = self.config.square_origin();
        rotated_square_vertices(x, y, self.config.square_size, self.angle)
    }

    /// Advance one frame. `now` is the current clock reading in seconds and
    /// must not go backwards between calls.
    pub fn step<R: RandomSource + ?Sized>(&mut self, now: f64, rng: &mut R) -> StepReport {
        let mut report = StepReport::default();

        // Update rotation angle
        self.angle += self.config.rotation_speed;
        let polygon = self.polygon();

        // Create new ball every spawn interval
        if now - self.last_spawn >= self.config.spawn_interval {
            report.spawned = self.spawn(rng);
            self.last_spawn = now;
        }

        // Move, then bounce off the walls, one ball at a time
        for ball in &mut self.balls {
            ball.advance();
            if handle_square_collision(ball, &polygon) {
                report.wall_hits += 1;
            }
        }

        report.ball_hits = resolve_all_pairs(&mut self.balls);

        trace!(
            angle = self.angle,
            balls = self.balls.len(),
            wall_hits = report.wall_hits,
            ball_hits = report.ball_hits,
            "step"
        );
        report
    }

    fn spawn<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> bool {
        if let Some(cap) = self.config.max_balls {
            if self.balls.len() >= cap {
                debug!(cap, "ball cap reached, skipping spawn");
                return false;
            }
        }

        let (xs, ys) = self.config.spawn_bounds();
        let pos = DVec2::new(
            rng.int_inclusive(*xs.start(), *xs.end()) as f64,
            rng.int_inclusive(*ys.start(), *ys.end()) as f64,
        );
        let speed = self.config.max_speed;
        let vel = DVec2::new(rng.float_range(-speed, speed), rng.float_range(-speed, speed));
        let min = self.config.color_min;
        let color = Color::new(rng.color_channel(min), rng.color_channel(min), rng.color_channel(min));

        debug!(x = pos.x, y = pos.y, vx = vel.x, vy = vel.y, "spawned ball");
        self.balls.push(Ball::new(pos, vel, self.config.ball_radius, color));
        true
    }

    /// Number of balls whose center is outside the square right now.
    /// Walls only fix velocity, so a fast ball can be outside for a frame.
    pub fn escaped_count(&self) -> usize {
        let polygon = self.polygon();

        #[cfg(not(target_arch = "wasm32"))]
        {
            // Parallel processing (Rayon) on Linux/Windows
            return self
                .balls
                .par_iter()
                .filter(|ball| !is_inside(ball.pos, &polygon).0)
                .count();
        }

        #[cfg(target_arch = "wasm32")]
        {
            // Sequential for Web (WASM)
            self.balls
                .iter()
                .filter(|ball| !is_inside(ball.pos, &polygon).0)
                .count()
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            angle: self.angle,
            square: self.polygon().vertices().map(|v| v.to_array()),
            balls: self
                .balls
                .iter()
                .map(|ball| BallSnapshot {
                    pos: ball.pos.to_array(),
                    vel: ball.vel.to_array(),
                    radius: ball.radius,
                    color: ball.color,
                })
                .collect(),
        }
    }

    #[cfg(test)]
    pub(crate) fn push_ball(&mut self, ball: Ball) {
        self.balls.push(ball);
    }
}

/// Serializable view of the state, for headless output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub angle: f64,
    pub square: [[f64; 2]; 4],
    pub balls: Vec<BallSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallSnapshot {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub radius: f64,
    pub color: Color,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::random::seeded;
    use approx::assert_abs_diff_eq;

    fn state() -> SimulationState {
        SimulationState::new(SimConfig::default(), 0.0)
    }

    fn ball(x: f64, y: f64, vx: f64, vy: f64) -> Ball {
        Ball::new(DVec2::new(x, y), DVec2::new(vx, vy), 15.0, Color::new(80, 80, 80))
    }

    #[test]
    fn new_state_is_empty_and_flat() {
        let s = state();
        assert!(s.balls().is_empty());
        assert_eq!(s.angle(), 0.0);
        assert_eq!(s.escaped_count(), 0);
    }

    #[test]
    fn angle_advances_every_step() {
        let mut s = state();
        let mut rng = seeded(0);
        for _ in 0..3 {
            s.step(0.0, &mut rng);
        }
        assert_abs_diff_eq!(s.angle(), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn no_spawn_before_interval() {
        let mut s = state();
        let mut rng = seeded(0);
        let report = s.step(4.99, &mut rng);
        assert!(!report.spawned);
        assert!(s.balls().is_empty());
    }

    #[test]
    fn spawn_timer_resets_on_spawn() {
        let mut s = state();
        let mut rng = seeded(0);
        assert!(s.step(5.0, &mut rng).spawned);
        assert!(!s.step(9.9, &mut rng).spawned);
        assert!(s.step(10.0, &mut rng).spawned);
        assert_eq!(s.balls().len(), 2);
    }

    #[test]
    fn cap_stops_spawning() {
        let config = SimConfig { max_balls: Some(1), ..SimConfig::default() };
        let mut s = SimulationState::new(config, 0.0);
        let mut rng = seeded(0);
        assert!(s.step(5.0, &mut rng).spawned);
        assert!(!s.step(10.0, &mut rng).spawned);
        assert_eq!(s.balls().len(), 1);
    }

    #[test]
    fn balls_move_before_pairs_resolve() {
        let config = SimConfig { rotation_speed: 0.0, ..SimConfig::default() };
        let mut s = SimulationState::new(config, 0.0);
        // 40 apart, closing at 6 per step: after moving they are 34 apart, no hit
        s.push_ball(ball(380.0, 300.0, 3.0, 0.0));
        s.push_ball(ball(420.0, 300.0, -3.0, 0.0));
        let report = s.step(0.0, &mut seeded(0));
        assert_eq!(report.ball_hits, 0);
        // Next step brings them to 28 apart, which is a hit
        let report = s.step(0.0, &mut seeded(0));
        assert_eq!(report.ball_hits, 1);
        assert_abs_diff_eq!(s.balls()[0].vel.x, -3.0);
        assert_abs_diff_eq!(s.balls()[1].vel.x, 3.0);
        assert_abs_diff_eq!(s.balls()[0].pos.distance(s.balls()[1].pos), 30.0, epsilon = 1e-9);
    }

    #[test]
    fn ball_leaving_square_is_counted_then_turned_back() {
        let config = SimConfig { rotation_speed: 0.0, ..SimConfig::default() };
        let mut s = SimulationState::new(config, 0.0);
        s.push_ball(ball(549.0, 300.0, 3.0, 0.0));
        let report = s.step(0.0, &mut seeded(0));
        assert_eq!(report.wall_hits, 1);
        // Outside for now, heading back in
        assert_eq!(s.escaped_count(), 1);
        assert_abs_diff_eq!(s.balls()[0].vel.x, -3.0, epsilon = 1e-12);
        s.step(0.0, &mut seeded(0));
        assert_eq!(s.escaped_count(), 0);
    }

    #[test]
    fn odd_sized_square_turns_about_screen_center() {
        let config = SimConfig { square_size: 301.0, rotation_speed: std::f64::consts::PI, ..SimConfig::default() };
        assert_eq!(config.square_origin(), (250.0, 150.0));
        let mut s = SimulationState::new(config, 0.0);
        s.step(0.0, &mut seeded(0));

        // Half turn about (400, 300) sends the top-left corner to (550, 450)
        let top_left = s.polygon().vertices()[0];
        assert_abs_diff_eq!(top_left.x, 550.0, epsilon = 1e-9);
        assert_abs_diff_eq!(top_left.y, 450.0, epsilon = 1e-9);
    }

    #[test]
    fn snapshot_mirrors_state() {
        let mut s = state();
        s.push_ball(ball(400.0, 300.0, 1.0, 2.0));
        let snap = s.snapshot();
        assert_eq!(snap.balls.len(), 1);
        assert_eq!(snap.balls[0].pos, [400.0, 300.0]);
        assert_eq!(snap.square[0], [250.0, 150.0]);
    }
}
