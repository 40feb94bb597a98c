/*
Program Details: <Bouncing balls in a rotating square>

A square spins in the middle of the screen. Every few seconds a ball spawns
inside it; balls bounce off the spinning walls and off each other.

  spinbox                         open a window
  spinbox --seed 7                same balls every run
  spinbox --config sim.json       override any SimConfig field
  spinbox --headless --steps 900  no window, print the final state as JSON
*/

use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use macroquad::miniquad::date;
use macroquad::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use spinbox::modules::render::draw_frame;
use spinbox::modules::scale::use_virtual_resolution;
use spinbox::{QuadRand, RandomSource, SimConfig, SimulationState, seeded};

#[derive(Parser, Debug)]
#[command(name = "spinbox", about = "Bouncing balls in a rotating square")]
struct Args {
    /// JSON file with simulation settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for spawn positions, velocities and colors
    #[arg(long)]
    seed: Option<u64>,
    /// Run without a window and print the final state
    #[arg(long)]
    headless: bool,
    /// Number of steps in headless mode
    #[arg(long, default_value_t = 600)]
    steps: u64,
    /// Simulated seconds per step in headless mode
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,
}

/// Set up window settings before the app runs
fn window_conf(config: &SimConfig) -> Conf {
    Conf {
        window_title: "Bouncing Balls in Rotating Square".to_string(),
        window_width: config.screen_width as i32,
        window_height: config.screen_height as i32,
        fullscreen: false,
        high_dpi: true,
        window_resizable: true,
        sample_count: 4, // MSAA
        ..Default::default()
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SimConfig::default(),
    };

    if args.headless {
        return run_headless(config, &args);
    }

    let conf = window_conf(&config);
    macroquad::Window::from_config(conf, run_window(config, args.seed));
    Ok(())
}

fn clock_seed() -> u64 {
    date::now() as u64
}

// -------------------- Headless ----------------------------------------------
fn run_headless(config: SimConfig, args: &Args) -> Result<()> {
    ensure!(args.dt.is_finite() && args.dt > 0.0, "--dt must be a positive number");

    let seed = args.seed.unwrap_or_else(clock_seed);
    info!(seed, steps = args.steps, dt = args.dt, "running headless");

    let mut rng = seeded(seed);
    let mut state = SimulationState::new(config, 0.0);

    let (mut wall_hits, mut ball_hits) = (0usize, 0usize);
    for i in 1..=args.steps {
        // Simulated clock instead of wall time
        let report = state.step(i as f64 * args.dt, &mut rng);
        wall_hits += report.wall_hits;
        ball_hits += report.ball_hits;
        if report.spawned {
            info!(step = i, balls = state.balls().len(), "new ball");
        }
    }

    let escaped = state.escaped_count();
    if escaped > 0 {
        warn!(escaped, "balls outside the square after the last step");
    }
    info!(balls = state.balls().len(), wall_hits, ball_hits, "done");

    let json = serde_json::to_string_pretty(&state.snapshot())?;
    println!("{json}");
    Ok(())
}

// -------------------- Window ------------------------------------------------
async fn run_window(config: SimConfig, seed: Option<u64>) {
    let state = SimulationState::new(config, get_time());
    match seed {
        Some(seed) => {
            info!(seed, "seeded run");
            frame_loop(state, seeded(seed)).await;
        }
        // Same as the classic macroquad setup: seed the built-in generator from the clock
        None => frame_loop(state, QuadRand::from_seed(clock_seed())).await,
    }
}

async fn frame_loop<R: RandomSource>(mut state: SimulationState, mut rng: R) {
    let virtual_w = state.config().screen_width as f32;
    let virtual_h = state.config().screen_height as f32;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        use_virtual_resolution(virtual_w, virtual_h);

        // ---- Physics step ----
        let report = state.step(get_time(), &mut rng);
        if report.spawned {
            info!(balls = state.balls().len(), "new ball");
        }

        // ---- Draw ----
        draw_frame(&state);

        next_frame().await;
    }

    info!(balls = state.balls().len(), "window closed");
}
