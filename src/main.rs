//! CatMotion demo entry point.
//!
//! A procedural quadruped animation engine using:
//! - **bevy_ecs** for entity-component-system architecture
//! - **raylib** for the windowed demo (feature `render`)
//!
//! # Main Loop
//!
//! 1. Initialize logging, parse the CLI, load `catmotion.ini`
//! 2. Build the ECS world: one skeleton, the pose bridge, the schedule
//! 3. Each frame: feed the frame delta to [`WorldTime`], run the update
//!    schedule (locomotion step + pose publish), then draw the most
//!    recently published pose
//! 4. Left click sets the movement target (clamped to the window here;
//!    the core accepts any coordinates)
//!
//! Headless modes skip the window entirely: `--dump-pose` prints one JSON
//! snapshot, `--headless N` simulates N seconds at 60 steps per second and
//! prints the final snapshot.
//!
//! [`WorldTime`]: catmotion::resources::worldtime::WorldTime
//!
//! # Running
//!
//! ```sh
//! cargo run --release
//! cargo run --no-default-features -- --headless 10 --seed 7
//! ```

use clap::Parser;
use std::path::PathBuf;

use catmotion::game;
use catmotion::resources::appconfig::CatConfig;
use catmotion::systems::time::update_world_time;

/// CatMotion demo
#[derive(Parser)]
#[command(version, about = "CatMotion: procedural quadruped animation demo")]
struct Cli {
    /// Path to the INI configuration file (default: ./catmotion.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for the wander/look-around/blink random source.
    /// Omit for a fresh seed each run.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Print a single pose snapshot as JSON and exit (no window needed).
    #[arg(long)]
    dump_pose: bool,

    /// Simulate N seconds at 60 steps per second without a window, then
    /// print the final pose snapshot as JSON and exit.
    #[arg(long, value_name = "SECONDS")]
    headless: Option<f32>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => CatConfig::with_path(path),
        None => CatConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        log::warn!("{e}; continuing with defaults");
    }

    // Early-exit: headless JSON modes (no window needed)
    if cli.dump_pose || cli.headless.is_some() {
        let seconds = cli.headless.unwrap_or(0.0);
        if let Err(e) = run_headless(config, cli.seed, seconds) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        return;
    }

    #[cfg(feature = "render")]
    {
        if let Err(e) = run_windowed(config, cli.seed) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
    #[cfg(not(feature = "render"))]
    {
        log::error!("built without the `render` feature; use --dump-pose or --headless");
        std::process::exit(1);
    }
}

/// Drive the schedule at a fixed 60 steps per second, then print the last
/// published pose as JSON.
fn run_headless(config: CatConfig, seed: Option<u64>, seconds: f32) -> Result<(), String> {
    if seconds < 0.0 {
        return Err(format!("cannot simulate {} seconds", seconds));
    }
    let (mut world, mut schedule, mut receiver) = game::build_world(config, seed)?;

    let steps = (seconds * 60.0).round() as u64;
    for _ in 0..steps {
        update_world_time(&mut world, 1.0 / 60.0);
        schedule.run(&mut world);
    }
    if steps == 0 {
        // One state-preserving tick so a pose gets published.
        update_world_time(&mut world, 0.0);
        schedule.run(&mut world);
    }

    match receiver.latest() {
        Some(pose) => {
            let json = serde_json::to_string_pretty(pose).map_err(|e| e.to_string())?;
            println!("{json}");
            Ok(())
        }
        None => Err("no pose was published".to_string()),
    }
}

#[cfg(feature = "render")]
fn run_windowed(config: CatConfig, seed: Option<u64>) -> Result<(), String> {
    use catmotion::systems::render::{Theme, draw_pose};
    use raylib::prelude::*;

    let (window_width, window_height) = config.window_size();
    let target_fps = config.target_fps;
    let (mut world, mut schedule, mut receiver) = game::build_world(config, seed)?;

    let (mut rl, thread) = raylib::init()
        .size(window_width as i32, window_height as i32)
        .title("CatMotion")
        .build();
    rl.set_target_fps(target_fps);

    log::info!("click anywhere to move the cat");

    let theme = Theme::default();
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            let mouse = rl.get_mouse_position();
            // Input layer clamps to the canvas; the core itself accepts
            // any finite coordinates.
            let x = mouse.x.clamp(0.0, window_width as f32);
            let y = mouse.y.clamp(0.0, window_height as f32);
            game::request_target(&mut world, x, y);
        }

        update_world_time(&mut world, dt);
        schedule.run(&mut world);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(theme.background);
        if let Some(pose) = receiver.latest() {
            draw_pose(&mut d, pose, &theme);
        }
    }
    Ok(())
}
