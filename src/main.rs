// Headless walk-through of the path guide scheduler.
// Generates a winding path, walks an observer along it at a fixed frame rate
// and lets the scheduler keep guide markers ahead of them.

use std::path::PathBuf;

use clap::Parser;
use glam::Vec3;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use trail_guides::engine::{
    CameraGroundSource, EcsInstanceFactory, PathWalker, PolylineCurve, marker_census,
};
use trail_guides::{ConfigError, CurveOracle, MarkerScheduler, SchedulerError, SpawnerConfig, TickOutcome};

// ============================================================================
// CLI
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "trail_guides", about = "Simulate guide markers along a walked path")]
struct Args {
    /// TOML file with spawner settings; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of recorded path points to generate
    #[arg(long, default_value_t = 240)]
    points: usize,

    /// Walking speed in world units per second
    #[arg(long, default_value_t = 140.0)]
    speed: f32,

    /// Simulated frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Seed for the generated path
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Run without a hazard prefab
    #[arg(long)]
    no_hazards: bool,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

// ============================================================================
// PATH GENERATION
// ============================================================================

/// Distance between recorded path points.
const RECORD_STEP: f32 = 40.0;
/// Camera height above the floor while walking.
const EYE_HEIGHT: f32 = 160.0;
/// Frames before the floor is picked; ticks before that report not-ready.
const FLOOR_PICK_FRAME: u32 = 3;

/// A gently winding path with the occasional sharp corner.
fn generate_path(seed: u64, count: usize) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut heading = 0.0_f32;
    let mut position = Vec3::ZERO;
    let mut points = Vec::with_capacity(count);

    for _ in 0..count {
        points.push(position);
        heading += if rng.gen_bool(0.05) {
            rng.gen_range(-1.4_f32..1.4)
        } else {
            rng.gen_range(-0.08_f32..0.08)
        };
        position += Vec3::new(heading.sin(), 0.0, -heading.cos()) * RECORD_STEP;
        position.y = rng.gen_range(-3.0..3.0);
    }

    points
}

// ============================================================================
// MAIN
// ============================================================================

fn main() -> Result<(), AppError> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SpawnerConfig::from_toml_file(path)?,
        None => SpawnerConfig::default(),
    };
    info!("spawner config: {config:?}");

    let recorded = generate_path(args.seed, args.points);
    let path = PolylineCurve::new(recorded.clone());
    info!("generated path: {} points, {:.0} units", recorded.len(), path.path_length());

    let factory = EcsInstanceFactory::new(!args.no_hazards);
    let mut scheduler = MarkerScheduler::new(config, factory, CameraGroundSource::new())?;
    scheduler.start(recorded, path.clone());

    let fps = args.fps.max(1);
    let dt = 1.0 / fps as f32;
    let mut walker = PathWalker::new(args.speed.max(1.0));
    let mut frame = 0_u32;

    while !walker.finished(&path) {
        let eye = walker.advance(&path, dt) + Vec3::Y * EYE_HEIGHT;
        let ground = scheduler.position_source_mut();
        ground.set_camera_position(eye);
        if frame == FLOOR_PICK_FRAME {
            ground.set_floor_from_camera(eye - Vec3::Y * EYE_HEIGHT);
        }

        match scheduler.tick()? {
            TickOutcome::Held | TickOutcome::Idle => {}
            outcome => debug!("frame {frame}: {outcome:?}"),
        }

        frame += 1;
        if frame % fps == 0 {
            let census = marker_census(scheduler.factory_mut().world_mut());
            let stats = scheduler.stats();
            info!(
                "t={}s | walked {:.0}/{:.0} | live groups {} | guides {} hazards {} | spawned {} evicted {}",
                frame / fps,
                walker.distance,
                path.path_length(),
                scheduler.window().len(),
                census.guides,
                census.hazards,
                stats.spawned,
                stats.evicted,
            );
        }
    }

    let released = scheduler.stop();
    let stats = scheduler.stats();
    info!(
        "walk finished after {frame} frames: {} groups spawned, {} evicted, {} hazards ({} skipped), {released} instances released",
        stats.spawned, stats.evicted, stats.hazards_placed, stats.hazard_failures,
    );
    Ok(())
}
