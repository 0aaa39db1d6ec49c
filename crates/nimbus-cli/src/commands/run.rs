//! Live run of the threaded engine against an in-memory surface

use super::{load_config, parse_kind};
use crate::raster::RasterSurface;
use anyhow::{bail, Context, Result};
use nimbus_engine::{EngineConfig, WeatherEngine};
use std::sync::PoisonError;
use std::thread;
use std::time::Duration;

pub struct RunArgs {
    pub kind: String,
    pub switch_to: Option<String>,
    pub duration: u64,
    pub width: u32,
    pub height: u32,
    pub gravity: Option<[f32; 3]>,
    pub output: Option<String>,
    pub config: Option<String>,
}

pub fn run(args: RunArgs) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        bail!("surface size must be non-zero, got {}x{}", args.width, args.height);
    }
    let kind = parse_kind(&args.kind)?;
    let switch_to = args.switch_to.as_deref().map(parse_kind).transpose()?;
    let config = EngineConfig {
        initial_kind: kind,
        ..load_config(args.config.as_deref())?
    };

    let engine = WeatherEngine::new(config);
    let (surface, posted) = RasterSurface::new(args.width, args.height);
    engine.on_surface_created(Box::new(surface));
    engine.on_surface_resized(args.width, args.height);
    if let Some([ax, ay, az]) = args.gravity {
        engine.on_sensor_sample(ax, ay, az);
    }
    engine.on_visibility_changed(true);
    if !engine.is_running() {
        bail!("render loop failed to start");
    }

    let half = Duration::from_millis(args.duration / 2);
    thread::sleep(half);
    if let Some(next) = switch_to {
        log::info!("switching to {next}");
        engine.set_weather_kind(next);
    }
    thread::sleep(Duration::from_millis(args.duration) - half);
    engine.on_visibility_changed(false);

    let (r2d, r3d) = engine.rotation();
    println!(
        "Ran {} for {} ms: {} frames posted, showing {} (ratio {:.2}), rotation ({:.1}, {:.1})",
        args.kind,
        args.duration,
        engine.posted_frames(),
        engine.active_kind(),
        engine.display_ratio(),
        r2d,
        r3d
    );

    if let Some(output) = &args.output {
        let image = posted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .context("No frame was posted")?;
        image
            .save(output)
            .context(format!("Failed to save image to {}", output))?;
        println!("Saved last frame to {}", output);
    }
    Ok(())
}
