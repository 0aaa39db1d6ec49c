//! Headless, deterministic weather-to-PNG render command

use super::{load_config, parse_kind};
use crate::raster::RasterCanvas;
use anyhow::{bail, Context, Result};
use nimbus_core::{Canvas, CanvasGeometry};
use nimbus_engine::{EngineConfig, Simulation};
use nimbus_runtime::OrientationFilter;

pub struct RenderArgs {
    pub kind: String,
    pub output: String,
    pub width: u32,
    pub height: u32,
    pub ticks: u32,
    pub interval: f64,
    pub seed: u32,
    pub gravity: Option<[f32; 3]>,
    pub scroll: f32,
    pub config: Option<String>,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let canvas = render_canvas(&args)?;
    canvas
        .into_image()
        .save(&args.output)
        .context(format!("Failed to save image to {}", args.output))?;

    println!(
        "Rendered {} after {} ticks to {}x{} image {}",
        args.kind, args.ticks, args.width, args.height, args.output
    );
    Ok(())
}

/// Simulate `args.ticks` fixed-interval ticks and draw the final frame
fn render_canvas(args: &RenderArgs) -> Result<RasterCanvas> {
    if args.width == 0 || args.height == 0 {
        bail!("image size must be non-zero, got {}x{}", args.width, args.height);
    }
    if !(args.interval > 0.0) {
        bail!("tick interval must be positive, got {}", args.interval);
    }
    let kind = parse_kind(&args.kind)?;
    let config = EngineConfig {
        initial_kind: kind,
        seed: Some(args.seed),
        ..load_config(args.config.as_deref())?
    };

    let mut orientation = OrientationFilter::new(config.orientation_enabled);
    if let Some([ax, ay, az]) = args.gravity {
        orientation.feed(ax, ay, az);
    }
    let targets = orientation.current_angles();

    let geometry = CanvasGeometry::new(args.width, args.height);
    let mut sim = Simulation::new(&config, geometry);
    for _ in 0..args.ticks {
        sim.tick(args.interval, targets);
    }
    let (r2d, r3d) = sim.rotation();
    log::info!("{kind}: rotation ({r2d:.1}, {r3d:.1}) after {} ticks", args.ticks);

    let mut canvas = RasterCanvas::new(args.width, args.height);
    canvas.clear();
    sim.frame().draw(&mut canvas, args.scroll.clamp(0.0, 1.0));
    Ok(canvas)
}
