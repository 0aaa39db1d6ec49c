//! The weather engine facade hosts drive
//!
//! All methods take `&self`, so one engine can be shared between the UI
//! context (lifecycle, kind requests) and the sensor context.

use crate::config::EngineConfig;
use crate::render_loop::{lock, RenderLoop, Shared};
use crate::simulation::{Frame, Simulation};
use crate::surface::Surface;
use nimbus_core::{CanvasGeometry, Result, WeatherKind};
use nimbus_runtime::OrientationFilter;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Placeholder canvas size used until the host reports a real one
const INITIAL_SIZE: (u32, u32) = (1, 1);

/// Animated weather background driven by lifecycle, sensor and kind requests
pub struct WeatherEngine {
    config: EngineConfig,
    shared: Arc<Shared>,
    render_loop: Mutex<Option<RenderLoop>>,
    visible: AtomicBool,
}

impl WeatherEngine {
    pub fn new(config: EngineConfig) -> Self {
        let geometry = CanvasGeometry::new(INITIAL_SIZE.0, INITIAL_SIZE.1);
        let sim = Simulation::new(&config, geometry);
        let orientation = OrientationFilter::new(config.orientation_enabled);
        log::debug!(
            "weather engine created (kind {}, seed {:?})",
            config.initial_kind,
            config.seed
        );
        Self {
            shared: Arc::new(Shared::new(sim, orientation)),
            config,
            render_loop: Mutex::new(None),
            visible: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ── Lifecycle ──────────────────────────────────────────

    /// Attach the host surface. Loops start right away if already visible.
    pub fn on_surface_created(&self, surface: Box<dyn Surface>) {
        *lock(&self.shared.surface) = Some(surface);
        log::debug!("surface created");
        if self.visible.load(Ordering::Acquire) {
            self.start();
        }
    }

    pub fn on_surface_resized(&self, width: u32, height: u32) {
        self.shared.set_canvas_dims(width, height);
        lock(&self.shared.sim).resize(width, height);
        self.shared.publish();
    }

    /// Stop both loops before the surface goes away
    pub fn on_surface_destroyed(&self) {
        self.stop();
        *lock(&self.shared.surface) = None;
        log::debug!("surface destroyed");
    }

    pub fn on_visibility_changed(&self, visible: bool) {
        self.visible.store(visible, Ordering::Release);
        if visible {
            if lock(&self.shared.surface).is_some() {
                self.start();
            } else {
                log::debug!("visible without a surface, waiting");
            }
        } else {
            self.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        lock(&self.render_loop).is_some()
    }

    fn start(&self) {
        let mut render_loop = lock(&self.render_loop);
        if render_loop.is_some() {
            return;
        }
        match RenderLoop::start(Arc::clone(&self.shared), &self.config) {
            Ok(started) => *render_loop = Some(started),
            Err(err) => log::error!("failed to start render loop: {err}"),
        }
    }

    fn stop(&self) {
        let running = lock(&self.render_loop).take();
        if let Some(render_loop) = running {
            render_loop.stop();
            log::debug!("render loop stopped");
        }
    }

    // ── Inputs ─────────────────────────────────────────────

    /// Feed one gravity sensor sample
    pub fn on_sensor_sample(&self, ax: f32, ay: f32, az: f32) {
        lock(&self.shared.orientation).feed(ax, ay, az);
    }

    pub fn set_orientation_enabled(&self, enabled: bool) {
        lock(&self.shared.orientation).set_enabled(enabled);
    }

    /// Switch to `kind`: a cross-fade while running, an instant swap otherwise
    pub fn set_weather_kind(&self, kind: WeatherKind) {
        let running = self.is_running();
        lock(&self.shared.sim).request_kind(kind, running);
        if !running {
            self.shared.publish();
        }
        log::debug!("weather kind requested: {kind} (animated: {running})");
    }

    /// Like [`set_weather_kind`](Self::set_weather_kind) with a kind name;
    /// unknown names show nothing
    pub fn set_weather_kind_named(&self, name: &str) {
        let kind = match name.parse() {
            Ok(kind) => kind,
            Err(err) => {
                log::warn!("{err}, showing none");
                WeatherKind::None
            }
        };
        self.set_weather_kind(kind);
    }

    /// Fade particles as host content scrolls over the background.
    /// Clamped to [0, 1].
    pub fn set_scroll_ratio(&self, ratio: f32) {
        let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        self.shared.set_scroll_ratio(ratio);
    }

    // ── Accessors ──────────────────────────────────────────

    /// The most recently requested kind
    pub fn weather_kind(&self) -> WeatherKind {
        lock(&self.shared.sim).target_kind()
    }

    /// The kind whose model is animating right now
    pub fn active_kind(&self) -> WeatherKind {
        lock(&self.shared.sim).current_kind()
    }

    pub fn display_ratio(&self) -> f32 {
        lock(&self.shared.sim).display_ratio()
    }

    /// Eased (rotation_2d, rotation_3d) in degrees
    pub fn rotation(&self) -> (f32, f32) {
        lock(&self.shared.sim).rotation()
    }

    pub fn scroll_ratio(&self) -> f32 {
        self.shared.scroll_ratio()
    }

    pub fn latest_frame(&self) -> Arc<Frame> {
        self.shared.latest_frame()
    }

    /// Frames painted and posted to the surface so far
    pub fn posted_frames(&self) -> u64 {
        self.shared.posted_frames()
    }

    // ── Transient state ────────────────────────────────────

    /// Rotation, transition and RNG state as TOML
    pub fn save_state(&self) -> Result<String> {
        lock(&self.shared.sim).save_state()
    }

    pub fn restore_state(&self, source: &str) -> Result<()> {
        lock(&self.shared.sim).restore_state(source)?;
        self.shared.publish();
        Ok(())
    }
}

impl Drop for WeatherEngine {
    fn drop(&mut self) {
        self.stop();
    }
}
