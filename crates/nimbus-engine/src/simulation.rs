//! Update-tick state: rotation, transition and the active model
//!
//! The update thread owns a [`Simulation`] behind a mutex and publishes an
//! immutable [`Frame`] after every tick for the draw thread to paint.

use crate::config::EngineConfig;
use crate::transition::{TransitionController, TransitionState};
use nimbus_core::{Canvas, CanvasGeometry, Result, WeatherKind};
use nimbus_particles::{ParticleModel, ParticleRng, WeatherModel};
use nimbus_runtime::RotationState;
use serde::{Deserialize, Serialize};

/// Everything the draw thread needs to paint one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub kind: WeatherKind,
    pub model: WeatherModel,
    pub geometry: CanvasGeometry,
    pub display_ratio: f32,
    pub rotation_2d: f32,
    pub rotation_3d: f32,
    /// Incremented on every published tick
    pub version: u64,
}

impl Frame {
    /// Paint onto `canvas`. The caller clears the canvas first.
    pub fn draw(&self, canvas: &mut dyn Canvas, scroll_ratio: f32) {
        self.model.draw(
            &self.geometry,
            canvas,
            self.display_ratio,
            scroll_ratio,
            self.rotation_2d,
            self.rotation_3d,
        );
    }
}

/// Transient state that can be saved and restored as TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    pub rotation: RotationState,
    pub transition: TransitionState,
    pub rng: ParticleRng,
}

/// The single-writer state advanced by the update loop
#[derive(Debug)]
pub struct Simulation {
    geometry: CanvasGeometry,
    rotation: RotationState,
    transition: TransitionController,
    model: WeatherModel,
    rng: ParticleRng,
    version: u64,
}

impl Simulation {
    pub fn new(config: &EngineConfig, geometry: CanvasGeometry) -> Self {
        let mut rng = match config.seed {
            Some(seed) => ParticleRng::new(seed),
            None => ParticleRng::from_time(),
        };
        let model = WeatherModel::for_kind(config.initial_kind, &geometry, &mut rng);
        Self {
            geometry,
            rotation: RotationState::new(),
            transition: TransitionController::new(
                config.initial_kind,
                config.switch_duration_ms as f32,
            ),
            model,
            rng,
            version: 0,
        }
    }

    /// One update tick: ease the rotation toward `targets`, move the
    /// particles, then advance the cross-fade (swapping models if due)
    pub fn tick(&mut self, interval_ms: f64, targets: (f32, f32)) {
        let interval_ms = if interval_ms.is_finite() {
            interval_ms.max(0.0)
        } else {
            0.0
        };
        self.rotation.advance(targets, interval_ms);
        let (rotation_2d, rotation_3d) = self.rotation.angles();
        self.model
            .update_data(&self.geometry, interval_ms as f32, rotation_2d, rotation_3d);
        if let Some(kind) = self.transition.advance(interval_ms as f32) {
            self.rebuild(kind);
        }
        self.version += 1;
    }

    /// Snapshot for the draw thread
    pub fn frame(&self) -> Frame {
        let (rotation_2d, rotation_3d) = self.rotation.angles();
        Frame {
            kind: self.transition.current_kind(),
            model: self.model.clone(),
            geometry: self.geometry,
            display_ratio: self.transition.display_ratio(),
            rotation_2d,
            rotation_3d,
            version: self.version,
        }
    }

    /// Request a kind. `running` selects a cross-fade over an instant swap.
    pub fn request_kind(&mut self, kind: WeatherKind, running: bool) {
        if let Some(kind) = self.transition.request(kind, running) {
            self.rebuild(kind);
        }
    }

    /// Adopt new canvas dimensions, rebuilding the model if they changed
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.geometry.matches(width, height) {
            return;
        }
        log::debug!("canvas resized to {width}x{height}, rebuilding model");
        self.geometry = CanvasGeometry::new(width, height);
        self.rebuild(self.transition.current_kind());
    }

    fn rebuild(&mut self, kind: WeatherKind) {
        self.model = WeatherModel::for_kind(kind, &self.geometry, &mut self.rng);
    }

    pub fn geometry(&self) -> &CanvasGeometry {
        &self.geometry
    }

    pub fn model(&self) -> &WeatherModel {
        &self.model
    }

    pub fn current_kind(&self) -> WeatherKind {
        self.transition.current_kind()
    }

    pub fn target_kind(&self) -> WeatherKind {
        self.transition.target_kind()
    }

    pub fn display_ratio(&self) -> f32 {
        self.transition.display_ratio()
    }

    pub fn rotation(&self) -> (f32, f32) {
        self.rotation.angles()
    }

    pub fn transition(&self) -> &TransitionController {
        &self.transition
    }

    pub fn saved_state(&self) -> SavedState {
        SavedState {
            rotation: self.rotation.clone(),
            transition: self.transition.state().clone(),
            rng: self.rng.clone(),
        }
    }

    pub fn save_state(&self) -> Result<String> {
        Ok(toml::to_string(&self.saved_state())?)
    }

    /// Restore rotation, transition and RNG, then rebuild the model for the
    /// restored kind
    pub fn restore_state(&mut self, source: &str) -> Result<()> {
        let saved: SavedState = toml::from_str(source)?;
        self.apply(saved);
        Ok(())
    }

    pub fn apply(&mut self, saved: SavedState) {
        self.rotation = saved.rotation;
        self.transition.restore(saved.transition);
        self.rng = saved.rng;
        self.rebuild(self.transition.current_kind());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(kind: WeatherKind) -> EngineConfig {
        EngineConfig {
            initial_kind: kind,
            seed: Some(1234),
            ..EngineConfig::default()
        }
    }

    #[test]
    fn same_seed_same_trajectory() {
        let geometry = CanvasGeometry::new(320, 480);
        let mut a = Simulation::new(&seeded(WeatherKind::SnowDay), geometry);
        let mut b = Simulation::new(&seeded(WeatherKind::SnowDay), geometry);
        for i in 0..200 {
            let targets = ((i as f32 * 0.1).sin() * 40.0, (i as f32 * 0.07).cos() * 20.0);
            a.tick(16.0, targets);
            b.tick(16.0, targets);
        }
        assert_eq!(a.model().particle_positions(), b.model().particle_positions());
        assert_eq!(a.rotation(), b.rotation());
    }

    #[test]
    fn stopped_request_swaps_model_at_once() {
        let geometry = CanvasGeometry::new(320, 480);
        let mut sim = Simulation::new(&seeded(WeatherKind::None), geometry);
        sim.request_kind(WeatherKind::RainDay, false);
        assert_eq!(sim.current_kind(), WeatherKind::RainDay);
        assert_eq!(sim.display_ratio(), 1.0);
        assert_eq!(sim.model().name(), "rain");
    }

    #[test]
    fn running_request_swaps_after_dismissal() {
        let geometry = CanvasGeometry::new(320, 480);
        let mut sim = Simulation::new(&seeded(WeatherKind::ThunderstormDay), geometry);
        sim.request_kind(WeatherKind::ClearDay, true);
        sim.tick(16.0, (0.0, 0.0));
        assert_eq!(sim.model().name(), "rain");
        for _ in 0..40 {
            sim.tick(16.0, (0.0, 0.0));
        }
        assert_eq!(sim.current_kind(), WeatherKind::ClearDay);
        assert_eq!(sim.model().name(), "sun");
        assert_eq!(sim.display_ratio(), 1.0);
    }

    #[test]
    fn resize_rebuilds_for_new_geometry() {
        let geometry = CanvasGeometry::new(320, 480);
        let mut sim = Simulation::new(&seeded(WeatherKind::WindNight), geometry);
        sim.resize(320, 480);
        assert_eq!(sim.geometry(), &geometry);
        sim.resize(640, 960);
        assert!(sim.geometry().matches(640, 960));
        let size = sim.geometry().canvas_size;
        for (x, y) in sim.model().particle_positions() {
            assert!(x <= size && y <= size);
        }
    }

    #[test]
    fn frame_carries_tick_state() {
        let geometry = CanvasGeometry::new(200, 300);
        let mut sim = Simulation::new(&seeded(WeatherKind::HailDay), geometry);
        sim.tick(16.0, (30.0, 0.0));
        let frame = sim.frame();
        assert_eq!(frame.version, 1);
        assert_eq!(frame.kind, WeatherKind::HailDay);
        assert!(frame.rotation_2d > 0.0);
        assert_eq!(
            frame.model.particle_positions(),
            sim.model().particle_positions()
        );
    }

    #[test]
    fn restored_state_reproduces_trajectory() {
        let geometry = CanvasGeometry::new(300, 500);
        let mut original = Simulation::new(&seeded(WeatherKind::RainNight), geometry);
        original.request_kind(WeatherKind::ClearNight, true);
        for _ in 0..5 {
            original.tick(16.0, (25.0, -10.0));
        }
        let saved = original.save_state().unwrap();

        let mut a = Simulation::new(&seeded(WeatherKind::None), geometry);
        let mut b = Simulation::new(&seeded(WeatherKind::CloudyDay), geometry);
        a.restore_state(&saved).unwrap();
        b.restore_state(&saved).unwrap();
        assert_eq!(a.rotation(), original.rotation());
        assert_eq!(a.transition().state(), original.transition().state());

        for i in 0..60 {
            let targets = (i as f32, -(i as f32) * 0.5);
            original.tick(16.0, targets);
            a.tick(16.0, targets);
            b.tick(16.0, targets);
        }
        assert_eq!(a.rotation(), original.rotation());
        assert_eq!(a.transition().state(), original.transition().state());
        assert_eq!(a.model().particle_positions(), b.model().particle_positions());
        assert_eq!(a.current_kind(), b.current_kind());
    }
}
