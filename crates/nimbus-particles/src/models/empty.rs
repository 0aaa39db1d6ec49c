//! The "none" weather: nothing to animate, transparent frame

use crate::ParticleModel;
use nimbus_core::{Canvas, CanvasGeometry};

#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyModel;

impl ParticleModel for EmptyModel {
    fn update_data(&mut self, _: &CanvasGeometry, _: f32, _: f32, _: f32) {}

    fn draw(&self, _: &CanvasGeometry, _: &mut dyn Canvas, _: f32, _: f32, _: f32, _: f32) {}

    fn particle_positions(&self) -> Vec<(f32, f32)> {
        Vec::new()
    }
}
