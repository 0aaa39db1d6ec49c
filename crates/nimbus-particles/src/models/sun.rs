//! Clear day: three rings of slowly turning translucent squares

use crate::curves::{advance_cycle, progress_fraction};
use crate::palette::background_color;
use crate::particle::particle_alpha;
use crate::ParticleModel;
use nimbus_core::{Canvas, CanvasGeometry, Color, Rect, WeatherKind};

/// Ring radii as multiples of the base unit, inner to outer
const RING_SCALES: [f32; 3] = [1.0, 1.7794, 3.0594];
const RING_ALPHAS: [f32; 3] = [0.40, 0.16, 0.08];
/// Time for each ring to turn a quarter revolution; outer rings are slower
const RING_PERIODS_MS: [f32; 3] = [10_000.0, 14_000.0, 19_000.0];
/// Squares per ring, each offset by [`SQUARE_OFFSET`] degrees
const SQUARES_PER_RING: usize = 3;
const SQUARE_OFFSET: f32 = 30.0;
/// Parallax reach as a fraction of the base unit
const PARALLAX: f32 = 0.5;

#[derive(Debug, Clone)]
struct Ring {
    radius: f32,
    alpha: f32,
    period: f32,
    progress: f32,
}

impl Ring {
    /// Current turn in degrees, within one quarter revolution
    fn angle(&self) -> f32 {
        90.0 * progress_fraction(self.progress, self.period)
    }
}

/// Concentric rotating squares glowing in the upper part of the sky
#[derive(Debug, Clone)]
pub struct SunModel {
    unit: f32,
    anchor: (f32, f32),
    center: (f32, f32),
    rings: Vec<Ring>,
    background: Color,
    color: Color,
}

impl SunModel {
    pub fn new(geometry: &CanvasGeometry) -> Self {
        let unit = geometry.width * 0.21;
        let anchor = (geometry.width * 0.5, unit * 2.0);
        let rings = RING_SCALES
            .iter()
            .zip(RING_ALPHAS)
            .zip(RING_PERIODS_MS)
            .map(|((scale, alpha), period)| Ring {
                radius: unit * scale,
                alpha,
                period,
                progress: 0.0,
            })
            .collect();
        Self {
            unit,
            anchor,
            center: anchor,
            rings,
            background: background_color(WeatherKind::ClearDay),
            color: Color::WHITE,
        }
    }

    pub fn unit(&self) -> f32 {
        self.unit
    }

    pub fn center(&self) -> (f32, f32) {
        self.center
    }
}

impl ParticleModel for SunModel {
    fn update_data(
        &mut self,
        _geometry: &CanvasGeometry,
        interval_ms: f32,
        rotation_2d: f32,
        rotation_3d: f32,
    ) {
        for ring in &mut self.rings {
            ring.progress = advance_cycle(ring.progress, interval_ms, ring.period);
        }
        let reach = self.unit * PARALLAX;
        self.center = (
            self.anchor.0 + rotation_2d.to_radians().sin() * reach,
            self.anchor.1 - rotation_3d.to_radians().sin() * reach,
        );
    }

    fn draw(
        &self,
        _geometry: &CanvasGeometry,
        canvas: &mut dyn Canvas,
        display_ratio: f32,
        scroll_ratio: f32,
        _rotation_2d: f32,
        _rotation_3d: f32,
    ) {
        canvas.fill(self.background.fade(display_ratio));

        let alpha = particle_alpha(display_ratio, scroll_ratio);
        if alpha <= 0.0 {
            return;
        }

        let (cx, cy) = self.center;
        for ring in &self.rings {
            let color = self.color.with_alpha(ring.alpha * alpha);
            let square = Rect::centered(cx, cy, ring.radius, ring.radius);
            for k in 0..SQUARES_PER_RING {
                canvas.save();
                canvas.rotate(ring.angle() + SQUARE_OFFSET * k as f32, cx, cy);
                canvas.draw_rect(square, color);
                canvas.restore();
            }
        }
    }

    fn particle_positions(&self) -> Vec<(f32, f32)> {
        vec![self.center; self.rings.len()]
    }
}
