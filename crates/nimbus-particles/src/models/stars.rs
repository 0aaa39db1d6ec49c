//! Twinkling starfield drawn under night skies

use crate::curves::{advance_cycle, progress_fraction, triangle};
use crate::particle::random_position;
use crate::rand::ParticleRng;
use nimbus_core::{Canvas, CanvasGeometry, Color};

const STAR_COUNT: usize = 50;
const MIN_TWINKLE_MS: f32 = 2500.0;
const MAX_TWINKLE_MS: f32 = 5000.0;

const STAR_COLORS: [Color; 3] = [
    Color::rgb(210, 247, 255),
    Color::rgb(208, 233, 255),
    Color::rgb(175, 201, 228),
];

#[derive(Debug, Clone)]
struct Star {
    x: f32,
    y: f32,
    radius: f32,
    color: Color,
    duration: f32,
    progress: f32,
}

impl Star {
    fn alpha(&self) -> f32 {
        triangle(progress_fraction(self.progress, self.duration))
    }
}

/// Fixed points whose alpha cycles 0 → 1 → 0 on independent periods
#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new(geometry: &CanvasGeometry, rng: &mut ParticleRng) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|i| {
                let (x, y) = random_position(geometry, rng);
                let duration = rng.range(MIN_TWINKLE_MS, MAX_TWINKLE_MS);
                Star {
                    x,
                    y,
                    radius: geometry.width * rng.range(0.0013, 0.0033),
                    color: STAR_COLORS[i % STAR_COLORS.len()],
                    duration,
                    progress: rng.range(0.0, duration),
                }
            })
            .collect();
        Self { stars }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn update(&mut self, interval_ms: f32) {
        for star in &mut self.stars {
            star.progress = advance_cycle(star.progress, interval_ms, star.duration);
        }
    }

    pub fn draw(
        &self,
        geometry: &CanvasGeometry,
        canvas: &mut dyn Canvas,
        alpha: f32,
        rotation_2d: f32,
    ) {
        if alpha <= 0.0 {
            return;
        }
        let (cx, cy) = geometry.center();
        canvas.save();
        canvas.rotate(rotation_2d, cx, cy);
        for star in &self.stars {
            let (sx, sy) = geometry.to_screen(star.x, star.y);
            canvas.draw_circle(sx, sy, star.radius, star.color.with_alpha(star.alpha() * alpha));
        }
        canvas.restore();
    }

    pub fn positions(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.stars.iter().map(|s| (s.x, s.y))
    }
}
