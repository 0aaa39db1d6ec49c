//! Snow: slowly drifting flakes

use crate::palette::background_color;
use crate::particle::{
    depth_factor, entry_offset, particle_alpha, random_position, size_class, tilt_push,
    TiltTracker, SCALES,
};
use crate::rand::ParticleRng;
use crate::ParticleModel;
use nimbus_core::{Canvas, CanvasGeometry, Color, WeatherKind};

const COUNTS: [usize; 3] = [30, 30, 30];

#[derive(Debug, Clone)]
struct Flake {
    x: f32,
    y: f32,
    radius: f32,
    speed_x: f32,
    speed_y: f32,
    scale: f32,
    color: Color,
}

impl Flake {
    fn spawn(&mut self, geometry: &CanvasGeometry, rng: &mut ParticleRng, first_time: bool) {
        let (x, y) = random_position(geometry, rng);
        self.x = x;
        self.y = if first_time { y } else { entry_offset(self.radius, rng) };
        self.speed_x = rng.range(-self.speed_y, self.speed_y);
    }

    fn step(&mut self, geometry: &CanvasGeometry, rng: &mut ParticleRng, interval: f32, delta_3d: f32) {
        let depth = depth_factor(self.scale);
        self.x += self.speed_x * interval * depth;
        self.y += self.speed_y * interval * (depth - tilt_push(delta_3d));
        if !geometry.contains(self.x, self.y, self.radius) {
            self.spawn(geometry, rng, false);
        }
    }
}

/// Falling snow flakes with per-flake horizontal drift
#[derive(Debug, Clone)]
pub struct SnowModel {
    flakes: Vec<Flake>,
    background: Color,
    tilt: TiltTracker,
    rng: ParticleRng,
}

impl SnowModel {
    pub fn new(geometry: &CanvasGeometry, kind: WeatherKind, mut rng: ParticleRng) -> Self {
        let colors = if kind.is_daytime() {
            [Color::rgb(128, 197, 255), Color::rgb(185, 222, 255), Color::rgb(255, 255, 255)]
        } else {
            [Color::rgb(40, 102, 155), Color::rgb(99, 144, 182), Color::rgb(255, 255, 255)]
        };
        let speed_y = geometry.width / 4000.0;
        let total: usize = COUNTS.iter().sum();

        let mut flakes = Vec::with_capacity(total);
        for i in 0..total {
            let class = size_class(i, &COUNTS);
            let scale = SCALES[class];
            let mut flake = Flake {
                x: 0.0,
                y: 0.0,
                radius: geometry.width / 140.0 * scale,
                speed_x: 0.0,
                speed_y,
                scale,
                color: colors[class],
            };
            flake.spawn(geometry, &mut rng, true);
            flakes.push(flake);
        }

        Self {
            flakes,
            background: background_color(kind),
            tilt: TiltTracker::new(),
            rng,
        }
    }

    /// Diagonal-space position and extent of every particle
    #[cfg(test)]
    pub(crate) fn bounds(&self) -> Vec<(f32, f32, f32)> {
        self.flakes.iter().map(|f| (f.x, f.y, f.radius)).collect()
    }

    pub fn len(&self) -> usize {
        self.flakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flakes.is_empty()
    }
}

impl ParticleModel for SnowModel {
    fn update_data(
        &mut self,
        geometry: &CanvasGeometry,
        interval_ms: f32,
        _rotation_2d: f32,
        rotation_3d: f32,
    ) {
        let delta = self.tilt.delta(rotation_3d);
        for flake in &mut self.flakes {
            flake.step(geometry, &mut self.rng, interval_ms, delta);
        }
    }

    fn draw(
        &self,
        geometry: &CanvasGeometry,
        canvas: &mut dyn Canvas,
        display_ratio: f32,
        scroll_ratio: f32,
        rotation_2d: f32,
        _rotation_3d: f32,
    ) {
        canvas.fill(self.background.fade(display_ratio));

        let alpha = particle_alpha(display_ratio, scroll_ratio);
        if alpha <= 0.0 {
            return;
        }

        let (cx, cy) = geometry.center();
        canvas.save();
        canvas.rotate(rotation_2d, cx, cy);
        for flake in &self.flakes {
            let (sx, sy) = geometry.to_screen(flake.x, flake.y);
            canvas.draw_circle(sx, sy, flake.radius, flake.color.fade(alpha));
        }
        canvas.restore();
    }

    fn particle_positions(&self) -> Vec<(f32, f32)> {
        self.flakes.iter().map(|f| (f.x, f.y)).collect()
    }
}
