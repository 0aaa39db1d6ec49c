//! Hail: tumbling square stones

use crate::palette::background_color;
use crate::particle::{
    depth_factor, entry_offset, particle_alpha, random_position, size_class, tilt_push,
    TiltTracker, SCALES,
};
use crate::rand::ParticleRng;
use crate::ParticleModel;
use nimbus_core::{Canvas, CanvasGeometry, Color, Rect, WeatherKind};

const COUNTS: [usize; 3] = [17, 17, 17];

/// Fastest spin, in degrees per millisecond
const MAX_SPIN: f32 = 0.25;

#[derive(Debug, Clone)]
struct Stone {
    x: f32,
    y: f32,
    size: f32,
    speed_x: f32,
    speed_y: f32,
    scale: f32,
    rotation: f32,
    spin: f32,
    color: Color,
}

impl Stone {
    fn spawn(&mut self, geometry: &CanvasGeometry, rng: &mut ParticleRng, first_time: bool) {
        let (x, y) = random_position(geometry, rng);
        self.x = x;
        self.y = if first_time { y } else { entry_offset(self.size, rng) };
        self.speed_x = rng.range(-self.speed_y, self.speed_y) * 0.2;
        self.rotation = rng.range(0.0, 360.0);
        self.spin = rng.range(-MAX_SPIN, MAX_SPIN);
    }

    fn step(&mut self, geometry: &CanvasGeometry, rng: &mut ParticleRng, interval: f32, delta_3d: f32) {
        let depth = depth_factor(self.scale);
        self.x += self.speed_x * interval * depth;
        self.y += self.speed_y * interval * (depth - tilt_push(delta_3d));
        self.rotation = (self.rotation + self.spin * interval) % 360.0;
        if !geometry.contains(self.x, self.y, self.size) {
            self.spawn(geometry, rng, false);
        }
    }
}

/// Fast falling stones, each spinning about its own center
#[derive(Debug, Clone)]
pub struct HailModel {
    stones: Vec<Stone>,
    background: Color,
    tilt: TiltTracker,
    rng: ParticleRng,
}

impl HailModel {
    pub fn new(geometry: &CanvasGeometry, kind: WeatherKind, mut rng: ParticleRng) -> Self {
        let colors = if kind.is_daytime() {
            [Color::rgb(128, 197, 255), Color::rgb(185, 222, 255), Color::rgb(255, 255, 255)]
        } else {
            [Color::rgb(40, 102, 155), Color::rgb(99, 144, 182), Color::rgb(255, 255, 255)]
        };
        let speed_y = geometry.width / 1000.0;
        let total: usize = COUNTS.iter().sum();

        let mut stones = Vec::with_capacity(total);
        for i in 0..total {
            let class = size_class(i, &COUNTS);
            let scale = SCALES[class];
            let mut stone = Stone {
                x: 0.0,
                y: 0.0,
                size: geometry.width / 60.0 * scale,
                speed_x: 0.0,
                speed_y,
                scale,
                rotation: 0.0,
                spin: 0.0,
                color: colors[class],
            };
            stone.spawn(geometry, &mut rng, true);
            stones.push(stone);
        }

        Self {
            stones,
            background: background_color(kind),
            tilt: TiltTracker::new(),
            rng,
        }
    }

    /// Diagonal-space position and extent of every particle
    #[cfg(test)]
    pub(crate) fn bounds(&self) -> Vec<(f32, f32, f32)> {
        self.stones.iter().map(|s| (s.x, s.y, s.size)).collect()
    }

    pub fn len(&self) -> usize {
        self.stones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }
}

impl ParticleModel for HailModel {
    fn update_data(
        &mut self,
        geometry: &CanvasGeometry,
        interval_ms: f32,
        _rotation_2d: f32,
        rotation_3d: f32,
    ) {
        let delta = self.tilt.delta(rotation_3d);
        for stone in &mut self.stones {
            stone.step(geometry, &mut self.rng, interval_ms, delta);
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
        for stone in &self.stones {
            let (sx, sy) = geometry.to_screen(stone.x, stone.y);
            let half = stone.size * 0.5;
            canvas.save();
            canvas.rotate(stone.rotation, sx, sy);
            canvas.draw_rect(Rect::centered(sx, sy, half, half), stone.color.fade(alpha));
            canvas.restore();
        }
        canvas.restore();
    }

    fn particle_positions(&self) -> Vec<(f32, f32)> {
        self.stones.iter().map(|s| (s.x, s.y)).collect()
    }
}
