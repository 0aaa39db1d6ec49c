//! Wind: long horizontal streaks blowing across a slanted frame

use crate::palette::background_color;
use crate::particle::{
    depth_factor, entry_offset, particle_alpha, random_position, size_class, tilt_push,
    TiltTracker, SCALES,
};
use crate::rand::ParticleRng;
use crate::ParticleModel;
use nimbus_core::{Canvas, CanvasGeometry, Color, WeatherKind};

/// Slant of the blow axis from horizontal, in degrees
const WIND_ANGLE: f32 = 16.0;

const COUNTS: [usize; 3] = [80, 80, 80];

#[derive(Debug, Clone)]
struct Streak {
    x: f32,
    y: f32,
    length: f32,
    thickness: f32,
    speed: f32,
    scale: f32,
    color: Color,
}

impl Streak {
    fn spawn(&mut self, geometry: &CanvasGeometry, rng: &mut ParticleRng, first_time: bool) {
        let (x, y) = random_position(geometry, rng);
        self.x = if first_time { x } else { entry_offset(self.length, rng) };
        self.y = y;
    }

    fn step(&mut self, geometry: &CanvasGeometry, rng: &mut ParticleRng, interval: f32, delta_3d: f32) {
        let push = tilt_push(delta_3d);
        let angle = WIND_ANGLE.to_radians();
        let travel = self.speed * interval;
        self.x += travel * (depth_factor(self.scale) + push * angle.cos());
        self.y -= travel * push * angle.sin();
        if !geometry.contains(self.x, self.y, self.length) {
            self.spawn(geometry, rng, false);
        }
    }
}

/// Streaks travelling left to right
#[derive(Debug, Clone)]
pub struct WindModel {
    streaks: Vec<Streak>,
    background: Color,
    tilt: TiltTracker,
    rng: ParticleRng,
}

impl WindModel {
    pub fn new(geometry: &CanvasGeometry, kind: WeatherKind, mut rng: ParticleRng) -> Self {
        let colors = if kind.is_daytime() {
            [Color::rgb(240, 200, 148), Color::rgb(237, 178, 100), Color::rgb(209, 142, 52)]
        } else {
            [Color::rgb(149, 134, 113), Color::rgb(130, 108, 77), Color::rgb(104, 79, 45)]
        };
        let speed = geometry.width / 300.0;
        let total: usize = COUNTS.iter().sum();

        let mut streaks = Vec::with_capacity(total);
        for i in 0..total {
            let class = size_class(i, &COUNTS);
            let scale = SCALES[class];
            let mut streak = Streak {
                x: 0.0,
                y: 0.0,
                length: geometry.width / 4.0 * scale,
                thickness: (geometry.width / 400.0 * scale).max(1.0),
                speed,
                scale,
                color: colors[class],
            };
            streak.spawn(geometry, &mut rng, true);
            streaks.push(streak);
        }

        Self {
            streaks,
            background: background_color(kind),
            tilt: TiltTracker::new(),
            rng,
        }
    }

    /// Diagonal-space position and extent of every particle
    #[cfg(test)]
    pub(crate) fn bounds(&self) -> Vec<(f32, f32, f32)> {
        self.streaks.iter().map(|s| (s.x, s.y, s.length)).collect()
    }

    pub fn len(&self) -> usize {
        self.streaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streaks.is_empty()
    }
}

impl ParticleModel for WindModel {
    fn update_data(
        &mut self,
        geometry: &CanvasGeometry,
        interval_ms: f32,
        _rotation_2d: f32,
        rotation_3d: f32,
    ) {
        let delta = self.tilt.delta(rotation_3d);
        for streak in &mut self.streaks {
            streak.step(geometry, &mut self.rng, interval_ms, delta);
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
        canvas.rotate(rotation_2d + WIND_ANGLE, cx, cy);
        for streak in &self.streaks {
            let (sx, sy) = geometry.to_screen(streak.x, streak.y);
            canvas.draw_line(
                (sx, sy),
                (sx + streak.length, sy),
                streak.thickness,
                streak.color.fade(alpha),
            );
        }
        canvas.restore();
    }

    fn particle_positions(&self) -> Vec<(f32, f32)> {
        self.streaks.iter().map(|s| (s.x, s.y)).collect()
    }
}
