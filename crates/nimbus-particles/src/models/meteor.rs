//! Clear night: meteors streaking over a twinkling starfield

use super::stars::Starfield;
use crate::palette::background_color;
use crate::particle::{
    depth_factor, entry_offset, particle_alpha, random_position, size_class, tilt_push,
    TiltTracker, SCALES,
};
use crate::rand::ParticleRng;
use crate::ParticleModel;
use nimbus_core::{Canvas, CanvasGeometry, Color, WeatherKind};

/// Rotation of the fall axis, in degrees
const METEOR_ANGLE: f32 = 60.0;

const COUNTS: [usize; 3] = [5, 5, 5];

const METEOR_COLORS: [Color; 3] = [
    Color::rgb(210, 247, 255),
    Color::rgb(208, 233, 255),
    Color::rgb(175, 201, 228),
];

#[derive(Debug, Clone)]
struct Meteor {
    x: f32,
    y: f32,
    length: f32,
    width: f32,
    speed: f32,
    scale: f32,
    color: Color,
}

impl Meteor {
    fn spawn(&mut self, geometry: &CanvasGeometry, rng: &mut ParticleRng, first_time: bool) {
        let (x, y) = random_position(geometry, rng);
        self.x = x;
        self.y = if first_time { y } else { entry_offset(self.length, rng) };
    }

    fn step(&mut self, geometry: &CanvasGeometry, rng: &mut ParticleRng, interval: f32, delta_3d: f32) {
        let push = tilt_push(delta_3d);
        let angle = METEOR_ANGLE.to_radians();
        let travel = self.speed * interval;
        self.x -= travel * push * angle.cos();
        self.y += travel * (depth_factor(self.scale) - push * angle.sin());
        if !geometry.contains(self.x, self.y, self.length) {
            self.spawn(geometry, rng, false);
        }
    }
}

/// Meteor streaks plus the night starfield
#[derive(Debug, Clone)]
pub struct MeteorShowerModel {
    meteors: Vec<Meteor>,
    stars: Starfield,
    background: Color,
    tilt: TiltTracker,
    rng: ParticleRng,
}

impl MeteorShowerModel {
    pub fn new(geometry: &CanvasGeometry, mut rng: ParticleRng) -> Self {
        let speed = geometry.width / 200.0;
        let total: usize = COUNTS.iter().sum();

        let mut meteors = Vec::with_capacity(total);
        for i in 0..total {
            let class = size_class(i, &COUNTS);
            let scale = SCALES[class];
            let mut meteor = Meteor {
                x: 0.0,
                y: 0.0,
                length: geometry.width / 9.0 * scale,
                width: (geometry.width / 400.0 * scale).max(1.0),
                speed,
                scale,
                color: METEOR_COLORS[class],
            };
            meteor.spawn(geometry, &mut rng, true);
            meteors.push(meteor);
        }

        let stars = Starfield::new(geometry, &mut rng);
        Self {
            meteors,
            stars,
            background: background_color(WeatherKind::ClearNight),
            tilt: TiltTracker::new(),
            rng,
        }
    }

    /// Meteors with their streak length, then stars as points
    #[cfg(test)]
    pub(crate) fn bounds(&self) -> Vec<(f32, f32, f32)> {
        self.meteors
            .iter()
            .map(|m| (m.x, m.y, m.length))
            .chain(self.stars.positions().map(|(x, y)| (x, y, 0.0)))
            .collect()
    }

    pub fn meteor_count(&self) -> usize {
        self.meteors.len()
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }
}

impl ParticleModel for MeteorShowerModel {
    fn update_data(
        &mut self,
        geometry: &CanvasGeometry,
        interval_ms: f32,
        _rotation_2d: f32,
        rotation_3d: f32,
    ) {
        let delta = self.tilt.delta(rotation_3d);
        for meteor in &mut self.meteors {
            meteor.step(geometry, &mut self.rng, interval_ms, delta);
        }
        self.stars.update(interval_ms);
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

        self.stars.draw(geometry, canvas, alpha, rotation_2d);

        let (cx, cy) = geometry.center();
        canvas.save();
        canvas.rotate(rotation_2d + METEOR_ANGLE, cx, cy);
        for meteor in &self.meteors {
            let (sx, sy) = geometry.to_screen(meteor.x, meteor.y);
            // Tail trails behind the head along the fall axis
            canvas.draw_line(
                (sx, sy),
                (sx, sy - meteor.length),
                meteor.width,
                meteor.color.fade(alpha),
            );
        }
        canvas.restore();
    }

    fn particle_positions(&self) -> Vec<(f32, f32)> {
        self.meteors
            .iter()
            .map(|m| (m.x, m.y))
            .chain(self.stars.positions())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_core::{DrawOp, RecordingCanvas};

    #[test]
    fn fifteen_meteors_over_fifty_stars() {
        let geometry = CanvasGeometry::new(400, 700);
        let model = MeteorShowerModel::new(&geometry, ParticleRng::new(61));
        assert_eq!(model.meteor_count(), 15);
        assert_eq!(model.star_count(), 50);
        assert_eq!(model.particle_positions().len(), 65);
    }

    #[test]
    fn meteors_fall_along_their_axis_without_tilt() {
        let geometry = CanvasGeometry::new(400, 700);
        let mut model = MeteorShowerModel::new(&geometry, ParticleRng::new(62));
        let before: Vec<(f32, f32)> = model.meteors.iter().map(|m| (m.x, m.y)).collect();
        model.update_data(&geometry, 16.0, 0.0, 0.0);
        for (meteor, (x0, y0)) in model.meteors.iter().zip(before) {
            if meteor.y <= 0.0 {
                continue;
            }
            assert_eq!(meteor.x, x0);
            let expected = meteor.speed * 16.0 * depth_factor(meteor.scale);
            assert!((meteor.y - y0 - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn stars_draw_before_meteors() {
        let geometry = CanvasGeometry::new(400, 700);
        let model = MeteorShowerModel::new(&geometry, ParticleRng::new(63));
        let mut canvas = RecordingCanvas::new(400, 700);
        model.draw(&geometry, &mut canvas, 1.0, 0.0, 0.0, 0.0);
        let first_line = canvas
            .ops
            .iter()
            .position(|op| matches!(op, DrawOp::Line { .. }))
            .unwrap();
        let last_circle = canvas
            .ops
            .iter()
            .rposition(|op| matches!(op, DrawOp::Circle { .. }))
            .unwrap();
        assert!(last_circle < first_line);
        assert_eq!(canvas.shape_count(), 65);
        assert!(canvas.is_balanced());
    }
}
