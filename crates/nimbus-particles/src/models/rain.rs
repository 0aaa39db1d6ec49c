//! Rain, sleet and thunderstorm: slanted streaks falling through diagonal space

use super::thunder::Thunder;
use crate::palette::background_color;
use crate::particle::{
    depth_factor, entry_offset, particle_alpha, random_position, size_class, tilt_push,
    TiltTracker, SCALES,
};
use crate::rand::ParticleRng;
use crate::ParticleModel;
use nimbus_core::{Canvas, CanvasGeometry, Color, WeatherKind};

/// Slant of the fall axis from vertical, in degrees
const RAIN_ANGLE: f32 = 8.0;

#[derive(Debug, Clone)]
struct Raindrop {
    x: f32,
    y: f32,
    length: f32,
    width: f32,
    speed: f32,
    scale: f32,
    color: Color,
    /// Distance fallen during the most recent tick
    last_fall: f32,
}

impl Raindrop {
    fn spawn(&mut self, geometry: &CanvasGeometry, rng: &mut ParticleRng, first_time: bool) {
        let (x, y) = random_position(geometry, rng);
        self.x = x;
        self.y = if first_time { y } else { entry_offset(self.length, rng) };
    }

    fn step(&mut self, geometry: &CanvasGeometry, rng: &mut ParticleRng, interval: f32, delta_3d: f32) {
        let push = tilt_push(delta_3d);
        let angle = RAIN_ANGLE.to_radians();
        let travel = self.speed * interval;
        let fall = travel * (depth_factor(self.scale) - push * angle.cos());
        self.y += fall;
        self.x -= travel * push * angle.sin();
        self.last_fall = fall;
        if !geometry.contains(self.x, self.y, self.length) {
            self.spawn(geometry, rng, false);
        }
    }
}

/// Variant-specific parameters
struct RainStyle {
    counts: [usize; 3],
    colors: [Color; 3],
    length_ratio: f32,
    width_ratio: f32,
    thunder: bool,
}

fn rain_style(kind: WeatherKind) -> RainStyle {
    match kind {
        WeatherKind::SleetDay | WeatherKind::SleetNight => RainStyle {
            counts: [15, 15, 15],
            colors: if kind.is_daytime() {
                [Color::rgb(128, 197, 255), Color::rgb(185, 222, 255), Color::rgb(255, 255, 255)]
            } else {
                [Color::rgb(40, 102, 155), Color::rgb(99, 144, 182), Color::rgb(255, 255, 255)]
            },
            length_ratio: 1.0 / 40.0,
            width_ratio: 1.0 / 150.0,
            thunder: false,
        },
        WeatherKind::ThunderstormDay | WeatherKind::ThunderstormNight => RainStyle {
            counts: [30, 30, 30],
            colors: [Color::rgb(182, 142, 82), Color::rgb(88, 92, 113), Color::rgb(255, 255, 255)],
            length_ratio: 1.0 / 18.0,
            width_ratio: 1.0 / 300.0,
            thunder: true,
        },
        _ => RainStyle {
            counts: [30, 30, 15],
            colors: if kind.is_daytime() {
                [Color::rgb(223, 179, 114), Color::rgb(152, 175, 222), Color::rgb(255, 255, 255)]
            } else {
                [Color::rgb(182, 142, 82), Color::rgb(88, 92, 113), Color::rgb(255, 255, 255)]
            },
            length_ratio: 1.0 / 18.0,
            width_ratio: 1.0 / 300.0,
            thunder: false,
        },
    }
}

/// Falling rain streaks, optionally with a thunder overlay
#[derive(Debug, Clone)]
pub struct RainModel {
    drops: Vec<Raindrop>,
    background: Color,
    thunder: Option<Thunder>,
    tilt: TiltTracker,
    rng: ParticleRng,
}

impl RainModel {
    pub fn new(geometry: &CanvasGeometry, kind: WeatherKind, mut rng: ParticleRng) -> Self {
        let style = rain_style(kind);
        let total: usize = style.counts.iter().sum();
        let speed = geometry.width / 350.0;

        let mut drops = Vec::with_capacity(total);
        for i in 0..total {
            let class = size_class(i, &style.counts);
            let scale = SCALES[class];
            let mut drop = Raindrop {
                x: 0.0,
                y: 0.0,
                length: geometry.width * style.length_ratio * scale,
                width: (geometry.width * style.width_ratio * scale).max(1.0),
                speed,
                scale,
                color: style.colors[class],
                last_fall: 0.0,
            };
            drop.spawn(geometry, &mut rng, true);
            drops.push(drop);
        }

        let thunder = style.thunder.then(|| Thunder::new(rng.fork()));
        Self {
            drops,
            background: background_color(kind),
            thunder,
            tilt: TiltTracker::new(),
            rng,
        }
    }

    /// Diagonal-space position and extent of every particle
    #[cfg(test)]
    pub(crate) fn bounds(&self) -> Vec<(f32, f32, f32)> {
        self.drops.iter().map(|d| (d.x, d.y, d.length)).collect()
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    pub fn has_thunder(&self) -> bool {
        self.thunder.is_some()
    }
}

impl ParticleModel for RainModel {
    fn update_data(
        &mut self,
        geometry: &CanvasGeometry,
        interval_ms: f32,
        _rotation_2d: f32,
        rotation_3d: f32,
    ) {
        let delta = self.tilt.delta(rotation_3d);
        for drop in &mut self.drops {
            drop.step(geometry, &mut self.rng, interval_ms, delta);
        }
        if let Some(thunder) = &mut self.thunder {
            thunder.update(interval_ms);
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
        canvas.rotate(rotation_2d + RAIN_ANGLE, cx, cy);
        for drop in &self.drops {
            let (sx, sy) = geometry.to_screen(drop.x, drop.y);
            canvas.draw_line(
                (sx, sy),
                (sx, sy + drop.length),
                drop.width,
                drop.color.fade(alpha),
            );
        }
        canvas.restore();

        if let Some(thunder) = &self.thunder {
            thunder.draw(canvas, alpha);
        }
    }

    fn particle_positions(&self) -> Vec<(f32, f32)> {
        self.drops.iter().map(|d| (d.x, d.y)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_core::{DrawOp, RecordingCanvas};

    #[test]
    fn long_tick_falls_at_least_base_speed() {
        let geometry = CanvasGeometry::new(1000, 2000);
        let mut model = RainModel::new(&geometry, WeatherKind::RainDay, ParticleRng::new(42));
        model.update_data(&geometry, 5000.0, 0.0, 0.0);
        for drop in &model.drops {
            let expected = drop.speed * 5000.0 * drop.scale.powf(1.5);
            assert!(drop.last_fall >= expected - 1e-2, "{} < {expected}", drop.last_fall);
        }
    }

    #[test]
    fn short_ticks_fall_monotonically_without_tilt() {
        let geometry = CanvasGeometry::new(1000, 2000);
        let mut model = RainModel::new(&geometry, WeatherKind::RainNight, ParticleRng::new(1));
        let before: Vec<f32> = model.drops.iter().map(|d| d.y).collect();
        model.update_data(&geometry, 16.0, 0.0, 0.0);
        for (drop, y0) in model.drops.iter().zip(before) {
            // Either fell, or left the canvas and re-entered at the top
            assert!(drop.y > y0 || (-drop.length..=0.0).contains(&drop.y));
        }
    }

    fn distinct_heights(model: &RainModel) -> usize {
        let mut heights: Vec<u32> = model.drops.iter().map(|d| d.y.to_bits()).collect();
        heights.sort_unstable();
        heights.dedup();
        heights.len()
    }

    #[test]
    fn drops_do_not_settle_into_rows() {
        let geometry = CanvasGeometry::new(1000, 2000);
        let mut model = RainModel::new(&geometry, WeatherKind::RainDay, ParticleRng::new(42));
        let mut jitter = ParticleRng::new(7);
        assert_eq!(distinct_heights(&model), 75);

        // Five simulated minutes of slightly uneven frames
        let mut elapsed = 0.0;
        while elapsed < 300_000.0 {
            let interval = 16.0 + jitter.range(-3.0, 3.0);
            model.update_data(&geometry, interval, 0.0, 0.0);
            elapsed += interval;
        }
        assert!(distinct_heights(&model) >= 72, "{}", distinct_heights(&model));

        // A stalled frame sends most drops out at once
        model.update_data(&geometry, 1000.0, 0.0, 0.0);
        assert!(distinct_heights(&model) >= 72, "{}", distinct_heights(&model));
    }

    #[test]
    fn tilt_change_pushes_drops_back_up() {
        let geometry = CanvasGeometry::new(1000, 2000);
        let mut model = RainModel::new(&geometry, WeatherKind::RainDay, ParticleRng::new(4));
        model.update_data(&geometry, 16.0, 0.0, 0.0);
        // A 30 degree jump gives push = 2.5, stronger than any depth factor
        model.update_data(&geometry, 16.0, 0.0, 30.0);
        for drop in &model.drops {
            assert!(drop.last_fall < 0.0);
        }
    }

    #[test]
    fn counts_per_variant() {
        let geometry = CanvasGeometry::new(500, 900);
        let rain = RainModel::new(&geometry, WeatherKind::RainDay, ParticleRng::new(1));
        let sleet = RainModel::new(&geometry, WeatherKind::SleetDay, ParticleRng::new(1));
        let storm = RainModel::new(&geometry, WeatherKind::ThunderstormNight, ParticleRng::new(1));
        assert_eq!(rain.len(), 75);
        assert_eq!(sleet.len(), 45);
        assert_eq!(storm.len(), 90);
        assert!(storm.has_thunder());
        assert!(!rain.has_thunder());
    }

    #[test]
    fn draw_rotates_by_slant_plus_device_rotation() {
        let geometry = CanvasGeometry::new(500, 900);
        let model = RainModel::new(&geometry, WeatherKind::RainDay, ParticleRng::new(1));
        let mut canvas = RecordingCanvas::new(500, 900);
        model.draw(&geometry, &mut canvas, 1.0, 0.0, 12.0, 0.0);
        let rotate = canvas
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Rotate { degrees, .. } => Some(*degrees),
                _ => None,
            })
            .unwrap();
        assert!((rotate - 20.0).abs() < 1e-4);
        assert_eq!(canvas.shape_count(), 75);
    }

    #[test]
    fn scroll_fades_particles_but_not_background() {
        let geometry = CanvasGeometry::new(500, 900);
        let model = RainModel::new(&geometry, WeatherKind::RainDay, ParticleRng::new(1));
        let mut canvas = RecordingCanvas::new(500, 900);
        model.draw(&geometry, &mut canvas, 1.0, 1.0, 0.0, 0.0);
        assert_eq!(canvas.shape_count(), 0);
        assert_eq!(canvas.ops.len(), 1);
        assert!(matches!(canvas.ops[0], DrawOp::Fill(c) if c.a == 1.0));
    }
}
