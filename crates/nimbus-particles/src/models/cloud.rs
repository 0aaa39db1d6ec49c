//! Cloud, fog and haze: slowly breathing puffs anchored to the screen
//!
//! Puffs do not travel. Each one grows and shrinks on its own cycle and
//! slides a little with device rotation to give a parallax effect. The
//! thunder variant adds the lightning overlay; partly cloudy nights show the
//! starfield behind the puffs.

use super::stars::Starfield;
use super::thunder::Thunder;
use crate::curves::{advance_cycle, lerp_f32, progress_fraction, triangle};
use crate::palette::background_color;
use crate::particle::particle_alpha;
use crate::rand::ParticleRng;
use crate::ParticleModel;
use nimbus_core::{Canvas, CanvasGeometry, Color, WeatherKind};

/// Which family of cloud scene to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudStyle {
    PartlyCloudy,
    Cloudy,
    Fog,
    Haze,
    Thunder,
}

impl CloudStyle {
    /// Style for a cloud-family kind; `None` for kinds animated elsewhere
    pub fn for_kind(kind: WeatherKind) -> Option<Self> {
        match kind {
            WeatherKind::PartlyCloudyDay | WeatherKind::PartlyCloudyNight => {
                Some(CloudStyle::PartlyCloudy)
            }
            WeatherKind::CloudyDay | WeatherKind::CloudyNight => Some(CloudStyle::Cloudy),
            WeatherKind::FogDay | WeatherKind::FogNight => Some(CloudStyle::Fog),
            WeatherKind::HazeDay | WeatherKind::HazeNight => Some(CloudStyle::Haze),
            WeatherKind::ThunderDay | WeatherKind::ThunderNight => Some(CloudStyle::Thunder),
            _ => None,
        }
    }

    pub fn puff_count(self) -> usize {
        match self {
            CloudStyle::PartlyCloudy => 6,
            CloudStyle::Cloudy | CloudStyle::Thunder => 9,
            CloudStyle::Fog | CloudStyle::Haze => 8,
        }
    }

    /// Base puff color and per-puff alpha
    fn tint(self, daytime: bool) -> (Color, f32) {
        match (self, daytime) {
            (CloudStyle::PartlyCloudy, true) => (Color::rgb(255, 255, 255), 0.40),
            (CloudStyle::PartlyCloudy, false) => (Color::rgb(203, 203, 203), 0.15),
            (CloudStyle::Cloudy, true) => (Color::rgb(160, 179, 191), 0.30),
            (CloudStyle::Cloudy, false) => (Color::rgb(102, 117, 127), 0.30),
            (CloudStyle::Fog, true) => (Color::rgb(85, 99, 110), 0.40),
            (CloudStyle::Fog, false) => (Color::rgb(57, 67, 74), 0.40),
            (CloudStyle::Haze, true) => (Color::rgb(179, 158, 132), 0.30),
            (CloudStyle::Haze, false) => (Color::rgb(86, 86, 86), 0.30),
            (CloudStyle::Thunder, _) => (Color::rgb(81, 67, 168), 0.35),
        }
    }

    /// Vertical band, as fractions of the canvas height, that anchors fall in
    fn band(self) -> (f32, f32) {
        match self {
            CloudStyle::PartlyCloudy | CloudStyle::Cloudy | CloudStyle::Thunder => (-0.1, 0.15),
            CloudStyle::Fog | CloudStyle::Haze => (0.55, 1.05),
        }
    }
}

#[derive(Debug, Clone)]
struct Puff {
    anchor_x: f32,
    anchor_y: f32,
    init_radius: f32,
    scale_ratio: f32,
    duration: f32,
    progress: f32,
    move_factor: f32,
    color: Color,
    center_x: f32,
    center_y: f32,
}

impl Puff {
    fn radius(&self) -> f32 {
        let t = triangle(progress_fraction(self.progress, self.duration));
        lerp_f32(self.init_radius, self.init_radius * self.scale_ratio, t)
    }

    fn follow(&mut self, rotation_2d: f32, rotation_3d: f32) {
        let reach = self.radius() * self.move_factor;
        self.center_x = self.anchor_x + rotation_2d.to_radians().sin() * reach;
        self.center_y = self.anchor_y - rotation_3d.to_radians().sin() * reach;
    }
}

/// Breathing puffs, optionally over stars and under lightning
#[derive(Debug, Clone)]
pub struct CloudModel {
    style: CloudStyle,
    puffs: Vec<Puff>,
    background: Color,
    stars: Option<Starfield>,
    thunder: Option<Thunder>,
}

impl CloudModel {
    pub fn new(geometry: &CanvasGeometry, kind: WeatherKind, mut rng: ParticleRng) -> Self {
        let style = CloudStyle::for_kind(kind).unwrap_or(CloudStyle::Cloudy);
        let (color, alpha) = style.tint(kind.is_daytime());
        let (band_top, band_bottom) = style.band();
        let count = style.puff_count();

        let puffs = (0..count)
            .map(|i| {
                // Spread anchors across the width so puffs overlap into one bank
                let slot = (i as f32 + 0.5) / count as f32;
                let anchor_x = geometry.width * (slot + rng.range(-0.08, 0.08));
                let anchor_y = geometry.height * rng.range(band_top, band_bottom);
                let duration = rng.range(7000.0, 12000.0);
                let mut puff = Puff {
                    anchor_x,
                    anchor_y,
                    init_radius: geometry.width * rng.range(0.25, 0.45),
                    scale_ratio: rng.range(1.1, 1.3),
                    duration,
                    progress: rng.range(0.0, duration),
                    move_factor: rng.range(0.1, 0.3),
                    color: color.with_alpha(alpha),
                    center_x: anchor_x,
                    center_y: anchor_y,
                };
                puff.follow(0.0, 0.0);
                puff
            })
            .collect();

        let stars = (kind == WeatherKind::PartlyCloudyNight)
            .then(|| Starfield::new(geometry, &mut rng));
        let thunder = (style == CloudStyle::Thunder).then(|| Thunder::new(rng.fork()));

        Self {
            style,
            puffs,
            background: background_color(kind),
            stars,
            thunder,
        }
    }

    pub fn style(&self) -> CloudStyle {
        self.style
    }

    pub fn len(&self) -> usize {
        self.puffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puffs.is_empty()
    }

    pub fn has_stars(&self) -> bool {
        self.stars.is_some()
    }

    pub fn has_thunder(&self) -> bool {
        self.thunder.is_some()
    }
}

impl ParticleModel for CloudModel {
    fn update_data(
        &mut self,
        _geometry: &CanvasGeometry,
        interval_ms: f32,
        rotation_2d: f32,
        rotation_3d: f32,
    ) {
        for puff in &mut self.puffs {
            puff.progress = advance_cycle(puff.progress, interval_ms, puff.duration);
            puff.follow(rotation_2d, rotation_3d);
        }
        if let Some(stars) = &mut self.stars {
            stars.update(interval_ms);
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

        if let Some(stars) = &self.stars {
            stars.draw(geometry, canvas, alpha, rotation_2d);
        }
        for puff in &self.puffs {
            canvas.draw_circle(puff.center_x, puff.center_y, puff.radius(), puff.color.fade(alpha));
        }
        if let Some(thunder) = &self.thunder {
            thunder.draw(canvas, alpha);
        }
    }

    fn particle_positions(&self) -> Vec<(f32, f32)> {
        self.puffs.iter().map(|p| (p.center_x, p.center_y)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_core::RecordingCanvas;

    #[test]
    fn puff_counts_per_style() {
        let geometry = CanvasGeometry::new(400, 700);
        let cases = [
            (WeatherKind::PartlyCloudyDay, 6),
            (WeatherKind::CloudyNight, 9),
            (WeatherKind::FogDay, 8),
            (WeatherKind::HazeNight, 8),
            (WeatherKind::ThunderDay, 9),
        ];
        for (kind, count) in cases {
            let model = CloudModel::new(&geometry, kind, ParticleRng::new(51));
            assert_eq!(model.len(), count, "{kind}");
        }
    }

    #[test]
    fn overlays_follow_the_kind() {
        let geometry = CanvasGeometry::new(400, 700);
        let night = CloudModel::new(&geometry, WeatherKind::PartlyCloudyNight, ParticleRng::new(1));
        let day = CloudModel::new(&geometry, WeatherKind::PartlyCloudyDay, ParticleRng::new(1));
        let thunder = CloudModel::new(&geometry, WeatherKind::ThunderNight, ParticleRng::new(1));
        assert!(night.has_stars() && !night.has_thunder());
        assert!(!day.has_stars());
        assert!(thunder.has_thunder() && thunder.style() == CloudStyle::Thunder);
    }

    #[test]
    fn radius_breathes_between_bounds() {
        let geometry = CanvasGeometry::new(400, 700);
        let mut model = CloudModel::new(&geometry, WeatherKind::CloudyDay, ParticleRng::new(52));
        for _ in 0..1000 {
            model.update_data(&geometry, 16.0, 0.0, 0.0);
            for puff in &model.puffs {
                let r = puff.radius();
                assert!(r >= puff.init_radius - 1e-3);
                assert!(r <= puff.init_radius * puff.scale_ratio + 1e-3);
            }
        }
    }

    #[test]
    fn rotation_shifts_centers_for_parallax() {
        let geometry = CanvasGeometry::new(400, 700);
        let mut model = CloudModel::new(&geometry, WeatherKind::FogNight, ParticleRng::new(53));
        model.update_data(&geometry, 0.0, 30.0, 20.0);
        for puff in &model.puffs {
            assert!(puff.center_x > puff.anchor_x);
            assert!(puff.center_y < puff.anchor_y);
        }
        model.update_data(&geometry, 0.0, 0.0, 0.0);
        for puff in &model.puffs {
            assert_eq!(puff.center_x, puff.anchor_x);
            assert_eq!(puff.center_y, puff.anchor_y);
        }
    }

    #[test]
    fn draws_one_circle_per_puff_plus_stars() {
        let geometry = CanvasGeometry::new(400, 700);
        let model = CloudModel::new(&geometry, WeatherKind::PartlyCloudyNight, ParticleRng::new(54));
        let mut canvas = RecordingCanvas::new(400, 700);
        model.draw(&geometry, &mut canvas, 1.0, 0.0, 0.0, 0.0);
        assert_eq!(canvas.shape_count(), 6 + 50);
        assert!(canvas.is_balanced());
    }
}
