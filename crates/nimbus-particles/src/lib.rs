//! Nimbus Particles - One animation model per weather kind
//!
//! Each model owns a fixed-size particle array living in diagonal space:
//! - Rain, sleet and thunderstorm streaks, snow flakes, tumbling hail
//! - Wind streaks, cloud / fog / haze puffs, sun rings, meteor showers
//! - Thunder flash and twinkling starfield overlays
//!
//! Particles are never destroyed; leaving the diagonal canvas respawns them.

pub mod curves;
pub mod models;
pub mod palette;
pub mod particle;
pub mod rand;

use nimbus_core::{Canvas, CanvasGeometry, WeatherKind};

pub use models::{
    CloudModel, CloudStyle, EmptyModel, HailModel, MeteorShowerModel, RainModel, SnowModel,
    SunModel, WindModel,
};
pub use rand::ParticleRng;

/// Contract every weather animation satisfies.
///
/// The update loop calls [`update_data`](ParticleModel::update_data) with the
/// real elapsed time; the draw loop calls [`draw`](ParticleModel::draw) on a
/// published copy of the model.
pub trait ParticleModel {
    /// Advance every particle by `interval_ms` of real time
    fn update_data(
        &mut self,
        geometry: &CanvasGeometry,
        interval_ms: f32,
        rotation_2d: f32,
        rotation_3d: f32,
    );

    /// Paint the current state. `display_ratio` is the transition cross-fade,
    /// `scroll_ratio` fades particles as the host content scrolls over them.
    fn draw(
        &self,
        geometry: &CanvasGeometry,
        canvas: &mut dyn Canvas,
        display_ratio: f32,
        scroll_ratio: f32,
        rotation_2d: f32,
        rotation_3d: f32,
    );

    /// Diagonal-space position of every particle
    fn particle_positions(&self) -> Vec<(f32, f32)>;
}

/// The model for one weather kind, selected by tag
#[derive(Debug, Clone)]
pub enum WeatherModel {
    Empty(EmptyModel),
    Rain(RainModel),
    Snow(SnowModel),
    Hail(HailModel),
    Wind(WindModel),
    Cloud(CloudModel),
    Sun(SunModel),
    MeteorShower(MeteorShowerModel),
}

impl WeatherModel {
    /// Build the model animating `kind`. The model takes its own forked
    /// random stream from `rng`.
    pub fn for_kind(kind: WeatherKind, geometry: &CanvasGeometry, rng: &mut ParticleRng) -> Self {
        let rng = rng.fork();
        let model = match kind {
            WeatherKind::None => WeatherModel::Empty(EmptyModel),
            WeatherKind::ClearDay => WeatherModel::Sun(SunModel::new(geometry)),
            WeatherKind::ClearNight => {
                WeatherModel::MeteorShower(MeteorShowerModel::new(geometry, rng))
            }
            WeatherKind::PartlyCloudyDay
            | WeatherKind::PartlyCloudyNight
            | WeatherKind::CloudyDay
            | WeatherKind::CloudyNight
            | WeatherKind::FogDay
            | WeatherKind::FogNight
            | WeatherKind::HazeDay
            | WeatherKind::HazeNight
            | WeatherKind::ThunderDay
            | WeatherKind::ThunderNight => {
                WeatherModel::Cloud(CloudModel::new(geometry, kind, rng))
            }
            WeatherKind::RainDay
            | WeatherKind::RainNight
            | WeatherKind::SleetDay
            | WeatherKind::SleetNight
            | WeatherKind::ThunderstormDay
            | WeatherKind::ThunderstormNight => {
                WeatherModel::Rain(RainModel::new(geometry, kind, rng))
            }
            WeatherKind::SnowDay | WeatherKind::SnowNight => {
                WeatherModel::Snow(SnowModel::new(geometry, kind, rng))
            }
            WeatherKind::WindDay | WeatherKind::WindNight => {
                WeatherModel::Wind(WindModel::new(geometry, kind, rng))
            }
            WeatherKind::HailDay | WeatherKind::HailNight => {
                WeatherModel::Hail(HailModel::new(geometry, kind, rng))
            }
        };
        log::debug!(
            "built {} model for {kind} ({} particles)",
            model.name(),
            model.particle_positions().len()
        );
        model
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeatherModel::Empty(_) => "empty",
            WeatherModel::Rain(_) => "rain",
            WeatherModel::Snow(_) => "snow",
            WeatherModel::Hail(_) => "hail",
            WeatherModel::Wind(_) => "wind",
            WeatherModel::Cloud(_) => "cloud",
            WeatherModel::Sun(_) => "sun",
            WeatherModel::MeteorShower(_) => "meteor_shower",
        }
    }

    /// Position and extent of every particle that travels through diagonal
    /// space; screen-anchored models report none
    #[cfg(test)]
    fn bounds(&self) -> Vec<(f32, f32, f32)> {
        match self {
            WeatherModel::Rain(m) => m.bounds(),
            WeatherModel::Snow(m) => m.bounds(),
            WeatherModel::Hail(m) => m.bounds(),
            WeatherModel::Wind(m) => m.bounds(),
            WeatherModel::MeteorShower(m) => m.bounds(),
            WeatherModel::Empty(_) | WeatherModel::Cloud(_) | WeatherModel::Sun(_) => Vec::new(),
        }
    }

    fn as_model(&self) -> &dyn ParticleModel {
        match self {
            WeatherModel::Empty(m) => m,
            WeatherModel::Rain(m) => m,
            WeatherModel::Snow(m) => m,
            WeatherModel::Hail(m) => m,
            WeatherModel::Wind(m) => m,
            WeatherModel::Cloud(m) => m,
            WeatherModel::Sun(m) => m,
            WeatherModel::MeteorShower(m) => m,
        }
    }

    fn as_model_mut(&mut self) -> &mut dyn ParticleModel {
        match self {
            WeatherModel::Empty(m) => m,
            WeatherModel::Rain(m) => m,
            WeatherModel::Snow(m) => m,
            WeatherModel::Hail(m) => m,
            WeatherModel::Wind(m) => m,
            WeatherModel::Cloud(m) => m,
            WeatherModel::Sun(m) => m,
            WeatherModel::MeteorShower(m) => m,
        }
    }
}

impl ParticleModel for WeatherModel {
    fn update_data(
        &mut self,
        geometry: &CanvasGeometry,
        interval_ms: f32,
        rotation_2d: f32,
        rotation_3d: f32,
    ) {
        self.as_model_mut()
            .update_data(geometry, interval_ms, rotation_2d, rotation_3d);
    }

    fn draw(
        &self,
        geometry: &CanvasGeometry,
        canvas: &mut dyn Canvas,
        display_ratio: f32,
        scroll_ratio: f32,
        rotation_2d: f32,
        rotation_3d: f32,
    ) {
        self.as_model().draw(
            geometry,
            canvas,
            display_ratio,
            scroll_ratio,
            rotation_2d,
            rotation_3d,
        );
    }

    fn particle_positions(&self) -> Vec<(f32, f32)> {
        self.as_model().particle_positions()
    }
}
