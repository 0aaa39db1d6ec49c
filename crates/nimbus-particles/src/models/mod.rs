//! Weather animation models and overlays

mod cloud;
mod empty;
mod hail;
mod meteor;
mod rain;
mod snow;
mod stars;
mod sun;
mod thunder;
mod wind;

pub use cloud::{CloudModel, CloudStyle};
pub use empty::EmptyModel;
pub use hail::HailModel;
pub use meteor::MeteorShowerModel;
pub use rain::RainModel;
pub use snow::SnowModel;
pub use stars::Starfield;
pub use sun::SunModel;
pub use thunder::Thunder;
pub use wind::WindModel;
