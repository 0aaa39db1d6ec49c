//! Weather kinds the engine knows how to animate

use crate::error::NimbusError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A weather condition crossed with day/night, or `None` for an empty scene
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherKind {
    #[default]
    None,
    ClearDay,
    ClearNight,
    PartlyCloudyDay,
    PartlyCloudyNight,
    CloudyDay,
    CloudyNight,
    RainDay,
    RainNight,
    SnowDay,
    SnowNight,
    WindDay,
    WindNight,
    FogDay,
    FogNight,
    HazeDay,
    HazeNight,
    SleetDay,
    SleetNight,
    HailDay,
    HailNight,
    ThunderDay,
    ThunderNight,
    ThunderstormDay,
    ThunderstormNight,
}

impl WeatherKind {
    pub const ALL: [WeatherKind; 25] = [
        WeatherKind::None,
        WeatherKind::ClearDay,
        WeatherKind::ClearNight,
        WeatherKind::PartlyCloudyDay,
        WeatherKind::PartlyCloudyNight,
        WeatherKind::CloudyDay,
        WeatherKind::CloudyNight,
        WeatherKind::RainDay,
        WeatherKind::RainNight,
        WeatherKind::SnowDay,
        WeatherKind::SnowNight,
        WeatherKind::WindDay,
        WeatherKind::WindNight,
        WeatherKind::FogDay,
        WeatherKind::FogNight,
        WeatherKind::HazeDay,
        WeatherKind::HazeNight,
        WeatherKind::SleetDay,
        WeatherKind::SleetNight,
        WeatherKind::HailDay,
        WeatherKind::HailNight,
        WeatherKind::ThunderDay,
        WeatherKind::ThunderNight,
        WeatherKind::ThunderstormDay,
        WeatherKind::ThunderstormNight,
    ];

    /// Snake-case name, as used in config files and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            WeatherKind::None => "none",
            WeatherKind::ClearDay => "clear_day",
            WeatherKind::ClearNight => "clear_night",
            WeatherKind::PartlyCloudyDay => "partly_cloudy_day",
            WeatherKind::PartlyCloudyNight => "partly_cloudy_night",
            WeatherKind::CloudyDay => "cloudy_day",
            WeatherKind::CloudyNight => "cloudy_night",
            WeatherKind::RainDay => "rain_day",
            WeatherKind::RainNight => "rain_night",
            WeatherKind::SnowDay => "snow_day",
            WeatherKind::SnowNight => "snow_night",
            WeatherKind::WindDay => "wind_day",
            WeatherKind::WindNight => "wind_night",
            WeatherKind::FogDay => "fog_day",
            WeatherKind::FogNight => "fog_night",
            WeatherKind::HazeDay => "haze_day",
            WeatherKind::HazeNight => "haze_night",
            WeatherKind::SleetDay => "sleet_day",
            WeatherKind::SleetNight => "sleet_night",
            WeatherKind::HailDay => "hail_day",
            WeatherKind::HailNight => "hail_night",
            WeatherKind::ThunderDay => "thunder_day",
            WeatherKind::ThunderNight => "thunder_night",
            WeatherKind::ThunderstormDay => "thunderstorm_day",
            WeatherKind::ThunderstormNight => "thunderstorm_night",
        }
    }

    /// Day variants return true; `None` counts as day
    pub fn is_daytime(&self) -> bool {
        !matches!(
            self,
            WeatherKind::ClearNight
                | WeatherKind::PartlyCloudyNight
                | WeatherKind::CloudyNight
                | WeatherKind::RainNight
                | WeatherKind::SnowNight
                | WeatherKind::WindNight
                | WeatherKind::FogNight
                | WeatherKind::HazeNight
                | WeatherKind::SleetNight
                | WeatherKind::HailNight
                | WeatherKind::ThunderNight
                | WeatherKind::ThunderstormNight
        )
    }
}

impl fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WeatherKind {
    type Err = NimbusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        WeatherKind::ALL
            .iter()
            .find(|kind| kind.name() == wanted)
            .copied()
            .ok_or_else(|| NimbusError::UnknownWeatherKind(s.to_string()))
    }
}
