//! Background colors for each weather kind

use nimbus_core::{Color, WeatherKind};

/// Solid sky color painted under a weather animation
pub fn background_color(kind: WeatherKind) -> Color {
    match kind {
        WeatherKind::None => Color::TRANSPARENT,
        WeatherKind::ClearDay => Color::rgb(253, 188, 76),
        WeatherKind::ClearNight => Color::rgb(20, 30, 60),
        WeatherKind::PartlyCloudyDay => Color::rgb(0, 165, 217),
        WeatherKind::PartlyCloudyNight => Color::rgb(34, 45, 67),
        WeatherKind::CloudyDay => Color::rgb(96, 121, 136),
        WeatherKind::CloudyNight => Color::rgb(38, 50, 60),
        WeatherKind::RainDay => Color::rgb(64, 151, 231),
        WeatherKind::RainNight => Color::rgb(38, 78, 143),
        WeatherKind::SnowDay => Color::rgb(104, 186, 255),
        WeatherKind::SnowNight => Color::rgb(26, 91, 146),
        WeatherKind::WindDay => Color::rgb(233, 158, 60),
        WeatherKind::WindNight => Color::rgb(102, 75, 47),
        WeatherKind::FogDay => Color::rgb(84, 106, 123),
        WeatherKind::FogNight => Color::rgb(53, 63, 72),
        WeatherKind::HazeDay => Color::rgb(179, 158, 132),
        WeatherKind::HazeNight => Color::rgb(66, 66, 66),
        WeatherKind::SleetDay => Color::rgb(104, 186, 255),
        WeatherKind::SleetNight => Color::rgb(26, 91, 146),
        WeatherKind::HailDay => Color::rgb(80, 116, 193),
        WeatherKind::HailNight => Color::rgb(42, 52, 89),
        WeatherKind::ThunderDay | WeatherKind::ThunderNight => Color::rgb(43, 29, 69),
        WeatherKind::ThunderstormDay => Color::rgb(64, 51, 97),
        WeatherKind::ThunderstormNight => Color::rgb(43, 29, 69),
    }
}
