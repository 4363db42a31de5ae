//! Weather snapshot model attached to each venue

use std::fmt;

use serde::{Deserialize, Serialize};

/// Broad sky condition for a day
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherCondition {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Overcast,
    Fog,
    LightRain,
    Rain,
    Snow,
    Thunderstorm,
}

impl WeatherCondition {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "Sunny",
            WeatherCondition::PartlyCloudy => "Partly Cloudy",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::Overcast => "Overcast",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::LightRain => "Light Rain",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::Thunderstorm => "Thunderstorm",
        }
    }

    /// Map a WMO weather interpretation code to a condition
    #[must_use]
    pub fn from_wmo_code(code: u8) -> Self {
        match code {
            0 => WeatherCondition::Sunny,
            1 | 2 => WeatherCondition::PartlyCloudy,
            3 => WeatherCondition::Overcast,
            45 | 48 => WeatherCondition::Fog,
            51..=57 | 61 | 80 => WeatherCondition::LightRain,
            63..=67 | 81 | 82 => WeatherCondition::Rain,
            71..=77 | 85 | 86 => WeatherCondition::Snow,
            95..=99 => WeatherCondition::Thunderstorm,
            _ => WeatherCondition::Cloudy,
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Temperature and condition for a single day
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct DayWeather {
    /// Temperature in Celsius
    pub temperature_c: f32,
    pub condition: WeatherCondition,
}

impl DayWeather {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.0}°C", self.temperature_c)
    }
}

/// Same-day and previous-day weather at a venue
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct WeatherSnapshot {
    pub today: DayWeather,
    pub yesterday: DayWeather,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, WeatherCondition::Sunny)]
    #[case(2, WeatherCondition::PartlyCloudy)]
    #[case(3, WeatherCondition::Overcast)]
    #[case(48, WeatherCondition::Fog)]
    #[case(61, WeatherCondition::LightRain)]
    #[case(65, WeatherCondition::Rain)]
    #[case(73, WeatherCondition::Snow)]
    #[case(96, WeatherCondition::Thunderstorm)]
    #[case(200, WeatherCondition::Cloudy)]
    fn test_wmo_code_mapping(#[case] code: u8, #[case] expected: WeatherCondition) {
        assert_eq!(WeatherCondition::from_wmo_code(code), expected);
    }

    #[test]
    fn test_display_matches_card_text() {
        assert_eq!(WeatherCondition::PartlyCloudy.to_string(), "Partly Cloudy");
        assert_eq!(WeatherCondition::LightRain.to_string(), "Light Rain");
    }

    #[test]
    fn test_format_temperature() {
        let day = DayWeather {
            temperature_c: 14.6,
            condition: WeatherCondition::Sunny,
        };
        assert_eq!(day.format_temperature(), "15°C");
    }
}
