//! Randomized and static weather stubs

use async_trait::async_trait;
use rand::RngExt;

use super::WeatherProvider;
use crate::Result;
use crate::models::{Coordinate, DayWeather, WeatherCondition, WeatherSnapshot};

const TEMPERATURES: [f32; 8] = [8.0, 12.0, 15.0, 18.0, 22.0, 19.0, 14.0, 11.0];

const CONDITIONS: [WeatherCondition; 5] = [
    WeatherCondition::Sunny,
    WeatherCondition::Cloudy,
    WeatherCondition::PartlyCloudy,
    WeatherCondition::LightRain,
    WeatherCondition::Overcast,
];

/// Draws an independent random day for today and yesterday on every fetch
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomWeather;

fn random_day() -> DayWeather {
    let mut rng = rand::rng();
    DayWeather {
        temperature_c: TEMPERATURES[rng.random_range(0..TEMPERATURES.len())],
        condition: CONDITIONS[rng.random_range(0..CONDITIONS.len())],
    }
}

#[async_trait]
impl WeatherProvider for RandomWeather {
    async fn fetch(&self, _coordinate: Coordinate) -> Result<WeatherSnapshot> {
        let today = random_day();
        let yesterday = random_day();
        Ok(WeatherSnapshot { today, yesterday })
    }
}

/// Returns the same snapshot for every venue
#[derive(Debug, Clone, Copy)]
pub struct StaticWeather {
    snapshot: WeatherSnapshot,
}

impl StaticWeather {
    #[must_use]
    pub fn new(snapshot: WeatherSnapshot) -> Self {
        Self { snapshot }
    }

    /// A mild, dry pair of days
    #[must_use]
    pub fn mild() -> Self {
        Self::new(WeatherSnapshot {
            today: DayWeather {
                temperature_c: 15.0,
                condition: WeatherCondition::PartlyCloudy,
            },
            yesterday: DayWeather {
                temperature_c: 12.0,
                condition: WeatherCondition::Cloudy,
            },
        })
    }
}

#[async_trait]
impl WeatherProvider for StaticWeather {
    async fn fetch(&self, _coordinate: Coordinate) -> Result<WeatherSnapshot> {
        Ok(self.snapshot)
    }
}
