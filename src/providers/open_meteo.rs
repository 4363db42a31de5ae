//! Open-Meteo daily weather for the today/yesterday snapshot

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use super::WeatherProvider;
use super::http::get_json;
use crate::models::{Coordinate, DayWeather, WeatherCondition, WeatherSnapshot};
use crate::{Result, SkateFinderError};

const PROVIDER: &str = "open-meteo";

/// Daily forecast response from `OpenMeteo`
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyData>,
}

#[derive(Debug, Deserialize)]
struct DailyData {
    time: Vec<String>,
    #[serde(rename = "temperature_2m_max")]
    temperature_max: Vec<Option<f32>>,
    #[serde(rename = "weathercode")]
    weather_code: Vec<Option<u8>>,
}

impl DailyData {
    fn day(&self, index: usize) -> Result<DayWeather> {
        let temperature = self.temperature_max.get(index).copied().flatten();
        let code = self.weather_code.get(index).copied().flatten();
        match (temperature, code) {
            (Some(temperature_c), Some(code)) => Ok(DayWeather {
                temperature_c,
                condition: WeatherCondition::from_wmo_code(code),
            }),
            _ => Err(SkateFinderError::provider(
                PROVIDER,
                format!(
                    "missing daily values for {}",
                    self.time.get(index).map_or("unknown day", String::as_str)
                ),
            )),
        }
    }
}

/// The request asks for one past day and one forecast day, so the series
/// holds yesterday at index 0 and today at index 1.
fn snapshot_from_response(response: ForecastResponse) -> Result<WeatherSnapshot> {
    let daily = response
        .daily
        .ok_or_else(|| SkateFinderError::provider(PROVIDER, "response has no daily block"))?;

    if daily.time.len() < 2 {
        return Err(SkateFinderError::provider(
            PROVIDER,
            format!("expected 2 days, got {}", daily.time.len()),
        ));
    }

    Ok(WeatherSnapshot {
        yesterday: daily.day(0)?,
        today: daily.day(1)?,
    })
}

/// Weather from the Open-Meteo forecast API (no API key required)
#[derive(Debug, Clone)]
pub struct OpenMeteoWeather {
    client: Client,
    base_url: String,
}

impl OpenMeteoWeather {
    #[must_use]
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoWeather {
    #[instrument(name = "open_meteo.fetch", skip(self))]
    async fn fetch(&self, coordinate: Coordinate) -> Result<WeatherSnapshot> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&daily=temperature_2m_max,weathercode&past_days=1&forecast_days=1&timezone=auto",
            self.base_url.trim_end_matches('/'),
            coordinate.lat,
            coordinate.lng
        );
        let response: ForecastResponse = get_json(&self.client, PROVIDER, &url).await?;
        snapshot_from_response(response)
    }
}
