//! Device position via IP geolocation (ip-api.com)

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use super::PositionSource;
use super::http::get_json;
use crate::models::Coordinate;
use crate::{Result, SkateFinderError};

const PROVIDER: &str = "ip-api";

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
}

impl IpApiResponse {
    fn into_coordinate(self) -> Result<Coordinate> {
        if self.status != "success" {
            return Err(SkateFinderError::location_unavailable(
                self.message.unwrap_or_else(|| "lookup failed".to_string()),
            ));
        }
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Coordinate::try_new(lat, lon)
                .map_err(|e| SkateFinderError::location_unavailable(e.to_string())),
            _ => Err(SkateFinderError::location_unavailable(
                "response carried no coordinates",
            )),
        }
    }
}

/// Approximates the device position from the public IP address
#[derive(Debug, Clone)]
pub struct IpApiPosition {
    client: Client,
    base_url: String,
}

impl IpApiPosition {
    #[must_use]
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl PositionSource for IpApiPosition {
    #[instrument(name = "ip_api.position", skip(self))]
    async fn current_position(&self) -> Result<Coordinate> {
        let url = format!("{}/", self.base_url.trim_end_matches('/'));

        // A failing lookup is the platform refusing to answer, not a provider fault.
        let response: IpApiResponse = get_json(&self.client, PROVIDER, &url)
            .await
            .map_err(|e| {
                warn!("IP geolocation request failed: {}", e);
                SkateFinderError::location_unavailable(e.to_string())
            })?;

        if let Some(city) = &response.city {
            info!(city = %city, "IP geolocation resolved");
        }
        response.into_coordinate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response() {
        let response: IpApiResponse = serde_json::from_str(
            r#"{"status":"success","country":"United Kingdom","city":"Croydon","lat":51.3762,"lon":-0.0982}"#,
        )
        .unwrap();
        let coordinate = response.into_coordinate().unwrap();
        assert_eq!(coordinate, Coordinate::new(51.3762, -0.0982));
    }

    #[test]
    fn test_fail_response_is_location_unavailable() {
        let response: IpApiResponse =
            serde_json::from_str(r#"{"status":"fail","message":"reserved range"}"#).unwrap();
        let err = response.into_coordinate().unwrap_err();
        match err {
            SkateFinderError::LocationUnavailable { reason } => {
                assert_eq!(reason, "reserved range");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
