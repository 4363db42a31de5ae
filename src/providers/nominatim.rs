//! OpenStreetMap Nominatim geocoding

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::Geocoder;
use super::http::get_json;
use crate::models::Coordinate;
use crate::{Result, SkateFinderError};

const PROVIDER: &str = "nominatim";

#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct ReverseResult {
    display_name: Option<String>,
    error: Option<String>,
}

fn parse_search_results(query: &str, results: Vec<SearchResult>) -> Result<Coordinate> {
    let best = results.into_iter().next().ok_or_else(|| {
        SkateFinderError::provider(PROVIDER, format!("location not found: {query}"))
    })?;

    let lat = best.lat.parse::<f64>();
    let lon = best.lon.parse::<f64>();
    match (lat, lon) {
        (Ok(lat), Ok(lon)) => {
            debug!("Found location: {} ({:.4}, {:.4})", best.display_name, lat, lon);
            Coordinate::try_new(lat, lon)
                .map_err(|e| SkateFinderError::provider(PROVIDER, e.to_string()))
        }
        _ => Err(SkateFinderError::provider(
            PROVIDER,
            format!("unparseable coordinates '{}', '{}'", best.lat, best.lon),
        )),
    }
}

fn parse_reverse_result(result: ReverseResult) -> Result<String> {
    match (result.display_name, result.error) {
        (Some(name), _) if !name.is_empty() => Ok(name),
        (_, Some(error)) => Err(SkateFinderError::provider(PROVIDER, error)),
        _ => Err(SkateFinderError::provider(PROVIDER, "empty reverse result")),
    }
}

/// Forward and reverse geocoding through a Nominatim instance
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

impl NominatimGeocoder {
    #[must_use]
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(name = "nominatim.forward", skip(self))]
    async fn forward(&self, text: &str) -> Result<Coordinate> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base(),
            urlencoding::encode(text)
        );
        let results: Vec<SearchResult> = get_json(&self.client, PROVIDER, &url).await?;
        parse_search_results(text, results)
    }

    #[instrument(name = "nominatim.reverse", skip(self))]
    async fn reverse(&self, coordinate: Coordinate) -> Result<String> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json",
            self.base(),
            coordinate.lat,
            coordinate.lng
        );
        let result: ReverseResult = get_json(&self.client, PROVIDER, &url).await?;
        parse_reverse_result(result)
    }
}
