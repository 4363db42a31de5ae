//! Skatepark search through the OpenStreetMap Overpass API
//!
//! Skateparks are mapped as `leisure=pitch` + `sport=skateboard` (nodes, ways
//! and relations). OSM carries no ratings or reviews, so those stay empty.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::VenueProvider;
use super::http::get_json;
use crate::Result;
use crate::models::{Coordinate, Venue};

const PROVIDER: &str = "overpass";

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
struct Element {
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<Center>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct Center {
    lat: f64,
    lon: f64,
}

impl Element {
    fn coordinate(&self) -> Option<Coordinate> {
        let (lat, lon) = match (&self.center, self.lat, self.lon) {
            (Some(center), _, _) => (center.lat, center.lon),
            (None, Some(lat), Some(lon)) => (lat, lon),
            _ => return None,
        };
        Coordinate::try_new(lat, lon).ok()
    }

    fn address(&self, coordinate: &Coordinate) -> String {
        let street = match (self.tags.get("addr:housenumber"), self.tags.get("addr:street")) {
            (Some(number), Some(street)) => Some(format!("{number} {street}")),
            (None, Some(street)) => Some(street.clone()),
            _ => None,
        };
        let parts: Vec<String> = [
            street,
            self.tags.get("addr:city").cloned(),
            self.tags.get("addr:postcode").cloned(),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            coordinate.format_label()
        } else {
            parts.join(", ")
        }
    }

    fn cost(&self) -> String {
        match self.tags.get("fee").map(String::as_str) {
            Some("no") => "Free".to_string(),
            Some("yes") => "Paid".to_string(),
            Some(other) => other.to_string(),
            None => "Unknown".to_string(),
        }
    }

    fn into_venue(self) -> Option<Venue> {
        let coordinate = self.coordinate()?;
        Some(Venue {
            name: self
                .tags
                .get("name")
                .cloned()
                .unwrap_or_else(|| "Unnamed skatepark".to_string()),
            address: self.address(&coordinate),
            cost: self.cost(),
            coordinate,
            rating: 0.0,
            review_count: 0,
            reviews: Vec::new(),
        })
    }
}

fn build_query(region: Coordinate, radius_km: f64) -> String {
    let radius_m = (radius_km * 1000.0).round();
    format!(
        "[out:json][timeout:25];nwr[\"leisure\"=\"pitch\"][\"sport\"=\"skateboard\"](around:{radius_m},{},{});out center;",
        region.lat, region.lng
    )
}

/// Venue provider backed by OpenStreetMap data, limited to a radius
#[derive(Debug, Clone)]
pub struct OverpassVenues {
    client: Client,
    base_url: String,
    radius_km: f64,
}

impl OverpassVenues {
    #[must_use]
    pub fn new(client: Client, base_url: String, radius_km: f64) -> Self {
        Self {
            client,
            base_url,
            radius_km,
        }
    }
}

#[async_trait]
impl VenueProvider for OverpassVenues {
    #[instrument(name = "overpass.list", skip(self))]
    async fn list(&self, region: Coordinate) -> Result<Vec<Venue>> {
        let query = build_query(region, self.radius_km);
        let url = format!(
            "{}/interpreter?data={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&query)
        );
        let response: OverpassResponse = get_json(&self.client, PROVIDER, &url).await?;

        let total = response.elements.len();
        let venues: Vec<Venue> = response
            .elements
            .into_iter()
            .filter_map(Element::into_venue)
            .collect();
        debug!(
            "Overpass returned {} elements, {} usable venues",
            total,
            venues.len()
        );
        Ok(venues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query() {
        let query = build_query(Coordinate::new(51.3762, -0.0982), 2.5);
        assert!(query.contains("(around:2500,51.3762,-0.0982)"));
        assert!(query.contains("[\"sport\"=\"skateboard\"]"));
    }

    #[test]
    fn test_elements_to_venues() {
        let response: OverpassResponse = serde_json::from_str(
            r#"{"elements": [
                {"type":"node","id":1,"lat":51.472,"lon":-0.1226,
                 "tags":{"name":"Stockwell Skatepark","addr:street":"Stockwell Park Walk","addr:postcode":"SW9 0DA","fee":"no"}},
                {"type":"way","id":2,"center":{"lat":51.5241,"lon":-0.2097},"tags":{"leisure":"pitch"}},
                {"type":"way","id":3,"tags":{"name":"No geometry"}}
            ]}"#,
        )
        .unwrap();

        let venues: Vec<Venue> = response
            .elements
            .into_iter()
            .filter_map(Element::into_venue)
            .collect();

        assert_eq!(venues.len(), 2);
        assert_eq!(venues[0].name, "Stockwell Skatepark");
        assert_eq!(venues[0].address, "Stockwell Park Walk, SW9 0DA");
        assert_eq!(venues[0].cost, "Free");
        assert_eq!(venues[1].name, "Unnamed skatepark");
        assert_eq!(venues[1].address, "51.5241, -0.2097");
        assert_eq!(venues[1].cost, "Unknown");
        assert!(venues.iter().all(|v| v.reviews.is_empty()));
    }
}
