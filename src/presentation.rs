//! Presentation adapters
//!
//! The search orchestrator reports progress and results through the
//! [`Presenter`] trait. Two adapters ship with the crate: a terminal renderer
//! producing one card per skatepark, and a JSON renderer for scripting.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::models::EnrichedVenue;

pub const EMPTY_RESULTS_MESSAGE: &str = "No skateparks found in your area";

/// Receives everything a search run wants to show the user
pub trait Presenter: Send + Sync {
    /// Toggle the loading indicator
    fn show_loading(&self, loading: bool);
    fn show_error(&self, message: &str);
    fn hide_error(&self);
    /// Display the resolved origin label (e.g. a reverse-geocoded address)
    fn show_location(&self, label: &str);
    /// Render a non-empty, ordered result list
    fn show_results(&self, venues: &[EnrichedVenue]);
    /// Signal that the search finished without any venue
    fn show_empty(&self);
}

/// Render one venue as a text card
#[must_use]
pub fn render_card(park: &EnrichedVenue) -> String {
    let venue = park.venue();
    let weather = &park.weather;
    let mut card = String::new();

    let _ = writeln!(card, "{}  ({:.1} km away)", venue.name, park.distance_km());
    let _ = writeln!(card, "  {}", venue.address);
    let _ = writeln!(
        card,
        "  Weather    Today {} {} | Yesterday {} {}",
        weather.today.format_temperature(),
        weather.today.condition,
        weather.yesterday.format_temperature(),
        weather.yesterday.condition
    );
    let _ = writeln!(
        card,
        "  Cost       {} ({})",
        venue.cost,
        if venue.is_free() { "free" } else { "paid" }
    );
    let _ = writeln!(
        card,
        "  Rating     {} {}/5 ({} reviews)",
        venue.stars(),
        venue.rating,
        venue.review_count
    );
    for review in &venue.reviews {
        let _ = writeln!(card, "    \"{}\"", review.text);
        let _ = writeln!(card, "      - {}", review.author);
    }
    let _ = writeln!(card, "  Directions {}", venue.directions_url());
    card
}

/// Write one card per venue, separated by blank lines
fn write_cards(out: &mut impl Write, venues: &[EnrichedVenue]) -> io::Result<()> {
    for venue in venues {
        writeln!(out, "{}", render_card(venue))?;
    }
    out.flush()
}

/// Prints cards to stdout and status messages to stderr
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn show_loading(&self, loading: bool) {
        if loading {
            eprintln!("Searching for skateparks...");
        }
    }

    fn show_error(&self, message: &str) {
        eprintln!("Error: {message}");
    }

    fn hide_error(&self) {}

    fn show_location(&self, label: &str) {
        println!("Searching near: {label}\n");
    }

    fn show_results(&self, venues: &[EnrichedVenue]) {
        if let Err(e) = write_cards(&mut io::stdout().lock(), venues) {
            warn!("Failed to write results to stdout: {}", e);
        }
    }

    fn show_empty(&self) {
        println!("{EMPTY_RESULTS_MESSAGE}");
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    location: Option<String>,
    results: &'a [EnrichedVenue],
}

/// Writes a single JSON document with the origin label and results to stdout
#[derive(Debug, Default)]
pub struct JsonPresenter {
    location: Mutex<Option<String>>,
}

impl JsonPresenter {
    fn print(&self, venues: &[EnrichedVenue]) {
        let location = self
            .location
            .lock()
            .map(|label| label.clone())
            .unwrap_or_default();
        let report = JsonReport {
            generated_at: Utc::now(),
            location,
            results: venues,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error: failed to serialize results: {e}"),
        }
    }
}

impl Presenter for JsonPresenter {
    fn show_loading(&self, _loading: bool) {}

    fn show_error(&self, message: &str) {
        eprintln!("Error: {message}");
    }

    fn hide_error(&self) {}

    fn show_location(&self, label: &str) {
        if let Ok(mut location) = self.location.lock() {
            *location = Some(label.to_string());
        }
    }

    fn show_results(&self, venues: &[EnrichedVenue]) {
        self.print(venues);
    }

    fn show_empty(&self) {
        self.print(&[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Coordinate, DayWeather, RankedVenue, Review, Venue, WeatherCondition, WeatherSnapshot,
    };

    fn stockwell() -> EnrichedVenue {
        EnrichedVenue {
            ranked: RankedVenue {
                venue: Venue {
                    name: "Stockwell Skatepark".to_string(),
                    address: "Stockwell Park Walk, London SW9 0DA".to_string(),
                    coordinate: Coordinate::new(51.4720, -0.1226),
                    cost: "Free".to_string(),
                    rating: 4.4,
                    review_count: 267,
                    reviews: vec![Review {
                        text: "One of the best street courses in London".to_string(),
                        author: "StreetSkater".to_string(),
                    }],
                },
                distance_km: 10.786,
            },
            weather: WeatherSnapshot {
                today: DayWeather {
                    temperature_c: 15.0,
                    condition: WeatherCondition::Sunny,
                },
                yesterday: DayWeather {
                    temperature_c: 12.0,
                    condition: WeatherCondition::LightRain,
                },
            },
        }
    }

    #[test]
    fn test_render_card() {
        let card = render_card(&stockwell());

        assert!(card.starts_with("Stockwell Skatepark  (10.8 km away)\n"));
        assert!(card.contains("Today 15°C Sunny | Yesterday 12°C Light Rain"));
        assert!(card.contains("Cost       Free (free)"));
        assert!(card.contains("★★★★☆ 4.4/5 (267 reviews)"));
        assert!(card.contains("\"One of the best street courses in London\""));
        assert!(card.contains("- StreetSkater"));
        assert!(card.contains(
            "Directions https://www.google.com/maps/dir/?api=1&destination=Stockwell%20Park%20Walk%2C%20London%20SW9%200DA"
        ));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_cards() {
        let mut out = Vec::new();
        write_cards(&mut out, &[stockwell(), stockwell()]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Stockwell Skatepark  (10.8 km away)").count(), 2);
    }

    #[test]
    fn test_write_cards_reports_write_failure() {
        let err = write_cards(&mut ClosedPipe, &[stockwell()]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_json_shape() {
        let venues = [stockwell()];
        let report = JsonReport {
            generated_at: Utc::now(),
            location: Some("Croydon".to_string()),
            results: &venues,
        };
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["location"], "Croydon");
        assert!(value["generated_at"].is_string());
        let first = &value["results"][0];
        assert_eq!(first["name"], "Stockwell Skatepark");
        assert_eq!(first["distance_km"], 10.786);
        assert_eq!(first["weather"]["yesterday"]["condition"], "light-rain");
    }
}
