//! Configuration management for skatefinder
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::SkateFinderError;
use crate::models::Coordinate;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for skatefinder
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkateFinderConfig {
    /// External service selection and settings
    pub providers: ProvidersConfig,
    /// Search behaviour
    pub search: SearchConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Where the device position comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositionKind {
    /// A configured coordinate stands in for the device
    Fixed,
    /// IP geolocation via ip-api.com
    IpApi,
    /// No position capability at all
    Unsupported,
}

/// Which geocoder resolves text and labels coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeocoderKind {
    /// Every query resolves to the configured coordinate
    Fixed,
    /// OpenStreetMap Nominatim
    Nominatim,
}

/// Which venue provider supplies skateparks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VenueSourceKind {
    /// Built-in London catalog, proximity ignored
    Catalog,
    /// OpenStreetMap Overpass search within `search.radius_km`
    Overpass,
}

/// Which weather provider enriches venues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherSourceKind {
    /// Random values drawn per fetch
    Mock,
    /// Same snapshot for every venue
    Static,
    /// Open-Meteo daily forecast
    OpenMeteo,
}

/// External service configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default = "default_position_kind")]
    pub position: PositionKind,
    #[serde(default = "default_geocoder_kind")]
    pub geocoder: GeocoderKind,
    #[serde(default = "default_venue_kind")]
    pub venues: VenueSourceKind,
    #[serde(default = "default_weather_kind")]
    pub weather: WeatherSourceKind,
    /// Request timeout in seconds for HTTP providers
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// User agent sent to HTTP providers
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Coordinate reported by the fixed position source
    #[serde(default = "default_fixed_coordinate")]
    pub device_position: Coordinate,
    /// Coordinate returned by the fixed geocoder
    #[serde(default = "default_fixed_coordinate")]
    pub geocoded_position: Coordinate,
    #[serde(default = "default_ip_api_url")]
    pub ip_api_url: String,
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,
    #[serde(default = "default_overpass_url")]
    pub overpass_url: String,
    #[serde(default = "default_open_meteo_url")]
    pub open_meteo_url: String,
}

/// Search configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search radius in kilometers for providers that filter by proximity
    #[serde(default = "default_search_radius")]
    pub radius_km: u32,
    /// Location searched automatically when no subcommand is given
    #[serde(default = "default_initial_location")]
    pub initial_location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_position_kind() -> PositionKind {
    PositionKind::Fixed
}

fn default_geocoder_kind() -> GeocoderKind {
    GeocoderKind::Fixed
}

fn default_venue_kind() -> VenueSourceKind {
    VenueSourceKind::Catalog
}

fn default_weather_kind() -> WeatherSourceKind {
    WeatherSourceKind::Mock
}

fn default_timeout() -> u32 {
    10
}

fn default_user_agent() -> String {
    format!("skatefinder/{}", crate::VERSION)
}

fn default_fixed_coordinate() -> Coordinate {
    // Croydon
    Coordinate::new(51.3762, -0.0982)
}

fn default_ip_api_url() -> String {
    "http://ip-api.com/json".to_string()
}

fn default_nominatim_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_overpass_url() -> String {
    "https://overpass-api.de/api".to_string()
}

fn default_open_meteo_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_search_radius() -> u32 {
    10
}

fn default_initial_location() -> String {
    "Croydon".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            position: default_position_kind(),
            geocoder: default_geocoder_kind(),
            venues: default_venue_kind(),
            weather: default_weather_kind(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
            device_position: default_fixed_coordinate(),
            geocoded_position: default_fixed_coordinate(),
            ip_api_url: default_ip_api_url(),
            nominatim_url: default_nominatim_url(),
            overpass_url: default_overpass_url(),
            open_meteo_url: default_open_meteo_url(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_km: default_search_radius(),
            initial_location: default_initial_location(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl SkateFinderConfig {
    /// Load configuration from the default file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // SKATEFINDER_PROVIDERS__WEATHER=open-meteo
        builder = builder.add_source(
            Environment::with_prefix("SKATEFINDER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: SkateFinderConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skatefinder").join("config.toml"))
    }

    /// Apply default values to fields left empty or zero
    pub fn apply_defaults(&mut self) {
        if self.providers.timeout_seconds == 0 {
            self.providers.timeout_seconds = default_timeout();
        }
        if self.providers.user_agent.is_empty() {
            self.providers.user_agent = default_user_agent();
        }
        if self.search.initial_location.trim().is_empty() {
            self.search.initial_location = default_initial_location();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_coordinates()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.providers.timeout_seconds > 300 {
            return Err(
                SkateFinderError::config("Provider timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.search.radius_km == 0 || self.search.radius_km > 500 {
            return Err(SkateFinderError::config(
                "Search radius must be between 1 and 500 km",
            )
            .into());
        }

        Ok(())
    }

    fn validate_coordinates(&self) -> Result<()> {
        for (name, coordinate) in [
            ("device_position", &self.providers.device_position),
            ("geocoded_position", &self.providers.geocoded_position),
        ] {
            if !coordinate.is_valid() {
                return Err(SkateFinderError::config(format!(
                    "providers.{name} is not a valid coordinate: {}",
                    coordinate.format_label()
                ))
                .into());
            }
        }
        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SkateFinderError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(SkateFinderError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("ip_api_url", &self.providers.ip_api_url),
            ("nominatim_url", &self.providers.nominatim_url),
            ("overpass_url", &self.providers.overpass_url),
            ("open_meteo_url", &self.providers.open_meteo_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(SkateFinderError::config(format!(
                    "providers.{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
