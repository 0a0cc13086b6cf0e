//! Configuration for the neighborhood view and its description fetches
//!
//! Every section has a `Default` that reproduces the hardcoded reference
//! session (Antwerp, three seed places, Wikipedia with a 5 s timeout), so a
//! config file is optional and may override only the sections it names.

use crate::{
    core::{constants, geo::LatLng},
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub neighborhood: NeighborhoodConfig,
    pub fetch: FetchConfig,
    pub map: MapOptions,
}

impl AppConfig {
    /// Parses and validates a JSON config document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::debug!("loaded config from {}", path.display());
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        self.neighborhood.validate()?;
        self.fetch.validate()
    }
}

/// A point of interest as configured, before it becomes a live place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSeed {
    pub name: String,
    pub location: LatLng,
}

impl PlaceSeed {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            location: LatLng::new(lat, lng),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeighborhoodConfig {
    pub center: LatLng,
    pub zoom: f64,
    /// Display order; the position of a place is its marker index.
    pub places: Vec<PlaceSeed>,
}

impl NeighborhoodConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.center.is_valid() {
            return Err(MapError::Config(format!("invalid center {}", self.center)));
        }

        let mut seen = HashSet::new();
        for place in &self.places {
            if !place.location.is_valid() {
                return Err(MapError::Config(format!(
                    "invalid location {} for '{}'",
                    place.location, place.name
                )));
            }
            if !seen.insert(place.name.as_str()) {
                return Err(MapError::Config(format!(
                    "duplicate place name '{}'",
                    place.name
                )));
            }
        }
        Ok(())
    }
}

impl Default for NeighborhoodConfig {
    fn default() -> Self {
        let (lat, lng) = constants::DEFAULT_CENTER;
        Self {
            center: LatLng::new(lat, lng),
            zoom: constants::DEFAULT_ZOOM,
            places: constants::SEED_PLACES
                .iter()
                .map(|&(name, lat, lng)| PlaceSeed::new(name, lat, lng))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
    pub fallback_text: String,
    pub loading_html: String,
    pub user_agent: String,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            return Err(MapError::Config("fetch timeout must be non-zero".to_string()));
        }
        if self.endpoint.is_empty() {
            return Err(MapError::Config("fetch endpoint is empty".to_string()));
        }
        Ok(())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: constants::WIKIPEDIA_API_URL.to_string(),
            timeout_ms: constants::FETCH_TIMEOUT_MS,
            fallback_text: constants::FALLBACK_CONTENT.to_string(),
            loading_html: constants::LOADING_HTML.to_string(),
            user_agent: constants::USER_AGENT.to_string(),
        }
    }
}

/// Options handed to the map surface when the map is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    /// The surface owns the container; markers are added without clearing it.
    pub no_clear: bool,
    pub disable_default_ui: bool,
    /// Base-map feature types to hide, e.g. `poi`.
    pub hidden_features: Vec<String>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            no_clear: true,
            disable_default_ui: true,
            hidden_features: constants::HIDDEN_FEATURE_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
