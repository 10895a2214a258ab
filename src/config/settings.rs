//! TOML-loadable adapter defaults.
//!
//! Every knob here existed as a hardcoded constant in some revision of the
//! adapters (the flight result cap alone went 5, 15, 25 over time). They
//! are collected into one structure so a deployment can pin them in a
//! config file instead of a code edit.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Flight adapter defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightSettings {
    /// Maximum offers requested from and returned by the adapter.
    #[serde(default = "default_flight_max")]
    pub max_results: usize,
}

fn default_flight_max() -> usize {
    15
}

impl Default for FlightSettings {
    fn default() -> Self {
        Self { max_results: 15 }
    }
}

/// Hotel adapter defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelSettings {
    /// Offers returned after sorting.
    #[serde(default = "default_hotel_max")]
    pub max_results: usize,
    /// Collection stops once this many qualifying hotels are found.
    #[serde(default = "default_collect_limit")]
    pub collect_limit: usize,
    /// Hotel ids per offer-search request (upstream batch-size limit).
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Hotel ids considered per city.
    #[serde(default = "default_max_hotel_ids")]
    pub max_hotel_ids: usize,
    /// Lower bound of the default (unfiltered) nightly price range.
    #[serde(default)]
    pub default_min_price: f64,
    /// Upper bound of the default (unfiltered) nightly price range.
    #[serde(default = "default_max_price")]
    pub default_max_price: f64,
}

fn default_hotel_max() -> usize {
    10
}

fn default_collect_limit() -> usize {
    15
}

fn default_batch_size() -> usize {
    10
}

fn default_max_hotel_ids() -> usize {
    100
}

fn default_max_price() -> f64 {
    10000.0
}

impl Default for HotelSettings {
    fn default() -> Self {
        Self {
            max_results: 10,
            collect_limit: 15,
            batch_size: 10,
            max_hotel_ids: 100,
            default_min_price: 0.0,
            default_max_price: 10000.0,
        }
    }
}

/// Car rental adapter defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalSettings {
    /// Offers returned after sorting.
    #[serde(default = "default_rental_max")]
    pub max_results: usize,
    /// Raw upstream results considered before sorting.
    #[serde(default = "default_scan_limit")]
    pub scan_limit: usize,
    /// Pickup/dropoff time used when the caller gives none.
    #[serde(default = "default_pickup_time")]
    pub default_pickup_time: String,
}

fn default_rental_max() -> usize {
    10
}

fn default_scan_limit() -> usize {
    20
}

fn default_pickup_time() -> String {
    "10:00".to_string()
}

impl Default for RentalSettings {
    fn default() -> Self {
        Self {
            max_results: 10,
            scan_limit: 20,
            default_pickup_time: "10:00".to_string(),
        }
    }
}

/// Web search adapter defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Results returned when the caller does not ask for a count.
    #[serde(default = "default_search_max")]
    pub max_results: usize,
}

fn default_search_max() -> usize {
    5
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { max_results: 5 }
    }
}

/// All adapter defaults, loadable from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Flight adapter section.
    #[serde(default)]
    pub flights: FlightSettings,
    /// Hotel adapter section.
    #[serde(default)]
    pub hotels: HotelSettings,
    /// Car rental adapter section.
    #[serde(default)]
    pub rentals: RentalSettings,
    /// Web search adapter section.
    #[serde(default)]
    pub search: SearchSettings,
}

impl Settings {
    /// Load settings from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the TOML file. If None, or if the file does not
    ///   exist, built-in defaults are returned.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML settings: {}", path.display()))
    }
}
