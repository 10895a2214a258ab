//! Client for the Open-Meteo geocoding and daily-forecast APIs.
//!
//! Both endpoints are unauthenticated. The forecast is always requested
//! for a single day in imperial units (Fahrenheit, mph, inches) with the
//! provider resolving the local timezone.

use crate::client::error::UpstreamError;
use async_trait::async_trait;
use serde::Deserialize;

const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com";
const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";

const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,weathercode,precipitation_sum,\
     precipitation_probability_max,windspeed_10m_max";

/// Interface to the geocoding + forecast service.
#[async_trait]
pub trait ForecastApi: Send + Sync {
    /// Resolve a free-text place name to candidate locations, best first.
    async fn geocode(&self, name: &str) -> Result<Vec<GeoPlace>, UpstreamError>;

    /// Fetch the daily forecast for exactly one ISO date.
    async fn daily_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        date: &str,
    ) -> Result<ForecastResponse, UpstreamError>;
}

/// One geocoding match.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoPlace {
    /// Resolved place name.
    pub name: String,
    /// Country the place is in, when known.
    #[serde(default)]
    pub country: Option<String>,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

#[derive(Debug, Default, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Option<Vec<GeoPlace>>,
}

/// Daily-forecast response. `daily` is absent when the provider has no
/// data for the requested date (e.g. beyond its ~16-day horizon).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastResponse {
    /// Per-day value arrays, parallel to `daily.time`.
    #[serde(default)]
    pub daily: Option<DailyBlock>,
}

/// Parallel per-day value arrays. Individual entries can be null when a
/// sensor-derived field is unavailable, so everything is Option-wrapped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyBlock {
    /// ISO dates covered by the other arrays.
    #[serde(default)]
    pub time: Vec<String>,
    /// Daily maximum temperature.
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    /// Daily minimum temperature.
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    /// WMO weather interpretation code.
    #[serde(default)]
    pub weathercode: Vec<Option<u32>>,
    /// Precipitation sum.
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
    /// Maximum precipitation probability, percent.
    #[serde(default)]
    pub precipitation_probability_max: Vec<Option<u32>>,
    /// Maximum wind speed.
    #[serde(default)]
    pub windspeed_10m_max: Vec<Option<f64>>,
}

/// HTTP client for Open-Meteo.
pub struct OpenMeteoClient {
    http: reqwest::Client,
    forecast_url: String,
    geocoding_url: String,
}

impl OpenMeteoClient {
    /// Create a client against the public Open-Meteo hosts.
    pub fn new() -> Self {
        Self::with_base_urls(DEFAULT_FORECAST_URL, DEFAULT_GEOCODING_URL)
    }

    /// Create a client against specific hosts.
    pub fn with_base_urls(
        forecast_url: impl Into<String>,
        geocoding_url: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            forecast_url: forecast_url.into(),
            geocoding_url: geocoding_url.into(),
        }
    }
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ForecastApi for OpenMeteoClient {
    async fn geocode(&self, name: &str) -> Result<Vec<GeoPlace>, UpstreamError> {
        let url = format!("{}/v1/search", self.geocoding_url);
        let response = self
            .http
            .get(&url)
            .query(&[("name", name), ("count", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::api(status.as_u16(), body.trim().to_string()));
        }

        let body: GeocodeResponse = response.json().await?;
        Ok(body.results.unwrap_or_default())
    }

    async fn daily_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        date: &str,
    ) -> Result<ForecastResponse, UpstreamError> {
        let url = format!("{}/v1/forecast", self.forecast_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("temperature_unit", "fahrenheit".to_string()),
                ("wind_speed_unit", "mph".to_string()),
                ("precipitation_unit", "inch".to_string()),
                ("timezone", "auto".to_string()),
                ("start_date", date.to_string()),
                ("end_date", date.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::api(status.as_u16(), body.trim().to_string()));
        }

        Ok(response.json().await?)
    }
}
