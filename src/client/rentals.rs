//! Client for the car-rental search API.
//!
//! Authentication is an API key sent as the `X-Api-Key` header. Searches
//! are always priced in USD; normalization and sorting happen in the
//! adapter, not here.

use crate::client::error::UpstreamError;
use crate::config::RentalCredentials;
use async_trait::async_trait;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://api.car-rental-search.com";

/// Interface to the rental-search service.
#[async_trait]
pub trait RentalApi: Send + Sync {
    /// Search rental offers for a pickup/dropoff window.
    async fn search_cars(&self, query: &RentalQuery) -> Result<Vec<RentalResult>, UpstreamError>;
}

/// Search parameters, with dates already in ISO form.
#[derive(Debug, Clone)]
pub struct RentalQuery {
    /// Pickup location code.
    pub pickup_location: String,
    /// Pickup date, `YYYY-MM-DD`.
    pub pickup_date: String,
    /// Dropoff date, `YYYY-MM-DD`.
    pub dropoff_date: String,
    /// Pickup time, `HH:MM`.
    pub pickup_time: String,
    /// Dropoff time, `HH:MM`.
    pub dropoff_time: String,
}

/// One raw rental offer. Suppliers fill these fields inconsistently, so
/// everything beyond the wrapper is optional; the adapter applies the
/// display defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RentalResult {
    /// Supplier block.
    #[serde(default)]
    pub supplier: Option<SupplierInfo>,
    /// Vehicle block.
    #[serde(default)]
    pub vehicle: Option<VehicleInfo>,
    /// Pricing block.
    #[serde(default)]
    pub pricing: Option<RentalPricing>,
    /// Fuel policy (e.g. `Full to Full`).
    #[serde(default)]
    pub fuel_policy: Option<String>,
    /// Mileage allowance (e.g. `Unlimited`).
    #[serde(default)]
    pub mileage: Option<String>,
}

/// Rental supplier description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupplierInfo {
    /// Supplier display name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Vehicle description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleInfo {
    /// Vehicle model name (e.g. `Toyota Corolla or similar`).
    #[serde(default)]
    pub name: Option<String>,
    /// Vehicle class/group (e.g. `Compact`).
    #[serde(default)]
    pub class: Option<String>,
    /// Transmission type.
    #[serde(default)]
    pub transmission: Option<String>,
    /// Seat count.
    #[serde(default)]
    pub seats: Option<u32>,
    /// Bag capacity.
    #[serde(default)]
    pub bags: Option<u32>,
    /// Whether the vehicle has air conditioning.
    #[serde(default)]
    pub air_conditioning: Option<bool>,
}

/// Pricing block. Suppliers report some mix of total, base and per-day.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RentalPricing {
    /// Total price for the rental period.
    #[serde(default)]
    pub total: Option<f64>,
    /// Base price before fees.
    #[serde(default)]
    pub base: Option<f64>,
    /// Per-day price.
    #[serde(default)]
    pub per_day: Option<f64>,
    /// Currency code.
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RentalSearchResponse {
    #[serde(default, alias = "search_results")]
    results: Vec<RentalResult>,
}

/// HTTP client for the rental-search provider.
pub struct RentalClient {
    http: reqwest::Client,
    base_url: String,
    credentials: RentalCredentials,
}

impl RentalClient {
    /// Create a client against the default host.
    pub fn new(credentials: RentalCredentials) -> Self {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    /// Create a client against a specific host.
    pub fn with_base_url(credentials: RentalCredentials, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            credentials,
        }
    }
}

#[async_trait]
impl RentalApi for RentalClient {
    async fn search_cars(&self, query: &RentalQuery) -> Result<Vec<RentalResult>, UpstreamError> {
        let url = format!("{}/v1/search-cars", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("X-Api-Key", &self.credentials.api_key)
            .query(&[
                ("pick_up_location", query.pickup_location.as_str()),
                ("pick_up_date", query.pickup_date.as_str()),
                ("drop_off_date", query.dropoff_date.as_str()),
                ("pick_up_time", query.pickup_time.as_str()),
                ("drop_off_time", query.dropoff_time.as_str()),
                ("currency", "USD"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::api(status.as_u16(), body.trim().to_string()));
        }

        let body: RentalSearchResponse = response.json().await?;
        Ok(body.results)
    }
}
