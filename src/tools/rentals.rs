//! Car rental lookup adapter.

use crate::client::rentals::{RentalApi, RentalQuery, RentalResult};
use crate::client::UpstreamError;
use crate::config::RentalSettings;
use crate::tools::dates::{parse_travel_date, parse_usd, rental_days, to_iso, usd};
use crate::tools::{optional_str, required_str, ToolAdapter, ToolError, ToolOutcome};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use std::cmp::Ordering;
use std::sync::Arc;

/// One normalized rental offer, ready for LLM display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalSummary {
    /// Supplier display name, or `N/A`.
    pub supplier: String,
    /// Vehicle model, or `N/A`.
    pub vehicle: String,
    /// Vehicle class, defaulting to `Standard`.
    pub class: String,
    /// Transmission, defaulting to `Automatic`.
    pub transmission: String,
    /// Seat count.
    pub seats: u32,
    /// Bag capacity.
    pub bags: u32,
    /// Whether the vehicle has air conditioning.
    pub air_conditioning: bool,
    /// Total price for the rental period as a USD display string.
    pub total_price: String,
    /// Per-day price as a USD display string.
    pub price_per_day: String,
    /// Currency code.
    pub currency: String,
    /// Fuel policy, or `N/A`.
    pub fuel_policy: String,
    /// Mileage allowance, defaulting to `Unlimited`.
    pub mileage: String,
}

/// Normalize one raw rental offer for a rental of `days` days.
///
/// Suppliers report some mix of total, base and per-day pricing; the
/// missing figures are derived from whichever ones are present.
pub fn normalize_rental(result: &RentalResult, days: i64) -> RentalSummary {
    let vehicle = result.vehicle.as_ref();
    let pricing = result.pricing.as_ref();

    let total = pricing
        .and_then(|p| p.total)
        .or_else(|| pricing.and_then(|p| p.base))
        .or_else(|| pricing.and_then(|p| p.per_day).map(|d| d * days as f64))
        .unwrap_or(0.0);
    let per_day = pricing
        .and_then(|p| p.per_day)
        .unwrap_or(total / days as f64);

    RentalSummary {
        supplier: result
            .supplier
            .as_ref()
            .and_then(|s| s.name.clone())
            .unwrap_or_else(|| "N/A".to_string()),
        vehicle: vehicle
            .and_then(|v| v.name.clone())
            .unwrap_or_else(|| "N/A".to_string()),
        class: vehicle
            .and_then(|v| v.class.clone())
            .unwrap_or_else(|| "Standard".to_string()),
        transmission: vehicle
            .and_then(|v| v.transmission.clone())
            .unwrap_or_else(|| "Automatic".to_string()),
        seats: vehicle.and_then(|v| v.seats).unwrap_or(0),
        bags: vehicle.and_then(|v| v.bags).unwrap_or(0),
        air_conditioning: vehicle.and_then(|v| v.air_conditioning).unwrap_or(false),
        total_price: usd(total),
        price_per_day: usd(per_day),
        currency: pricing
            .and_then(|p| p.currency.clone())
            .unwrap_or_else(|| "USD".to_string()),
        fuel_policy: result
            .fuel_policy
            .clone()
            .unwrap_or_else(|| "N/A".to_string()),
        mileage: result
            .mileage
            .clone()
            .unwrap_or_else(|| "Unlimited".to_string()),
    }
}

/// Tool that searches rental cars for a pickup/dropoff window.
pub struct CarRentalTool {
    api: Arc<dyn RentalApi>,
    settings: RentalSettings,
}

impl CarRentalTool {
    /// Create the tool with the given rental API and settings.
    pub fn new(api: Arc<dyn RentalApi>, settings: RentalSettings) -> Self {
        Self { api, settings }
    }

    async fn run(&self, args: &Value) -> Result<Vec<RentalSummary>, ToolError> {
        let pickup_location = required_str(args, "pickup_location")?;
        let pickup = parse_travel_date(required_str(args, "pickup_date")?)?;
        let dropoff = parse_travel_date(required_str(args, "dropoff_date")?)?;

        let default_time = self.settings.default_pickup_time.as_str();
        let query = RentalQuery {
            pickup_location: pickup_location.to_string(),
            pickup_date: to_iso(pickup),
            dropoff_date: to_iso(dropoff),
            pickup_time: optional_str(args, "pickup_time")
                .unwrap_or(default_time)
                .to_string(),
            dropoff_time: optional_str(args, "dropoff_time")
                .unwrap_or(default_time)
                .to_string(),
        };

        let results = self.api.search_cars(&query).await?;
        if results.is_empty() {
            return Err(ToolError::empty(
                "No rental cars found for the specified dates",
            ));
        }

        let days = rental_days(pickup, dropoff);
        let mut cars: Vec<RentalSummary> = results
            .iter()
            .take(self.settings.scan_limit)
            .map(|r| normalize_rental(r, days))
            .collect();

        cars.sort_by(|a, b| {
            parse_usd(&a.total_price)
                .partial_cmp(&parse_usd(&b.total_price))
                .unwrap_or(Ordering::Equal)
        });
        cars.truncate(self.settings.max_results);

        Ok(cars)
    }

    fn describe_error(&self, err: ToolError) -> String {
        match err {
            ToolError::DateFormat { .. } | ToolError::MissingArgument { .. } => err.to_string(),
            ToolError::Empty(message) => message,
            ToolError::Upstream(UpstreamError::Transport(e)) => {
                format!("Error contacting car rental service: {}", e)
            }
            ToolError::Upstream(e) => format!("Error checking car rentals: {}", e),
            other => format!("Unexpected error: {}", other),
        }
    }
}

#[async_trait]
impl ToolAdapter for CarRentalTool {
    fn name(&self) -> &str {
        "check_car_rentals"
    }

    fn description(&self) -> &str {
        "Search for available rental cars at a location for a date range"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "pickup_location": {
                    "type": "string",
                    "description": "Pickup location, airport code or city (e.g. 'LAX' or 'Los Angeles')"
                },
                "pickup_date": {
                    "type": "string",
                    "description": "Pickup date in format mm/dd/yy (e.g. '12/13/25')"
                },
                "dropoff_date": {
                    "type": "string",
                    "description": "Dropoff date in format mm/dd/yy (e.g. '12/15/25')"
                },
                "pickup_time": {
                    "type": "string",
                    "description": "Pickup time in 24h format HH:MM (default: '10:00')"
                },
                "dropoff_time": {
                    "type": "string",
                    "description": "Dropoff time in 24h format HH:MM (default: '10:00')"
                }
            },
            "required": ["pickup_location", "pickup_date", "dropoff_date"]
        })
    }

    async fn execute(&self, arguments: Value) -> ToolOutcome {
        match self.run(&arguments).await {
            Ok(cars) => ToolOutcome::success("cars", json!(cars)),
            Err(e) => ToolOutcome::error(self.describe_error(e)),
        }
    }
}
