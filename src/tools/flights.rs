//! Flight lookup adapter.

use crate::client::amadeus::{FlightOffer, ShoppingApi};
use crate::client::UpstreamError;
use crate::config::FlightSettings;
use crate::tools::dates::{format_timestamp, parse_travel_date, to_iso, usd};
use crate::tools::{required_str, ToolAdapter, ToolError, ToolOutcome};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Airline display name for a validating carrier code.
///
/// Covers the carriers the assistant actually encounters; anything else
/// falls back to the raw code in the caller.
pub fn airline_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "BA" => "British Airways",
        "AF" => "Air France",
        "LH" => "Lufthansa",
        "AA" => "American Airlines",
        "UA" => "United Airlines",
        "DL" => "Delta Air Lines",
        "EK" => "Emirates",
        "IB" => "Iberia",
        "KL" => "KLM Royal Dutch Airlines",
        "QF" => "Qantas",
        "F9" => "Frontier Airlines",
        "W2" => "FlexFlight",
        "WN" => "Southwest Airlines",
        "B6" => "JetBlue Airways",
        "AS" => "Alaska Airlines",
        "NK" => "Spirit Airlines",
        "WS" => "WestJet",
        "AC" => "Air Canada",
        "VS" => "Virgin Atlantic",
        "TK" => "Turkish Airlines",
        "LX" => "Swiss International Air Lines",
        "OS" => "Austrian Airlines",
        "AY" => "Finnair",
        "SK" => "SAS Scandinavian Airlines",
        "EI" => "Aer Lingus",
        "TP" => "TAP Air Portugal",
        "LO" => "LOT Polish Airlines",
        "AZ" => "ITA Airways",
        "SN" => "Brussels Airlines",
        _ => return None,
    };
    Some(name)
}

/// One normalized flight offer, ready for LLM display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightSummary {
    /// Airline display name, or the raw carrier code if unrecognized.
    pub airline: String,
    /// Departure of the first segment, `mm/dd/yy hh:mm AM/PM`.
    pub departure: String,
    /// Arrival of the last segment, same format.
    pub arrival: String,
    /// Total price as a USD display string.
    pub price: String,
    /// Bookable seats remaining.
    pub seats_remaining: u32,
}

/// Normalize one upstream offer.
///
/// Offers missing a carrier code or segments are dropped rather than
/// rendered half-empty; upstream order is preserved, no sorting.
pub fn normalize_flight_offer(offer: &FlightOffer) -> Option<FlightSummary> {
    let code = offer.validating_airline_codes.first()?;
    let itinerary = offer.itineraries.first()?;
    let first = itinerary.segments.first()?;
    let last = itinerary.segments.last()?;

    Some(FlightSummary {
        airline: airline_name(code).unwrap_or(code.as_str()).to_string(),
        departure: format_timestamp(&first.departure.at),
        arrival: format_timestamp(&last.arrival.at),
        price: usd(offer.price.total.parse().unwrap_or(0.0)),
        seats_remaining: offer.number_of_bookable_seats,
    })
}

/// Tool that checks available flights between two airports on a date.
pub struct FlightSearchTool {
    api: Arc<dyn ShoppingApi>,
    settings: FlightSettings,
}

impl FlightSearchTool {
    /// Create the tool with the given shopping API and settings.
    pub fn new(api: Arc<dyn ShoppingApi>, settings: FlightSettings) -> Self {
        Self { api, settings }
    }

    async fn run(&self, args: &Value) -> Result<Vec<FlightSummary>, ToolError> {
        let destination = required_str(args, "destination")?;
        let origin = required_str(args, "origin")?;
        let departure_date = required_str(args, "departure_date")?;

        let date = parse_travel_date(departure_date)?;

        let offers = self
            .api
            .flight_offers(
                origin,
                destination,
                &to_iso(date),
                1,
                self.settings.max_results as u32,
            )
            .await?;

        Ok(offers.iter().filter_map(normalize_flight_offer).collect())
    }

    fn describe_error(&self, err: ToolError) -> String {
        match err {
            ToolError::DateFormat { .. } | ToolError::MissingArgument { .. } => err.to_string(),
            ToolError::Upstream(UpstreamError::Transport(e)) => {
                format!("Error contacting flight search service: {}", e)
            }
            ToolError::Upstream(e) => format!("Error checking flights: {}", e),
            other => format!("Unexpected error: {}", other),
        }
    }
}

#[async_trait]
impl ToolAdapter for FlightSearchTool {
    fn name(&self) -> &str {
        "check_flights"
    }

    fn description(&self) -> &str {
        "Check available flights for a given origin, destination and departure date"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "destination": {
                    "type": "string",
                    "description": "IATA code of destination airport (e.g. 'JFK' for New York JFK)"
                },
                "origin": {
                    "type": "string",
                    "description": "IATA code of origin airport (e.g. 'LAX' for Los Angeles)"
                },
                "departure_date": {
                    "type": "string",
                    "description": "Date in format mm/dd/yy (e.g. '12/13/25' for December 13, 2025)"
                }
            },
            "required": ["destination", "origin", "departure_date"]
        })
    }

    async fn execute(&self, arguments: Value) -> ToolOutcome {
        match self.run(&arguments).await {
            Ok(flights) if flights.is_empty() => ToolOutcome::error("No flights found"),
            Ok(flights) => ToolOutcome::success("flights", json!(flights)),
            Err(e) => ToolOutcome::error(self.describe_error(e)),
        }
    }
}
