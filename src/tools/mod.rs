//! Tool adapters for the orchestrating agent runtime.
//!
//! Each adapter wraps one upstream travel API behind a named, typed
//! function call: it parses the LLM-extracted arguments, issues the
//! upstream request(s) sequentially, and normalizes the response into the
//! uniform [`ToolOutcome`] envelope. Adapters never return a fault to the
//! caller - every error becomes an error envelope.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use serde_json::json;
//! use travelkit::client::OpenMeteoClient;
//! use travelkit::tools::{ToolAdapter, WeatherTool};
//!
//! # async fn example() {
//! let tool = WeatherTool::new(Arc::new(OpenMeteoClient::new()));
//! let outcome = tool
//!     .execute(json!({"location": "Paris", "date": "12/13/25"}))
//!     .await;
//! assert!(outcome.to_value()["status"].is_string());
//! # }
//! ```

pub mod dates;
pub mod definition;
pub mod error;
pub mod flights;
pub mod hotels;
pub mod outcome;
pub mod registry;
pub mod rentals;
pub mod weather;
pub mod websearch;

// Re-export main types for convenience
pub use self::definition::ToolDefinition;
pub use self::error::ToolError;
pub use self::flights::{FlightSearchTool, FlightSummary};
pub use self::hotels::{HotelSearchTool, HotelSummary};
pub use self::outcome::ToolOutcome;
pub use self::registry::{ToolCall, ToolRegistry};
pub use self::rentals::{CarRentalTool, RentalSummary};
pub use self::weather::{WeatherSummary, WeatherTool};
pub use self::websearch::{SearchSummary, WebSearchTool};

use async_trait::async_trait;
use serde_json::Value;

/// A callable travel tool.
///
/// Implementations expose an OpenAI-compatible schema through
/// [`ToolDefinition`] and an infallible `execute`: whatever goes wrong,
/// the result is an envelope, never an `Err` or a panic.
#[async_trait]
pub trait ToolAdapter: Send + Sync {
    /// Unique tool name used for registry lookup and LLM function calls.
    fn name(&self) -> &str;

    /// Human-readable description for LLM consumption.
    fn description(&self) -> &str;

    /// JSON Schema of the accepted arguments.
    fn parameters(&self) -> Value;

    /// Run the tool with already-parsed JSON arguments.
    async fn execute(&self, arguments: Value) -> ToolOutcome;

    /// Canonical definition of this tool.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description(), self.parameters())
    }
}

/// Extract a required string argument.
pub(crate) fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| ToolError::missing_argument(key))
}

/// Extract an optional string argument.
pub(crate) fn optional_str<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(|v| v.as_str())
}

/// Extract an optional numeric argument, tolerating numbers sent as strings.
pub(crate) fn optional_f64(args: &Value, key: &str) -> Option<f64> {
    match args.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Extract an optional integer argument, tolerating numbers sent as strings.
pub(crate) fn optional_u64(args: &Value, key: &str) -> Option<u64> {
    match args.get(key) {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_str() {
        let args = json!({"city_code": "PAR"});
        assert_eq!(required_str(&args, "city_code").unwrap(), "PAR");

        let err = required_str(&args, "missing").unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_optional_f64_accepts_strings() {
        let args = json!({"a": 150.5, "b": "250", "c": "not a number"});
        assert_eq!(optional_f64(&args, "a"), Some(150.5));
        assert_eq!(optional_f64(&args, "b"), Some(250.0));
        assert_eq!(optional_f64(&args, "c"), None);
        assert_eq!(optional_f64(&args, "d"), None);
    }

    #[test]
    fn test_optional_u64_accepts_strings() {
        let args = json!({"adults": "2", "n": 3});
        assert_eq!(optional_u64(&args, "adults"), Some(2));
        assert_eq!(optional_u64(&args, "n"), Some(3));
        assert_eq!(optional_u64(&args, "x"), None);
    }
}
