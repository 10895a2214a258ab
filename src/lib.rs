//! Travelkit - travel-planning tool adapters for LLM agents
//!
//! Travelkit wraps a handful of travel data APIs (flight/hotel shopping,
//! weather, car rentals, web search) behind typed tool adapters that an
//! LLM agent runtime can register and invoke by name:
//!
//! - **`config`** - Environment credentials and TOML tool settings
//! - **`client`** - Injected upstream API clients (Amadeus, Open-Meteo, ...)
//! - **`tools`** - The adapters, their registry, and the result envelope
//! - **`observability`** - Markdown logging of tool executions
//!
//! Every adapter takes natural-language-extracted arguments as JSON,
//! issues one or more sequential upstream calls, and normalizes the
//! heterogeneous responses into a uniform envelope:
//!
//! ```json
//! {"status": "success", "flights": [...]}
//! {"status": "error", "error": "No flights found"}
//! ```
//!
//! The envelope is the contract: adapters never raise to the caller.
//!
//! # Example: wiring a registry
//!
//! ```no_run
//! use std::sync::Arc;
//! use travelkit::config::{AmadeusCredentials, Settings};
//! use travelkit::client::AmadeusClient;
//! use travelkit::tools::{FlightSearchTool, HotelSearchTool, ToolRegistry};
//!
//! # fn main() -> anyhow::Result<()> {
//! let credentials = AmadeusCredentials::from_env()?;
//! let amadeus = Arc::new(AmadeusClient::new(credentials));
//! let settings = Settings::default();
//!
//! let mut registry = ToolRegistry::new();
//! registry.register(FlightSearchTool::new(amadeus.clone(), settings.flights.clone()))?;
//! registry.register(HotelSearchTool::new(amadeus, settings.hotels.clone()))?;
//!
//! // Hand the OpenAI-style schemas to the orchestrating agent runtime.
//! let schemas = registry.openai_functions();
//! # let _ = schemas;
//! # Ok(())
//! # }
//! ```

/// Configuration management: credentials and tool settings
pub mod config;

/// Upstream API clients and their trait seams
pub mod client;

/// Tool adapters, registry, and the result envelope
pub mod tools;

/// Logging of tool executions
pub mod observability;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::client::{
        AmadeusClient, ForecastApi, OpenMeteoClient, RentalApi, RentalClient, SearchApi,
        ShoppingApi, UpstreamError, WebSearchClient,
    };
    pub use crate::config::{
        AmadeusCredentials, EnvironmentLoader, RentalCredentials, Settings,
    };
    pub use crate::observability::Logger;
    pub use crate::tools::{
        CarRentalTool, FlightSearchTool, HotelSearchTool, ToolAdapter, ToolCall,
        ToolDefinition, ToolOutcome, ToolRegistry, WeatherTool, WebSearchTool,
    };
}
