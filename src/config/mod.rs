//! Configuration management for travel tool adapters.
//!
//! This module provides credential loading from the process environment
//! (with `.env` support) and adapter defaults through TOML files.
//!
//! # Example
//!
//! ```no_run
//! use travelkit::config::{AmadeusCredentials, EnvironmentLoader, Settings};
//! use std::path::Path;
//!
//! // Load environment variables from .env, then materialize credentials.
//! let env = EnvironmentLoader::new(Some(Path::new(".env")));
//! let credentials = env.amadeus_credentials().unwrap();
//!
//! // Load adapter defaults from TOML (falls back to built-in defaults).
//! let settings = Settings::load(Some(Path::new("config/travelkit.toml"))).unwrap();
//! println!("Flight result cap: {}", settings.flights.max_results);
//! # let _ = credentials;
//! ```

pub mod environment;
pub mod settings;

// Re-export main types for convenience
pub use self::environment::{AmadeusCredentials, EnvironmentLoader, RentalCredentials};
pub use self::settings::{
    FlightSettings, HotelSettings, RentalSettings, SearchSettings, Settings,
};
