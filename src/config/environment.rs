//! Environment variable loading and credential management.
//!
//! Upstream credentials are materialized into typed structs once, at
//! startup, and injected into the API clients. A missing variable is a
//! startup-time error with context, not an authentication failure on the
//! first tool call.

use anyhow::{Context, Result};
use std::env;
use std::path::Path;

/// Client-credential pair for the flight/hotel shopping API.
#[derive(Debug, Clone)]
pub struct AmadeusCredentials {
    /// OAuth2 client id.
    pub client_id: String,
    /// OAuth2 client secret.
    pub client_secret: String,
}

impl AmadeusCredentials {
    /// Read credentials from `AMADEUS_CLIENT_ID` / `AMADEUS_CLIENT_SECRET`.
    pub fn from_env() -> Result<Self> {
        let client_id = env::var("AMADEUS_CLIENT_ID").context("AMADEUS_CLIENT_ID not set")?;
        let client_secret =
            env::var("AMADEUS_CLIENT_SECRET").context("AMADEUS_CLIENT_SECRET not set")?;
        Ok(Self {
            client_id,
            client_secret,
        })
    }
}

/// API key for the car-rental search provider, sent as a request header.
#[derive(Debug, Clone)]
pub struct RentalCredentials {
    /// Provider API key.
    pub api_key: String,
}

impl RentalCredentials {
    /// Read the key from `CAR_RENTAL_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("CAR_RENTAL_API_KEY").context("CAR_RENTAL_API_KEY not set")?;
        Ok(Self { api_key })
    }
}

/// Loads environment variables from a `.env` file and the system environment.
#[derive(Debug, Clone)]
pub struct EnvironmentLoader {
    #[allow(dead_code)]
    env_file: Option<String>,
}

impl EnvironmentLoader {
    /// Initialize the environment loader.
    ///
    /// # Arguments
    /// * `env_file` - Path to .env file. If None, no file is loaded.
    ///
    /// Only an explicitly provided path is loaded. This avoids picking up
    /// repository or system .env files during unit tests which expect the
    /// plain process environment.
    pub fn new(env_file: Option<&Path>) -> Self {
        if let Some(path) = env_file {
            if path.exists() {
                if let Err(e) = dotenv::from_path(path) {
                    eprintln!("Warning: Failed to load .env file: {}", e);
                }
            }
        }

        Self {
            env_file: env_file.map(|p| p.to_string_lossy().to_string()),
        }
    }

    /// Materialize shopping-API credentials from the environment.
    pub fn amadeus_credentials(&self) -> Result<AmadeusCredentials> {
        AmadeusCredentials::from_env()
    }

    /// Materialize rental-API credentials from the environment.
    pub fn rental_credentials(&self) -> Result<RentalCredentials> {
        RentalCredentials::from_env()
    }

    /// Optional override for the web-search provider base URL.
    pub fn search_base_url(&self) -> Option<String> {
        env::var("SEARCH_API_URL").ok()
    }

    /// Optional override for the shopping-API base URL (e.g. the
    /// production host instead of the default test host).
    pub fn amadeus_base_url(&self) -> Option<String> {
        env::var("AMADEUS_BASE_URL").ok()
    }
}

impl Default for EnvironmentLoader {
    fn default() -> Self {
        Self::new(None)
    }
}
