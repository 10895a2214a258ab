//! Upstream API clients and their trait seams.
//!
//! Each third-party service is wrapped by a concrete client plus an
//! `async_trait` interface (`ShoppingApi`, `ForecastApi`, `RentalApi`,
//! `SearchApi`). The adapters in [`crate::tools`] depend only on the
//! traits, so tests run against stub implementations and deployments can
//! swap hosts without touching adapter code.
//!
//! All clients are constructed explicitly with their credentials and
//! injected where needed - there is no module-level global client reading
//! the environment at import time.

pub mod amadeus;
pub mod error;
pub mod meteo;
pub mod rentals;
pub mod websearch;

// Re-export main types for convenience
pub use self::amadeus::{
    AmadeusClient, FlightOffer, HotelOfferGroup, HotelRef, ShoppingApi,
};
pub use self::error::UpstreamError;
pub use self::meteo::{ForecastApi, ForecastResponse, GeoPlace, OpenMeteoClient};
pub use self::rentals::{RentalApi, RentalClient, RentalQuery, RentalResult};
pub use self::websearch::{RawSearchResult, SearchApi, WebSearchClient};
