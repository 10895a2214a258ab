//! Client for the Amadeus self-service shopping APIs.
//!
//! Covers the three endpoints the adapters need: flight-offers search,
//! hotel list by city, and hotel-offers search. Authentication is OAuth2
//! client credentials; the bearer token is fetched lazily and cached
//! until shortly before expiry.

use crate::client::error::UpstreamError;
use crate::config::AmadeusCredentials;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;

const DEFAULT_BASE_URL: &str = "https://test.api.amadeus.com";

/// Seconds shaved off the advertised token lifetime before re-fetching.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

/// Interface to the flight/hotel shopping service.
///
/// The flight and hotel adapters depend on this trait rather than on
/// [`AmadeusClient`] directly, so unit tests can supply canned responses.
#[async_trait]
pub trait ShoppingApi: Send + Sync {
    /// Search one-way flight offers for a single departure date.
    async fn flight_offers(
        &self,
        origin: &str,
        destination: &str,
        departure_date: &str,
        adults: u32,
        max_results: u32,
    ) -> Result<Vec<FlightOffer>, UpstreamError>;

    /// List hotels for an IATA city code.
    async fn hotels_by_city(&self, city_code: &str) -> Result<Vec<HotelRef>, UpstreamError>;

    /// Fetch offers for a batch of hotel ids over a stay window.
    async fn hotel_offers(
        &self,
        hotel_ids: &[String],
        check_in: &str,
        check_out: &str,
        adults: u32,
    ) -> Result<Vec<HotelOfferGroup>, UpstreamError>;
}

// ---- Upstream response models (camelCase JSON) ----

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

/// One priced flight itinerary as returned by the offers search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    /// Airline codes validating the offer; the first one is displayed.
    #[serde(default)]
    pub validating_airline_codes: Vec<String>,
    /// Itineraries making up the offer (one for a one-way search).
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
    /// Offer price block.
    #[serde(default)]
    pub price: OfferPrice,
    /// Bookable seats remaining at this price.
    #[serde(default)]
    pub number_of_bookable_seats: u32,
}

/// A sequence of flight segments.
#[derive(Debug, Clone, Deserialize)]
pub struct Itinerary {
    /// Segments in travel order.
    #[serde(default)]
    pub segments: Vec<Segment>,
}

/// One flight leg.
#[derive(Debug, Clone, Deserialize)]
pub struct Segment {
    /// Departure endpoint.
    pub departure: SegmentPoint,
    /// Arrival endpoint.
    pub arrival: SegmentPoint,
}

/// Departure or arrival point of a segment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentPoint {
    /// Local timestamp, ISO-8601 without offset (e.g. `2025-12-13T14:30:00`).
    pub at: String,
}

/// Price block of a flight offer. Amadeus serializes amounts as strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfferPrice {
    /// Total price as a decimal string.
    #[serde(default)]
    pub total: String,
    /// Currency code.
    #[serde(default)]
    pub currency: String,
}

/// A hotel reference from the by-city lookup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelRef {
    /// Amadeus hotel id, used to query offers.
    pub hotel_id: String,
    /// Hotel display name, when present.
    #[serde(default)]
    pub name: Option<String>,
}

/// All offers for one hotel, as returned by the offers search.
#[derive(Debug, Clone, Deserialize)]
pub struct HotelOfferGroup {
    /// Hotel descriptive data.
    #[serde(default)]
    pub hotel: HotelInfo,
    /// Room/rate options; the cheapest is listed first upstream.
    #[serde(default)]
    pub offers: Vec<HotelOffer>,
}

/// Descriptive hotel data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotelInfo {
    /// Hotel display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Star rating; the API serializes this inconsistently (string or
    /// number), so it is kept loose here and normalized by the adapter.
    #[serde(default)]
    pub rating: Option<Value>,
}

/// One room/rate option.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotelOffer {
    /// Price block.
    #[serde(default)]
    pub price: HotelPrice,
    /// Room description block.
    #[serde(default)]
    pub room: HotelRoom,
}

/// Price block of a hotel offer. Amounts are decimal strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotelPrice {
    /// Nightly base price.
    #[serde(default)]
    pub base: Option<String>,
    /// Total price for the stay.
    #[serde(default)]
    pub total: Option<String>,
    /// Currency code.
    #[serde(default)]
    pub currency: Option<String>,
}

/// Room description block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelRoom {
    /// Estimated room type, when the supplier provides one.
    #[serde(default)]
    pub type_estimated: Option<RoomTypeEstimate>,
}

/// Estimated room category and bed count.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomTypeEstimate {
    /// Room category (e.g. `DELUXE_ROOM`).
    #[serde(default)]
    pub category: Option<String>,
    /// Number of beds.
    #[serde(default)]
    pub beds: Option<u32>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

/// HTTP client for the Amadeus shopping APIs.
pub struct AmadeusClient {
    http: reqwest::Client,
    base_url: String,
    credentials: AmadeusCredentials,
    token: Mutex<Option<CachedToken>>,
}

impl AmadeusClient {
    /// Create a client against the default (test) host.
    pub fn new(credentials: AmadeusCredentials) -> Self {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    /// Create a client against a specific host.
    pub fn with_base_url(credentials: AmadeusCredentials, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            credentials,
            token: Mutex::new(None),
        }
    }

    /// Get a bearer token, fetching a fresh one if the cache is empty or
    /// within the expiry margin.
    async fn bearer_token(&self) -> Result<String, UpstreamError> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.expires_at > Utc::now() {
                return Ok(token.value.clone());
            }
        }

        let url = format!("{}/v1/security/oauth2/token", self.base_url);
        let response = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::auth(format!(
                "token request failed ({}): {}",
                status,
                extract_api_message(&body)
            )));
        }

        let token: TokenResponse = response.json().await?;
        let expires_at =
            Utc::now() + Duration::seconds(token.expires_in - TOKEN_EXPIRY_MARGIN_SECS);
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at,
        });

        Ok(token.access_token)
    }

    /// Authenticated GET returning the `data` array of the response.
    async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, UpstreamError> {
        let token = self.bearer_token().await?;
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::api(
                status.as_u16(),
                extract_api_message(&body),
            ));
        }

        let body = response.text().await?;
        let envelope: DataEnvelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.data)
    }
}

/// Pull a readable message out of an Amadeus error body.
///
/// Error responses carry `{"errors": [{"title": ..., "detail": ...}]}`;
/// falls back to the raw body when that shape is absent.
fn extract_api_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(first) = value.get("errors").and_then(|e| e.as_array()).and_then(|a| a.first()) {
            if let Some(detail) = first.get("detail").and_then(|d| d.as_str()) {
                return detail.to_string();
            }
            if let Some(title) = first.get("title").and_then(|t| t.as_str()) {
                return title.to_string();
            }
        }
        // OAuth errors use a different shape
        if let Some(desc) = value.get("error_description").and_then(|d| d.as_str()) {
            return desc.to_string();
        }
    }
    body.trim().to_string()
}

#[async_trait]
impl ShoppingApi for AmadeusClient {
    async fn flight_offers(
        &self,
        origin: &str,
        destination: &str,
        departure_date: &str,
        adults: u32,
        max_results: u32,
    ) -> Result<Vec<FlightOffer>, UpstreamError> {
        self.get_data(
            "/v2/shopping/flight-offers",
            &[
                ("originLocationCode", origin.to_string()),
                ("destinationLocationCode", destination.to_string()),
                ("departureDate", departure_date.to_string()),
                ("adults", adults.to_string()),
                ("max", max_results.to_string()),
                ("currencyCode", "USD".to_string()),
            ],
        )
        .await
    }

    async fn hotels_by_city(&self, city_code: &str) -> Result<Vec<HotelRef>, UpstreamError> {
        self.get_data(
            "/v1/reference-data/locations/hotels/by-city",
            &[("cityCode", city_code.to_string())],
        )
        .await
    }

    async fn hotel_offers(
        &self,
        hotel_ids: &[String],
        check_in: &str,
        check_out: &str,
        adults: u32,
    ) -> Result<Vec<HotelOfferGroup>, UpstreamError> {
        self.get_data(
            "/v3/shopping/hotel-offers",
            &[
                ("hotelIds", hotel_ids.join(",")),
                ("checkInDate", check_in.to_string()),
                ("checkOutDate", check_out.to_string()),
                ("adults", adults.to_string()),
                ("currency", "USD".to_string()),
            ],
        )
        .await
    }
}
