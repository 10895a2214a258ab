//! Hotel lookup adapter.

use crate::client::amadeus::{HotelOfferGroup, ShoppingApi};
use crate::client::UpstreamError;
use crate::config::HotelSettings;
use crate::observability::Logger;
use crate::tools::dates::{parse_travel_date, parse_usd, to_iso, usd};
use crate::tools::{optional_f64, optional_u64, required_str, ToolAdapter, ToolError, ToolOutcome};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use std::cmp::Ordering;
use std::sync::Arc;

/// One normalized hotel offer, ready for LLM display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelSummary {
    /// Hotel display name.
    pub name: String,
    /// Star rating, or `N/A` when the supplier gives none.
    pub rating: String,
    /// Nightly base price as a USD display string.
    pub price_per_night: String,
    /// Total price for the stay as a USD display string.
    pub total_price: String,
    /// Currency code.
    pub currency: String,
    /// Room category, defaulting to `Standard`.
    pub room_type: String,
    /// Bed count, or `N/A`.
    pub beds: String,
}

struct HotelQuery {
    city_code: String,
    check_in: String,
    check_out: String,
    adults: u32,
    min_price: f64,
    max_price: f64,
    explicit_range: bool,
}

/// Normalize one hotel's offer group, applying the nightly price filter.
///
/// Only the first listed offer is considered; alternate room/rate options
/// for the same hotel are ignored. Returns `None` both for hotels with no
/// offers and for hotels outside the price range.
fn normalize_hotel(group: &HotelOfferGroup, min_price: f64, max_price: f64) -> Option<HotelSummary> {
    let offer = group.offers.first()?;

    let nightly: f64 = offer
        .price
        .base
        .as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.0);

    if nightly < min_price || nightly > max_price {
        return None;
    }

    let total: f64 = offer
        .price
        .total
        .as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.0);

    let room = offer.room.type_estimated.as_ref();

    Some(HotelSummary {
        name: group
            .hotel
            .name
            .clone()
            .unwrap_or_else(|| "Unknown Hotel".to_string()),
        rating: rating_display(group.hotel.rating.as_ref()),
        price_per_night: usd(nightly),
        total_price: usd(total),
        currency: offer
            .price
            .currency
            .clone()
            .unwrap_or_else(|| "USD".to_string()),
        room_type: room
            .and_then(|r| r.category.clone())
            .unwrap_or_else(|| "Standard".to_string()),
        beds: room
            .and_then(|r| r.beds)
            .map(|b| b.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
    })
}

/// The rating field arrives as a string or a bare number depending on the
/// supplier; either way it is displayed verbatim.
fn rating_display(rating: Option<&Value>) -> String {
    match rating {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "N/A".to_string(),
    }
}

/// Tool that searches hotel offers in a city with optional nightly price
/// filtering.
pub struct HotelSearchTool {
    api: Arc<dyn ShoppingApi>,
    settings: HotelSettings,
    logger: Option<Arc<Logger>>,
}

impl HotelSearchTool {
    /// Create the tool with the given shopping API and settings.
    pub fn new(api: Arc<dyn ShoppingApi>, settings: HotelSettings) -> Self {
        Self {
            api,
            settings,
            logger: None,
        }
    }

    /// Attach a logger; offers hidden by the price filter are counted
    /// and reported through it.
    pub fn with_logger(mut self, logger: Arc<Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    fn parse_query(&self, args: &Value) -> Result<HotelQuery, ToolError> {
        let city_code = required_str(args, "city_code")?.to_string();
        let check_in = parse_travel_date(required_str(args, "check_in_date")?)?;
        let check_out = parse_travel_date(required_str(args, "check_out_date")?)?;

        let min_price = optional_f64(args, "min_price_per_night");
        let max_price = optional_f64(args, "max_price_per_night");
        let explicit_range = min_price.is_some() || max_price.is_some();

        Ok(HotelQuery {
            city_code,
            check_in: to_iso(check_in),
            check_out: to_iso(check_out),
            adults: optional_u64(args, "adults").unwrap_or(1) as u32,
            min_price: min_price.unwrap_or(self.settings.default_min_price),
            max_price: max_price.unwrap_or(self.settings.default_max_price),
            explicit_range,
        })
    }

    async fn run(&self, query: &HotelQuery) -> Result<Vec<HotelSummary>, ToolError> {
        let refs = self.api.hotels_by_city(&query.city_code).await?;
        if refs.is_empty() {
            return Err(ToolError::empty("No hotels found in this city"));
        }

        let ids: Vec<String> = refs
            .into_iter()
            .take(self.settings.max_hotel_ids)
            .map(|h| h.hotel_id)
            .collect();

        let mut hotels = Vec::new();
        let mut hidden_by_price = 0usize;

        for batch in ids.chunks(self.settings.batch_size) {
            // Best-effort coverage: one failed batch must not abort the rest
            let groups = match self
                .api
                .hotel_offers(batch, &query.check_in, &query.check_out, query.adults)
                .await
            {
                Ok(groups) => groups,
                Err(_) => continue,
            };

            for group in &groups {
                let had_offer = !group.offers.is_empty();
                match normalize_hotel(group, query.min_price, query.max_price) {
                    Some(summary) => hotels.push(summary),
                    None => {
                        if had_offer {
                            hidden_by_price += 1;
                        }
                    }
                }

                if hotels.len() >= self.settings.collect_limit {
                    break;
                }
            }

            if hotels.len() >= self.settings.collect_limit {
                break;
            }
        }

        if hidden_by_price > 0 {
            if let Some(logger) = &self.logger {
                let _ = logger.info(&format!(
                    "{} hotel offers in {} hidden by the ${:.0}-${:.0} nightly price filter",
                    hidden_by_price, query.city_code, query.min_price, query.max_price
                ));
            }
        }

        // The contract sorts on the display price, so parse it back out
        hotels.sort_by(|a, b| {
            parse_usd(&a.total_price)
                .partial_cmp(&parse_usd(&b.total_price))
                .unwrap_or(Ordering::Equal)
        });
        hotels.truncate(self.settings.max_results);

        Ok(hotels)
    }

    fn empty_message(&self, query: &HotelQuery) -> String {
        if query.explicit_range
            && (query.min_price > self.settings.default_min_price
                || query.max_price < self.settings.default_max_price)
        {
            format!(
                "No hotels found in the ${:.0}-${:.0} per night price range for the specified dates. \
                 Try widening your price range or different dates.",
                query.min_price, query.max_price
            )
        } else {
            "No available hotel offers found for the specified dates".to_string()
        }
    }

    fn describe_error(&self, err: ToolError) -> String {
        match err {
            ToolError::DateFormat { .. } | ToolError::MissingArgument { .. } => err.to_string(),
            ToolError::Empty(message) => message,
            ToolError::Upstream(UpstreamError::Transport(e)) => {
                format!("Error contacting hotel search service: {}", e)
            }
            ToolError::Upstream(e) => format!("Error checking hotels: {}", e),
            other => format!("Unexpected error: {}", other),
        }
    }
}

#[async_trait]
impl ToolAdapter for HotelSearchTool {
    fn name(&self) -> &str {
        "check_hotels"
    }

    fn description(&self) -> &str {
        "Search for available hotels in a city with optional nightly price filtering"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "city_code": {
                    "type": "string",
                    "description": "IATA city code (e.g. 'NYC' for New York, 'PAR' for Paris)"
                },
                "check_in_date": {
                    "type": "string",
                    "description": "Check-in date in format mm/dd/yy (e.g. '12/13/25')"
                },
                "check_out_date": {
                    "type": "string",
                    "description": "Check-out date in format mm/dd/yy (e.g. '12/15/25')"
                },
                "adults": {
                    "type": "integer",
                    "description": "Number of adults (default: 1)"
                },
                "min_price_per_night": {
                    "type": "number",
                    "description": "Minimum price per night in USD (default: 0)"
                },
                "max_price_per_night": {
                    "type": "number",
                    "description": "Maximum price per night in USD (default: 10000)"
                }
            },
            "required": ["city_code", "check_in_date", "check_out_date"]
        })
    }

    async fn execute(&self, arguments: Value) -> ToolOutcome {
        let query = match self.parse_query(&arguments) {
            Ok(query) => query,
            Err(e) => return ToolOutcome::error(self.describe_error(e)),
        };

        match self.run(&query).await {
            Ok(hotels) if hotels.is_empty() => ToolOutcome::error(self.empty_message(&query)),
            Ok(hotels) => ToolOutcome::success("hotels", json!(hotels)),
            Err(e) => ToolOutcome::error(self.describe_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::amadeus::{FlightOffer, HotelRef};
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    /// Stub that serves a fixed hotel list and per-batch offer responses,
    /// keyed by the first hotel id in the batch.
    struct StubShoppingApi {
        hotel_count: usize,
        offers_per_batch: Vec<Result<Vec<HotelOfferGroup>, ()>>,
        batch_calls: AtomicUsize,
    }

    impl StubShoppingApi {
        fn new(hotel_count: usize, offers_per_batch: Vec<Result<Vec<HotelOfferGroup>, ()>>) -> Self {
            Self {
                hotel_count,
                offers_per_batch,
                batch_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ShoppingApi for StubShoppingApi {
        async fn flight_offers(
            &self,
            _origin: &str,
            _destination: &str,
            _departure_date: &str,
            _adults: u32,
            _max_results: u32,
        ) -> Result<Vec<FlightOffer>, UpstreamError> {
            unimplemented!("not used by hotel tests")
        }

        async fn hotels_by_city(&self, _city_code: &str) -> Result<Vec<HotelRef>, UpstreamError> {
            Ok((0..self.hotel_count)
                .map(|i| HotelRef {
                    hotel_id: format!("HL{:03}", i),
                    name: None,
                })
                .collect())
        }

        async fn hotel_offers(
            &self,
            _hotel_ids: &[String],
            _check_in: &str,
            _check_out: &str,
            _adults: u32,
        ) -> Result<Vec<HotelOfferGroup>, UpstreamError> {
            let call = self.batch_calls.fetch_add(1, AtomicOrdering::SeqCst);
            match self.offers_per_batch.get(call) {
                Some(Ok(groups)) => Ok(groups.clone()),
                Some(Err(())) => Err(UpstreamError::api(500, "batch failed")),
                None => Ok(vec![]),
            }
        }
    }

    fn hotel_group(name: &str, base: f64, total: f64) -> HotelOfferGroup {
        serde_json::from_value(json!({
            "hotel": {"name": name, "rating": "4"},
            "offers": [{
                "price": {
                    "base": format!("{:.2}", base),
                    "total": format!("{:.2}", total),
                    "currency": "USD"
                },
                "room": {"typeEstimated": {"category": "STANDARD_ROOM", "beds": 2}}
            }]
        }))
        .unwrap()
    }

    fn base_args() -> Value {
        json!({
            "city_code": "PAR",
            "check_in_date": "12/13/25",
            "check_out_date": "12/15/25"
        })
    }

    fn tool(api: StubShoppingApi) -> HotelSearchTool {
        HotelSearchTool::new(Arc::new(api), HotelSettings::default())
    }

    #[test]
    fn test_rating_display_variants() {
        assert_eq!(rating_display(Some(&json!("4"))), "4");
        assert_eq!(rating_display(Some(&json!(3))), "3");
        assert_eq!(rating_display(None), "N/A");
    }

    #[test]
    fn test_normalize_hotel_applies_defaults() {
        let group: HotelOfferGroup = serde_json::from_value(json!({
            "hotel": {},
            "offers": [{"price": {"base": "120.00", "total": "240.00"}, "room": {}}]
        }))
        .unwrap();

        let summary = normalize_hotel(&group, 0.0, 10000.0).unwrap();
        assert_eq!(summary.name, "Unknown Hotel");
        assert_eq!(summary.rating, "N/A");
        assert_eq!(summary.currency, "USD");
        assert_eq!(summary.room_type, "Standard");
        assert_eq!(summary.beds, "N/A");
    }

    #[test]
    fn test_normalize_hotel_filters_price_range() {
        let group = hotel_group("Hotel A", 120.0, 240.0);
        assert!(normalize_hotel(&group, 150.0, 250.0).is_none());
        // Closed interval: boundary values qualify
        let boundary = hotel_group("Hotel B", 150.0, 300.0);
        assert!(normalize_hotel(&boundary, 150.0, 250.0).is_some());
    }

    #[test]
    fn test_normalize_hotel_skips_hotel_without_offers() {
        let group: HotelOfferGroup =
            serde_json::from_value(json!({"hotel": {"name": "Empty"}, "offers": []})).unwrap();
        assert!(normalize_hotel(&group, 0.0, 10000.0).is_none());
    }

    #[tokio::test]
    async fn test_execute_filters_sorts_and_caps() {
        // 14 hotels in one batch, half inside the 150-250 range
        let groups: Vec<HotelOfferGroup> = (0..14)
            .map(|i| hotel_group(&format!("Hotel {}", i), 100.0 + 15.0 * i as f64, 500.0 - 10.0 * i as f64))
            .collect();
        let tool = tool(StubShoppingApi::new(10, vec![Ok(groups)]));

        let mut args = base_args();
        args["min_price_per_night"] = json!(150);
        args["max_price_per_night"] = json!(250);

        let outcome = tool.execute(args).await;
        let value = outcome.to_value();
        assert_eq!(value["status"], "success");

        let hotels = value["hotels"].as_array().unwrap();
        assert!(hotels.len() <= 10);

        let mut previous_total = 0.0;
        for hotel in hotels {
            let nightly = parse_usd(hotel["price_per_night"].as_str().unwrap());
            assert!((150.0..=250.0).contains(&nightly));

            let total = parse_usd(hotel["total_price"].as_str().unwrap());
            assert!(total >= previous_total, "results must be sorted ascending");
            previous_total = total;
        }
    }

    #[tokio::test]
    async fn test_execute_caps_at_ten_results() {
        let groups: Vec<HotelOfferGroup> = (0..20)
            .map(|i| hotel_group(&format!("Hotel {}", i), 100.0, 200.0 + i as f64))
            .collect();
        let tool = tool(StubShoppingApi::new(10, vec![Ok(groups)]));

        let outcome = tool.execute(base_args()).await;
        let hotels = outcome.to_value()["hotels"].as_array().unwrap().len();
        assert_eq!(hotels, 10);
    }

    #[tokio::test]
    async fn test_execute_survives_failed_batch() {
        // Three batches: first fails, second and third succeed
        let tool = tool(StubShoppingApi::new(
            30,
            vec![
                Err(()),
                Ok(vec![hotel_group("Hotel B", 100.0, 210.0)]),
                Ok(vec![hotel_group("Hotel C", 100.0, 205.0)]),
            ],
        ));

        let outcome = tool.execute(base_args()).await;
        let value = outcome.to_value();
        assert_eq!(value["status"], "success");

        let hotels = value["hotels"].as_array().unwrap();
        assert_eq!(hotels.len(), 2);
        assert_eq!(hotels[0]["name"], "Hotel C");
    }

    #[tokio::test]
    async fn test_execute_stops_collecting_at_limit() {
        // Every batch returns 10 qualifying hotels; collection must stop
        // after the second batch (limit 15), leaving the rest unfetched
        let batch = || {
            Ok((0..10)
                .map(|i| hotel_group(&format!("Hotel {}", i), 100.0, 200.0))
                .collect())
        };
        let api = Arc::new(StubShoppingApi::new(
            100,
            vec![batch(), batch(), batch(), batch()],
        ));
        let tool = HotelSearchTool::new(api.clone(), HotelSettings::default());

        let outcome = tool.execute(base_args()).await;
        let value = outcome.to_value();
        assert_eq!(value["status"], "success");
        assert_eq!(value["hotels"].as_array().unwrap().len(), 10);
        assert_eq!(api.batch_calls.load(AtomicOrdering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_execute_no_hotels_in_city() {
        let tool = tool(StubShoppingApi::new(0, vec![]));

        let outcome = tool.execute(base_args()).await;
        assert_eq!(
            outcome.to_value()["error"],
            "No hotels found in this city"
        );
    }

    #[tokio::test]
    async fn test_execute_empty_with_explicit_range_names_it() {
        // One batch whose only hotel is outside the range
        let tool = tool(StubShoppingApi::new(
            10,
            vec![Ok(vec![hotel_group("Pricey", 400.0, 800.0)])],
        ));

        let mut args = base_args();
        args["min_price_per_night"] = json!(150);
        args["max_price_per_night"] = json!(250);

        let outcome = tool.execute(args).await;
        let message = outcome.to_value()["error"].as_str().unwrap().to_string();
        assert!(message.contains("$150-$250"));
        assert!(message.contains("widening"));
    }

    #[tokio::test]
    async fn test_execute_empty_without_range_generic_message() {
        let tool = tool(StubShoppingApi::new(10, vec![Ok(vec![])]));

        let outcome = tool.execute(base_args()).await;
        assert_eq!(
            outcome.to_value()["error"],
            "No available hotel offers found for the specified dates"
        );
    }

    #[tokio::test]
    async fn test_execute_rejects_bad_checkout_date() {
        let tool = tool(StubShoppingApi::new(10, vec![]));

        let args = json!({
            "city_code": "PAR",
            "check_in_date": "12/13/25",
            "check_out_date": "13/12/25"
        });

        let outcome = tool.execute(args).await;
        let value = outcome.to_value();
        assert_eq!(value["status"], "error");
        assert!(value["error"].as_str().unwrap().contains("mm/dd/yy"));
    }

    #[tokio::test]
    async fn test_hidden_offers_are_logged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tools.md");
        let logger = Arc::new(Logger::new(Some(&path)).unwrap());

        let api = StubShoppingApi::new(
            10,
            vec![Ok(vec![
                hotel_group("Cheap", 50.0, 100.0),
                hotel_group("Fine", 200.0, 400.0),
            ])],
        );
        let tool = HotelSearchTool::new(Arc::new(api), HotelSettings::default())
            .with_logger(logger);

        let mut args = base_args();
        args["min_price_per_night"] = json!(150);
        args["max_price_per_night"] = json!(250);
        tool.execute(args).await;

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("hidden by the $150-$250 nightly price filter"));
    }
}
