//! Weather forecast adapter.

use crate::client::meteo::{ForecastApi, GeoPlace};
use crate::client::UpstreamError;
use crate::tools::dates::{parse_travel_date, to_iso};
use crate::tools::{required_str, ToolAdapter, ToolError, ToolOutcome};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Human-readable conditions for a WMO weather interpretation code.
pub fn weather_description(code: u32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

/// One day's forecast for a resolved location, ready for LLM display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSummary {
    /// Resolved place, `Name, Country`.
    pub location: String,
    /// Forecast date, ISO `YYYY-MM-DD`.
    pub date: String,
    /// Daily high, `{:.1}°F`.
    pub high: String,
    /// Daily low, `{:.1}°F`.
    pub low: String,
    /// Conditions text decoded from the WMO code.
    pub conditions: String,
    /// Precipitation sum, `{:.2} in`.
    pub precipitation: String,
    /// Max precipitation probability, `{n}%`.
    pub precipitation_chance: String,
    /// Max wind speed, `{:.1} mph`.
    pub max_wind: String,
}

fn place_display(place: &GeoPlace) -> String {
    match &place.country {
        Some(country) => format!("{}, {}", place.name, country),
        None => place.name.clone(),
    }
}

/// Tool that looks up the daily forecast for a location and date.
pub struct WeatherTool {
    api: Arc<dyn ForecastApi>,
}

impl WeatherTool {
    /// Create the tool with the given forecast API.
    pub fn new(api: Arc<dyn ForecastApi>) -> Self {
        Self { api }
    }

    async fn run(&self, args: &Value) -> Result<WeatherSummary, ToolError> {
        let location = required_str(args, "location")?;
        let date = to_iso(parse_travel_date(required_str(args, "date")?)?);

        let places = self.api.geocode(location).await?;
        let place = places
            .first()
            .ok_or_else(|| ToolError::empty(format!("Could not find location: {}", location)))?;

        let response = self
            .api
            .daily_forecast(place.latitude, place.longitude, &date)
            .await?;

        let daily = response
            .daily
            .ok_or_else(|| ToolError::empty("Could not retrieve weather data"))?;

        // Open-Meteo returns parallel arrays; the single-day query yields
        // index 0 in each, any of which may be null
        if daily.time.is_empty() {
            return Err(ToolError::empty("Could not retrieve weather data"));
        }

        let first_f64 = |field: &[Option<f64>]| field.first().copied().flatten();
        let first_u32 = |field: &[Option<u32>]| field.first().copied().flatten();

        let high = first_f64(&daily.temperature_2m_max).unwrap_or(0.0);
        let low = first_f64(&daily.temperature_2m_min).unwrap_or(0.0);
        let code = first_u32(&daily.weathercode);
        let precipitation = first_f64(&daily.precipitation_sum).unwrap_or(0.0);
        let chance = first_u32(&daily.precipitation_probability_max).unwrap_or(0);
        let wind = first_f64(&daily.windspeed_10m_max).unwrap_or(0.0);

        Ok(WeatherSummary {
            location: place_display(place),
            date,
            high: format!("{:.1}°F", high),
            low: format!("{:.1}°F", low),
            conditions: code.map(weather_description).unwrap_or("Unknown").to_string(),
            precipitation: format!("{:.2} in", precipitation),
            precipitation_chance: format!("{}%", chance),
            max_wind: format!("{:.1} mph", wind),
        })
    }

    fn describe_error(&self, err: ToolError) -> String {
        match err {
            ToolError::DateFormat { .. } | ToolError::MissingArgument { .. } => err.to_string(),
            ToolError::Empty(message) => message,
            ToolError::Upstream(UpstreamError::Transport(e)) => {
                format!("Error contacting weather service: {}", e)
            }
            ToolError::Upstream(_) => "Could not retrieve weather data".to_string(),
            other => format!("Unexpected error: {}", other),
        }
    }
}

#[async_trait]
impl ToolAdapter for WeatherTool {
    fn name(&self) -> &str {
        "check_weather"
    }

    fn description(&self) -> &str {
        "Get the weather forecast for a location on a specific date"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "City or place name (e.g. 'Paris' or 'New York')"
                },
                "date": {
                    "type": "string",
                    "description": "Date in format mm/dd/yy (e.g. '12/13/25')"
                }
            },
            "required": ["location", "date"]
        })
    }

    async fn execute(&self, arguments: Value) -> ToolOutcome {
        match self.run(&arguments).await {
            Ok(summary) => ToolOutcome::success("forecast", json!(summary)),
            Err(e) => ToolOutcome::error(self.describe_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::meteo::ForecastResponse;

    struct StubForecastApi {
        places: Vec<GeoPlace>,
        forecast: Result<ForecastResponse, fn() -> UpstreamError>,
    }

    #[async_trait]
    impl ForecastApi for StubForecastApi {
        async fn geocode(&self, _name: &str) -> Result<Vec<GeoPlace>, UpstreamError> {
            Ok(self.places.clone())
        }

        async fn daily_forecast(
            &self,
            _latitude: f64,
            _longitude: f64,
            _date: &str,
        ) -> Result<ForecastResponse, UpstreamError> {
            match &self.forecast {
                Ok(response) => Ok(response.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn paris() -> GeoPlace {
        GeoPlace {
            name: "Paris".to_string(),
            country: Some("France".to_string()),
            latitude: 48.85,
            longitude: 2.35,
        }
    }

    fn sample_forecast() -> ForecastResponse {
        serde_json::from_value(json!({
            "daily": {
                "time": ["2025-12-13"],
                "temperature_2m_max": [47.3],
                "temperature_2m_min": [38.1],
                "weathercode": [61],
                "precipitation_sum": [0.12],
                "precipitation_probability_max": [70],
                "windspeed_10m_max": [14.6]
            }
        }))
        .unwrap()
    }

    fn args() -> Value {
        json!({"location": "Paris", "date": "12/13/25"})
    }

    #[test]
    fn test_weather_description() {
        assert_eq!(weather_description(0), "Clear sky");
        assert_eq!(weather_description(61), "Slight rain");
        assert_eq!(weather_description(99), "Thunderstorm with heavy hail");
        assert_eq!(weather_description(42), "Unknown");
    }

    #[tokio::test]
    async fn test_execute_success_envelope() {
        let tool = WeatherTool::new(Arc::new(StubForecastApi {
            places: vec![paris()],
            forecast: Ok(sample_forecast()),
        }));

        let value = tool.execute(args()).await.to_value();
        assert_eq!(value["status"], "success");

        let forecast = &value["forecast"];
        assert_eq!(forecast["location"], "Paris, France");
        assert_eq!(forecast["date"], "2025-12-13");
        assert_eq!(forecast["high"], "47.3°F");
        assert_eq!(forecast["low"], "38.1°F");
        assert_eq!(forecast["conditions"], "Slight rain");
        assert_eq!(forecast["precipitation"], "0.12 in");
        assert_eq!(forecast["precipitation_chance"], "70%");
        assert_eq!(forecast["max_wind"], "14.6 mph");
    }

    #[tokio::test]
    async fn test_execute_unknown_location() {
        let tool = WeatherTool::new(Arc::new(StubForecastApi {
            places: vec![],
            forecast: Ok(sample_forecast()),
        }));

        let value = tool
            .execute(json!({"location": "Xyzzyville", "date": "12/13/25"}))
            .await
            .to_value();
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "Could not find location: Xyzzyville");
    }

    #[tokio::test]
    async fn test_execute_missing_daily_block() {
        let tool = WeatherTool::new(Arc::new(StubForecastApi {
            places: vec![paris()],
            forecast: Ok(ForecastResponse { daily: None }),
        }));

        let value = tool.execute(args()).await.to_value();
        assert_eq!(value["error"], "Could not retrieve weather data");
    }

    #[tokio::test]
    async fn test_execute_empty_time_series() {
        let empty: ForecastResponse = serde_json::from_value(json!({
            "daily": {"time": []}
        }))
        .unwrap();
        let tool = WeatherTool::new(Arc::new(StubForecastApi {
            places: vec![paris()],
            forecast: Ok(empty),
        }));

        let value = tool.execute(args()).await.to_value();
        assert_eq!(value["error"], "Could not retrieve weather data");
    }

    #[tokio::test]
    async fn test_execute_upstream_api_error_masked() {
        let tool = WeatherTool::new(Arc::new(StubForecastApi {
            places: vec![paris()],
            forecast: Err(|| UpstreamError::api(500, "internal")),
        }));

        let value = tool.execute(args()).await.to_value();
        assert_eq!(value["error"], "Could not retrieve weather data");
    }

    #[tokio::test]
    async fn test_execute_rejects_iso_date() {
        let tool = WeatherTool::new(Arc::new(StubForecastApi {
            places: vec![paris()],
            forecast: Ok(sample_forecast()),
        }));

        let value = tool
            .execute(json!({"location": "Paris", "date": "2025-12-13"}))
            .await
            .to_value();
        assert_eq!(value["status"], "error");
        assert!(value["error"].as_str().unwrap().contains("mm/dd/yy"));
    }

    #[tokio::test]
    async fn test_execute_null_fields_fall_back() {
        let sparse: ForecastResponse = serde_json::from_value(json!({
            "daily": {
                "time": ["2025-12-13"],
                "temperature_2m_max": [null],
                "temperature_2m_min": [38.1],
                "weathercode": [null],
                "precipitation_sum": [null],
                "precipitation_probability_max": [null],
                "windspeed_10m_max": [null]
            }
        }))
        .unwrap();
        let tool = WeatherTool::new(Arc::new(StubForecastApi {
            places: vec![paris()],
            forecast: Ok(sparse),
        }));

        let value = tool.execute(args()).await.to_value();
        let forecast = &value["forecast"];
        assert_eq!(forecast["high"], "0.0°F");
        assert_eq!(forecast["conditions"], "Unknown");
        assert_eq!(forecast["precipitation_chance"], "0%");
    }
}
