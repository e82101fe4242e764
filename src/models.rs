use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Lookup Results
// ============================================================================

/// Current conditions for a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    #[serde(rename = "city")]
    pub location_label: String,
    #[serde(rename = "temp")]
    pub temperature_celsius: f64,
    #[serde(rename = "desc")]
    pub condition_description: String,
}

/// Amount converted between two currencies, rounded to 2 decimals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    #[serde(rename = "from")]
    pub source_currency: String,
    #[serde(rename = "to")]
    pub target_currency: String,
    #[serde(rename = "amount")]
    pub input_amount: f64,
    #[serde(rename = "result")]
    pub converted_amount: f64,
    #[serde(
        rename = "fallback",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub is_fallback_rate: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "content")]
    pub text: String,
    pub author: String,
}

// ============================================================================
// Nominatim API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct NominatimPlace {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub display_name: Option<String>,
}

// ============================================================================
// Open-Meteo API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OpenMeteoCurrentResponse {
    pub current_weather: Option<CurrentWeather>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentWeather {
    pub temperature: Option<f64>,
    pub windspeed: Option<f64>,
    pub weathercode: Option<i32>,
}

// ============================================================================
// OpenWeatherMap API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OpenWeatherResponse {
    pub name: Option<String>,
    pub main: Option<OpenWeatherMain>,
    #[serde(default)]
    pub weather: Vec<OpenWeatherCondition>,
}

#[derive(Debug, Deserialize)]
pub struct OpenWeatherMain {
    pub temp: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct OpenWeatherCondition {
    pub description: Option<String>,
}

// ============================================================================
// exchangerate.host API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ExchangeConvertResponse {
    pub result: Option<f64>,
}

// ============================================================================
// Quotable API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct QuotableResponse {
    pub content: Option<String>,
    pub author: Option<String>,
}

// ============================================================================
// Request Models (HTTP query strings and MCP tool parameters)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct GetWeatherRequest {
    /// City name, e.g. "Pune" or "Berlin"
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct ConvertCurrencyRequest {
    /// Three-letter source currency code, defaults to INR
    #[serde(default)]
    pub from: Option<String>,
    /// Three-letter target currency code, defaults to USD
    #[serde(default)]
    pub to: Option<String>,
    /// Amount to convert, defaults to 1
    #[serde(default)]
    pub amount: Option<f64>,
}

/// `/convert` query string; the amount is parsed by hand so a non-numeric
/// value is reported like any other invalid amount
#[derive(Debug, Default, Deserialize)]
pub struct ConvertQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub amount: Option<String>,
}
