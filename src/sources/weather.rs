//! Weather chain: optional keyed provider, then geocode + forecast, then a mock value.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::constants::{MOCK_CONDITION, MOCK_TEMPERATURE_CELSIUS};
use crate::error::LookupError;
use crate::formatters::weather_code_to_description;
use crate::lookup::{fetch_json, parse_coordinate, Attempt, FallbackChain};
use crate::models::{NominatimPlace, OpenMeteoCurrentResponse, OpenWeatherResponse, WeatherResult};

/// Trims the city and rejects blank input
pub fn validate_city(raw: Option<&str>) -> Result<String, LookupError> {
    let city = raw.unwrap_or_default().trim();
    if city.is_empty() {
        return Err(LookupError::validation("Please enter a city"));
    }
    Ok(city.to_string())
}

/// Static value served when every weather source fails
pub fn mock_weather(city: &str) -> WeatherResult {
    WeatherResult {
        location_label: city.to_string(),
        temperature_celsius: MOCK_TEMPERATURE_CELSIUS,
        condition_description: MOCK_CONDITION.to_string(),
    }
}

/// Builds the chain for an already validated city
pub fn weather_chain(
    client: &Arc<Client>,
    config: &Config,
    city: &str,
) -> FallbackChain<WeatherResult> {
    let keyed = config.openweather_key.as_ref().map(|key| OpenWeatherAttempt {
        client: client.clone(),
        base: config.endpoints.openweather.clone(),
        key: key.clone(),
        city: city.to_string(),
        timeout: config.weather_timeout,
    });

    let mock_city = city.to_string();
    FallbackChain::new("weather")
        .attempt_if(keyed)
        .attempt(GeocodeForecastAttempt {
            client: client.clone(),
            nominatim: config.endpoints.nominatim.clone(),
            open_meteo: config.endpoints.open_meteo.clone(),
            city: city.to_string(),
            timeout: config.weather_timeout,
        })
        .fallback(move || Some(mock_weather(&mock_city)))
}

/// OpenWeatherMap current conditions, only used when a key is configured
pub struct OpenWeatherAttempt {
    client: Arc<Client>,
    base: String,
    key: String,
    city: String,
    timeout: Duration,
}

#[async_trait]
impl Attempt<WeatherResult> for OpenWeatherAttempt {
    fn name(&self) -> &str {
        "openweathermap"
    }

    async fn run(&self) -> Result<WeatherResult, LookupError> {
        let url = format!("{}/weather", self.base);
        tracing::debug!("OpenWeatherMap request for {}", self.city);

        let request = self.client.get(&url).query(&[
            ("q", self.city.as_str()),
            ("units", "metric"),
            ("appid", self.key.as_str()),
        ]);
        let data = fetch_json::<OpenWeatherResponse>(request, self.timeout).await?;

        let temperature = data
            .main
            .and_then(|m| m.temp)
            .filter(|t| t.is_finite())
            .ok_or_else(|| LookupError::shape("unexpected response from weather provider: no temperature"))?;
        let description = data
            .weather
            .into_iter()
            .next()
            .and_then(|w| w.description)
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| LookupError::shape("unexpected response from weather provider: no description"))?;

        let label = data
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| self.city.clone());

        Ok(WeatherResult {
            location_label: label,
            temperature_celsius: temperature,
            condition_description: description,
        })
    }
}

/// Resolves the city with Nominatim, then reads Open-Meteo current conditions
pub struct GeocodeForecastAttempt {
    client: Arc<Client>,
    nominatim: String,
    open_meteo: String,
    city: String,
    timeout: Duration,
}

impl GeocodeForecastAttempt {
    async fn geocode(&self) -> Result<NominatimPlace, LookupError> {
        let url = format!("{}/search", self.nominatim);
        let request = self
            .client
            .get(&url)
            .header("Accept-Language", "en")
            .query(&[("q", self.city.as_str()), ("format", "json"), ("limit", "1")]);

        let places = fetch_json::<Vec<NominatimPlace>>(request, self.timeout).await?;
        places
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::shape(format!("no geocoding match for '{}'", self.city)))
    }
}

#[async_trait]
impl Attempt<WeatherResult> for GeocodeForecastAttempt {
    fn name(&self) -> &str {
        "nominatim+open-meteo"
    }

    async fn run(&self) -> Result<WeatherResult, LookupError> {
        let place = self.geocode().await?;
        let latitude = parse_coordinate(place.lat.as_deref(), "lat")?;
        let longitude = parse_coordinate(place.lon.as_deref(), "lon")?;

        tracing::debug!("Geocoded {} to {:.4}, {:.4}", self.city, latitude, longitude);

        let url = format!("{}/forecast", self.open_meteo);
        let request = self.client.get(&url).query(&[
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current_weather", "true".to_string()),
            ("timezone", "auto".to_string()),
        ]);
        let forecast = fetch_json::<OpenMeteoCurrentResponse>(request, self.timeout).await?;

        let current = forecast
            .current_weather
            .ok_or_else(|| LookupError::shape("no current_weather in forecast"))?;
        let temperature = current
            .temperature
            .filter(|t| t.is_finite())
            .ok_or_else(|| LookupError::shape("no temperature in current_weather"))?;

        Ok(WeatherResult {
            location_label: location_label(place.display_name.as_deref(), &self.city),
            temperature_celsius: temperature,
            condition_description: describe_conditions(current.weathercode, current.windspeed),
        })
    }
}

/// First comma-separated part of the geocoder's display name
fn location_label(display_name: Option<&str>, city: &str) -> String {
    display_name
        .and_then(|name| name.split(',').next())
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .unwrap_or(city)
        .to_string()
}

fn describe_conditions(weather_code: Option<i32>, wind_speed: Option<f64>) -> String {
    let sky = weather_code.map(|code| weather_code_to_description(code).to_lowercase());
    match (sky, wind_speed) {
        (Some(sky), Some(wind)) => format!("{}, wind {:.1} km/h", sky, wind),
        (Some(sky), None) => sky,
        (None, Some(wind)) => format!("wind {:.1} km/h", wind),
        (None, None) => "conditions unavailable".to_string(),
    }
}
