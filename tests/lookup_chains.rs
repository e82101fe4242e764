//! Fallback behaviour of the three lookup chains against mocked providers.

use infohub::{Config, Endpoints, InfoHub, LookupError};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn hub_for(server: &MockServer, openweather_key: Option<&str>) -> InfoHub {
    let config = Config {
        endpoints: Endpoints::all_at(&server.uri()),
        openweather_key: openweather_key.map(str::to_string),
        weather_timeout: Duration::from_secs(2),
        conversion_timeout: Duration::from_secs(2),
        quote_timeout: Duration::from_secs(2),
        ..Config::default()
    };
    InfoHub::new(config).unwrap()
}

async fn mount_geocode(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Pune"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .and(header("Accept-Language", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn pune_place() -> serde_json::Value {
    json!([{
        "lat": "18.5213738",
        "lon": "73.8545071",
        "display_name": "Pune, Pune City, Pune District, Maharashtra, India"
    }])
}

// ============================================================================
// Weather
// ============================================================================

#[tokio::test]
async fn test_weather_from_geocode_and_forecast() {
    let server = MockServer::start().await;
    mount_geocode(&server, pune_place()).await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("current_weather", "true"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_weather": {"temperature": 31.2, "windspeed": 10.0, "weathercode": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let hub = hub_for(&server, None);
    let resolved = hub.weather(Some("  Pune  ")).await.unwrap();

    assert!(!resolved.fallback);
    assert_eq!(resolved.source, "nominatim+open-meteo");
    assert_eq!(resolved.value.location_label, "Pune");
    assert_eq!(resolved.value.temperature_celsius, 31.2);
    assert_eq!(resolved.value.condition_description, "partly cloudy, wind 10.0 km/h");
}

#[tokio::test]
async fn test_weather_empty_geocode_skips_forecast_and_mocks() {
    let server = MockServer::start().await;
    mount_geocode(&server, json!([])).await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let hub = hub_for(&server, None);
    let resolved = hub.weather(Some("Pune")).await.unwrap();

    assert!(resolved.fallback);
    assert_eq!(resolved.value.location_label, "Pune");
    assert_eq!(resolved.value.temperature_celsius, 28.5);
    assert_eq!(resolved.value.condition_description, "clear sky (mock)");
}

#[tokio::test]
async fn test_weather_forecast_without_temperature_mocks() {
    let server = MockServer::start().await;
    mount_geocode(&server, pune_place()).await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"current_weather": {}})))
        .mount(&server)
        .await;

    let hub = hub_for(&server, None);
    let resolved = hub.weather(Some("Pune")).await.unwrap();
    assert!(resolved.fallback);
    assert_eq!(resolved.value.condition_description, "clear sky (mock)");
}

#[tokio::test]
async fn test_weather_never_fails_when_everything_is_down() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let hub = hub_for(&server, Some("secret"));
    for city in ["Pune", "São Paulo", "x"] {
        let resolved = hub.weather(Some(city)).await.unwrap();
        assert!(resolved.fallback);
        assert_eq!(resolved.value.temperature_celsius, 28.5);
        assert_eq!(resolved.value.condition_description, "clear sky (mock)");
    }
}

#[tokio::test]
async fn test_keyed_provider_is_tried_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Pune"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Pune",
            "main": {"temp": 29.4},
            "weather": [{"description": "haze"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let hub = hub_for(&server, Some("secret"));
    let resolved = hub.weather(Some("Pune")).await.unwrap();

    assert_eq!(resolved.source, "openweathermap");
    assert_eq!(resolved.value.temperature_celsius, 29.4);
    assert_eq!(resolved.value.condition_description, "haze");
}

#[tokio::test]
async fn test_malformed_keyed_provider_advances_to_geocode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Pune", "weather": []})))
        .mount(&server)
        .await;
    mount_geocode(&server, pune_place()).await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_weather": {"temperature": 30.0, "windspeed": 4.5}
        })))
        .mount(&server)
        .await;

    let hub = hub_for(&server, Some("secret"));
    let resolved = hub.weather(Some("Pune")).await.unwrap();

    assert_eq!(resolved.source, "nominatim+open-meteo");
    assert_eq!(resolved.value.temperature_celsius, 30.0);
    assert_eq!(resolved.value.condition_description, "wind 4.5 km/h");
}

// ============================================================================
// Conversion
// ============================================================================

#[tokio::test]
async fn test_live_conversion_is_rounded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/convert"))
        .and(query_param("from", "INR"))
        .and(query_param("to", "EUR"))
        .and(query_param("amount", "250"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": 2.78456})))
        .mount(&server)
        .await;

    let hub = hub_for(&server, None);
    let result = hub.convert(Some("inr"), Some("eur"), 250.0).await.unwrap();

    assert_eq!(result.source_currency, "INR");
    assert_eq!(result.target_currency, "EUR");
    assert_eq!(result.converted_amount, 2.78);
    assert!(!result.is_fallback_rate);
}

#[tokio::test]
async fn test_conversion_unreachable_uses_table() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/convert"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let hub = hub_for(&server, None);
    let result = hub.convert(Some("INR"), Some("USD"), 100.0).await.unwrap();
    assert_eq!(result.converted_amount, 1.2);
    assert!(result.is_fallback_rate);

    let result = hub.convert(Some("INR"), Some("JPY"), 3.0).await.unwrap();
    assert_eq!(result.converted_amount, 5.4);
}

#[tokio::test]
async fn test_conversion_unknown_pair_is_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/convert"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let hub = hub_for(&server, None);
    let err = hub.convert(Some("EUR"), Some("GBP"), 10.0).await.unwrap_err();

    match err {
        LookupError::AllSourcesExhausted { message, last } => {
            assert_eq!(message, "conversion failed (no rate available)");
            assert!(matches!(*last, LookupError::InvalidResponseShape(_)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_conversion_validation_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": 1.0})))
        .expect(0)
        .mount(&server)
        .await;

    let hub = hub_for(&server, None);
    for amount in [0.0, -1.0, f64::NAN] {
        let err = hub.convert(Some("INR"), Some("USD"), amount).await.unwrap_err();
        assert_eq!(err, LookupError::validation("Enter an amount greater than 0"));
    }
}

// ============================================================================
// Quote
// ============================================================================

#[tokio::test]
async fn test_quote_without_author_defaults_to_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/random"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": "Stay curious."})))
        .mount(&server)
        .await;

    let hub = hub_for(&server, None);
    let quote = hub.quote().await.unwrap();
    assert_eq!(quote.text, "Stay curious.");
    assert_eq!(quote.author, "Unknown");
}

#[tokio::test]
async fn test_quote_empty_content_uses_fallback_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/random"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": "", "author": "Nobody"})))
        .mount(&server)
        .await;

    let hub = hub_for(&server, None);
    let quote = hub.quote().await.unwrap();
    assert!(["Steve Jobs", "Sam Levenson"].contains(&quote.author.as_str()));
}

#[tokio::test]
async fn test_quote_times_out_to_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/random"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"content": "Too late.", "author": "Slow"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let mut config = Config {
        endpoints: Endpoints::all_at(&server.uri()),
        ..Config::default()
    };
    config.quote_timeout = Duration::from_millis(50);
    let hub = InfoHub::new(config).unwrap();

    let quote = hub.quote().await.unwrap();
    assert_ne!(quote.author, "Slow");
}
