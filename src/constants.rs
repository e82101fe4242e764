use std::time::Duration;

/// User agent string for HTTP requests
pub const USER_AGENT: &str = "infohub/0.1.0";

/// Nominatim (OpenStreetMap) geocoding API base URL
pub const NOMINATIM_API_BASE: &str = "https://nominatim.openstreetmap.org";

/// Open-Meteo API base URL
pub const OPEN_METEO_API_BASE: &str = "https://api.open-meteo.com/v1";

/// OpenWeatherMap API base URL, only consulted when a key is configured
pub const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org/data/2.5";

/// exchangerate.host API base URL
pub const EXCHANGE_RATE_API_BASE: &str = "https://api.exchangerate.host";

/// Quotable API base URL
pub const QUOTABLE_API_BASE: &str = "https://api.quotable.io";

pub const WEATHER_TIMEOUT: Duration = Duration::from_secs(8);
pub const CONVERSION_TIMEOUT: Duration = Duration::from_secs(8);
pub const QUOTE_TIMEOUT: Duration = Duration::from_secs(6);

/// Default HTTP bind address for the proxy backend
pub const DEFAULT_ADDR: &str = "0.0.0.0:5000";

pub const MOCK_TEMPERATURE_CELSIUS: f64 = 28.5;
pub const MOCK_CONDITION: &str = "clear sky (mock)";

/// Fixed INR rates used when the exchange API cannot be reached
pub const FALLBACK_RATES: &[(&str, &str, f64)] = &[
    ("INR", "USD", 0.012),
    ("INR", "EUR", 0.011),
    ("INR", "GBP", 0.0096),
    ("INR", "AUD", 0.018),
    ("INR", "CAD", 0.016),
    ("INR", "JPY", 1.8),
    ("INR", "AED", 0.044),
    ("INR", "SGD", 0.016),
];

/// (text, author) pairs served when the quote API cannot be reached
pub const FALLBACK_QUOTES: &[(&str, &str)] = &[
    (
        "The only way to do great work is to love what you do.",
        "Steve Jobs",
    ),
    (
        "Don't watch the clock; do what it does. Keep going.",
        "Sam Levenson",
    ),
];

pub const UNKNOWN_AUTHOR: &str = "Unknown";
