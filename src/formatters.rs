use crate::lookup::Resolved;
use crate::models::{ConversionResult, Quote, WeatherResult};

/// Formats current weather into a human-readable string
pub fn format_weather(weather: &Resolved<WeatherResult>) -> String {
    let mut output = format!(
        "Weather for {}:\n  Temperature: {:.2}\u{00b0}C\n  Conditions: {}\n",
        weather.value.location_label,
        weather.value.temperature_celsius,
        weather.value.condition_description
    );
    if weather.fallback {
        output.push_str("  (Weather provider unavailable, showing mock data)\n");
    }
    output
}

/// Formats a currency conversion into a human-readable string
pub fn format_conversion(conversion: &ConversionResult) -> String {
    let mut output = format!(
        "{} {} = {:.2} {}\n",
        conversion.input_amount,
        conversion.source_currency,
        conversion.converted_amount,
        conversion.target_currency
    );
    if conversion.is_fallback_rate {
        output.push_str("(Displayed using fallback rate)\n");
    }
    output
}

pub fn format_quote(quote: &Quote) -> String {
    format!("\"{}\"\n  - {}\n", quote.text, quote.author)
}

/// Converts WMO weather code to human-readable description
pub fn weather_code_to_description(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Foggy",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing drizzle",
        61 | 63 | 65 => "Rain",
        66 | 67 => "Freezing rain",
        71 | 73 | 75 => "Snow",
        77 => "Snow grains",
        80 | 81 | 82 => "Rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown",
    }
}
