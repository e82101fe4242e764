//! Conversion chain: live exchange API, then the fixed rate table.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::constants::FALLBACK_RATES;
use crate::error::LookupError;
use crate::lookup::{fetch_json, Attempt, FallbackChain};
use crate::models::{ConversionResult, ExchangeConvertResponse};

pub const DEFAULT_FROM: &str = "INR";
pub const DEFAULT_TO: &str = "USD";

/// Validated conversion input
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

impl ConversionRequest {
    /// Upper-cases the codes and checks the amount is finite and positive
    pub fn validate(from: &str, to: &str, amount: f64) -> Result<Self, LookupError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LookupError::validation("Enter an amount greater than 0"));
        }
        Ok(Self {
            from: currency_code(from)?,
            to: currency_code(to)?,
            amount,
        })
    }
}

/// Parses a textual amount; absent or blank means 1
pub fn parse_amount(raw: Option<&str>) -> Result<f64, LookupError> {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        None => Ok(1.0),
        Some(text) => text
            .parse::<f64>()
            .map_err(|_| LookupError::validation("Enter an amount greater than 0")),
    }
}

fn currency_code(raw: &str) -> Result<String, LookupError> {
    let code = raw.trim().to_ascii_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(LookupError::validation("currency codes must be 3 letters"));
    }
    Ok(code)
}

/// Rounds to 2 decimals on the exact binary value, halves away from zero.
///
/// `1.25 * 0.012` is stored just below `0.015`, so it rounds to `0.01`, the
/// same figure a browser shows for `toFixed(2)`.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() || value.abs() >= 1e15 {
        return value;
    }

    // Fixed-point formatting prints the exact binary expansion at this width
    let exact = format!("{:.80}", value.abs());
    let Some((whole, fraction)) = exact.split_once('.') else {
        return value;
    };
    let mut digits = fraction.bytes();
    let tenths = digits.next().unwrap_or(b'0');
    let hundredths = digits.next().unwrap_or(b'0');
    let round_up = digits.next().is_some_and(|d| d >= b'5');

    let cents = format!("{}{}{}", whole, tenths as char, hundredths as char)
        .parse::<u64>()
        .map(|c| c + u64::from(round_up));
    match cents {
        Ok(cents) => (cents as f64 / 100.0).copysign(value),
        Err(_) => (value * 100.0).round() / 100.0,
    }
}

pub fn fallback_rate(from: &str, to: &str) -> Option<f64> {
    FALLBACK_RATES
        .iter()
        .find(|(f, t, _)| *f == from && *t == to)
        .map(|(_, _, rate)| *rate)
}

/// Converts with the fixed table; `None` when the pair is not listed
pub fn convert_with_table(request: &ConversionRequest) -> Option<ConversionResult> {
    let rate = fallback_rate(&request.from, &request.to)?;
    Some(ConversionResult {
        source_currency: request.from.clone(),
        target_currency: request.to.clone(),
        input_amount: request.amount,
        converted_amount: round2(request.amount * rate),
        is_fallback_rate: true,
    })
}

pub fn conversion_chain(
    client: &Arc<Client>,
    config: &Config,
    request: ConversionRequest,
) -> FallbackChain<ConversionResult> {
    let table_request = request.clone();
    FallbackChain::new("conversion")
        .attempt(ExchangeRateAttempt {
            client: client.clone(),
            base: config.endpoints.exchange_rate.clone(),
            request,
            timeout: config.conversion_timeout,
        })
        .fallback(move || convert_with_table(&table_request))
        .exhausted_message("conversion failed (no rate available)")
}

/// exchangerate.host `/convert`
pub struct ExchangeRateAttempt {
    client: Arc<Client>,
    base: String,
    request: ConversionRequest,
    timeout: Duration,
}

#[async_trait]
impl Attempt<ConversionResult> for ExchangeRateAttempt {
    fn name(&self) -> &str {
        "exchangerate.host"
    }

    async fn run(&self) -> Result<ConversionResult, LookupError> {
        let url = format!("{}/convert", self.base);
        let amount = self.request.amount.to_string();
        let request = self.client.get(&url).query(&[
            ("from", self.request.from.as_str()),
            ("to", self.request.to.as_str()),
            ("amount", amount.as_str()),
        ]);

        let data = fetch_json::<ExchangeConvertResponse>(request, self.timeout).await?;
        let result = data
            .result
            .filter(|r| r.is_finite())
            .ok_or_else(|| LookupError::shape("bad response from exchange API"))?;

        Ok(ConversionResult {
            source_currency: self.request.from.clone(),
            target_currency: self.request.to.clone(),
            input_amount: self.request.amount,
            converted_amount: round2(result),
            is_fallback_rate: false,
        })
    }
}
