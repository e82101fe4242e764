//! Lookup attempts and the fallback chain that evaluates them in order.

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::LookupError;

/// One outbound call against one source
#[async_trait]
pub trait Attempt<T: Send>: Send + Sync {
    /// Source name used in logs
    fn name(&self) -> &str;

    async fn run(&self) -> Result<T, LookupError>;
}

/// Sends a prepared request bounded by `timeout` and deserializes the JSON body.
///
/// Transport errors, timeouts and non-2xx statuses map to `SourceUnavailable`;
/// a body that is not the expected JSON maps to `InvalidResponseShape`.
pub async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
    timeout: Duration,
) -> Result<T, LookupError> {
    let response = request
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| LookupError::unavailable(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(LookupError::unavailable(format!(
            "Request failed with status: {}",
            status
        )));
    }

    let data = response.json::<T>().await?;
    Ok(data)
}

/// Parses a numeric field that some providers send as a string
pub fn parse_coordinate(value: Option<&str>, field: &str) -> Result<f64, LookupError> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .ok_or_else(|| LookupError::shape(format!("missing or invalid {}", field)))
}

/// Value produced by a chain, tagged with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: String,
    pub fallback: bool,
}

type StaticFallback<T> = Box<dyn FnOnce() -> Option<T> + Send>;

/// Ordered attempts plus an optional terminal static value
pub struct FallbackChain<T: Send> {
    name: &'static str,
    attempts: Vec<Box<dyn Attempt<T>>>,
    fallback: Option<StaticFallback<T>>,
    exhausted_message: String,
}

impl<T: Send + 'static> FallbackChain<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attempts: Vec::new(),
            fallback: None,
            exhausted_message: format!("{} failed: all sources exhausted", name),
        }
    }

    /// Appends an attempt to the end of the chain
    pub fn attempt<A: Attempt<T> + 'static>(mut self, attempt: A) -> Self {
        self.attempts.push(Box::new(attempt));
        self
    }

    /// Appends an attempt only when it is configured
    pub fn attempt_if<A: Attempt<T> + 'static>(self, attempt: Option<A>) -> Self {
        match attempt {
            Some(attempt) => self.attempt(attempt),
            None => self,
        }
    }

    /// Terminal static value. Returning `None` means no value applies.
    pub fn fallback<F>(mut self, fallback: F) -> Self
    where
        F: FnOnce() -> Option<T> + Send + 'static,
    {
        self.fallback = Some(Box::new(fallback));
        self
    }

    pub fn exhausted_message<S: Into<String>>(mut self, message: S) -> Self {
        self.exhausted_message = message.into();
        self
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.attempts.iter().map(|a| a.name()).collect()
    }

    /// Runs attempts strictly in order; the first success wins.
    pub async fn resolve(self) -> Result<Resolved<T>, LookupError> {
        let mut last_error = LookupError::unavailable("no sources configured");

        for attempt in &self.attempts {
            match attempt.run().await {
                Ok(value) => {
                    tracing::info!(chain = self.name, source = attempt.name(), "lookup succeeded");
                    return Ok(Resolved {
                        value,
                        source: attempt.name().to_string(),
                        fallback: false,
                    });
                }
                Err(e) if e.is_recoverable() => {
                    tracing::warn!(
                        chain = self.name,
                        source = attempt.name(),
                        error = %e,
                        "lookup attempt failed, advancing"
                    );
                    last_error = e;
                }
                Err(e) => return Err(e),
            }
        }

        if let Some(value) = self.fallback.and_then(|fallback| fallback()) {
            tracing::warn!(chain = self.name, "all sources failed, using static fallback");
            return Ok(Resolved {
                value,
                source: "static".to_string(),
                fallback: true,
            });
        }

        tracing::error!(chain = self.name, error = %last_error, "all sources exhausted");
        Err(LookupError::exhausted(self.exhausted_message, last_error))
    }
}
