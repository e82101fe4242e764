//! Quote chain: Quotable, then a uniform pick from the fixed list.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::constants::{FALLBACK_QUOTES, UNKNOWN_AUTHOR};
use crate::error::LookupError;
use crate::lookup::{fetch_json, Attempt, FallbackChain};
use crate::models::{Quote, QuotableResponse};

/// Uniform pick over the fixed fallback list
pub fn random_fallback_quote() -> Option<Quote> {
    FALLBACK_QUOTES
        .choose(&mut rand::thread_rng())
        .map(|(text, author)| Quote {
            text: text.to_string(),
            author: author.to_string(),
        })
}

pub fn quote_chain(client: &Arc<Client>, config: &Config) -> FallbackChain<Quote> {
    FallbackChain::new("quote")
        .attempt(QuotableAttempt {
            client: client.clone(),
            base: config.endpoints.quotable.clone(),
            timeout: config.quote_timeout,
        })
        .fallback(random_fallback_quote)
}

pub struct QuotableAttempt {
    client: Arc<Client>,
    base: String,
    timeout: Duration,
}

#[async_trait]
impl Attempt<Quote> for QuotableAttempt {
    fn name(&self) -> &str {
        "quotable"
    }

    async fn run(&self) -> Result<Quote, LookupError> {
        let url = format!("{}/random", self.base);
        let data = fetch_json::<QuotableResponse>(self.client.get(&url), self.timeout).await?;

        let text = data
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| LookupError::shape("no quote returned"))?;
        let author = data
            .author
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

        Ok(Quote { text, author })
    }
}
