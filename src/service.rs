use anyhow::Result;
use reqwest::Client;
use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use std::sync::Arc;

use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::error::LookupError;
use crate::formatters::{format_conversion, format_quote, format_weather};
use crate::lookup::Resolved;
use crate::models::{ConversionResult, ConvertCurrencyRequest, GetWeatherRequest, Quote, WeatherResult};
use crate::sources::currency::{DEFAULT_FROM, DEFAULT_TO};
use crate::sources::{conversion_chain, quote_chain, validate_city, weather_chain, ConversionRequest};
use crate::widget::{Submission, Widget};

/// One widget per lookup kind; they share nothing with each other
#[derive(Clone, Default)]
struct Widgets {
    weather: Widget<Resolved<WeatherResult>>,
    conversion: Widget<ConversionResult>,
    quote: Widget<Quote>,
}

/// Lookup service shared by the HTTP proxy and the MCP tool surface
#[derive(Clone)]
pub struct InfoHub {
    client: Arc<Client>,
    config: Arc<Config>,
    widgets: Widgets,
    tool_router: ToolRouter<Self>,
}

impl InfoHub {
    /// Creates a new service instance
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client: Arc::new(client),
            config: Arc::new(config),
            widgets: Widgets::default(),
            tool_router: Self::tool_router(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current conditions for a city; never fails once the city is valid
    pub async fn weather(&self, city: Option<&str>) -> Result<Resolved<WeatherResult>, LookupError> {
        let city = validate_city(city)?;
        self.run_weather(city).await
    }

    /// Converts `amount` from one currency to another
    pub async fn convert(
        &self,
        from: Option<&str>,
        to: Option<&str>,
        amount: f64,
    ) -> Result<ConversionResult, LookupError> {
        let request = Self::conversion_input(from, to, amount)?;
        self.run_conversion(request).await
    }

    /// A quote from the provider or the fixed list; never fails
    pub async fn quote(&self) -> Result<Quote, LookupError> {
        self.run_quote().await
    }

    fn conversion_input(
        from: Option<&str>,
        to: Option<&str>,
        amount: f64,
    ) -> Result<ConversionRequest, LookupError> {
        ConversionRequest::validate(
            from.unwrap_or(DEFAULT_FROM),
            to.unwrap_or(DEFAULT_TO),
            amount,
        )
    }

    async fn run_weather(&self, city: String) -> Result<Resolved<WeatherResult>, LookupError> {
        tracing::info!("Getting weather for city: {}", city);
        weather_chain(&self.client, &self.config, &city).resolve().await
    }

    async fn run_conversion(&self, request: ConversionRequest) -> Result<ConversionResult, LookupError> {
        tracing::info!(
            "Converting {} {} to {}",
            request.amount,
            request.from,
            request.to
        );
        let resolved = conversion_chain(&self.client, &self.config, request)
            .resolve()
            .await?;
        Ok(resolved.value)
    }

    async fn run_quote(&self) -> Result<Quote, LookupError> {
        tracing::info!("Getting a quote");
        let resolved = quote_chain(&self.client, &self.config).resolve().await?;
        Ok(resolved.value)
    }
}

fn tool_error(error: LookupError) -> McpError {
    match error {
        LookupError::Validation(message) => McpError::invalid_params(message, None),
        other => McpError::internal_error(format!("{}: {}", other, other.detail()), None),
    }
}

fn submission_result<T>(
    submission: Submission<T>,
    widget: &str,
    format: impl FnOnce(&T) -> String,
) -> Result<CallToolResult, McpError> {
    match submission {
        Submission::Applied(Ok(value)) => Ok(CallToolResult::success(vec![Content::text(format(&value))])),
        Submission::Applied(Err(e)) => Err(tool_error(e)),
        Submission::Busy => Err(McpError::internal_error(
            format!("A {} lookup is already in progress", widget),
            None,
        )),
        // Only reachable once something resets the widget; the tools never do
        Submission::Discarded => Err(McpError::internal_error(
            format!("The {} lookup was superseded by a newer request", widget),
            None,
        )),
    }
}

#[tool_handler]
impl ServerHandler for InfoHub {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "infohub".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Current weather by city, currency conversion and inspirational quotes. \
                Lookups degrade to labelled fallback values when the public APIs are down."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl InfoHub {
    /// Gets current weather for a city
    #[tool(description = "Get current weather for a city by name (e.g. 'Pune', 'Berlin'). Falls back to mock data if the weather services are unreachable.")]
    async fn get_weather(
        &self,
        Parameters(request): Parameters<GetWeatherRequest>,
    ) -> Result<CallToolResult, McpError> {
        let submission = self
            .widgets
            .weather
            .submit(validate_city(request.city.as_deref()), |city| self.run_weather(city))
            .await;

        submission_result(submission, "weather", format_weather)
    }

    /// Converts an amount between two currencies
    #[tool(description = "Convert an amount between two currencies given as 3-letter codes (defaults: from INR, to USD, amount 1). Uses fixed INR rates if the exchange service is unreachable.")]
    async fn convert_currency(
        &self,
        Parameters(request): Parameters<ConvertCurrencyRequest>,
    ) -> Result<CallToolResult, McpError> {
        let input = Self::conversion_input(
            request.from.as_deref(),
            request.to.as_deref(),
            request.amount.unwrap_or(1.0),
        );

        let submission = self
            .widgets
            .conversion
            .submit(input, |request| self.run_conversion(request))
            .await;

        submission_result(submission, "conversion", format_conversion)
    }

    /// Gets an inspirational quote
    #[tool(description = "Get a random inspirational quote.")]
    async fn get_quote(&self) -> Result<CallToolResult, McpError> {
        let submission = self
            .widgets
            .quote
            .submit(Ok(()), |_| self.run_quote())
            .await;

        submission_result(submission, "quote", format_quote)
    }
}
