//! Runtime configuration read from the process environment.

use std::time::Duration;

use crate::constants::{
    CONVERSION_TIMEOUT, DEFAULT_ADDR, EXCHANGE_RATE_API_BASE, NOMINATIM_API_BASE,
    OPENWEATHER_API_BASE, OPEN_METEO_API_BASE, QUOTABLE_API_BASE, QUOTE_TIMEOUT,
    WEATHER_TIMEOUT,
};

/// Which surface the binary exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Http,
    Mcp,
}

impl Transport {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "http" | "serve" => Some(Self::Http),
            "mcp" | "stdio" => Some(Self::Mcp),
            _ => None,
        }
    }
}

/// Base URLs of every external source
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub nominatim: String,
    pub open_meteo: String,
    pub openweather: String,
    pub exchange_rate: String,
    pub quotable: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            nominatim: NOMINATIM_API_BASE.to_string(),
            open_meteo: OPEN_METEO_API_BASE.to_string(),
            openweather: OPENWEATHER_API_BASE.to_string(),
            exchange_rate: EXCHANGE_RATE_API_BASE.to_string(),
            quotable: QUOTABLE_API_BASE.to_string(),
        }
    }
}

impl Endpoints {
    /// Points every source at one base URL; used with a mock server
    pub fn all_at(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            nominatim: base.clone(),
            open_meteo: base.clone(),
            openweather: base.clone(),
            exchange_rate: base.clone(),
            quotable: base,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: String,
    pub transport: Transport,
    /// Enables the keyed weather provider ahead of the geocode pair
    pub openweather_key: Option<String>,
    pub endpoints: Endpoints,
    pub weather_timeout: Duration,
    pub conversion_timeout: Duration,
    pub quote_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            transport: Transport::Http,
            openweather_key: None,
            endpoints: Endpoints::default(),
            weather_timeout: WEATHER_TIMEOUT,
            conversion_timeout: CONVERSION_TIMEOUT,
            quote_timeout: QUOTE_TIMEOUT,
        }
    }
}

impl Config {
    /// Reads `OPENWEATHER_KEY`, `INFOHUB_ADDR` and `INFOHUB_TRANSPORT`.
    /// A transport given on the command line wins over the environment.
    pub fn from_env(cli_transport: Option<&str>) -> anyhow::Result<Self> {
        Self::from_lookup(cli_transport, |name| std::env::var(name).ok())
    }

    fn from_lookup<F>(cli_transport: Option<&str>, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.openweather_key = lookup("OPENWEATHER_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        if let Some(addr) = lookup("INFOHUB_ADDR").filter(|a| !a.trim().is_empty()) {
            config.addr = addr.trim().to_string();
        }

        let transport = cli_transport
            .map(str::to_string)
            .or_else(|| lookup("INFOHUB_TRANSPORT"));
        if let Some(value) = transport {
            config.transport = Transport::parse(&value)
                .ok_or_else(|| anyhow::anyhow!("Unknown transport '{}': expected http or mcp", value))?;
        }

        Ok(config)
    }
}
