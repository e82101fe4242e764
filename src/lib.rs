//! InfoHub: weather, currency conversion and quotes behind resilient lookups.
//!
//! Each lookup is a [`lookup::FallbackChain`] of live sources ending in an
//! optional static value. The chains are served over HTTP ([`http`]) or as MCP
//! tools ([`service::InfoHub`]).

pub mod config;
pub mod constants;
pub mod error;
pub mod formatters;
pub mod http;
pub mod lookup;
pub mod models;
pub mod service;
pub mod sources;
pub mod telemetry;
pub mod widget;

pub use config::{Config, Endpoints, Transport};
pub use error::LookupError;
pub use lookup::{Attempt, FallbackChain, Resolved};
pub use models::{ConversionResult, Quote, WeatherResult};
pub use service::InfoHub;
pub use widget::{Submission, Widget, WidgetController, WidgetState};
