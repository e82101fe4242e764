//! Proxy backend: `/weather`, `/convert` and `/quote` over plain HTTP.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::LookupError;
use crate::models::{ConversionResult, ConvertQuery, GetWeatherRequest, Quote, WeatherResult};
use crate::service::InfoHub;
use crate::sources::currency::parse_amount;

/// Create all HTTP routes.
pub fn router(hub: Arc<InfoHub>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/weather", get(weather))
        .route("/convert", get(convert))
        .route("/quote", get(quote))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(hub)
}

pub async fn run(hub: Arc<InfoHub>, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP proxy listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(hub)).await?;
    Ok(())
}

async fn health() -> &'static str {
    "OK"
}

async fn weather(
    State(hub): State<Arc<InfoHub>>,
    Query(query): Query<GetWeatherRequest>,
) -> Result<Json<WeatherResult>, ApiError> {
    let resolved = hub
        .weather(query.city.as_deref())
        .await
        .map_err(|e| ApiError::from_lookup("failed to fetch weather", e))?;
    Ok(Json(resolved.value))
}

async fn convert(
    State(hub): State<Arc<InfoHub>>,
    Query(query): Query<ConvertQuery>,
) -> Result<Json<ConversionResult>, ApiError> {
    let amount = parse_amount(query.amount.as_deref())
        .map_err(|e| ApiError::from_lookup("conversion failed", e))?;
    let result = hub
        .convert(query.from.as_deref(), query.to.as_deref(), amount)
        .await
        .map_err(|e| ApiError::from_lookup("conversion failed", e))?;
    Ok(Json(result))
}

async fn quote(State(hub): State<Arc<InfoHub>>) -> Result<Json<Quote>, ApiError> {
    let quote = hub
        .quote()
        .await
        .map_err(|e| ApiError::from_lookup("failed to fetch quote", e))?;
    Ok(Json(quote))
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    BadGateway { error: String, detail: String },
    Internal { error: String, detail: String },
}

impl ApiError {
    /// Validation is the caller's fault; a malformed provider body is a
    /// gateway problem; anything else is ours.
    fn from_lookup(context: &str, error: LookupError) -> Self {
        match error {
            LookupError::Validation(message) => ApiError::BadRequest(message),
            LookupError::AllSourcesExhausted { message, last }
                if matches!(*last, LookupError::InvalidResponseShape(_)) =>
            {
                ApiError::BadGateway {
                    error: message,
                    detail: last.to_string(),
                }
            }
            LookupError::InvalidResponseShape(detail) => ApiError::BadGateway {
                error: context.to_string(),
                detail,
            },
            other => ApiError::Internal {
                error: context.to_string(),
                detail: other.detail(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::BadGateway { error, detail } => (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": error, "detail": detail })),
            )
                .into_response(),
            ApiError::Internal { error, detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": error, "detail": detail })),
            )
                .into_response(),
        }
    }
}
