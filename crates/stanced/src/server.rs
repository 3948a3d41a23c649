//! HTTP front end: routes, handlers, and the error-to-response mapping.
//!
//! Internal errors keep their upstream diagnostics for the logs; callers only
//! ever see one of three fixed error bodies.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use stance_core::{
    analysis_span, checkout_span, emit_checkout_created, new_request_id, AnalysisRequest,
    AnalysisResponse, AnalyzeError, CheckoutError, CheckoutProvider, CheckoutRequest,
    CheckoutSession, StanceAnalyzer, ValidationError,
};
use stance_providers::{ClientError, GoogleSearchClient, OpenAiClient, StripeCheckoutClient};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn, Instrument};

use crate::config::{Config, ConfigError};

pub const MISSING_FIELDS_MESSAGE: &str = "Missing publicFigure or topic";
pub const ANALYZE_FAILED_MESSAGE: &str = "Failed to analyze stance";
pub const CHECKOUT_FAILED_MESSAGE: &str = "Something went wrong";

// --- Error Handling ---

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Analyze(#[from] AnalyzeError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Analyze(err) if err.is_client_error() => {
                warn!(error = %err, "rejected analyze request");
                (StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE)
            }
            // Already logged by the pipeline with its stage.
            AppError::Analyze(_) => (StatusCode::INTERNAL_SERVER_ERROR, ANALYZE_FAILED_MESSAGE),
            AppError::Checkout(err) => {
                error!(error = %err, "checkout session failed");
                (StatusCode::INTERNAL_SERVER_ERROR, CHECKOUT_FAILED_MESSAGE)
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

// --- State ---

/// Shared, read-only request-handling state.
#[derive(Clone)]
pub struct AppState {
    analyzer: StanceAnalyzer,
    checkout: Arc<dyn CheckoutProvider>,
}

impl AppState {
    pub fn new(analyzer: StanceAnalyzer, checkout: Arc<dyn CheckoutProvider>) -> Self {
        Self { analyzer, checkout }
    }

    /// Wire the production HTTP clients from configuration.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let search = GoogleSearchClient::new(config.search.clone())?;
        let model = OpenAiClient::new(config.model.clone())?;
        let checkout = StripeCheckoutClient::new(config.checkout.clone())?;

        Ok(Self::new(
            StanceAnalyzer::new(Arc::new(search), Arc::new(model)),
            Arc::new(checkout),
        ))
    }
}

// --- Router ---

/// CORS policy for a single allowed origin, with credentials.
pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, ConfigError> {
    let origin =
        HeaderValue::from_str(allowed_origin).map_err(|_| ConfigError::InvalidValue {
            key: "STANCE_ALLOWED_ORIGIN",
            value: allowed_origin.to_string(),
        })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}

pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/analyze", post(analyze))
        .route("/create-checkout-session", post(create_checkout_session))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// --- Handlers ---

/// Whether the request declares a JSON body (`application/json`, any
/// parameters). Bodies with any other content type are not parsed.
fn is_json_request(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn analyze(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<AnalysisResponse>, AppError> {
    let request_id = new_request_id();

    async move {
        debug!(body = %String::from_utf8_lossy(&body), "incoming analyze request");

        if !is_json_request(&headers) {
            return Err(AppError::from(AnalyzeError::from(ValidationError::NotJson)));
        }
        let request = AnalysisRequest::from_json(&body).map_err(AnalyzeError::from)?;
        let response = state.analyzer.analyze(&request).await?;
        Ok::<_, AppError>(Json(response))
    }
    .instrument(analysis_span(&request_id))
    .await
}

async fn create_checkout_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CheckoutSession>, AppError> {
    let request_id = new_request_id();
    // A body that is not declared as JSON reads as empty: regular price.
    let request = if is_json_request(&headers) {
        CheckoutRequest::from_json(&body)
    } else {
        CheckoutRequest::default()
    };

    async move {
        let session = state.checkout.create_session(request).await?;
        emit_checkout_created(&session.session_id, request.discount);
        Ok::<_, AppError>(Json(session))
    }
    .instrument(checkout_span(&request_id))
    .await
}
