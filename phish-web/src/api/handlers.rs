//! JSON API request handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use phish_rs::config::UiConfig;
use phish_rs::{Classification, EmailClassifier};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};

/// Shared application state
pub struct AppState {
    pub classifier: EmailClassifier,
    pub ui: UiConfig,
    /// Feature dimension of the loaded model
    pub dimension: usize,
}

/// Classification request body
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

/// Classification response
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub label: String,
    pub is_phishing: bool,
    pub raw_label: i64,
    pub normalized: String,
    pub message: String,
}

impl From<Classification> for ClassifyResponse {
    fn from(result: Classification) -> Self {
        Self {
            label: result.label.as_str().to_string(),
            is_phishing: result.label.is_phishing(),
            raw_label: result.raw_label,
            message: result.message(),
            normalized: result.normalized,
        }
    }
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(msg: &str) -> Self {
        Self {
            error: msg.to_string(),
        }
    }
}

/// POST /api/classify
pub async fn classify(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("Malformed classification request: {}", rejection.body_text());
            return (rejection.status(), Json(ApiError::new(&rejection.body_text())))
                .into_response();
        }
    };

    match state.classifier.classify(&req.text) {
        Ok(result) => (StatusCode::OK, Json(ClassifyResponse::from(result))).into_response(),
        Err(e) if e.is_validation() => {
            warn!("Rejected classification request: {}", e);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiError::new(&e.to_string())),
            )
                .into_response()
        }
        Err(e) => {
            error!("Classification failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new(&format!("Classification failed: {}", e))),
            )
                .into_response()
        }
    }
}

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "service": "phish-web",
            "version": env!("CARGO_PKG_VERSION"),
            "model": {
                "dimension": state.dimension
            }
        })),
    )
}
