//! Request handlers

use super::AppState;
use crate::error::{ErrorResponse, PredictError};
use crate::types::attribute::Attribute;
use crate::types::features::{PredictRequest, PredictResponse};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    /// Name of the loaded model, absent when loading failed
    pub model: Option<String>,
    pub version: String,
}

pub(super) async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: state.pipeline().model_loaded(),
        model: state.pipeline().model_name().map(str::to_string),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /<attribute>`: distinct labels from the dataset
pub(super) fn lookup_handler(state: &AppState, attribute: Attribute) -> Json<serde_json::Value> {
    let mut body = serde_json::Map::new();
    body.insert(
        attribute.list_key(),
        serde_json::json!(state.catalog().distinct_values(attribute)),
    );
    Json(serde_json::Value::Object(body))
}

/// `POST /predict`
pub(super) async fn predict_handler(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
    let request_id = Uuid::new_v4();
    let start = Instant::now();

    let result = if !state.pipeline().model_loaded() {
        Err(PredictError::ModelUnavailable)
    } else {
        match payload {
            Ok(Json(request)) => {
                // Inference is CPU-bound; keep it off the async workers
                let worker = state.clone();
                tokio::task::spawn_blocking(move || worker.pipeline().predict(&request.features))
                    .await
                    .unwrap_or_else(|e| {
                        Err(PredictError::Prediction(format!(
                            "Prediction task failed: {}",
                            e
                        )))
                    })
            }
            Err(rejection) => Err(PredictError::MalformedRequest(rejection.body_text())),
        }
    };
    let latency = start.elapsed();

    match result {
        Ok(prediction) => {
            state
                .metrics()
                .record_prediction(latency, &prediction.to_string());
            info!(
                request_id = %request_id,
                prediction = %prediction,
                latency_us = latency.as_micros() as u64,
                "Prediction served"
            );
            Json(PredictResponse { prediction }).into_response()
        }
        Err(e) => {
            state.metrics().record_failure(latency, e.kind());
            if e.status_code() < 500 {
                warn!(request_id = %request_id, kind = e.kind(), error = %e, "Rejected prediction request");
            } else {
                error!(request_id = %request_id, kind = e.kind(), error = %e, "Error during prediction");
            }
            e.into_response()
        }
    }
}
