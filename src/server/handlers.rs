//! Request handlers for the analysis API.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::analyzer::{Analyzer, ClassifiedError};

impl IntoResponse for ClassifiedError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// `POST /api/analyze`
///
/// The body is taken as raw bytes so that malformed JSON is reported in the
/// same classified shape as every other failure.
pub async fn analyze_handler(State(analyzer): State<Analyzer>, body: Bytes) -> Response {
    match analyzer.respond(&body).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(classified) => classified.into_response(),
    }
}

/// `GET /` liveness check
pub async fn health_handler() -> Response {
    Json(json!({ "status": "ok" })).into_response()
}
