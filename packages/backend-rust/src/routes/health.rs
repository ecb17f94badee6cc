use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Liveness probe. Always 200; readiness of the store is not part of the
/// contract, unreachable databases surface as 503 on the data routes.
pub async fn health() -> Response {
    Json(HealthResponse { status: "ok" }).into_response()
}
