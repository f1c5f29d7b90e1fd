use axum::{response::IntoResponse, Json};
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "parcel-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Plain-text banner served at the root path.
pub async fn banner() -> &'static str {
    "Welcome to the parcel delivery service"
}
