//! Handler for the service banner.

use axum::Json;
use serde_json::{Value, json};

/// `GET /` - service name and version.
pub async fn index_handler() -> Json<Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "message": "URL shortener is running",
    }))
}
