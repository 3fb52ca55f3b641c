use axum::Json;
use serde_json::{Value, json};

/// Liveness probe. Unauthenticated and independent of the store.
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}
