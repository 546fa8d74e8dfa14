//! GET /health - Liveness check.

use axum::Json;

use crate::http::response::HealthBody;

pub async fn health_check() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
