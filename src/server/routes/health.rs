//! Health check endpoint

use actix_web::{HttpResponse, Result as ActixResult};
use serde_json::json;

/// Basic liveness probe
pub async fn health_check() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": crate::NAME,
        "version": crate::VERSION,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}
