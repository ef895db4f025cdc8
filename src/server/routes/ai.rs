//! Unified AI endpoints
//!
//! `POST /api/v1/ai/chat` (buffered), `POST /api/v1/ai/chat/stream` (SSE)
//! and `GET /api/v1/ai/models`.

use actix_web::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use actix_web::{web, HttpResponse, Result as ActixResult};
use futures::StreamExt;
use serde_json::json;
use tracing::info;

use crate::core::models::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::core::router::ProviderKind;
use crate::core::types::ChatRequest;
use crate::server::routes::errors;
use crate::server::sse::relay_sse;
use crate::server::state::AppState;
use crate::utils::error::GatewayError;

/// Configure AI API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/ai")
            .route("/chat", web::post().to(chat))
            .route("/chat/stream", web::post().to(chat_stream))
            .route("/models", web::get().to(list_models)),
    );
}

/// Buffered chat endpoint
pub async fn chat(
    state: web::Data<AppState>,
    request: web::Json<ChatRequest>,
) -> ActixResult<HttpResponse> {
    let request = request.into_inner();
    info!(
        model = request.model.as_deref().unwrap_or_default(),
        "Chat request"
    );

    match state.gateway.chat(&request).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(errors::gateway_error_to_response(&GatewayError::from(e))),
    }
}

/// Streaming chat endpoint (Server-Sent Events)
///
/// The response is always an SSE body; a failure before the first upstream
/// token still arrives as a single error frame followed by close, so clients
/// only ever parse one framing.
pub async fn chat_stream(
    state: web::Data<AppState>,
    request: web::Json<ChatRequest>,
) -> ActixResult<HttpResponse> {
    let request = request.into_inner();
    info!(
        model = request.model.as_deref().unwrap_or_default(),
        "Chat stream request"
    );

    let fragments = match state.gateway.chat_stream(&request).await {
        Ok(fragments) => fragments,
        Err(e) => futures::stream::once(async move { Err::<String, _>(e) }).boxed(),
    };

    Ok(HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, "text/event-stream"))
        .insert_header((CACHE_CONTROL, "no-cache"))
        .insert_header(("Connection", "keep-alive"))
        .insert_header(("X-Accel-Buffering", "no"))
        .streaming(relay_sse(fragments)))
}

/// Model catalog endpoint
pub async fn list_models(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let models = state.gateway.available_models();

    let recommended_for = |kind: ProviderKind| {
        models
            .iter()
            .find(|m| m.provider == kind && m.recommended)
            .map(|m| m.id.clone())
    };

    let recommended = json!({
        "gemini": recommended_for(ProviderKind::Gemini),
        "openrouter": recommended_for(ProviderKind::OpenRouter),
    });

    Ok(HttpResponse::Ok().json(json!({
        "models": models,
        "recommended": recommended,
        "defaults": {
            "maxTokens": DEFAULT_MAX_TOKENS,
            "enableSearch": true,
            "temperature": DEFAULT_TEMPERATURE,
        },
    })))
}
