//! HTTP-surface integration tests
//!
//! Drives the real route handlers against wiremock upstreams standing in for
//! the Gemini and OpenRouter APIs.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{test, web, App};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rpp_gateway::config::{Config, ProvidersConfig};
use rpp_gateway::core::AiGateway;
use rpp_gateway::server::routes;
use rpp_gateway::server::state::AppState;

fn app(
    providers: ProvidersConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = AppState::new(Config::default(), AiGateway::new(&providers));

    App::new()
        .app_data(web::Data::new(state))
        .route("/health", web::get().to(routes::health::health_check))
        .configure(routes::ai::configure_routes)
}

fn openrouter_providers(base_url: &str) -> ProvidersConfig {
    let mut providers = ProvidersConfig::default();
    providers.openrouter.api_key = Some("or-test-key".to_string());
    providers.openrouter.base_url = Some(base_url.to_string());
    providers
}

fn gemini_providers(base_url: &str) -> ProvidersConfig {
    let mut providers = ProvidersConfig::default();
    providers.gemini.api_key = Some("g-test-key".to_string());
    providers.gemini.base_url = Some(base_url.to_string());
    providers
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = test::init_service(app(ProvidersConfig::default())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "rpp-gateway");
}

#[actix_web::test]
async fn test_models_endpoint_lists_catalog() {
    let app = test::init_service(app(ProvidersConfig::default())).await;

    let req = test::TestRequest::get().uri("/api/v1/ai/models").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let models = body["models"].as_array().unwrap();
    assert_eq!(models.len(), 9);
    assert_eq!(body["recommended"]["gemini"], "gemini-3-pro-preview");
    assert_eq!(body["recommended"]["openrouter"], "anthropic/claude-opus-4.5");
    assert_eq!(body["defaults"]["maxTokens"], 65536);
    assert_eq!(body["defaults"]["enableSearch"], true);
}

#[actix_web::test]
async fn test_streaming_flag_rejected_on_buffered_endpoint() {
    let app = test::init_service(app(ProvidersConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/ai/chat")
        .set_json(json!({
            "stream": true,
            "messages": [{"role": "user", "content": "hi"}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("/api/v1/ai/chat/stream"));
}

#[actix_web::test]
async fn test_unconfigured_provider_fails_fast() {
    let app = test::init_service(app(ProvidersConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/ai/chat")
        .set_json(json!({
            "model": "gemini-1.5-flash",
            "messages": [{"role": "user", "content": "hi"}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 503);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("GEMINI_API_KEY"));
}

#[actix_web::test]
async fn test_chat_routes_to_openrouter_by_model_prefix() {
    let mock = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer or-test-key"))
        .and(header("X-Title", "RPP Generator"))
        .and(body_partial_json(json!({
            "model": "anthropic/claude-opus-4.5",
            "stream": false,
            "messages": [
                {"role": "system", "content": "Kamu adalah asisten guru"},
                {"role": "user", "content": "Buatkan kisi-kisi soal PAS"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "gen-abc",
            "choices": [{
                "message": {"content": "Berikut kisi-kisinya"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 11, "completion_tokens": 22, "total_tokens": 33}
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let app = test::init_service(app(openrouter_providers(&mock.uri()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/ai/chat")
        .set_json(json!({
            "model": "anthropic/claude-opus-4.5",
            "systemInstruction": "Kamu adalah asisten guru",
            "messages": [{"role": "user", "content": "Buatkan kisi-kisi soal PAS"}]
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["id"], "gen-abc");
    assert_eq!(body["provider"], "openrouter");
    assert_eq!(body["content"], "Berikut kisi-kisinya");
    assert_eq!(body["finishReason"], "stop");
    assert_eq!(body["usage"]["totalTokens"], 33);
}

#[actix_web::test]
async fn test_upstream_rejection_preserves_status_and_body() {
    let mock = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&mock)
        .await;

    let app = test::init_service(app(openrouter_providers(&mock.uri()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/ai/chat")
        .set_json(json!({
            "model": "openai/gpt-5.2",
            "messages": [{"role": "user", "content": "hi"}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 429);
    let body: Value = test::read_body_json(resp).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("429"));
    assert!(message.contains("rate limited"));
}

#[actix_web::test]
async fn test_chat_routes_to_gemini_and_normalizes_response() {
    let mock = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{"text": "Halo, "}, {"text": "guru!"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 4, "candidatesTokenCount": 6, "totalTokenCount": 10}
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let app = test::init_service(app(gemini_providers(&mock.uri()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/ai/chat")
        .set_json(json!({
            "model": "gemini-1.5-flash",
            "messages": [{"role": "user", "content": "halo"}]
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["provider"], "gemini");
    assert_eq!(body["content"], "Halo, guru!");
    assert_eq!(body["finishReason"], "STOP");
    assert_eq!(body["usage"]["promptTokens"], 4);
}

#[actix_web::test]
async fn test_chat_stream_relays_sse_frames() {
    let mock = MockServer::start().await;

    let upstream_body = concat!(
        "data: {\"choices\":[{\"delta\":{\"content\":\"Bab \"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"satu\"}}]}\n\n",
        "data: [DONE]\n\n",
    );

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"stream": true})))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(upstream_body, "text/event-stream"),
        )
        .mount(&mock)
        .await;

    let app = test::init_service(app(openrouter_providers(&mock.uri()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/ai/chat/stream")
        .set_json(json!({
            "model": "anthropic/claude-sonnet-4.5",
            "messages": [{"role": "user", "content": "Buat modul ajar"}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "text/event-stream"
    );
    assert_eq!(resp.headers().get("x-accel-buffering").unwrap(), "no");

    let body = test::read_body(resp).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert_eq!(
        text,
        "data: {\"content\":\"Bab \"}\n\ndata: {\"content\":\"satu\"}\n\ndata: [DONE]\n\n"
    );
}

#[actix_web::test]
async fn test_chat_stream_failure_emits_single_error_frame() {
    let app = test::init_service(app(ProvidersConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/ai/chat/stream")
        .set_json(json!({
            "model": "anthropic/claude-opus-4.5",
            "messages": [{"role": "user", "content": "hi"}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "text/event-stream"
    );

    let body = test::read_body(resp).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.starts_with("data: {\"error\":"));
    assert!(text.contains("OPENROUTER_API_KEY"));
    // The error frame is terminal; no [DONE] follows
    assert!(!text.contains("[DONE]"));
    assert_eq!(text.matches("data: ").count(), 1);
}

#[actix_web::test]
async fn test_upstream_rejection_on_stream_becomes_error_frame() {
    let mock = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock)
        .await;

    let app = test::init_service(app(openrouter_providers(&mock.uri()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/ai/chat/stream")
        .set_json(json!({
            "model": "openai/gpt-5.2",
            "messages": [{"role": "user", "content": "hi"}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body = test::read_body(resp).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.starts_with("data: {\"error\":"));
    assert!(text.contains("upstream exploded"));
}

#[actix_web::test]
async fn test_gemini_search_grounding_sent_by_default() {
    let mock = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-3-pro-preview:generateContent"))
        .and(body_partial_json(json!({
            "tools": [{"googleSearch": {}}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let app = test::init_service(app(gemini_providers(&mock.uri()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/ai/chat")
        .set_json(json!({
            "messages": [{"role": "user", "content": "Buatkan RPP"}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
}
