use std::sync::Arc;
use std::time::Duration;

use authorcheck_gateway::{build_router, AppState, GatewayConfig};
use axum::body::{self, Body};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::response::Response;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

const ORIGIN: &str = "http://localhost:5173";

fn router(config: GatewayConfig) -> Router {
    build_router(Arc::new(AppState::new(config)))
}

fn config_for(endpoint: &str) -> GatewayConfig {
    GatewayConfig {
        api_key: "test-key".into(),
        endpoint: endpoint.into(),
        ..GatewayConfig::default()
    }
}

fn post_json(body: Value) -> Request<Body> {
    Request::post("/api/external")
        .header(header::ORIGIN, ORIGIN)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Serve a fake `generateContent` endpoint on an ephemeral port.
async fn spawn_model(model: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, model).await.unwrap();
    });
    format!("http://{addr}/v1beta/models/test:generateContent")
}

fn model_replying(reply: Value) -> Router {
    Router::new().route(
        "/v1beta/models/test:generateContent",
        post(move || {
            let reply = reply.clone();
            async move { Json(reply) }
        }),
    )
}

fn candidate(text: &str) -> Value {
    json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] })
}

#[tokio::test]
async fn every_response_carries_security_headers() {
    let response = router(GatewayConfig::default())
        .oneshot(
            Request::put("/api/external")
                .header(header::ORIGIN, ORIGIN)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["x-xss-protection"], "1; mode=block");
    assert_eq!(headers["referrer-policy"], "strict-origin-when-cross-origin");
    assert_eq!(body_json(response).await["error"], "Method not allowed");
}

#[tokio::test]
async fn foreign_origin_is_forbidden() {
    let response = router(GatewayConfig::default())
        .oneshot(
            Request::post("/api/external")
                .header(header::ORIGIN, "https://evil.example")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"text":"hi"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Forbidden: Invalid origin");
}

#[tokio::test]
async fn origin_can_be_required() {
    let config = GatewayConfig {
        require_origin: true,
        ..GatewayConfig::default()
    };
    let response = router(config)
        .oneshot(Request::get("/api/external").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn get_redirects_home() {
    let response = router(GatewayConfig::default())
        .oneshot(Request::get("/api/external").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/");
}

#[tokio::test]
async fn sixty_first_request_in_a_minute_is_limited() {
    let app = router(GatewayConfig::default());
    let get = || {
        Request::get("/api/external")
            .header("x-forwarded-for", "198.51.100.7, 10.0.0.1")
            .body(Body::empty())
            .unwrap()
    };
    for _ in 0..60 {
        let response = app.clone().oneshot(get()).await.unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
    }
    let response = app.clone().oneshot(get()).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Too many requests");
    assert_eq!(body["details"], "Maximum 60 requests per minute allowed");

    // Another client is unaffected.
    let response = app
        .oneshot(
            Request::get("/api/external")
                .header("x-real-ip", "192.0.2.1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn rejects_non_json_content_type() {
    let response = router(GatewayConfig::default())
        .oneshot(
            Request::post("/api/external")
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from("hello"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Invalid Content-Type. Expected application/json"
    );
}

#[tokio::test]
async fn rejects_malformed_body() {
    let response = router(GatewayConfig::default())
        .oneshot(
            Request::post("/api/external")
                .header(header::CONTENT_TYPE, "application/json; charset=utf-8")
                .body(Body::from("{oops"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid input");
    assert_eq!(body["details"], "Request body must be a JSON object");
}

#[tokio::test]
async fn validates_text() {
    let cases = [
        (json!({}), "Invalid text input"),
        (json!({ "text": "" }), "Invalid text input"),
        (json!({ "text": 12 }), "Invalid text input"),
        (
            json!({ "text": "x".repeat(10_001) }),
            "Text too long. Maximum 10000 characters allowed",
        ),
        (
            json!({ "text": "\u{0}\u{1} \n " }),
            "Text cannot be empty after sanitization",
        ),
    ];
    let app = router(GatewayConfig::default());
    for (body, details) in cases {
        let response = app.clone().oneshot(post_json(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid input");
        assert_eq!(body["details"], details);
    }
}

#[tokio::test]
async fn oversized_body_is_reported_as_long_text() {
    let response = router(GatewayConfig::default())
        .oneshot(post_json(json!({ "text": "x".repeat(3_000_000) })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid input");
    assert_eq!(
        body["details"],
        "Text too long. Maximum 10000 characters allowed"
    );
}

#[tokio::test]
async fn missing_api_key_is_unavailable() {
    let response = router(GatewayConfig::default())
        .oneshot(post_json(json!({ "text": "Hello world." })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await["error"],
        "Service temporarily unavailable"
    );
}

#[tokio::test]
async fn returns_model_analysis() {
    let model = Router::new().route(
        "/v1beta/models/test:generateContent",
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            assert_eq!(headers["x-goog-api-key"], "test-key");
            assert!(headers[header::USER_AGENT]
                .to_str()
                .unwrap()
                .starts_with("AuthorCheck/"));
            let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
            assert!(prompt.contains("\"Hello world.\""));
            assert_eq!(body["generationConfig"]["temperature"], 0.7);
            Json(candidate(
                "Here you go:\n{\"aiOrHuman\": \"human\", \"aiOrHumanConfidence\": 77, \
                 \"writingStyle\": {\"tone\": \"Casual\", \"formality\": \"casual\"}}",
            ))
        }),
    );
    let endpoint = spawn_model(model).await;

    let response = router(config_for(&endpoint))
        .oneshot(post_json(json!({ "text": "  Hello world.\u{7}  " })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["model"], "gemini-2.0-flash");
    assert!(body["timestamp"].is_string());
    assert_eq!(body["data"]["aiOrHuman"], "human");
    assert_eq!(body["data"]["aiOrHumanConfidence"], 77);
    assert_eq!(body["data"]["writingStyle"]["tone"], "Casual");
    assert_eq!(body["data"]["writingStyle"]["audience"], "General");
}

#[tokio::test]
async fn upstream_status_error_is_hidden() {
    let model = Router::new().route(
        "/v1beta/models/test:generateContent",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "quota exhausted for key test-key") }),
    );
    let endpoint = spawn_model(model).await;
    let response = router(config_for(&endpoint))
        .oneshot(post_json(json!({ "text": "Hello." })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "External service error");
    assert_eq!(body["details"], "The analysis service is temporarily unavailable");
    assert!(!body.to_string().contains("quota"));
}

#[tokio::test]
async fn upstream_failures_map_to_fixed_messages() {
    let cases = [
        (
            json!({ "error": { "code": 400, "message": "bad" } }),
            "Analysis failed",
            "Unable to process the text analysis",
        ),
        (json!({ "candidates": [] }), "Analysis failed", "No analysis data received"),
        (
            candidate("I cannot analyze this text."),
            "Analysis processing failed",
            "Unable to parse the analysis results",
        ),
        (
            candidate("{\"topics\": \"lots\"}"),
            "Analysis processing failed",
            "Unable to parse the analysis results",
        ),
    ];
    for (reply, error, details) in cases {
        let endpoint = spawn_model(model_replying(reply)).await;
        let response = router(config_for(&endpoint))
            .oneshot(post_json(json!({ "text": "Hello." })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], error);
        assert_eq!(body["details"], details);
    }
}

#[tokio::test]
async fn slow_model_times_out() {
    let model = Router::new().route(
        "/v1beta/models/test:generateContent",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Json(candidate("{}"))
        }),
    );
    let endpoint = spawn_model(model).await;
    // Requested 1 s, clamped up to the 5 s minimum.
    let response = router(config_for(&endpoint))
        .oneshot(post_json(json!({ "text": "Hello.", "timeout": 1000 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Request timeout");
    assert!(body["errorId"].as_str().is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn unreachable_model_is_an_internal_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let response = router(config_for(&format!("http://{addr}/generate")))
        .oneshot(post_json(json!({ "text": "Hello." })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Internal server error");
    assert!(body["errorId"].is_string());
}

#[tokio::test]
async fn answers_cors_preflight_for_allowed_origin() {
    let response = router(GatewayConfig::default())
        .oneshot(
            Request::options("/api/external")
                .header(header::ORIGIN, "https://author-check-one.vercel.app")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://author-check-one.vercel.app"
    );
}
