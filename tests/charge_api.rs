use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use mockito::{Matcher, Server};
use pix_gateway::{
    config::Config,
    handlers::{router, AppState},
    services::{ChargeGateway, PushinPayClient},
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

const CHARGE_PATH: &str = "/api/pix/cashIn";
const WEBHOOK_URL: &str = "https://loja.test/webhooks/pix";

fn app(provider_url: &str, extra: &[(&str, &str)]) -> Router {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("PROVIDER_BASE_URL".into(), provider_url.into());
    vars.insert("PIX_WEBHOOK_URL".into(), WEBHOOK_URL.into());
    for (key, value) in extra {
        vars.insert(key.to_string(), value.to_string());
    }

    let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();
    let provider = Arc::new(PushinPayClient::from_config(&config).unwrap());
    let gateway = Arc::new(ChargeGateway::new(&config, provider));
    router(AppState::new(gateway, config.environment))
}

fn app_with_key(provider_url: &str) -> Router {
    app(provider_url, &[("PUSHINPAY_API_KEY", "test-key")])
}

async fn post_charge(app: Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/gerar-pix")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn creates_charge_and_renames_fields() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", CHARGE_PATH)
        .match_header("authorization", "Bearer test-key")
        .match_header("accept", "application/json")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "value": 4990,
            "webhook_url": WEBHOOK_URL,
            "split_rules": [],
            "description": "Pagamento de Assinatura",
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "9c29870c-9f69-4bb6-90d3-2dce9453bb45",
                "qr_code": "00020101021226770014BR.GOV.BCB.PIX2555",
                "qr_code_base64": "data:image/png;base64,iVBORw0KGgoAAAANSUhEUg==",
                "status": "created",
                "value": 4990,
            })
            .to_string(),
        )
        .create_async()
        .await;

    let (status, body) = post_charge(app_with_key(&server.url()), r#"{"value": 49.90}"#).await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pix_code"], "00020101021226770014BR.GOV.BCB.PIX2555");
    assert_eq!(
        body["qrcode_url"],
        "data:image/png;base64,iVBORw0KGgoAAAANSUhEUg=="
    );
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn converts_float_prone_amounts_exactly() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", CHARGE_PATH)
        .match_body(Matcher::PartialJson(json!({ "value": 1999 })))
        .with_status(200)
        .with_body(r#"{"qr_code":"code","qr_code_base64":"img"}"#)
        .create_async()
        .await;

    let (status, _) = post_charge(app_with_key(&server.url()), r#"{"value": 19.99}"#).await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn amount_at_minimum_is_rejected_without_calling_provider() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", CHARGE_PATH)
        .expect(0)
        .create_async()
        .await;

    for body in [
        r#"{"value": 0.50}"#,
        r#"{"value": 0.01}"#,
        r#"{"value": -10}"#,
        r#"{"value": "49.90"}"#,
        r#"{"value": null}"#,
        r#"{}"#,
        r#"not json"#,
    ] {
        let (status, response) = post_charge(app_with_key(&server.url()), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {}", body);
        assert_eq!(response["error_code"], "INVALID_AMOUNT");
        assert!(response["message"].is_string());
        assert!(response.get("details").is_none());
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn missing_api_key_is_a_server_error_without_outbound_call() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", CHARGE_PATH)
        .expect(0)
        .create_async()
        .await;

    for body in [r#"{"value": 49.90}"#, r#"{"value": 0.10}"#, r#"garbage"#] {
        let (status, response) = post_charge(app(&server.url(), &[]), body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response["error_code"], "CONFIGURATION_MISSING");
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn provider_rejection_passes_status_and_raw_body_through() {
    let raw = r#"{"message":"Unauthenticated."}"#;
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", CHARGE_PATH)
        .with_status(401)
        .with_body(raw)
        .create_async()
        .await;

    let (status, body) = post_charge(app_with_key(&server.url()), r#"{"value": 25}"#).await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "PROVIDER_REJECTED");
    assert_eq!(body["details"], raw);
}

#[tokio::test]
async fn provider_outage_keeps_upstream_status() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", CHARGE_PATH)
        .with_status(503)
        .with_body("Service Unavailable")
        .create_async()
        .await;

    let (status, body) = post_charge(app_with_key(&server.url()), r#"{"value": 25}"#).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["details"], "Service Unavailable");
}

#[tokio::test]
async fn incomplete_provider_success_is_a_server_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", CHARGE_PATH)
        .with_status(201)
        .with_body(r#"{"id":"abc","qr_code_base64":"img"}"#)
        .create_async()
        .await;

    let (status, body) = post_charge(app_with_key(&server.url()), r#"{"value": 25}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error_code"], "INCOMPLETE_PROVIDER_RESPONSE");
    assert!(body["details"].as_str().unwrap().contains("qr_code"));
}

#[tokio::test]
async fn malformed_provider_body_is_internal_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", CHARGE_PATH)
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let (status, body) = post_charge(app_with_key(&server.url()), r#"{"value": 25}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error_code"], "INTERNAL_ERROR");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn unreachable_provider_is_internal_error() {
    let (status, body) = post_charge(app_with_key("http://127.0.0.1:1"), r#"{"value": 25}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error_code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn legacy_mapping_and_cents_field() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", CHARGE_PATH)
        .match_body(Matcher::PartialJson(json!({ "value": 1500 })))
        .with_status(200)
        .with_body(r#"{"pix_br_code":"legacy-code","qrcode_image_url":"https://img.test/qr.png"}"#)
        .create_async()
        .await;

    let app = app(
        &server.url(),
        &[
            ("PUSHINPAY_API_KEY", "test-key"),
            ("PROVIDER_RESPONSE_VERSION", "v1"),
        ],
    );
    let (status, body) = post_charge(app, r#"{"valor_em_centavos": 1500}"#).await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pix_code"], "legacy-code");
    assert_eq!(body["qrcode_url"], "https://img.test/qr.png");
}

#[tokio::test]
async fn health_reports_configuration() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app_with_key("http://127.0.0.1:1"), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["api_key_configured"], true);
    assert_eq!(body["environment"], "sandbox");
    assert_eq!(body["response_mapping"], "v3");

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (_, body) = send(app("http://127.0.0.1:1", &[]), request).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["api_key_configured"], false);
}
