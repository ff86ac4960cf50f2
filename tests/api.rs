//! HTTP-level tests for the router.
//!
//! The Wikipedia API is replaced by a local axum server on an ephemeral port.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::Query;
use axum::http::{header, Request, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::collections::HashMap;
use tower::ServiceExt;

use teny::checker::dictionary::Dictionary;
use teny::config::WikipediaConfig;
use teny::server::{build_router, AppState};
use teny::wikipedia::{WikipediaClient, NO_DEFINITION};
use teny::SpellChecker;

// ── Upstream stand-in ──────────────────────────────────────────

async fn fake_search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let term = params.get("srsearch").cloned().unwrap_or_default();
    if term == "tsisy" {
        return Json(json!({ "batchcomplete": "", "query": { "search": [] } }));
    }

    Json(json!({
        "batchcomplete": "",
        "query": {
            "searchinfo": { "totalhits": 2 },
            "search": [
                {
                    "ns": 0,
                    "title": "Trano",
                    "pageid": 1,
                    "snippet": "Ny <span class=\"searchmatch\">trano</span> dia fonenana"
                },
                { "ns": 0, "title": "Tranobe", "pageid": 2, "snippet": "trano lehibe" }
            ]
        }
    }))
}

async fn slow_search() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({ "query": { "search": [] } }))
}

async fn failing_search() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Start the stand-in and return its base URL
async fn spawn_upstream() -> String {
    let app = Router::new()
        .route("/w/api.php", get(fake_search))
        .route("/slow/api.php", get(slow_search))
        .route("/broken/api.php", get(failing_search));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

// ── App builder ────────────────────────────────────────────────

fn build_app(api_url: String) -> Router {
    let corrector = Dictionary::from_words([
        "ny", "trano", "rano", "tsara", "fitiavana", "mandeha", "aho", "salama",
    ])
    .unwrap();
    let words = Dictionary::from_words(["trano", "tranobe", "rano", "vary", "mangalatra"]).unwrap();

    let wikipedia = WikipediaClient::new(&WikipediaConfig {
        api_url,
        timeout_secs: 1,
        ..Default::default()
    })
    .unwrap();

    build_router(AppState {
        checker: Arc::new(SpellChecker::with_dictionary(corrector, 5)),
        words: Arc::new(words),
        wikipedia: Arc::new(wikipedia),
    })
}

fn offline_app() -> Router {
    build_app("http://127.0.0.1:9/w/api.php".to_string())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

// ── Tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_check() {
    let (status, body) = get_json(offline_app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "Backend OK" }));
}

#[tokio::test]
async fn corriger_reports_unknown_words() {
    let (status, body) = post_json(
        offline_app(),
        "/api/corriger",
        json!({ "texte": "Tranno tsara, tranno bonjour" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);

    assert_eq!(errors[0]["word"], "Tranno");
    assert_eq!(errors[0]["index"], 0);
    assert_eq!(errors[0]["length"], 6);
    assert_eq!(errors[0]["suggestions"][0], "trano");
    assert_eq!(errors[0]["suggestions"].as_array().unwrap().len(), 5);

    assert_eq!(errors[1]["word"], "bonjour");
    assert_eq!(errors[1]["index"], 21);
}

#[tokio::test]
async fn corriger_empty_text() {
    let (status, body) = post_json(offline_app(), "/api/corriger", json!({ "texte": "" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "errors": [] }));
}

#[tokio::test]
async fn corriger_rejects_missing_field() {
    let (status, body) = post_json(offline_app(), "/api/corriger", json!({ "text": "x" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("texte"));
}

#[tokio::test]
async fn corriger_rejects_malformed_body() {
    let request = Request::post("/api/corriger")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"texte\": "))
        .unwrap();
    let (status, body) = send(offline_app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn dictionary_check() {
    let (status, body) = get_json(offline_app(), "/api/dictionary/check?word=%20Trano").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "word": " Trano", "exists": true }));

    let (_, body) = get_json(offline_app(), "/api/dictionary/check?word=bonjour").await;
    assert_eq!(body["exists"], false);
}

#[tokio::test]
async fn dictionary_check_requires_word() {
    let (status, body) = get_json(offline_app(), "/api/dictionary/check").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn dictionary_suggestions() {
    let (status, body) =
        get_json(offline_app(), "/api/dictionary/suggestions?word=TRANOO&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["word"], "tranoo");
    assert_eq!(body["suggestions"], json!(["trano", "rano"]));

    // default limit of five, capped by the word list size
    let (_, body) = get_json(offline_app(), "/api/dictionary/suggestions?word=x").await;
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn lemmatize_endpoint() {
    let (status, body) = get_json(offline_app(), "/api/lemmatize?word=Manasa").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "word": "Manasa", "lemma": "asa" }));
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let request = Request::get("/")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = offline_app().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn wikipedia_search_relays_results() {
    let base = spawn_upstream().await;
    let app = build_app(format!("{}/w/api.php", base));

    let (status, body) = get_json(app, "/api/wikipedia/search?q=trano").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lang"], "mg");
    assert_eq!(body["query"], "trano");
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    assert_eq!(body["results"][0]["title"], "Trano");
    assert_eq!(
        body["results"][0]["snippet"],
        "Ny <span class=\"searchmatch\">trano</span> dia fonenana"
    );
}

#[tokio::test]
async fn wikipedia_translate_strips_markup() {
    let base = spawn_upstream().await;
    let app = build_app(format!("{}/w/api.php", base));

    let (status, body) = get_json(app, "/api/wikipedia/translate?word=trano").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "word": "trano", "translation": "Ny trano dia fonenana" })
    );
}

#[tokio::test]
async fn wikipedia_translate_without_results() {
    let base = spawn_upstream().await;
    let app = build_app(format!("{}/w/api.php", base));

    let (status, body) = get_json(app, "/api/wikipedia/translate?word=tsisy").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["translation"], NO_DEFINITION);
}

#[tokio::test]
async fn wikipedia_timeout_is_service_unavailable() {
    let base = spawn_upstream().await;
    let app = build_app(format!("{}/slow/api.php", base));

    let (status, body) = get_json(app, "/api/wikipedia/search?q=trano").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn wikipedia_upstream_error_is_service_unavailable() {
    let base = spawn_upstream().await;
    let app = build_app(format!("{}/broken/api.php", base));

    let (status, _) = get_json(app, "/api/wikipedia/translate?word=trano").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
