//! API integration tests
//!
//! Each test starts a fake upstream events API on an ephemeral port and
//! drives the real router against it.

use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, Request, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use city_guide::{
    config::{AppConfig, UpstreamConfig},
    create_router,
    repository::Repository,
    services::Services,
    AppState,
};

#[derive(Clone, Default)]
struct Upstream {
    views: Arc<AtomicUsize>,
    requests: Arc<std::sync::Mutex<Vec<HashMap<String, String>>>>,
}

fn record(id: &str, views: u64, price: f64) -> Value {
    json!({
        "_id": id,
        "title": format!("Event {}", id),
        "date": "2025-06-21T19:30:00.000Z",
        "location": "Old Town",
        "type": "concert",
        "price": price,
        "views": views,
        "featured": false
    })
}

async fn upstream_list(
    State(upstream): State<Upstream>,
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Response {
    upstream.requests.lock().unwrap().push(params.clone());

    if params.get("type").map(String::as_str) == Some("sport") {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"message": "Server Error"}))).into_response();
    }
    if params.get("search").map(String::as_str) == Some("bare") {
        return Json(json!([record("b", 5, 10.0), record("a", 90, 0.0), record("c", 5, 3.0)])).into_response();
    }
    if params.get("location").map(String::as_str) == Some("broken") {
        return (StatusCode::OK, "<html>oops</html>").into_response();
    }

    let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    Json(json!({
        "data": [record("e1", 10, 15.0), record("e2", 3, 0.0)],
        "total": 25,
        "page": page,
        "pages": 3
    }))
    .into_response()
}

async fn upstream_get(Path(id): Path<String>) -> axum::response::Response {
    if id != "e1" {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "Event not found"}))).into_response();
    }
    let mut body = record("e1", 10, 15.0);
    body["description"] = json!("Open-air concert on the main square");
    body["organizer"] = json!("City Orchestra");
    Json(body).into_response()
}

async fn upstream_view(State(upstream): State<Upstream>, Path(_id): Path<String>) -> StatusCode {
    upstream.views.fetch_add(1, Ordering::SeqCst);
    StatusCode::NO_CONTENT
}

/// Start the fake upstream and return the router under test
async fn setup() -> (Router, Upstream) {
    let upstream = Upstream::default();
    let fake = Router::new()
        .route("/api/events", get(upstream_list))
        .route("/api/events/:id", get(upstream_get))
        .route("/api/events/:id/view", post(upstream_view))
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, fake).await.unwrap();
    });

    let config = AppConfig {
        upstream: UpstreamConfig {
            base_url: format!("http://{}/api", addr),
            timeout_secs: 5,
            ..UpstreamConfig::default()
        },
        ..AppConfig::default()
    };
    let repository = Repository::new(&config.upstream).unwrap();
    let services = Services::new(repository, &config);
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    (create_router(state), upstream)
}

async fn get_json(app: Router, uri: &str, headers: &[(&str, &str)]) -> (StatusCode, axum::http::HeaderMap, Value) {
    let mut request = Request::builder().uri(uri);
    for (name, value) in headers {
        request = request.header(*name, *value);
    }
    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .expect("Failed to send request");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, headers, body)
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup().await;
    let (status, _, body) = get_json(app, "/api/v1/health", &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_reaches_upstream() {
    let (app, upstream) = setup().await;
    let (status, _, body) = get_json(app, "/api/v1/ready", &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    let requests = upstream.requests.lock().unwrap();
    assert_eq!(requests[0].get("limit").map(String::as_str), Some("1"));
}

#[tokio::test]
async fn test_list_events_envelope() {
    let (app, upstream) = setup().await;
    let (status, headers, body) = get_json(app, "/api/v1/events?type=concert&page=2&sort=popular", &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers.contains_key(header::ETAG));
    assert_eq!(body["cards"].as_array().unwrap().len(), 2);
    assert_eq!(body["totalCount"], 25);
    assert_eq!(body["pagination"]["pageNumber"], 2);
    assert_eq!(body["pagination"]["pageCount"], 3);
    assert_eq!(body["hasError"], false);
    assert_eq!(body["isEmpty"], false);
    assert_eq!(body["query"], "type=concert&sort=popular&page=2");

    let requests = upstream.requests.lock().unwrap();
    let sent = &requests[0];
    assert_eq!(sent.get("type").map(String::as_str), Some("concert"));
    assert_eq!(sent.get("sort").map(String::as_str), Some("popular"));
    assert_eq!(sent.get("page").map(String::as_str), Some("2"));
    assert_eq!(sent.get("limit").map(String::as_str), Some("12"));
}

#[tokio::test]
async fn test_list_events_bare_array_sorted_locally() {
    let (app, _) = setup().await;
    let (status, _, body) = get_json(app, "/api/v1/events?search=bare&sort=popular", &[]).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    // views desc, ties by id
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(body["pagination"]["pageCount"], 1);
    assert_eq!(body["pagination"]["next"]["disabled"], true);
}

#[tokio::test]
async fn test_list_events_upstream_error_becomes_error_state() {
    let (app, _) = setup().await;
    let (status, headers, body) = get_json(app, "/api/v1/events?type=sport", &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!headers.contains_key(header::ETAG));
    assert_eq!(body["hasError"], true);
    assert_eq!(body["isEmpty"], false);
    assert_eq!(body["error"]["status"], 500);
    assert!(body["cards"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_events_malformed_body_becomes_error_state() {
    let (app, _) = setup().await;
    let (_, _, body) = get_json(app, "/api/v1/events?location=broken", &[]).await;

    assert_eq!(body["hasError"], true);
    assert_eq!(body["error"]["status"], Value::Null);
}

#[tokio::test]
async fn test_list_events_etag_revalidation() {
    let (app, _) = setup().await;
    let (_, headers, _) = get_json(app.clone(), "/api/v1/events", &[]).await;
    let etag = headers.get(header::ETAG).unwrap().to_str().unwrap().to_string();
    assert!(etag.starts_with("W/\""));

    let (status, _, body) = get_json(app.clone(), "/api/v1/events", &[("if-none-match", etag.as_str())]).await;
    assert_eq!(status, StatusCode::NOT_MODIFIED);
    assert_eq!(body, Value::Null);

    // the tag stays valid when the body is served gzipped
    let (status, headers, _) = get_json(
        app,
        "/api/v1/events",
        &[("if-none-match", etag.as_str()), ("accept-encoding", "gzip")],
    )
    .await;
    assert_eq!(status, StatusCode::NOT_MODIFIED);
    assert_eq!(headers.get(header::ETAG).unwrap().to_str().unwrap(), etag);
}

#[tokio::test]
async fn test_list_events_localized() {
    let (app, _) = setup().await;
    let (_, _, body) = get_json(
        app,
        "/api/v1/events",
        &[("accept-language", "fr-FR,fr;q=0.9"), ("sec-ch-prefers-color-scheme", "\"dark\"")],
    )
    .await;

    assert_eq!(body["context"]["locale"], "fr");
    assert_eq!(body["context"]["theme"], "dark");
    assert_eq!(body["cards"][1]["priceLabel"], "Gratuit");
    assert_eq!(body["pagination"]["next"]["label"], "Suivant");
}

#[tokio::test]
async fn test_get_event_records_view() {
    let (app, upstream) = setup().await;
    let (status, _, body) = get_json(app, "/api/v1/events/e1", &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "e1");
    assert_eq!(body["organizer"], "City Orchestra");

    // the view is counted on a detached task
    for _ in 0..50 {
        if upstream.views.load(Ordering::SeqCst) == 1 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("view was never recorded");
}

#[tokio::test]
async fn test_get_event_not_found() {
    let (app, upstream) = setup().await;
    let (status, _, body) = get_json(app, "/api/v1/events/nope", &[]).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchEvent");
    assert_eq!(upstream.views.load(Ordering::SeqCst), 0);
}
