//! Integration tests for the relay endpoints against a mock upstream.

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use gif_explorer::config::Config;
use gif_explorer::web::{create_app, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_KEY: &str = "relay-test-key";

fn create_test_app(base_url: &str) -> Router {
    let config = Config {
        giphy_base_url: base_url.to_string(),
        giphy_key: TEST_KEY.to_string(),
        static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        ..Config::for_testing()
    };
    create_app(AppState::new(config).expect("Failed to create state"))
}

async fn setup() -> (MockServer, Router) {
    let server = MockServer::start().await;
    let app = create_test_app(&format!("{}/v1/gifs", server.uri()));
    (server, app)
}

fn upstream_page(ids: &[&str], offset: u64) -> Value {
    json!({
        "data": ids
            .iter()
            .map(|id| json!({"id": id, "title": format!("GIF {id}"), "rating": "g"}))
            .collect::<Vec<_>>(),
        "pagination": {"total_count": 1000, "count": ids.len(), "offset": offset},
        "meta": {"status": 200, "msg": "OK", "response_id": "r1"}
    })
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_trending_forwards_window_and_returns_body_verbatim() {
    let (server, app) = setup().await;
    let page = upstream_page(&["a", "b", "c"], 40);

    Mock::given(method("GET"))
        .and(path("/v1/gifs/trending"))
        .and(query_param("api_key", TEST_KEY))
        .and(query_param("limit", "3"))
        .and(query_param("offset", "40"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&page))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get(app, "/api/trending?limit=3&offset=40").await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, page);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_trending_defaults_window() {
    let (server, app) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/gifs/trending"))
        .and(query_param("limit", "20"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_page(&["a"], 0)))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _) = get(app, "/api/trending").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_trending_passes_unvalidated_window_through() {
    let (server, app) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/gifs/trending"))
        .and(query_param("limit", "lots"))
        .and(query_param("offset", "-1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "meta": {"status": 400, "msg": "Validation error"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get(app, "/api/trending?limit=lots&offset=-1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({"error": "Failed to fetch trending GIFs"})
    );
}

#[tokio::test]
async fn test_trending_upstream_failure_hides_detail_and_key() {
    let (server, app) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/gifs/trending"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string(format!("Invalid authentication credentials: {TEST_KEY}")),
        )
        .mount(&server)
        .await;

    let (status, body) = get(app, "/api/trending").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"Failed to fetch trending GIFs"}"#);
    assert!(!body.contains(TEST_KEY));
}

#[tokio::test]
async fn test_trending_undecodable_body_is_upstream_failure() {
    let (server, app) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/gifs/trending"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let (status, body) = get(app, "/api/trending").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Failed to fetch trending GIFs"));
}

#[tokio::test]
async fn test_upstream_unreachable() {
    // Nothing listens on port 9 locally.
    let app = create_test_app("http://127.0.0.1:9/v1/gifs");

    let (status, body) = get(app.clone(), "/api/trending").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains(TEST_KEY));

    let (status, body) = get(app, "/api/search?q=cats").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"Failed to search GIFs"}"#);
}

#[tokio::test]
async fn test_search_forwards_query_and_window() {
    let (server, app) = setup().await;
    let page = upstream_page(&["cat1", "cat2"], 20);

    Mock::given(method("GET"))
        .and(path("/v1/gifs/search"))
        .and(query_param("api_key", TEST_KEY))
        .and(query_param("q", "funny cats"))
        .and(query_param("limit", "20"))
        .and(query_param("offset", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&page))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get(app, "/api/search?q=funny%20cats&offset=20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), page);
}

#[tokio::test]
async fn test_repeated_parameters_forward_first_value() {
    let (server, app) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/gifs/trending"))
        .and(query_param("limit", "1"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_page(&["a"], 0)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/gifs/search"))
        .and(query_param("q", "a"))
        .and(query_param("offset", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_page(&["b"], 20)))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get(app.clone(), "/api/trending?limit=1&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap()["data"][0]["id"], "a");

    let (status, body) = get(app, "/api/search?q=a&q=b&offset=20&offset=40").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap()["data"][0]["id"], "b");
}

#[tokio::test]
async fn test_search_without_query_never_calls_upstream() {
    let (server, app) = setup().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    for uri in ["/api/search", "/api/search?q=", "/api/search?limit=5&offset=0"] {
        let (status, body) = get(app.clone(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri {uri}");
        assert_eq!(body, r#"{"error":"Search query is required"}"#);
    }
}

#[tokio::test]
async fn test_search_whitespace_query_is_forwarded() {
    let (server, app) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/gifs/search"))
        .and(query_param("q", " "))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_page(&[], 0)))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _) = get(app, "/api/search?q=%20").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_search_upstream_failure() {
    let (server, app) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/gifs/search"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"message": "rate limited"})))
        .mount(&server)
        .await;

    let (status, body) = get(app, "/api/search?q=dogs").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"Failed to search GIFs"}"#);
}

#[tokio::test]
async fn test_missing_key_is_sent_empty() {
    let server = MockServer::start().await;
    let config = Config {
        giphy_base_url: format!("{}/v1/gifs", server.uri()),
        giphy_key: String::new(),
        ..Config::for_testing()
    };
    let app = create_app(AppState::new(config).unwrap());

    Mock::given(method("GET"))
        .and(path("/v1/gifs/trending"))
        .and(query_param("api_key", ""))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get(app, "/api/trending").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"Failed to fetch trending GIFs"}"#);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let (server, app) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/gifs/trending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_page(&["a"], 0)))
        .mount(&server)
        .await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/trending")
                .header("Origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_home_page_and_health() {
    let app = create_test_app("http://127.0.0.1:9/v1/gifs");

    let (status, body) = get(app.clone(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("GIF Explorer"));
    assert!(body.contains(r#"id="search-input""#));

    let (status, body) = get(app, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_page_script_is_served() {
    let app = create_test_app("http://127.0.0.1:9/v1/gifs");

    let (status, body) = get(app, "/static/js/explorer.js").await;
    assert_eq!(status, StatusCode::OK);
    // A sentinel that stays visible after a page lands must fire again.
    assert!(body.contains("function rearmSentinel()"));
    assert!(body.contains("observer.unobserve(els.sentinel);"));
    assert!(body.contains("rearmSentinel();"));
}
