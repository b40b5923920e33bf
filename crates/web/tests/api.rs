use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use habit_core::time::fixed_clock;
use services::AppServices;
use storage::repository::Storage;
use web::AppState;

// The fixed clock pins today at 2023-11-14 (November has 30 days).

fn app() -> Router {
    let services = AppServices::with_storage(fixed_clock(), &Storage::in_memory());
    web::router(AppState { services })
}

fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn create_habit_returns_habit_with_id() {
    let app = app();
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/habit",
            serde_json::json!({ "name": "Read" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["habit"]["id"], 1);
    assert_eq!(body["habit"]["name"], "Read");
}

#[tokio::test]
async fn create_habit_rejects_empty_and_duplicate_names() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/habit",
            serde_json::json!({ "name": "   " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/habit",
            serde_json::json!({ "name": "Read" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Same name after trimming is a duplicate.
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/habit",
            serde_json::json!({ "name": " Read " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn create_habit_rejects_malformed_body() {
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/api/habit",
            serde_json::json!({ "title": "Read" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn rename_habit_roundtrip_and_errors() {
    let app = app();

    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/api/habit",
            serde_json::json!({ "name": "Read" }),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/api/habit",
            serde_json::json!({ "name": "Stretch" }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/api/habit/1",
            serde_json::json!({ "name": "Read more" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["habit"]["name"], "Read more");

    // Name already held by habit 2.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/api/habit/1",
            serde_json::json!({ "name": "Stretch" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/habit/99",
            serde_json::json!({ "name": "Anything" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn delete_habit_then_404_on_repeat() {
    let app = app();
    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/api/habit",
            serde_json::json!({ "name": "Read" }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(empty_request(Method::DELETE, "/api/habit/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);

    let response = app
        .oneshot(empty_request(Method::DELETE, "/api/habit/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn save_habit_log_returns_fresh_stats() {
    let app = app();
    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/api/habit",
            serde_json::json!({ "name": "Read" }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/habit-log",
            serde_json::json!({ "habit_id": 1, "day": 14, "status": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["completed_today"], 1);
    assert_eq!(body["today_progress"], 100);
    // 1 completion over 1 habit * 14 days -> floor(100/14) = 7.
    assert_eq!(body["monthly_progress"], 7);

    // Unchecking brings the stats back down.
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/habit-log",
            serde_json::json!({ "habit_id": 1, "day": 14, "status": false }),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["completed_today"], 0);
    assert_eq!(body["monthly_progress"], 0);
}

#[tokio::test]
async fn save_habit_log_validates_day_and_habit() {
    let app = app();
    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/api/habit",
            serde_json::json!({ "name": "Read" }),
        ))
        .await
        .unwrap();

    // November has no day 31.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/habit-log",
            serde_json::json!({ "habit_id": 1, "day": 31, "status": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/habit-log",
            serde_json::json!({ "habit_id": 42, "day": 3, "status": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Wrong field type is a 400, still in the JSON envelope.
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/habit-log",
            serde_json::json!({ "habit_id": 1, "day": "three", "status": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn root_redirects_to_dashboard() {
    let response = app()
        .oneshot(empty_request(Method::GET, "/"))
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/dashboard"
    );
}

#[tokio::test]
async fn dashboard_page_renders_stats() {
    let app = app();
    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/api/habit",
            serde_json::json!({ "name": "Read" }),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/api/habit-log",
            serde_json::json!({ "habit_id": 1, "day": 14, "status": true }),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(empty_request(Method::GET, "/dashboard"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let html = String::from_utf8(bytes.to_vec()).expect("utf8 page");
    assert!(html.contains("Habit Dashboard"));
    assert!(html.contains("\"Read\""));
    assert!(html.contains("window.CURRENT_DAY = 14"));
    assert!(html.contains("\"1_14\":true"));
}
