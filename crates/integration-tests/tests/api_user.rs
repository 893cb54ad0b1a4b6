//! End-to-end user scenarios through the HTTP router.

use axum::http::StatusCode;
use integration_tests::{send, Fixture};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn create_user_returns_dto() {
    let fx = Fixture::new().await;
    let app = fx.router();

    let (status, body) = send(&app, "POST", "/users", Some(json!({ "name": "Alice" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alice");
    assert!(body["id"].as_str().unwrap().parse::<Uuid>().is_ok());
}

#[tokio::test]
async fn duplicate_name_is_409() {
    let fx = Fixture::new().await;
    let app = fx.router();
    send(&app, "POST", "/users", Some(json!({ "name": "Alice" }))).await;

    let (status, body) = send(&app, "POST", "/users", Some(json!({ "name": "Alice" }))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().starts_with("conflict"));
}

#[tokio::test]
async fn delete_user_removes_their_boards() {
    let fx = Fixture::new().await;
    let app = fx.router();
    let (_, alice) = send(&app, "POST", "/users", Some(json!({ "name": "Alice" }))).await;
    let (_, board) = send(
        &app,
        "POST",
        "/boards",
        Some(json!({
            "title": "T",
            "content": "C",
            "information": { "link": null, "rank": 1 },
            "writerId": alice["id"],
            "tags": [{ "key": "cat", "value": "free" }]
        })),
    )
    .await;
    let board_uri = format!("/boards/{}", board["id"].as_str().unwrap());
    send(
        &app,
        "POST",
        &format!("{board_uri}/comments"),
        Some(json!({ "content": "mine", "writerId": alice["id"] })),
    )
    .await;

    let (status, body) = send(&app, "DELETE", &format!("/users/{}", alice["id"].as_str().unwrap()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::Value::Null);

    let (status, _) = send(&app, "GET", &board_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_user_is_404() {
    let fx = Fixture::new().await;
    let app = fx.router();

    let (status, _) = send(&app, "DELETE", &format!("/users/{}", Uuid::now_v7()), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_id_is_400() {
    let fx = Fixture::new().await;
    let app = fx.router();

    let (status, _) = send(&app, "DELETE", "/users/not-a-uuid", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
