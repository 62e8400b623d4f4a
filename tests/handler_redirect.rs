mod common;

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::json;
use short_link::domain::repositories::LinkRepository;

#[tokio::test]
async fn test_redirect_success() {
    let (server, repo) = common::create_test_server();
    common::create_test_link(&repo, "redir01", "https://example.com/target").await;

    let response = server.get("/redir01").await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_records_clicks() {
    let (server, repo) = common::create_test_server();
    common::create_test_link(&repo, "clickme", "https://example.com").await;

    let mut last_call = Utc::now();
    for _ in 0..3 {
        last_call = Utc::now();
        let response = server.get("/clickme").await;
        assert_eq!(response.status_code(), StatusCode::FOUND);
    }

    let link = repo.find_by_code("clickme").await.unwrap().unwrap();
    assert_eq!(link.total_clicks, 3);
    assert!(link.last_clicked_at.unwrap() >= last_call);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (server, repo) = common::create_test_server();

    let response = server.get("/notfound").await;

    response.assert_status_not_found();
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_redirect_malformed_code_is_not_found() {
    let (server, _repo) = common::create_test_server();

    server.get("/abc").await.assert_status_not_found();
    server.get("/abc-123").await.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_after_delete_is_not_found() {
    let (server, repo) = common::create_test_server();
    common::create_test_link(&repo, "short01", "https://example.com").await;

    server
        .delete("/api/links/short01")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server.get("/short01").await.assert_status_not_found();
}

#[tokio::test]
async fn test_create_then_resolve_end_to_end() {
    let (server, _repo) = common::create_test_server();

    let created = server
        .post("/api/links")
        .json(&json!({
            "targetUrl": "https://example.com/page",
            "code": "mycode1"
        }))
        .await;
    created.assert_status(StatusCode::CREATED);

    let redirect = server.get("/mycode1").await;
    assert_eq!(redirect.status_code(), StatusCode::FOUND);
    assert_eq!(redirect.header("location"), "https://example.com/page");

    let stats = server.get("/api/links/mycode1").await;
    let json = stats.json::<serde_json::Value>();
    assert_eq!(json["totalClicks"], 1);
    assert!(json["lastClickedAt"].is_string());
}

#[tokio::test]
async fn test_redirect_ignores_trailing_slash() {
    let (server, repo) = common::create_test_service_server();
    common::create_test_link(&repo, "mycode1", "https://example.com/page").await;

    let response = server.get("/mycode1/").await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/page");

    let link = repo.find_by_code("mycode1").await.unwrap().unwrap();
    assert_eq!(link.total_clicks, 1);
}
