#![allow(dead_code)]

use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use short_link::domain::entities::NewLink;
use short_link::domain::repositories::LinkRepository;
use short_link::infrastructure::persistence::InMemoryLinkRepository;
use short_link::routes::{app_router, app_service};
use short_link::state::AppState;
use std::sync::Arc;

pub const BASE_URL: &str = "https://s.example.com";

pub fn create_test_state() -> (AppState, Arc<InMemoryLinkRepository>) {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let state = AppState::new(repo.clone(), BASE_URL);

    (state, repo)
}

pub fn create_test_server() -> (TestServer, Arc<InMemoryLinkRepository>) {
    let (state, repo) = create_test_state();
    let server = TestServer::new(app_router(state)).unwrap();

    (server, repo)
}

/// Server over the full service stack, including trailing-slash trimming.
pub fn create_test_service_server() -> (TestServer, Arc<InMemoryLinkRepository>) {
    let (state, repo) = create_test_state();
    let app = ServiceExt::<Request>::into_make_service(app_service(state));
    let server = TestServer::new(app).unwrap();

    (server, repo)
}

pub async fn create_test_link(repo: &InMemoryLinkRepository, code: &str, url: &str) {
    repo.create(NewLink {
        code: code.to_string(),
        target_url: url.to_string(),
    })
    .await
    .unwrap();
}
