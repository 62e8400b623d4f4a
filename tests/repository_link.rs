//! PostgreSQL repository tests.
//!
//! Run with a database available:
//! `DATABASE_URL=postgres://... cargo test --test repository_link -- --ignored`

use short_link::domain::entities::NewLink;
use short_link::domain::repositories::LinkRepository;
use short_link::error::AppError;
use short_link::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(code: &str, url: &str) -> NewLink {
    NewLink {
        code: code.to_string(),
        target_url: url.to_string(),
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo
        .create(new_link("test123", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(link.code, "test123");
    assert_eq!(link.target_url, "https://example.com");
    assert_eq!(link.total_clicks, 0);
    assert!(link.last_clicked_at.is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_duplicate_code_is_conflict(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_link("dup1234", "https://a.com"))
        .await
        .unwrap();

    let result = repo.create(new_link("dup1234", "https://b.com")).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_code_not_found(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let result = repo.find_by_code("notfound").await.unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_increments_are_not_lost(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    repo.create(new_link("hot1234", "https://example.com"))
        .await
        .unwrap();

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.increment_click("hot1234").await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let link = repo.find_by_code("hot1234").await.unwrap().unwrap();
    assert_eq!(link.total_clicks, 20);
    assert!(link.last_clicked_at.unwrap() >= link.created_at);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_increment_unknown_code(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let result = repo.increment_click("missing").await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_newest_first(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_link("older01", "https://1.com")).await.unwrap();
    repo.create(new_link("newer01", "https://2.com")).await.unwrap();

    let codes: Vec<String> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.code)
        .collect();

    assert_eq!(codes, vec!["newer01", "older01"]);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_by_code(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_link("gone123", "https://a.com")).await.unwrap();

    assert!(repo.delete_by_code("gone123").await.unwrap());
    assert!(!repo.delete_by_code("gone123").await.unwrap());
    assert!(repo.find_by_code("gone123").await.unwrap().is_none());
}
