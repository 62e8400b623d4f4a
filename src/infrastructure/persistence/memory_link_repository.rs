//! In-process link repository.
//!
//! Keeps every link in a map guarded by a single async lock. Intended for
//! local development (`STORAGE_BACKEND=memory`) and for tests; nothing is
//! persisted across restarts.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Map-backed repository.
///
/// Each mutation runs under the write lock, so insert-if-absent and the click
/// increment are atomic with respect to other requests.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: RwLock<HashMap<String, Link>>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub async fn len(&self) -> usize {
        self.links.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.links.read().await.is_empty()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.read().await.get(code).cloned())
    }

    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.write().await;

        if links.contains_key(&new_link.code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "links_code_key" }),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let link = Link::new(id, new_link.code, new_link.target_url, Utc::now());
        links.insert(link.code.clone(), link.clone());

        Ok(link)
    }

    async fn increment_click(&self, code: &str) -> Result<Link, AppError> {
        let mut links = self.links.write().await;

        let link = links
            .get_mut(code)
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;
        link.record_click(Utc::now());

        Ok(link.clone())
    }

    async fn list(&self) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self.links.read().await.values().cloned().collect();
        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(links)
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.links.write().await.remove(code).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
