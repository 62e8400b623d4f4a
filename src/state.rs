//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;

/// State shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    /// Public prefix used to render `shortUrl` in responses, without trailing slash.
    pub base_url: Arc<str>,
}

impl AppState {
    /// Builds the state around a link repository.
    pub fn new(link_repository: Arc<dyn LinkRepository>, base_url: &str) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(link_repository)),
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }
}
