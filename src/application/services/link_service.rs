//! Link allocation, redirect resolution and management.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_code};
use crate::utils::url_validator::validate_url;

/// Consecutive collisions tolerated before allocation gives up.
pub const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Service implementing the four core link operations.
///
/// The store's unique constraint on `code` is the only correctness guarantee
/// for allocation; the existence check done here merely avoids most failed
/// inserts. Likewise the store's atomic increment is what keeps concurrent
/// redirects from losing clicks.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    code_generator: fn() -> String,
}

impl LinkService {
    /// Creates a new link service backed by `link_repository`.
    pub fn new(link_repository: Arc<dyn LinkRepository>) -> Self {
        Self {
            link_repository,
            code_generator: generate_code,
        }
    }

    /// Replaces the random code source.
    pub fn with_code_generator(mut self, code_generator: fn() -> String) -> Self {
        self.code_generator = code_generator;
        self
    }

    /// Allocates a new link for `target_url`.
    ///
    /// # Code Selection
    ///
    /// - If `desired_code` is given, it is validated and used as-is
    /// - Otherwise random 7-character codes are drawn until an unused one is
    ///   found, giving up after [`MAX_GENERATION_ATTEMPTS`] consecutive collisions
    ///
    /// A unique violation raised by the store at insert time is handled exactly
    /// like a collision found by the pre-check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or the desired code is malformed.
    /// Returns [`AppError::Conflict`] if the desired code is already taken.
    /// Returns [`AppError::Exhausted`] if no free code was found.
    pub async fn create_link(
        &self,
        target_url: String,
        desired_code: Option<String>,
    ) -> Result<Link, AppError> {
        validate_url(&target_url)?;

        let link = match desired_code {
            Some(code) => self.create_with_desired_code(target_url, code).await?,
            None => self.create_with_generated_code(target_url).await?,
        };

        tracing::info!(code = %link.code, id = link.id, "Link created");

        Ok(link)
    }

    async fn create_with_desired_code(
        &self,
        target_url: String,
        code: String,
    ) -> Result<Link, AppError> {
        validate_code(&code)?;

        if self.link_repository.find_by_code(&code).await?.is_some() {
            return Err(code_taken(&code));
        }

        let new_link = NewLink {
            code: code.clone(),
            target_url,
        };

        match self.link_repository.create(new_link).await {
            Err(AppError::Conflict { .. }) => Err(code_taken(&code)),
            other => other,
        }
    }

    async fn create_with_generated_code(&self, target_url: String) -> Result<Link, AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let code = (self.code_generator)();

            if self.link_repository.find_by_code(&code).await?.is_some() {
                tracing::debug!(%code, attempt, "Generated code already in use");
                continue;
            }

            let new_link = NewLink {
                code: code.clone(),
                target_url: target_url.clone(),
            };

            match self.link_repository.create(new_link).await {
                Err(AppError::Conflict { .. }) => {
                    tracing::debug!(%code, attempt, "Generated code taken concurrently");
                }
                other => return other,
            }
        }

        tracing::warn!(
            attempts = MAX_GENERATION_ATTEMPTS,
            "Failed to generate a unique code"
        );

        Err(AppError::exhausted(
            "Failed to generate unique code",
            json!({ "attempts": MAX_GENERATION_ATTEMPTS }),
        ))
    }

    /// Resolves `code` to its target URL and records one click.
    ///
    /// Lookup and increment are separate store calls. If the link is deleted
    /// in between, the increment reports not-found and so does this method.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let link = self
            .link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| link_not_found(code))?;

        match self.link_repository.increment_click(code).await {
            Ok(_) => Ok(link.target_url),
            Err(AppError::NotFound { .. }) => {
                tracing::warn!(%code, "Link removed between lookup and click increment");
                Err(link_not_found(code))
            }
            Err(e) => Err(e),
        }
    }

    /// Retrieves a single link without recording a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| link_not_found(code))
    }

    /// Lists all links, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.list().await
    }

    /// Deletes a link permanently.
    ///
    /// Returns `false` when no link had this code; that is not an error.
    pub async fn delete_link(&self, code: &str) -> Result<bool, AppError> {
        let deleted = self.link_repository.delete_by_code(code).await?;

        if deleted {
            tracing::info!(%code, "Link deleted");
        }

        Ok(deleted)
    }

    /// Checks that the backing store answers.
    pub async fn storage_health(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }
}

fn code_taken(code: &str) -> AppError {
    AppError::conflict("Code already exists", json!({ "code": code }))
}

fn link_not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}
