//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::Link;
use crate::utils::{is_valid_code, is_valid_url};

/// Request to create a short link.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    /// Absolute URL visitors are redirected to.
    #[validate(custom(function = "validate_target_url"))]
    pub target_url: String,

    /// Optional desired code; a random one is generated when absent.
    #[validate(custom(function = "validate_short_code"))]
    pub code: Option<String>,
}

fn validate_target_url(value: &str) -> Result<(), ValidationError> {
    if is_valid_url(value) {
        Ok(())
    } else {
        Err(ValidationError::new("url").with_message("Please enter a valid URL".into()))
    }
}

fn validate_short_code(value: &str) -> Result<(), ValidationError> {
    if is_valid_code(value) {
        Ok(())
    } else {
        Err(ValidationError::new("code")
            .with_message("Code must be 6-8 alphanumeric characters".into()))
    }
}

/// JSON representation of a link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub short_url: String,
    pub total_clicks: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    /// Builds the response, rendering `short_url` from `base_url`.
    pub fn from_link(link: Link, base_url: &str) -> Self {
        Self {
            short_url: format!("{}/{}", base_url.trim_end_matches('/'), link.code),
            id: link.id,
            code: link.code,
            target_url: link.target_url,
            total_clicks: link.total_clicks,
            last_clicked_at: link.last_clicked_at,
            created_at: link.created_at,
        }
    }
}
