//! Target URL validation.
//!
//! A target is accepted when it parses as an absolute URL that names a host
//! and contains no whitespace or control characters. The string is stored
//! exactly as submitted; nothing is normalized.

use crate::error::AppError;
use serde_json::json;
use url::Url;

/// Reasons a target URL is rejected.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(#[from] url::ParseError),

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL must not contain whitespace or control characters")]
    ForbiddenCharacter,
}

/// Parses `input` as an absolute URL with a host.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for unparsable or relative URLs.
/// Returns [`UrlValidationError::MissingHost`] for hostless URLs such as `mailto:`.
/// Returns [`UrlValidationError::ForbiddenCharacter`] for input the parser would
/// silently strip or escape, since the stored string must be usable verbatim
/// as a `Location` header.
pub fn parse_target_url(input: &str) -> Result<Url, UrlValidationError> {
    if input.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return Err(UrlValidationError::ForbiddenCharacter);
    }

    let url = Url::parse(input)?;

    if !url.has_host() || url.host_str().is_some_and(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}

/// Returns true iff `input` is a well-formed absolute URL with scheme and host.
pub fn is_valid_url(input: &str) -> bool {
    parse_target_url(input).is_ok()
}

/// Validates a target URL for link creation.
///
/// # Errors
///
/// Returns [`AppError::Validation`] with the rejection reason in `details`.
pub fn validate_url(input: &str) -> Result<(), AppError> {
    parse_target_url(input).map(|_| ()).map_err(|e| {
        AppError::bad_request(
            "Please enter a valid URL",
            json!({ "url": input, "reason": e.to_string() }),
        )
    })
}
