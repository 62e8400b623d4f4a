//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::is_valid_code;

/// Redirects a short code to its target URL and records the click.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Codes that cannot exist (wrong length or characters) are answered with
/// 404 without querying the store.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    if !is_valid_code(&code) {
        return Err(AppError::not_found(
            "Short link not found",
            json!({ "code": code }),
        ));
    }

    let target_url = state.link_service.resolve(&code).await?;
    tracing::debug!(%code, %target_url, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, target_url)]))
}
