//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthResponse};
use crate::state::AppState;

/// Returns service health status.
///
/// # Endpoint
///
/// `GET /api/healthz`
///
/// # Response Codes
///
/// - **200 OK**: Storage reachable
/// - **503 Service Unavailable**: Storage check failed
///
/// # Response
///
/// ```json
/// { "ok": true, "version": "0.1.0", "storage": { "status": "ok" } }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage = match state.link_service.storage_health().await {
        Ok(()) => CheckStatus {
            status: "ok".to_string(),
            message: None,
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Storage error: {}", e)),
        },
    };

    let ok = storage.status == "ok";
    let response = HealthResponse {
        ok,
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage,
    };

    if ok {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::error::AppError;
    use serde_json::json;
    use std::sync::Arc;

    fn state_with(mock_repo: MockLinkRepository) -> AppState {
        AppState::new(Arc::new(mock_repo), "https://s.example.com")
    }

    #[tokio::test]
    async fn test_health_ok_when_storage_reachable() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_ping().times(1).returning(|| Ok(()));

        let Json(body) = health_handler(State(state_with(mock_repo)))
            .await
            .unwrap();

        assert!(body.ok);
        assert_eq!(body.storage.status, "ok");
    }

    #[tokio::test]
    async fn test_health_unavailable_when_storage_down() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_ping()
            .times(1)
            .returning(|| Err(AppError::internal("Database error", json!({}))));

        let (status, Json(body)) = health_handler(State(state_with(mock_repo)))
            .await
            .unwrap_err();

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!body.ok);
        assert_eq!(body.storage.status, "error");
        assert!(body.storage.message.is_some());

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["ok"], false);
    }
}
