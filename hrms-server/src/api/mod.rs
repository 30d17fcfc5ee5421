//! API routes for hrms-server

pub mod employees;
pub mod health;
pub mod jurisdictions;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::routing::get;
use axum::{Json, Router, middleware};
use shared::error::AppError;
use tower_http::timeout::TimeoutLayer;

use crate::middleware::{logging_middleware, tenant_middleware};
use crate::state::AppState;

type ApiResult<T> = Result<T, AppError>;

/// Path ids are UUIDs; anything else is rejected before touching storage
fn parse_id(raw: &str) -> ApiResult<String> {
    uuid::Uuid::parse_str(raw)
        .map(|id| id.to_string())
        .map_err(|_| AppError::invalid_format("id", format!("id must be a UUID (got {raw})")))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| AppError::invalid_request(e.body_text()))
}

fn query_params<T>(params: Result<axum::extract::Query<T>, QueryRejection>) -> ApiResult<T> {
    params
        .map(|q| q.0)
        .map_err(|e| AppError::invalid_request(e.body_text()))
}

/// Create the combined router
///
/// `/health` always answers at the root. Business routes require a tenant and
/// are nested under the configured context path when one is set.
pub fn create_router(state: AppState) -> Router {
    let business = Router::new()
        .merge(jurisdictions::router())
        .merge(employees::router())
        .layer(middleware::from_fn(tenant_middleware));

    let business = if state.config.context_path.is_empty() {
        business
    } else {
        Router::new().nest(&state.config.context_path, business)
    };

    Router::new()
        .route("/health", get(health::health_check))
        .merge(business)
        .layer(TimeoutLayer::new(state.config.request_timeout))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[test]
    fn test_parse_id() {
        let id = uuid::Uuid::new_v4().to_string();
        assert_eq!(parse_id(&id).unwrap(), id);
        // Normalized to lowercase hyphenated form
        assert_eq!(
            parse_id("67E55044-10B1-426F-9247-BB680E5FE0C8").unwrap(),
            "67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
        assert_eq!(parse_id("not-a-uuid").unwrap_err().code, ErrorCode::InvalidFormat);
    }
}
