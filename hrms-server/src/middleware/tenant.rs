//! Tenant extraction
//!
//! Every business route is scoped by `X-Tenant-ID`. `X-Client-ID` names the
//! acting user for audit columns.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::error::AppError;

use crate::clients::TENANT_HEADER;
use crate::services::DEFAULT_ACTOR;

pub const CLIENT_HEADER: &str = "X-Client-ID";

/// Caller identity taken from request headers
#[derive(Debug, Clone)]
pub struct TenantIdentity {
    pub tenant_id: String,
    /// Acting user, `system` when no client id was sent
    pub actor: String,
}

fn header_value(request: &Request, name: &str) -> Option<String> {
    request
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Reject requests without a tenant and attach [`TenantIdentity`]
pub async fn tenant_middleware(mut request: Request, next: Next) -> Response {
    let Some(tenant_id) = header_value(&request, TENANT_HEADER) else {
        return AppError::tenant_required().into_response();
    };
    let actor = header_value(&request, CLIENT_HEADER).unwrap_or_else(|| DEFAULT_ACTOR.to_string());

    request
        .extensions_mut()
        .insert(TenantIdentity { tenant_id, actor });
    next.run(request).await
}
