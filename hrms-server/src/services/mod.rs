//! Business services
//!
//! Services validate, orchestrate repository calls and shape responses.
//! They take the tenant and acting user explicitly on every call.

pub mod employee;
pub mod jurisdiction;

pub use employee::{EmployeeLookup, EmployeeService};
pub use jurisdiction::JurisdictionService;

use shared::error::{AppError, ErrorCode};
use std::collections::HashSet;
use std::sync::Arc;

use crate::clients::BoundaryLookup;
use crate::error::{ServiceError, ServiceResult};

/// Acting user recorded in audit columns when no client id is supplied
pub const DEFAULT_ACTOR: &str = "system";

/// Reject boundary codes the boundary service does not know. No-op when
/// validation is disabled (`lookup` is `None`).
pub(crate) async fn check_boundaries(
    lookup: Option<&Arc<dyn BoundaryLookup>>,
    tenant_id: &str,
    codes: &[String],
) -> ServiceResult<()> {
    let Some(lookup) = lookup else {
        return Ok(());
    };
    let mut requested: Vec<String> = Vec::with_capacity(codes.len());
    for code in codes {
        if !requested.contains(code) {
            requested.push(code.clone());
        }
    }
    if requested.is_empty() {
        return Ok(());
    }

    let found = lookup
        .find_boundaries(tenant_id, &requested)
        .await
        .map_err(|e| ServiceError::Upstream(format!("boundary lookup: {e}")))?;
    let known: HashSet<&str> = found.iter().map(|b| b.code.as_str()).collect();
    let unknown: Vec<&str> = requested
        .iter()
        .map(String::as_str)
        .filter(|c| !known.contains(c))
        .collect();
    if !unknown.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::InvalidBoundary,
            format!("unknown boundary codes: {}", unknown.join(", ")),
        )
        .with_detail("codes", unknown)
        .into());
    }
    Ok(())
}
