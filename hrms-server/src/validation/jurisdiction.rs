//! Jurisdiction validation rules

use shared::error::AppError;
use shared::models::JurisdictionSearchCriteria;

use super::{check_sort, normalize_page, require};

pub const JURISDICTION_SORT_FIELDS: [&str; 3] = ["createdAt", "updatedAt", "employeeId"];

fn check_boundary_codes(codes: &[String]) -> Result<(), AppError> {
    if codes.iter().any(|c| c.trim().is_empty()) {
        return Err(AppError::invalid_format(
            "boundaryRelation",
            "boundaryRelation must not contain blank codes",
        ));
    }
    Ok(())
}

/// employeeId present, at least one boundary code, none blank
pub fn validate_jurisdiction_create(
    tenant_id: &str,
    employee_id: &str,
    boundary_relation: &[String],
) -> Result<(), AppError> {
    require(tenant_id, "tenantId")?;
    require(employee_id, "employeeId")?;
    if boundary_relation.is_empty() {
        return Err(AppError::required("boundaryRelation"));
    }
    check_boundary_codes(boundary_relation)
}

/// Empty fields on a replace keep the stored values, so only the codes that
/// were sent are checked.
pub fn validate_jurisdiction_replace(
    tenant_id: &str,
    boundary_relation: &[String],
) -> Result<(), AppError> {
    require(tenant_id, "tenantId")?;
    check_boundary_codes(boundary_relation)
}

pub fn validate_jurisdiction_search(
    criteria: &mut JurisdictionSearchCriteria,
) -> Result<(), AppError> {
    require(&criteria.tenant_id, "tenantId")?;
    normalize_page(&mut criteria.limit, &mut criteria.offset);
    check_sort(
        criteria.sort_by.as_deref(),
        criteria.sort_order.as_deref(),
        &JURISDICTION_SORT_FIELDS,
    )?;
    check_boundary_codes(&criteria.boundary_codes)
}
