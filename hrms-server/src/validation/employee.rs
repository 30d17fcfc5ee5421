//! Employee validation rules

use shared::error::{AppError, ErrorCode};
use shared::models::{
    DeactivationDetails, EmployeeCreate, EmployeePatch, EmployeeSearchCriteria, EmployeeStatus,
    EmployeeType, EmployeeUpdate, Patch, ReactivationDetails, StatusChange,
};
use sqlx::SqlitePool;

use super::{CODE_MAX_LEN, CODE_MIN_LEN, check_sort, is_valid_email, is_valid_phone, normalize_page, require};
use crate::db::repository::employee as employee_repo;
use crate::error::ServiceResult;

pub const EMPLOYEE_SORT_FIELDS: [&str; 5] = ["code", "createdAt", "updatedAt", "employeeType", "status"];

/// Borrowed view over the fields create and full update share
#[derive(Debug, Clone, Copy)]
pub struct EmployeeFields<'a> {
    pub code: Option<&'a str>,
    pub employee_type: &'a str,
    pub department: &'a str,
    pub designation: &'a str,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
}

impl<'a> From<&'a EmployeeCreate> for EmployeeFields<'a> {
    fn from(r: &'a EmployeeCreate) -> Self {
        Self {
            code: r.code.as_deref(),
            employee_type: &r.employee_type,
            department: &r.department,
            designation: &r.designation,
            phone: r.phone.as_deref(),
            email: r.email.as_deref(),
        }
    }
}

impl<'a> From<&'a EmployeeUpdate> for EmployeeFields<'a> {
    fn from(r: &'a EmployeeUpdate) -> Self {
        Self {
            code: r.code.as_deref(),
            employee_type: &r.employee_type,
            department: &r.department,
            designation: &r.designation,
            phone: r.phone.as_deref(),
            email: r.email.as_deref(),
        }
    }
}

pub fn parse_employee_type(value: &str) -> Result<EmployeeType, AppError> {
    value.parse().map_err(|_| {
        AppError::with_message(
            ErrorCode::InvalidEmployeeType,
            format!("employeeType must be one of: PERMANENT, CONTRACT, TEMPORARY (got {value})"),
        )
        .with_detail("field", "employeeType")
    })
}

pub fn parse_employee_status(value: &str) -> Result<EmployeeStatus, AppError> {
    value.parse().map_err(|_| {
        AppError::with_message(
            ErrorCode::InvalidEmployeeStatus,
            format!("status must be one of: ACTIVE, INACTIVE, SUSPENDED (got {value})"),
        )
        .with_detail("field", "status")
    })
}

pub fn check_code_length(code: &str) -> Result<(), AppError> {
    let len = code.chars().count();
    if !(CODE_MIN_LEN..=CODE_MAX_LEN).contains(&len) {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("code must be between {CODE_MIN_LEN} and {CODE_MAX_LEN} characters"),
        )
        .with_detail("field", "code"));
    }
    Ok(())
}

fn check_phone(phone: &str) -> Result<(), AppError> {
    if !is_valid_phone(phone) {
        return Err(AppError::invalid_format(
            "phone",
            "phone must be 10 digits starting with 6-9",
        ));
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), AppError> {
    if !is_valid_email(email) {
        return Err(AppError::invalid_format("email", "email is not a valid address"));
    }
    Ok(())
}

/// Field rules shared by create and full update, in order. Returns the
/// parsed employee type.
pub fn check_fields(tenant_id: &str, f: EmployeeFields<'_>) -> Result<EmployeeType, AppError> {
    require(tenant_id, "tenantId")?;
    require(f.employee_type, "employeeType")?;
    let employee_type = parse_employee_type(f.employee_type)?;
    require(f.department, "department")?;
    require(f.designation, "designation")?;
    if let Some(code) = f.code
        && !code.is_empty()
    {
        check_code_length(code)?;
    }
    if let Some(phone) = f.phone
        && !phone.is_empty()
    {
        check_phone(phone)?;
    }
    if let Some(email) = f.email
        && !email.is_empty()
    {
        check_email(email)?;
    }
    Ok(employee_type)
}

/// Fails with a duplicate error when another row in the tenant owns `code`
pub async fn ensure_code_unique(
    pool: &SqlitePool,
    tenant_id: &str,
    code: &str,
    existing_id: Option<&str>,
) -> ServiceResult<()> {
    let taken = match existing_id {
        None => employee_repo::employee_code_exists(pool, tenant_id, code).await?,
        Some(id) => employee_repo::find_by_code(pool, tenant_id, code)
            .await?
            .is_some_and(|found| found.id != id),
    };
    if taken {
        return Err(AppError::duplicate_code(code).into());
    }
    Ok(())
}

/// Full create/update validation: field rules, then the duplicate-code check
/// against stored rows other than `existing_id`.
pub async fn validate_create(
    pool: &SqlitePool,
    tenant_id: &str,
    fields: EmployeeFields<'_>,
    existing_id: Option<&str>,
) -> ServiceResult<EmployeeType> {
    let employee_type = check_fields(tenant_id, fields)?;
    if let Some(code) = fields.code
        && !code.is_empty()
    {
        ensure_code_unique(pool, tenant_id, code, existing_id).await?;
    }
    Ok(employee_type)
}

/// Parsed enum values of a validated patch
#[derive(Debug, Default)]
pub struct ValidatedPatch {
    pub employee_type: Option<EmployeeType>,
    pub status: Option<EmployeeStatus>,
}

fn reject_null<T>(field: &Patch<T>, name: &str) -> Result<(), AppError> {
    if field.is_null() {
        return Err(AppError::validation(format!("{name} cannot be null")).with_detail("field", name));
    }
    Ok(())
}

/// Validate only the fields present in a patch. Code uniqueness is checked
/// by the caller against the stored row.
pub fn validate_patch(patch: &EmployeePatch) -> Result<ValidatedPatch, AppError> {
    reject_null(&patch.code, "code")?;
    reject_null(&patch.employee_type, "employeeType")?;
    reject_null(&patch.status, "status")?;
    reject_null(&patch.department, "department")?;
    reject_null(&patch.designation, "designation")?;
    reject_null(&patch.is_active, "isActive")?;

    let mut out = ValidatedPatch::default();
    if let Some(code) = patch.code.value()
        && !code.is_empty()
    {
        check_code_length(code)?;
    }
    if let Some(t) = patch.employee_type.value() {
        out.employee_type = Some(parse_employee_type(t)?);
    }
    if let Some(s) = patch.status.value() {
        out.status = Some(parse_employee_status(s)?);
    }
    if let Some(phone) = patch.phone.value() {
        check_phone(phone)?;
    }
    if let Some(email) = patch.email.value() {
        check_email(email)?;
    }
    Ok(out)
}

/// Normalize paging and reject unknown sort keys or enum filters
pub fn validate_employee_search(criteria: &mut EmployeeSearchCriteria) -> Result<(), AppError> {
    require(&criteria.tenant_id, "tenantId")?;
    normalize_page(&mut criteria.limit, &mut criteria.offset);
    check_sort(
        criteria.sort_by.as_deref(),
        criteria.sort_order.as_deref(),
        &EMPLOYEE_SORT_FIELDS,
    )?;
    for status in &criteria.statuses {
        parse_employee_status(status)?;
    }
    for t in &criteria.employee_types {
        parse_employee_type(t)?;
    }
    Ok(())
}

fn check_transition_details(reason: &str, reason_field: &str, effective_from: Option<i64>) -> Result<i64, AppError> {
    require(reason, reason_field)?;
    effective_from.ok_or_else(|| AppError::required("effectiveFrom"))
}

/// ACTIVE -> INACTIVE
pub fn validate_deactivation(
    current: EmployeeStatus,
    details: &DeactivationDetails,
) -> Result<StatusChange, AppError> {
    let effective_from = check_transition_details(
        &details.reason_for_deactivation,
        "reasonForDeactivation",
        details.effective_from,
    )?;
    check_transition(current, EmployeeStatus::Inactive)?;
    Ok(StatusChange {
        to: EmployeeStatus::Inactive,
        is_active: false,
        reason: details.reason_for_deactivation.clone(),
        effective_from,
        remarks: details.remarks.clone(),
    })
}

/// INACTIVE -> ACTIVE
pub fn validate_reactivation(
    current: EmployeeStatus,
    details: &ReactivationDetails,
) -> Result<StatusChange, AppError> {
    let effective_from = check_transition_details(
        &details.reason_for_reactivation,
        "reasonForReactivation",
        details.effective_from,
    )?;
    check_transition(current, EmployeeStatus::Active)?;
    Ok(StatusChange {
        to: EmployeeStatus::Active,
        is_active: true,
        reason: details.reason_for_reactivation.clone(),
        effective_from,
        remarks: details.remarks.clone(),
    })
}

/// Allowed transitions: ACTIVE <-> INACTIVE. SUSPENDED is terminal.
pub fn check_transition(from: EmployeeStatus, to: EmployeeStatus) -> Result<(), AppError> {
    use EmployeeStatus::*;
    match (from, to) {
        (Active, Inactive) | (Inactive, Active) => Ok(()),
        _ => Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("cannot move employee from {from} to {to}"),
        )
        .with_detail("from", from.as_str())
        .with_detail("to", to.as_str())),
    }
}
