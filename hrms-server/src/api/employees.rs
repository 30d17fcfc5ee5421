//! Employee API
//!
//! | Method | Path |
//! |---|---|
//! | POST, GET | `/employees/v3` |
//! | GET, PUT, PATCH, DELETE | `/employees/v3/{id}` |
//! | POST | `/employees/v3/{id}/deactivate`, `/employees/v3/{id}/reactivate` |
//! | GET | `/employees/v3/{id}/jurisdictions` |

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use shared::models::{
    DeactivationDetails, EmployeeCreate, EmployeePatch, EmployeeResponse, EmployeeSearchCriteria,
    EmployeeUpdate, JurisdictionListEnvelope, ReactivationDetails,
};
use shared::util::split_csv;

use super::{ApiResult, json_body, parse_id, query_params};
use crate::middleware::TenantIdentity;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/employees/v3", post(create).get(search))
        .route(
            "/employees/v3/{id}",
            get(get_by_id).put(update).patch(patch).delete(delete),
        )
        .route("/employees/v3/{id}/deactivate", post(deactivate))
        .route("/employees/v3/{id}/reactivate", post(reactivate))
        .route("/employees/v3/{id}/jurisdictions", get(list_jurisdictions))
}

/// Query string of `GET /employees/v3`; lists are comma-separated
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeSearchParams {
    pub ids: Option<String>,
    pub codes: Option<String>,
    pub departments: Option<String>,
    pub designations: Option<String>,
    pub statuses: Option<String>,
    pub employee_types: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl EmployeeSearchParams {
    fn into_criteria(self, tenant_id: String) -> EmployeeSearchCriteria {
        EmployeeSearchCriteria {
            tenant_id,
            ids: split_csv(self.ids.as_deref()),
            codes: split_csv(self.codes.as_deref()),
            departments: split_csv(self.departments.as_deref()),
            designations: split_csv(self.designations.as_deref()),
            statuses: split_csv(self.statuses.as_deref()),
            employee_types: split_csv(self.employee_types.as_deref()),
            phone: self.phone.filter(|p| !p.is_empty()),
            is_active: self.is_active,
            limit: self.limit.unwrap_or(0),
            offset: self.offset.unwrap_or(0),
            sort_by: self.sort_by.filter(|s| !s.is_empty()),
            sort_order: self.sort_order.filter(|s| !s.is_empty()),
        }
    }
}

async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    payload: Result<Json<Vec<EmployeeCreate>>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Vec<EmployeeResponse>>)> {
    let requests = json_body(payload)?;
    let created = state
        .employees
        .create_employees(&identity.tenant_id, &identity.actor, requests)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn search(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    params: Result<Query<EmployeeSearchParams>, QueryRejection>,
) -> ApiResult<Json<Vec<EmployeeResponse>>> {
    let criteria = query_params(params)?.into_criteria(identity.tenant_id);
    let found = state.employees.search_employees(criteria).await?;
    Ok(Json(found))
}

async fn get_by_id(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Path(id): Path<String>,
) -> ApiResult<Json<EmployeeResponse>> {
    let id = parse_id(&id)?;
    let employee = state
        .employees
        .get_employee_by_uuid(&identity.tenant_id, &id)
        .await?;
    Ok(Json(employee))
}

async fn update(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeeUpdate>, JsonRejection>,
) -> ApiResult<Json<EmployeeResponse>> {
    let id = parse_id(&id)?;
    let req = json_body(payload)?;
    let employee = state
        .employees
        .update_employee(&identity.tenant_id, &identity.actor, &id, req)
        .await?;
    Ok(Json(employee))
}

async fn patch(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeePatch>, JsonRejection>,
) -> ApiResult<Json<EmployeeResponse>> {
    let id = parse_id(&id)?;
    let req = json_body(payload)?;
    let employee = state
        .employees
        .patch_employee(&identity.tenant_id, &identity.actor, &id, req)
        .await?;
    Ok(Json(employee))
}

async fn delete(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    state
        .employees
        .hard_delete_employee(&identity.tenant_id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn deactivate(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Path(id): Path<String>,
    payload: Result<Json<DeactivationDetails>, JsonRejection>,
) -> ApiResult<Json<EmployeeResponse>> {
    let id = parse_id(&id)?;
    let details = json_body(payload)?;
    let employee = state
        .employees
        .deactivate_employee(&identity.tenant_id, &identity.actor, &id, details)
        .await?;
    Ok(Json(employee))
}

async fn reactivate(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Path(id): Path<String>,
    payload: Result<Json<ReactivationDetails>, JsonRejection>,
) -> ApiResult<Json<EmployeeResponse>> {
    let id = parse_id(&id)?;
    let details = json_body(payload)?;
    let employee = state
        .employees
        .reactivate_employee(&identity.tenant_id, &identity.actor, &id, details)
        .await?;
    Ok(Json(employee))
}

async fn list_jurisdictions(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Path(id): Path<String>,
) -> ApiResult<Json<JurisdictionListEnvelope>> {
    let id = parse_id(&id)?;
    let jurisdictions = state
        .jurisdictions
        .get_jurisdictions_by_employee(&identity.tenant_id, &id)
        .await?;
    Ok(Json(JurisdictionListEnvelope { jurisdictions }))
}
