//! Jurisdiction API

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use shared::models::{
    BoundaryMatch, JurisdictionCreate, JurisdictionEnvelope, JurisdictionListEnvelope,
    JurisdictionSearchCriteria, JurisdictionUpdate,
};
use shared::util::split_csv;

use super::{ApiResult, json_body, parse_id, query_params};
use crate::middleware::TenantIdentity;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/employees/v3/jurisdictions", get(search).post(create))
        .route(
            "/employees/v3/jurisdictions/{id}",
            get(get_by_id).put(replace).delete(delete),
        )
}

/// Query string of `GET /employees/v3/jurisdictions`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JurisdictionSearchParams {
    pub ids: Option<String>,
    pub employee_id: Option<String>,
    pub employee_ids: Option<String>,
    /// Boundary codes, comma-separated
    pub boundary_relation: Option<String>,
    pub boundary_match: Option<BoundaryMatch>,
    pub is_active: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl JurisdictionSearchParams {
    fn into_criteria(self, tenant_id: String) -> JurisdictionSearchCriteria {
        let mut employee_ids = split_csv(self.employee_ids.as_deref());
        for id in split_csv(self.employee_id.as_deref()) {
            if !employee_ids.contains(&id) {
                employee_ids.push(id);
            }
        }
        JurisdictionSearchCriteria {
            tenant_id,
            ids: split_csv(self.ids.as_deref()),
            employee_ids,
            boundary_codes: split_csv(self.boundary_relation.as_deref()),
            boundary_match: self.boundary_match.unwrap_or_default(),
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
    payload: Result<Json<JurisdictionCreate>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<JurisdictionEnvelope>)> {
    let req = json_body(payload)?;
    let jurisdiction = state
        .jurisdictions
        .create_jurisdiction(&identity.tenant_id, &identity.actor, req)
        .await?;
    Ok((StatusCode::CREATED, Json(JurisdictionEnvelope { jurisdiction })))
}

async fn search(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    params: Result<Query<JurisdictionSearchParams>, QueryRejection>,
) -> ApiResult<Json<JurisdictionListEnvelope>> {
    let criteria = query_params(params)?.into_criteria(identity.tenant_id);
    let jurisdictions = state.jurisdictions.search_jurisdictions(criteria).await?;
    Ok(Json(JurisdictionListEnvelope { jurisdictions }))
}

async fn get_by_id(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Path(id): Path<String>,
) -> ApiResult<Json<JurisdictionEnvelope>> {
    let id = parse_id(&id)?;
    let jurisdiction = state
        .jurisdictions
        .get_jurisdiction_by_uuid(&identity.tenant_id, &id)
        .await?;
    Ok(Json(JurisdictionEnvelope { jurisdiction }))
}

async fn replace(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Path(id): Path<String>,
    payload: Result<Json<JurisdictionUpdate>, JsonRejection>,
) -> ApiResult<Json<JurisdictionEnvelope>> {
    let id = parse_id(&id)?;
    let req = json_body(payload)?;
    let jurisdiction = state
        .jurisdictions
        .replace_jurisdiction(&identity.tenant_id, &identity.actor, &id, req)
        .await?;
    Ok(Json(JurisdictionEnvelope { jurisdiction }))
}

async fn delete(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    state
        .jurisdictions
        .delete_jurisdiction(&identity.tenant_id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
