//! Employee Service

use async_trait::async_trait;
use shared::error::AppError;
use shared::models::{
    DeactivationDetails, Employee, EmployeeCreate, EmployeePatch, EmployeeResponse,
    EmployeeSearchCriteria, EmployeeStatus, EmployeeUpdate, Jurisdiction, JurisdictionResponse,
    ReactivationDetails, StatusChange,
};
use shared::util::now_millis;
use sqlx::SqlitePool;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::check_boundaries;
use crate::clients::{BoundaryLookup, IdGenerator, fallback_id};
use crate::db::repository::{RepoError, employee as employee_repo, jurisdiction as jurisdiction_repo};
use crate::error::{ServiceError, ServiceResult};
use crate::validation;

/// Narrow read capability other services need from employees
#[async_trait]
pub trait EmployeeLookup: Send + Sync {
    async fn employee_exists(&self, tenant_id: &str, id: &str) -> ServiceResult<bool>;
}

/// Repository NotFound becomes the employee-specific 404
fn employee_missing(err: RepoError) -> ServiceError {
    match err {
        RepoError::NotFound(_) => AppError::employee_not_found().into(),
        other => other.into(),
    }
}

#[derive(Clone)]
pub struct EmployeeService {
    pool: SqlitePool,
    id_generator: Arc<dyn IdGenerator>,
    boundaries: Option<Arc<dyn BoundaryLookup>>,
}

impl EmployeeService {
    pub fn new(
        pool: SqlitePool,
        id_generator: Arc<dyn IdGenerator>,
        boundaries: Option<Arc<dyn BoundaryLookup>>,
    ) -> Self {
        Self {
            pool,
            id_generator,
            boundaries,
        }
    }

    /// Validate every request, generate missing codes, then persist the
    /// whole batch (with inline jurisdictions) in one transaction.
    pub async fn create_employees(
        &self,
        tenant_id: &str,
        actor: &str,
        requests: Vec<EmployeeCreate>,
    ) -> ServiceResult<Vec<EmployeeResponse>> {
        if requests.is_empty() {
            return Err(AppError::validation("at least one employee is required").into());
        }

        let mut batch_codes = HashSet::new();
        let mut employee_types = Vec::with_capacity(requests.len());
        for req in &requests {
            let employee_type =
                validation::validate_create(&self.pool, tenant_id, req.into(), None).await?;
            if let Some(code) = req.code.as_deref().filter(|c| !c.is_empty())
                && !batch_codes.insert(code.to_string())
            {
                return Err(AppError::duplicate_code(code).into());
            }
            for j in &req.jurisdictions {
                validation::validate_jurisdiction_create(tenant_id, "inline", &j.boundary_relation)?;
            }
            employee_types.push(employee_type);
        }
        let boundary_codes: Vec<String> = requests
            .iter()
            .flat_map(|r| r.jurisdictions.iter())
            .flat_map(|j| j.boundary_relation.iter().cloned())
            .collect();
        check_boundaries(self.boundaries.as_ref(), tenant_id, &boundary_codes).await?;

        let missing = requests
            .iter()
            .filter(|r| r.code.as_deref().is_none_or(str::is_empty))
            .count();
        let generated = self.generate_codes(tenant_id, missing).await;
        let mut generated = self
            .unique_codes(tenant_id, generated, &mut batch_codes)
            .await?
            .into_iter();

        let now = now_millis();
        let mut rows = Vec::with_capacity(requests.len());
        let mut jurisdictions: Vec<Jurisdiction> = Vec::new();
        for (req, employee_type) in requests.into_iter().zip(employee_types) {
            let code = match req.code.filter(|c| !c.is_empty()) {
                Some(code) => code,
                None => generated.next().unwrap_or_else(fallback_id),
            };
            let id = uuid::Uuid::new_v4().to_string();
            for j in req.jurisdictions {
                jurisdictions.push(Jurisdiction {
                    id: uuid::Uuid::new_v4().to_string(),
                    tenant_id: tenant_id.to_string(),
                    employee_id: id.clone(),
                    boundary_relation: j.boundary_relation,
                    is_active: j.is_active.unwrap_or(true),
                    created_by: actor.to_string(),
                    last_modified_by: actor.to_string(),
                    created_time: now,
                    last_modified_time: now,
                });
            }
            rows.push(Employee {
                id,
                tenant_id: tenant_id.to_string(),
                code,
                name: req.name,
                user_id: req.user_id,
                individual_id: req.individual_id,
                employee_type,
                status: EmployeeStatus::Active,
                department: req.department,
                designation: req.designation,
                phone: req.phone,
                email: req.email,
                gender: req.gender,
                date_of_birth: req.date_of_birth,
                date_of_appointment: req.date_of_appointment,
                date_of_retirement: req.date_of_retirement,
                is_active: req.is_active.unwrap_or(true),
                status_reason: None,
                status_remarks: None,
                status_effective_from: None,
                created_by: actor.to_string(),
                last_modified_by: actor.to_string(),
                created_time: now,
                last_modified_time: now,
            });
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::from(e).context("employee.create_batch"))?;
        for row in &rows {
            employee_repo::create(&mut *tx, row).await?;
        }
        for j in &jurisdictions {
            jurisdiction_repo::create(&mut *tx, j).await?;
        }
        tx.commit()
            .await
            .map_err(|e| RepoError::from(e).context("employee.create_batch"))?;

        tracing::info!(tenant_id = %tenant_id, count = rows.len(), "Employees created");
        Ok(attach_jurisdictions(rows, jurisdictions))
    }

    /// Exactly `count` codes; a generator error degrades to fallbacks
    async fn generate_codes(&self, tenant_id: &str, count: usize) -> Vec<String> {
        if count == 0 {
            return Vec::new();
        }
        match self
            .id_generator
            .generate_ids(tenant_id, count, &HashMap::new())
            .await
        {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(tenant_id = %tenant_id, error = %e, "ID generation unavailable, using fallback codes");
                Vec::new()
            }
        }
    }

    /// Replace generated codes that are blank, repeated within the batch or
    /// already stored in the tenant with fallback ids
    async fn unique_codes(
        &self,
        tenant_id: &str,
        generated: Vec<String>,
        taken: &mut HashSet<String>,
    ) -> ServiceResult<Vec<String>> {
        let mut out = Vec::with_capacity(generated.len());
        for code in generated {
            let clash = code.is_empty()
                || taken.contains(&code)
                || employee_repo::employee_code_exists(&self.pool, tenant_id, &code).await?;
            let code = if clash {
                let replacement = fallback_id();
                tracing::warn!(
                    tenant_id = %tenant_id,
                    generated = %code,
                    replacement = %replacement,
                    "Generated employee code already taken, using fallback"
                );
                replacement
            } else {
                code
            };
            taken.insert(code.clone());
            out.push(code);
        }
        Ok(out)
    }

    pub async fn search_employees(
        &self,
        mut criteria: EmployeeSearchCriteria,
    ) -> ServiceResult<Vec<EmployeeResponse>> {
        validation::validate_employee_search(&mut criteria)?;
        let rows = employee_repo::search(&self.pool, &criteria).await?;
        self.with_jurisdictions(&criteria.tenant_id, rows).await
    }

    pub async fn get_employee_by_uuid(
        &self,
        tenant_id: &str,
        id: &str,
    ) -> ServiceResult<EmployeeResponse> {
        let row = self.load(tenant_id, id).await?;
        self.one_with_jurisdictions(row).await
    }

    /// Replace every mutable attribute. An empty code keeps the stored one.
    pub async fn update_employee(
        &self,
        tenant_id: &str,
        actor: &str,
        id: &str,
        req: EmployeeUpdate,
    ) -> ServiceResult<EmployeeResponse> {
        let existing = self.load(tenant_id, id).await?;
        let employee_type =
            validation::validate_create(&self.pool, tenant_id, (&req).into(), Some(id)).await?;

        let updated = Employee {
            code: req.code.filter(|c| !c.is_empty()).unwrap_or(existing.code),
            name: req.name,
            user_id: req.user_id,
            individual_id: req.individual_id,
            employee_type,
            department: req.department,
            designation: req.designation,
            phone: req.phone,
            email: req.email,
            gender: req.gender,
            date_of_birth: req.date_of_birth,
            date_of_appointment: req.date_of_appointment,
            date_of_retirement: req.date_of_retirement,
            is_active: req.is_active.unwrap_or(existing.is_active),
            last_modified_by: actor.to_string(),
            last_modified_time: now_millis(),
            ..existing
        };
        let row = employee_repo::update(&self.pool, &updated)
            .await
            .map_err(employee_missing)?;
        self.one_with_jurisdictions(row).await
    }

    /// Apply only the fields present in the patch
    pub async fn patch_employee(
        &self,
        tenant_id: &str,
        actor: &str,
        id: &str,
        patch: EmployeePatch,
    ) -> ServiceResult<EmployeeResponse> {
        let parsed = validation::validate_patch(&patch)?;
        let mut row = self.load(tenant_id, id).await?;

        if let Some(code) = patch.code.value()
            && !code.is_empty()
            && *code != row.code
        {
            validation::ensure_code_unique(&self.pool, tenant_id, code, Some(id)).await?;
        }

        patch.code.apply_to(&mut row.code);
        patch.name.apply_to_option(&mut row.name);
        patch.user_id.apply_to_option(&mut row.user_id);
        patch.individual_id.apply_to_option(&mut row.individual_id);
        if let Some(t) = parsed.employee_type {
            row.employee_type = t;
        }
        if let Some(s) = parsed.status {
            row.status = s;
        }
        patch.department.apply_to(&mut row.department);
        patch.designation.apply_to(&mut row.designation);
        patch.phone.apply_to_option(&mut row.phone);
        patch.email.apply_to_option(&mut row.email);
        patch.gender.apply_to_option(&mut row.gender);
        patch.date_of_birth.apply_to_option(&mut row.date_of_birth);
        patch
            .date_of_appointment
            .apply_to_option(&mut row.date_of_appointment);
        patch
            .date_of_retirement
            .apply_to_option(&mut row.date_of_retirement);
        patch.is_active.apply_to(&mut row.is_active);
        row.last_modified_by = actor.to_string();
        row.last_modified_time = now_millis();

        let row = employee_repo::update(&self.pool, &row)
            .await
            .map_err(employee_missing)?;
        self.one_with_jurisdictions(row).await
    }

    /// Remove the employee and, by cascade, its jurisdictions
    pub async fn hard_delete_employee(&self, tenant_id: &str, id: &str) -> ServiceResult<()> {
        employee_repo::delete(&self.pool, tenant_id, id)
            .await
            .map_err(employee_missing)?;
        tracing::info!(tenant_id = %tenant_id, employee_id = %id, "Employee deleted");
        Ok(())
    }

    pub async fn deactivate_employee(
        &self,
        tenant_id: &str,
        actor: &str,
        id: &str,
        details: DeactivationDetails,
    ) -> ServiceResult<EmployeeResponse> {
        let row = self.load(tenant_id, id).await?;
        let change = validation::validate_deactivation(row.status, &details)?;
        self.apply_status_change(tenant_id, actor, id, &change).await
    }

    pub async fn reactivate_employee(
        &self,
        tenant_id: &str,
        actor: &str,
        id: &str,
        details: ReactivationDetails,
    ) -> ServiceResult<EmployeeResponse> {
        let row = self.load(tenant_id, id).await?;
        let change = validation::validate_reactivation(row.status, &details)?;
        self.apply_status_change(tenant_id, actor, id, &change).await
    }

    async fn apply_status_change(
        &self,
        tenant_id: &str,
        actor: &str,
        id: &str,
        change: &StatusChange,
    ) -> ServiceResult<EmployeeResponse> {
        let now = now_millis();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::from(e).context("employee.status_change"))?;
        employee_repo::update_status(&mut *tx, tenant_id, id, change.to, actor, now)
            .await
            .map_err(employee_missing)?;
        employee_repo::update_is_active(&mut *tx, tenant_id, id, change.is_active, actor, now)
            .await
            .map_err(employee_missing)?;
        employee_repo::record_status_change(&mut *tx, tenant_id, id, change, actor, now)
            .await
            .map_err(employee_missing)?;
        tx.commit()
            .await
            .map_err(|e| RepoError::from(e).context("employee.status_change"))?;

        tracing::info!(
            tenant_id = %tenant_id,
            employee_id = %id,
            status = %change.to,
            "Employee status changed"
        );
        self.get_employee_by_uuid(tenant_id, id).await
    }

    async fn load(&self, tenant_id: &str, id: &str) -> ServiceResult<Employee> {
        employee_repo::find_by_uuid(&self.pool, tenant_id, id)
            .await?
            .ok_or_else(|| AppError::employee_not_found().into())
    }

    async fn one_with_jurisdictions(&self, row: Employee) -> ServiceResult<EmployeeResponse> {
        let tenant_id = row.tenant_id.clone();
        let mut out = self.with_jurisdictions(&tenant_id, vec![row]).await?;
        out.pop()
            .ok_or_else(|| AppError::internal("employee projection missing").into())
    }

    async fn with_jurisdictions(
        &self,
        tenant_id: &str,
        rows: Vec<Employee>,
    ) -> ServiceResult<Vec<EmployeeResponse>> {
        let ids: Vec<String> = rows.iter().map(|e| e.id.clone()).collect();
        let jurisdictions = jurisdiction_repo::find_by_employee_ids(&self.pool, tenant_id, &ids).await?;
        Ok(attach_jurisdictions(rows, jurisdictions))
    }
}

/// Group jurisdictions under their employees, preserving row order
fn attach_jurisdictions(rows: Vec<Employee>, jurisdictions: Vec<Jurisdiction>) -> Vec<EmployeeResponse> {
    let mut by_employee: HashMap<String, Vec<JurisdictionResponse>> = HashMap::new();
    for j in jurisdictions {
        by_employee
            .entry(j.employee_id.clone())
            .or_default()
            .push(j.into());
    }
    rows.into_iter()
        .map(|e| {
            let js = by_employee.remove(&e.id).unwrap_or_default();
            e.into_response(js)
        })
        .collect()
}

#[async_trait]
impl EmployeeLookup for EmployeeService {
    async fn employee_exists(&self, tenant_id: &str, id: &str) -> ServiceResult<bool> {
        Ok(employee_repo::find_by_uuid(&self.pool, tenant_id, id)
            .await?
            .is_some())
    }
}
