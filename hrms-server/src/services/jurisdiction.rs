//! Jurisdiction Service

use shared::error::AppError;
use shared::models::{
    Jurisdiction, JurisdictionCreate, JurisdictionResponse, JurisdictionSearchCriteria,
    JurisdictionUpdate,
};
use shared::util::now_millis;
use sqlx::SqlitePool;
use std::sync::Arc;

use super::{EmployeeLookup, check_boundaries};
use crate::clients::BoundaryLookup;
use crate::db::repository::{RepoError, jurisdiction as jurisdiction_repo};
use crate::error::{ServiceError, ServiceResult};
use crate::validation;

fn jurisdiction_missing(err: RepoError) -> ServiceError {
    match err {
        RepoError::NotFound(_) => AppError::jurisdiction_not_found().into(),
        other => other.into(),
    }
}

#[derive(Clone)]
pub struct JurisdictionService {
    pool: SqlitePool,
    employees: Arc<dyn EmployeeLookup>,
    boundaries: Option<Arc<dyn BoundaryLookup>>,
}

impl JurisdictionService {
    pub fn new(
        pool: SqlitePool,
        employees: Arc<dyn EmployeeLookup>,
        boundaries: Option<Arc<dyn BoundaryLookup>>,
    ) -> Self {
        Self {
            pool,
            employees,
            boundaries,
        }
    }

    pub async fn create_jurisdiction(
        &self,
        tenant_id: &str,
        actor: &str,
        req: JurisdictionCreate,
    ) -> ServiceResult<JurisdictionResponse> {
        validation::validate_jurisdiction_create(tenant_id, &req.employee_id, &req.boundary_relation)?;
        self.ensure_employee(tenant_id, &req.employee_id).await?;
        check_boundaries(self.boundaries.as_ref(), tenant_id, &req.boundary_relation).await?;

        let now = now_millis();
        let row = Jurisdiction {
            id: uuid::Uuid::new_v4().to_string(),
            tenant_id: tenant_id.to_string(),
            employee_id: req.employee_id,
            boundary_relation: req.boundary_relation,
            is_active: req.is_active.unwrap_or(true),
            created_by: actor.to_string(),
            last_modified_by: actor.to_string(),
            created_time: now,
            last_modified_time: now,
        };
        // A concurrent employee delete surfaces as a foreign key failure
        jurisdiction_repo::create(&self.pool, &row).await.map_err(|e| match e {
            RepoError::NotFound(_) => AppError::employee_not_found().into(),
            other => ServiceError::from(other),
        })?;

        tracing::info!(
            tenant_id = %tenant_id,
            jurisdiction_id = %row.id,
            employee_id = %row.employee_id,
            "Jurisdiction created"
        );
        Ok(row.into())
    }

    pub async fn get_jurisdiction_by_uuid(
        &self,
        tenant_id: &str,
        id: &str,
    ) -> ServiceResult<JurisdictionResponse> {
        Ok(self.load(tenant_id, id).await?.into())
    }

    pub async fn search_jurisdictions(
        &self,
        mut criteria: JurisdictionSearchCriteria,
    ) -> ServiceResult<Vec<JurisdictionResponse>> {
        validation::validate_jurisdiction_search(&mut criteria)?;
        let rows = jurisdiction_repo::search(&self.pool, &criteria).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Replace a jurisdiction. Empty `employeeId` or `boundaryRelation` keep
    /// the stored values.
    pub async fn replace_jurisdiction(
        &self,
        tenant_id: &str,
        actor: &str,
        id: &str,
        req: JurisdictionUpdate,
    ) -> ServiceResult<JurisdictionResponse> {
        validation::validate_jurisdiction_replace(tenant_id, &req.boundary_relation)?;
        let existing = self.load(tenant_id, id).await?;

        let employee_id = if req.employee_id.is_empty() || req.employee_id == existing.employee_id {
            existing.employee_id.clone()
        } else {
            self.ensure_employee(tenant_id, &req.employee_id).await?;
            req.employee_id
        };
        let boundary_relation = if req.boundary_relation.is_empty() {
            existing.boundary_relation.clone()
        } else {
            check_boundaries(self.boundaries.as_ref(), tenant_id, &req.boundary_relation).await?;
            req.boundary_relation
        };

        let updated = Jurisdiction {
            employee_id,
            boundary_relation,
            is_active: req.is_active.unwrap_or(existing.is_active),
            last_modified_by: actor.to_string(),
            last_modified_time: now_millis(),
            ..existing
        };
        let row = jurisdiction_repo::update(&self.pool, &updated)
            .await
            .map_err(jurisdiction_missing)?;
        Ok(row.into())
    }

    pub async fn delete_jurisdiction(&self, tenant_id: &str, id: &str) -> ServiceResult<()> {
        self.load(tenant_id, id).await?;
        jurisdiction_repo::delete(&self.pool, tenant_id, id)
            .await
            .map_err(jurisdiction_missing)?;
        tracing::info!(tenant_id = %tenant_id, jurisdiction_id = %id, "Jurisdiction deleted");
        Ok(())
    }

    /// All jurisdictions of one employee; 404 when the employee is unknown
    pub async fn get_jurisdictions_by_employee(
        &self,
        tenant_id: &str,
        employee_id: &str,
    ) -> ServiceResult<Vec<JurisdictionResponse>> {
        self.ensure_employee(tenant_id, employee_id).await?;
        let rows =
            jurisdiction_repo::find_by_employee_ids(&self.pool, tenant_id, &[employee_id.to_string()])
                .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ensure_employee(&self, tenant_id: &str, employee_id: &str) -> ServiceResult<()> {
        if !self.employees.employee_exists(tenant_id, employee_id).await? {
            return Err(AppError::employee_not_found()
                .with_detail("employeeId", employee_id)
                .into());
        }
        Ok(())
    }

    async fn load(&self, tenant_id: &str, id: &str) -> ServiceResult<Jurisdiction> {
        jurisdiction_repo::find_by_uuid(&self.pool, tenant_id, id)
            .await?
            .ok_or_else(|| AppError::jurisdiction_not_found().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::services::EmployeeService;
    use crate::services::testing::{FallbackIds, KnownBoundaries};
    use shared::error::ErrorCode;
    use shared::models::{BoundaryMatch, EmployeeCreate};

    struct Fixture {
        employees: Arc<EmployeeService>,
        jurisdictions: JurisdictionService,
    }

    async fn fixture_with(boundaries: Option<Arc<dyn BoundaryLookup>>) -> Fixture {
        let db = DbService::in_memory().await.unwrap();
        let employees = Arc::new(EmployeeService::new(
            db.pool.clone(),
            Arc::new(FallbackIds),
            None,
        ));
        let jurisdictions = JurisdictionService::new(db.pool, employees.clone(), boundaries);
        Fixture {
            employees,
            jurisdictions,
        }
    }

    async fn fixture() -> Fixture {
        fixture_with(None).await
    }

    impl Fixture {
        async fn employee(&self, tenant: &str) -> String {
            let req = EmployeeCreate {
                employee_type: "PERMANENT".into(),
                department: "HR".into(),
                designation: "Clerk".into(),
                ..Default::default()
            };
            let out = self
                .employees
                .create_employees(tenant, "system", vec![req])
                .await
                .unwrap();
            out[0].id.clone()
        }

        async fn jurisdiction(&self, tenant: &str, employee_id: &str, codes: &[&str]) -> String {
            let req = JurisdictionCreate {
                employee_id: employee_id.to_string(),
                boundary_relation: codes.iter().map(|c| c.to_string()).collect(),
                is_active: None,
            };
            self.jurisdictions
                .create_jurisdiction(tenant, "system", req)
                .await
                .unwrap()
                .id
        }
    }

    fn app(err: ServiceError) -> AppError {
        err.into()
    }

    fn criteria(tenant: &str) -> JurisdictionSearchCriteria {
        JurisdictionSearchCriteria {
            tenant_id: tenant.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let f = fixture().await;
        let emp = f.employee("t1").await;
        let id = f.jurisdiction("t1", &emp, &["KA", "KA-BLR"]).await;

        let got = f.jurisdictions.get_jurisdiction_by_uuid("t1", &id).await.unwrap();
        assert_eq!(got.employee_id, emp);
        assert_eq!(got.boundary_relation, vec!["KA", "KA-BLR"]);
        assert!(got.is_active);

        // Other tenants cannot see it
        let err = f.jurisdictions.get_jurisdiction_by_uuid("t2", &id).await.unwrap_err();
        assert_eq!(app(err).code, ErrorCode::JurisdictionNotFound);
    }

    #[tokio::test]
    async fn test_create_for_unknown_employee_persists_nothing() {
        let f = fixture().await;
        let req = JurisdictionCreate {
            employee_id: uuid::Uuid::new_v4().to_string(),
            boundary_relation: vec!["KA".into()],
            is_active: None,
        };
        let err = f
            .jurisdictions
            .create_jurisdiction("t1", "system", req)
            .await
            .unwrap_err();
        assert_eq!(app(err).code, ErrorCode::EmployeeNotFound);
        assert!(f.jurisdictions.search_jurisdictions(criteria("t1")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_requires_boundary_relation() {
        let f = fixture().await;
        let emp = f.employee("t1").await;
        let req = JurisdictionCreate {
            employee_id: emp,
            boundary_relation: vec![],
            is_active: None,
        };
        let err = f
            .jurisdictions
            .create_jurisdiction("t1", "system", req)
            .await
            .unwrap_err();
        assert_eq!(app(err).code, ErrorCode::RequiredField);
    }

    #[tokio::test]
    async fn test_unknown_boundary_code_rejected() {
        let f = fixture_with(Some(Arc::new(KnownBoundaries(vec!["KA"])))).await;
        let emp = f.employee("t1").await;
        let req = JurisdictionCreate {
            employee_id: emp,
            boundary_relation: vec!["KA".into(), "TN".into()],
            is_active: None,
        };
        let err = f
            .jurisdictions
            .create_jurisdiction("t1", "system", req)
            .await
            .unwrap_err();
        let err = app(err);
        assert_eq!(err.code, ErrorCode::InvalidBoundary);
        assert_eq!(err.details.unwrap()["codes"], serde_json::json!(["TN"]));
    }

    #[tokio::test]
    async fn test_search_boundary_all_and_any() {
        let f = fixture().await;
        let emp = f.employee("t1").await;
        let both = f.jurisdiction("t1", &emp, &["KA", "KA-BLR"]).await;
        let only_ka = f.jurisdiction("t1", &emp, &["KA"]).await;
        f.jurisdiction("t1", &emp, &["TN"]).await;

        let mut q = criteria("t1");
        q.boundary_codes = vec!["KA".into(), "KA-BLR".into()];
        let found = f.jurisdictions.search_jurisdictions(q.clone()).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, both);

        q.boundary_match = BoundaryMatch::Any;
        let found = f.jurisdictions.search_jurisdictions(q).await.unwrap();
        let ids: Vec<_> = found.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&both.as_str()) && ids.contains(&only_ka.as_str()));
    }

    #[tokio::test]
    async fn test_replace_keeps_empty_fields() {
        let f = fixture().await;
        let emp = f.employee("t1").await;
        let id = f.jurisdiction("t1", &emp, &["KA"]).await;

        let out = f
            .jurisdictions
            .replace_jurisdiction(
                "t1",
                "bob",
                &id,
                JurisdictionUpdate {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(out.employee_id, emp);
        assert_eq!(out.boundary_relation, vec!["KA"]);
        assert!(!out.is_active);
        assert_eq!(out.audit_details.last_modified_by, "bob");

        let out = f
            .jurisdictions
            .replace_jurisdiction(
                "t1",
                "bob",
                &id,
                JurisdictionUpdate {
                    boundary_relation: vec!["TN".into()],
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(out.boundary_relation, vec!["TN"]);
        assert!(!out.is_active);
    }

    #[tokio::test]
    async fn test_replace_with_unknown_employee_rejected() {
        let f = fixture().await;
        let emp = f.employee("t1").await;
        let id = f.jurisdiction("t1", &emp, &["KA"]).await;
        let err = f
            .jurisdictions
            .replace_jurisdiction(
                "t1",
                "system",
                &id,
                JurisdictionUpdate {
                    employee_id: "missing".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(app(err).code, ErrorCode::EmployeeNotFound);
    }

    #[tokio::test]
    async fn test_delete() {
        let f = fixture().await;
        let emp = f.employee("t1").await;
        let id = f.jurisdiction("t1", &emp, &["KA"]).await;

        f.jurisdictions.delete_jurisdiction("t1", &id).await.unwrap();
        let err = f.jurisdictions.delete_jurisdiction("t1", &id).await.unwrap_err();
        assert_eq!(app(err).code, ErrorCode::JurisdictionNotFound);
    }

    #[tokio::test]
    async fn test_by_employee() {
        let f = fixture().await;
        let emp = f.employee("t1").await;
        let other = f.employee("t1").await;
        f.jurisdiction("t1", &emp, &["KA"]).await;
        f.jurisdiction("t1", &emp, &["TN"]).await;
        f.jurisdiction("t1", &other, &["KL"]).await;

        let list = f
            .jurisdictions
            .get_jurisdictions_by_employee("t1", &emp)
            .await
            .unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|j| j.employee_id == emp));

        let err = f
            .jurisdictions
            .get_jurisdictions_by_employee("t1", "missing")
            .await
            .unwrap_err();
        assert_eq!(app(err).code, ErrorCode::EmployeeNotFound);

        // Deleting the employee takes its jurisdictions with it
        f.employees.hard_delete_employee("t1", &emp).await.unwrap();
        let mut q = criteria("t1");
        q.employee_ids = vec![emp];
        assert!(f.jurisdictions.search_jurisdictions(q).await.unwrap().is_empty());
    }
}
