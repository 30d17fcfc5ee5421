//! Jurisdiction Repository

use super::filter::QueryBuilder;
use super::{RepoError, RepoResult, sort_direction};
use shared::models::{BoundaryMatch, Jurisdiction, JurisdictionSearchCriteria};
use sqlx::types::Json;
use sqlx::{SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, tenant_id, employee_id, boundary_relation, is_active, \
     created_by, last_modified_by, created_time, last_modified_time";

fn sort_column(sort_by: Option<&str>) -> &'static str {
    match sort_by {
        Some("updatedAt") => "last_modified_time",
        Some("employeeId") => "employee_id",
        _ => "created_time",
    }
}

pub async fn create<'e, E>(executor: E, j: &Jurisdiction) -> RepoResult<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(&format!(
        "INSERT INTO jurisdiction ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"
    ))
    .bind(&j.id)
    .bind(&j.tenant_id)
    .bind(&j.employee_id)
    .bind(Json(&j.boundary_relation))
    .bind(j.is_active)
    .bind(&j.created_by)
    .bind(&j.last_modified_by)
    .bind(j.created_time)
    .bind(j.last_modified_time)
    .execute(executor)
    .await
    .map_err(|e| RepoError::from(e).context("jurisdiction.create"))?;
    Ok(())
}

pub async fn find_by_uuid(
    pool: &SqlitePool,
    tenant_id: &str,
    id: &str,
) -> RepoResult<Option<Jurisdiction>> {
    let row = sqlx::query_as::<_, Jurisdiction>(&format!(
        "SELECT {COLUMNS} FROM jurisdiction WHERE id = ? AND tenant_id = ?"
    ))
    .bind(id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| RepoError::from(e).context("jurisdiction.find_by_uuid"))?;
    Ok(row)
}

/// All jurisdictions of the given employees, oldest first
pub async fn find_by_employee_ids(
    pool: &SqlitePool,
    tenant_id: &str,
    employee_ids: &[String],
) -> RepoResult<Vec<Jurisdiction>> {
    if employee_ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut qb = QueryBuilder::new();
    qb.add_eq("tenant_id", tenant_id)
        .add_in("employee_id", employee_ids);
    let sql = format!(
        "SELECT {COLUMNS} FROM jurisdiction{} ORDER BY created_time ASC, rowid ASC",
        qb.build_where_clause()
    );
    let rows = qb
        .apply_bindings(sqlx::query_as::<_, Jurisdiction>(&sql))
        .fetch_all(pool)
        .await
        .map_err(|e| RepoError::from(e).context("jurisdiction.find_by_employee_ids"))?;
    Ok(rows)
}

pub async fn update(pool: &SqlitePool, j: &Jurisdiction) -> RepoResult<Jurisdiction> {
    let rows = sqlx::query(
        "UPDATE jurisdiction SET employee_id = ?, boundary_relation = ?, is_active = ?, \
         last_modified_by = ?, last_modified_time = ? WHERE id = ? AND tenant_id = ?",
    )
    .bind(&j.employee_id)
    .bind(Json(&j.boundary_relation))
    .bind(j.is_active)
    .bind(&j.last_modified_by)
    .bind(j.last_modified_time)
    .bind(&j.id)
    .bind(&j.tenant_id)
    .execute(pool)
    .await
    .map_err(|e| RepoError::from(e).context("jurisdiction.update"))?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Jurisdiction {} not found", j.id)));
    }
    find_by_uuid(pool, &j.tenant_id, &j.id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Jurisdiction {} not found", j.id)))
}

pub async fn delete(pool: &SqlitePool, tenant_id: &str, id: &str) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM jurisdiction WHERE id = ? AND tenant_id = ?")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await
        .map_err(|e| RepoError::from(e).context("jurisdiction.delete"))?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Jurisdiction {id} not found")));
    }
    Ok(())
}

pub async fn search(
    pool: &SqlitePool,
    criteria: &JurisdictionSearchCriteria,
) -> RepoResult<Vec<Jurisdiction>> {
    let mut qb = QueryBuilder::new();
    qb.add_eq("tenant_id", criteria.tenant_id.as_str())
        .add_in("id", &criteria.ids)
        .add_in("employee_id", &criteria.employee_ids)
        .add_opt_bool("is_active", criteria.is_active)
        .add_json_contains(
            "jurisdiction.boundary_relation",
            &criteria.boundary_codes,
            criteria.boundary_match == BoundaryMatch::All,
        );

    let direction = sort_direction(criteria.sort_order.as_deref());
    let where_clause = qb.build_where_clause();
    let page = qb.paginate(criteria.limit, criteria.offset);
    let sql = format!(
        "SELECT {COLUMNS} FROM jurisdiction{where_clause} ORDER BY {} {direction}, rowid {direction}{page}",
        sort_column(criteria.sort_by.as_deref()),
    );

    let rows = qb
        .apply_bindings(sqlx::query_as::<_, Jurisdiction>(&sql))
        .fetch_all(pool)
        .await
        .map_err(|e| RepoError::from(e).context("jurisdiction.search"))?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::employee;
    use crate::db::repository::employee::tests::sample;

    fn jurisdiction(tenant: &str, employee_id: &str, codes: &[&str]) -> Jurisdiction {
        Jurisdiction {
            id: uuid::Uuid::new_v4().to_string(),
            tenant_id: tenant.to_string(),
            employee_id: employee_id.to_string(),
            boundary_relation: codes.iter().map(|c| c.to_string()).collect(),
            is_active: true,
            created_by: "system".to_string(),
            last_modified_by: "system".to_string(),
            created_time: 1_000,
            last_modified_time: 1_000,
        }
    }

    fn criteria(tenant: &str) -> JurisdictionSearchCriteria {
        JurisdictionSearchCriteria {
            tenant_id: tenant.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_roundtrips_boundary_json() {
        let db = DbService::in_memory().await.unwrap();
        let emp = sample("t1", "E1");
        employee::create(&db.pool, &emp).await.unwrap();

        let j = jurisdiction("t1", &emp.id, &["KA", "KA-BLR"]);
        create(&db.pool, &j).await.unwrap();

        let found = find_by_uuid(&db.pool, "t1", &j.id).await.unwrap().unwrap();
        assert_eq!(found.boundary_relation, vec!["KA", "KA-BLR"]);
        assert_eq!(found.employee_id, emp.id);
    }

    #[tokio::test]
    async fn test_unknown_employee_violates_foreign_key() {
        let db = DbService::in_memory().await.unwrap();
        let j = jurisdiction("t1", "missing-employee", &["KA"]);
        let err = create(&db.pool, &j).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_employee_delete_cascades() {
        let db = DbService::in_memory().await.unwrap();
        let emp = sample("t1", "E1");
        employee::create(&db.pool, &emp).await.unwrap();
        let j = jurisdiction("t1", &emp.id, &["KA"]);
        create(&db.pool, &j).await.unwrap();

        employee::delete(&db.pool, "t1", &emp.id).await.unwrap();
        assert!(find_by_uuid(&db.pool, "t1", &j.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_boundary_search_all_and_any() {
        let db = DbService::in_memory().await.unwrap();
        let emp = sample("t1", "E1");
        employee::create(&db.pool, &emp).await.unwrap();
        let both = jurisdiction("t1", &emp.id, &["KA", "KA-BLR"]);
        let state_only = jurisdiction("t1", &emp.id, &["KA"]);
        let other = jurisdiction("t1", &emp.id, &["TN"]);
        for j in [&both, &state_only, &other] {
            create(&db.pool, j).await.unwrap();
        }

        let mut q = criteria("t1");
        q.boundary_codes = vec!["KA".into(), "KA-BLR".into()];
        let rows = search(&db.pool, &q).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, both.id);

        q.boundary_match = BoundaryMatch::Any;
        let rows = search(&db.pool, &q).await.unwrap();
        assert_eq!(rows.len(), 2);

        let mut q = criteria("t1");
        q.boundary_codes = vec!["TN".into()];
        let rows = search(&db.pool, &q).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, other.id);
    }

    #[tokio::test]
    async fn test_find_by_employee_ids_and_update() {
        let db = DbService::in_memory().await.unwrap();
        let e1 = sample("t1", "E1");
        let e2 = sample("t1", "E2");
        employee::create(&db.pool, &e1).await.unwrap();
        employee::create(&db.pool, &e2).await.unwrap();
        let mut j1 = jurisdiction("t1", &e1.id, &["KA"]);
        create(&db.pool, &j1).await.unwrap();
        create(&db.pool, &jurisdiction("t1", &e2.id, &["TN"])).await.unwrap();

        let rows = find_by_employee_ids(&db.pool, "t1", &[e1.id.clone()])
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert!(find_by_employee_ids(&db.pool, "t2", &[e1.id.clone()])
            .await
            .unwrap()
            .is_empty());

        j1.employee_id = e2.id.clone();
        j1.is_active = false;
        let updated = update(&db.pool, &j1).await.unwrap();
        assert_eq!(updated.employee_id, e2.id);
        assert!(!updated.is_active);

        let mut q = criteria("t1");
        q.employee_ids = vec![e2.id.clone()];
        q.is_active = Some(true);
        assert_eq!(search(&db.pool, &q).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing() {
        let db = DbService::in_memory().await.unwrap();
        let err = delete(&db.pool, "t1", "nope").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
