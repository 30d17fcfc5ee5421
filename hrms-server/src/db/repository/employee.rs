//! Employee Repository

use super::filter::QueryBuilder;
use super::{RepoError, RepoResult, sort_direction};
use shared::models::{Employee, EmployeeSearchCriteria, EmployeeStatus, StatusChange};
use sqlx::{SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, tenant_id, code, name, user_id, individual_id, employee_type, status, \
     department, designation, phone, email, gender, date_of_birth, date_of_appointment, \
     date_of_retirement, is_active, status_reason, status_remarks, status_effective_from, \
     created_by, last_modified_by, created_time, last_modified_time";

/// Client sort key to column. Unknown keys fall back to creation time.
fn sort_column(sort_by: Option<&str>) -> &'static str {
    match sort_by {
        Some("code") => "code",
        Some("updatedAt") => "last_modified_time",
        Some("employeeType") => "employee_type",
        Some("status") => "status",
        _ => "created_time",
    }
}

pub async fn create<'e, E>(executor: E, emp: &Employee) -> RepoResult<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(&format!(
        "INSERT INTO employee ({COLUMNS}) VALUES \
         (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
    ))
    .bind(&emp.id)
    .bind(&emp.tenant_id)
    .bind(&emp.code)
    .bind(&emp.name)
    .bind(&emp.user_id)
    .bind(&emp.individual_id)
    .bind(emp.employee_type)
    .bind(emp.status)
    .bind(&emp.department)
    .bind(&emp.designation)
    .bind(&emp.phone)
    .bind(&emp.email)
    .bind(&emp.gender)
    .bind(emp.date_of_birth)
    .bind(emp.date_of_appointment)
    .bind(emp.date_of_retirement)
    .bind(emp.is_active)
    .bind(&emp.status_reason)
    .bind(&emp.status_remarks)
    .bind(emp.status_effective_from)
    .bind(&emp.created_by)
    .bind(&emp.last_modified_by)
    .bind(emp.created_time)
    .bind(emp.last_modified_time)
    .execute(executor)
    .await
    .map_err(|e| RepoError::from(e).context("employee.create"))?;
    Ok(())
}

pub async fn find_by_uuid(
    pool: &SqlitePool,
    tenant_id: &str,
    id: &str,
) -> RepoResult<Option<Employee>> {
    let emp = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employee WHERE id = ? AND tenant_id = ?"
    ))
    .bind(id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| RepoError::from(e).context("employee.find_by_uuid"))?;
    Ok(emp)
}

pub async fn find_by_code(
    pool: &SqlitePool,
    tenant_id: &str,
    code: &str,
) -> RepoResult<Option<Employee>> {
    let emp = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employee WHERE code = ? AND tenant_id = ? LIMIT 1"
    ))
    .bind(code)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| RepoError::from(e).context("employee.find_by_code"))?;
    Ok(emp)
}

pub async fn employee_code_exists(
    pool: &SqlitePool,
    tenant_id: &str,
    code: &str,
) -> RepoResult<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM employee WHERE code = ? AND tenant_id = ?")
            .bind(code)
            .bind(tenant_id)
            .fetch_one(pool)
            .await
            .map_err(|e| RepoError::from(e).context("employee.code_exists"))?;
    Ok(count > 0)
}

/// Overwrite every mutable column of an existing row
pub async fn update(pool: &SqlitePool, emp: &Employee) -> RepoResult<Employee> {
    let rows = sqlx::query(
        "UPDATE employee SET code = ?, name = ?, user_id = ?, individual_id = ?, \
         employee_type = ?, status = ?, department = ?, designation = ?, phone = ?, email = ?, \
         gender = ?, date_of_birth = ?, date_of_appointment = ?, date_of_retirement = ?, \
         is_active = ?, last_modified_by = ?, last_modified_time = ? \
         WHERE id = ? AND tenant_id = ?",
    )
    .bind(&emp.code)
    .bind(&emp.name)
    .bind(&emp.user_id)
    .bind(&emp.individual_id)
    .bind(emp.employee_type)
    .bind(emp.status)
    .bind(&emp.department)
    .bind(&emp.designation)
    .bind(&emp.phone)
    .bind(&emp.email)
    .bind(&emp.gender)
    .bind(emp.date_of_birth)
    .bind(emp.date_of_appointment)
    .bind(emp.date_of_retirement)
    .bind(emp.is_active)
    .bind(&emp.last_modified_by)
    .bind(emp.last_modified_time)
    .bind(&emp.id)
    .bind(&emp.tenant_id)
    .execute(pool)
    .await
    .map_err(|e| RepoError::from(e).context("employee.update"))?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {} not found", emp.id)));
    }
    find_by_uuid(pool, &emp.tenant_id, &emp.id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", emp.id)))
}

/// Hard delete; jurisdictions go with it through the foreign key cascade
pub async fn delete(pool: &SqlitePool, tenant_id: &str, id: &str) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM employee WHERE id = ? AND tenant_id = ?")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await
        .map_err(|e| RepoError::from(e).context("employee.delete"))?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {id} not found")));
    }
    Ok(())
}

pub async fn search(pool: &SqlitePool, criteria: &EmployeeSearchCriteria) -> RepoResult<Vec<Employee>> {
    let mut qb = QueryBuilder::new();
    qb.add_eq("tenant_id", criteria.tenant_id.as_str())
        .add_in("id", &criteria.ids)
        .add_in("code", &criteria.codes)
        .add_in("department", &criteria.departments)
        .add_in("designation", &criteria.designations)
        .add_in("status", &criteria.statuses)
        .add_in("employee_type", &criteria.employee_types)
        .add_opt_eq("phone", criteria.phone.as_deref())
        .add_opt_bool("is_active", criteria.is_active);

    let direction = sort_direction(criteria.sort_order.as_deref());
    let where_clause = qb.build_where_clause();
    let page = qb.paginate(criteria.limit, criteria.offset);
    let sql = format!(
        "SELECT {COLUMNS} FROM employee{where_clause} ORDER BY {} {direction}, rowid {direction}{page}",
        sort_column(criteria.sort_by.as_deref()),
    );

    let rows = qb
        .apply_bindings(sqlx::query_as::<_, Employee>(&sql))
        .fetch_all(pool)
        .await
        .map_err(|e| RepoError::from(e).context("employee.search"))?;
    Ok(rows)
}

pub async fn update_status<'e, E>(
    executor: E,
    tenant_id: &str,
    id: &str,
    status: EmployeeStatus,
    modified_by: &str,
    now: i64,
) -> RepoResult<()>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query(
        "UPDATE employee SET status = ?, last_modified_by = ?, last_modified_time = ? \
         WHERE id = ? AND tenant_id = ?",
    )
    .bind(status)
    .bind(modified_by)
    .bind(now)
    .bind(id)
    .bind(tenant_id)
    .execute(executor)
    .await
    .map_err(|e| RepoError::from(e).context("employee.update_status"))?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {id} not found")));
    }
    Ok(())
}

pub async fn update_is_active<'e, E>(
    executor: E,
    tenant_id: &str,
    id: &str,
    is_active: bool,
    modified_by: &str,
    now: i64,
) -> RepoResult<()>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query(
        "UPDATE employee SET is_active = ?, last_modified_by = ?, last_modified_time = ? \
         WHERE id = ? AND tenant_id = ?",
    )
    .bind(is_active)
    .bind(modified_by)
    .bind(now)
    .bind(id)
    .bind(tenant_id)
    .execute(executor)
    .await
    .map_err(|e| RepoError::from(e).context("employee.update_is_active"))?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {id} not found")));
    }
    Ok(())
}

/// Store reason, remarks and effective date of the latest status transition
pub async fn record_status_change<'e, E>(
    executor: E,
    tenant_id: &str,
    id: &str,
    change: &StatusChange,
    modified_by: &str,
    now: i64,
) -> RepoResult<()>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query(
        "UPDATE employee SET status_reason = ?, status_remarks = ?, status_effective_from = ?, \
         last_modified_by = ?, last_modified_time = ? WHERE id = ? AND tenant_id = ?",
    )
    .bind(&change.reason)
    .bind(&change.remarks)
    .bind(change.effective_from)
    .bind(modified_by)
    .bind(now)
    .bind(id)
    .bind(tenant_id)
    .execute(executor)
    .await
    .map_err(|e| RepoError::from(e).context("employee.record_status_change"))?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {id} not found")));
    }
    Ok(())
}
