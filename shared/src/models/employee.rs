//! Employee Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::jurisdiction::{JurisdictionInput, JurisdictionResponse};
use super::patch::Patch;
use super::{AuditDetails, millis_to_datetime};

/// Employment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum EmployeeType {
    Permanent,
    Contract,
    Temporary,
}

impl EmployeeType {
    pub const ALL: [EmployeeType; 3] = [Self::Permanent, Self::Contract, Self::Temporary];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Permanent => "PERMANENT",
            Self::Contract => "CONTRACT",
            Self::Temporary => "TEMPORARY",
        }
    }
}

impl FromStr for EmployeeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|t| t.as_str() == s).ok_or(())
    }
}

impl fmt::Display for EmployeeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employment status
///
/// ACTIVE and INACTIVE move between each other through deactivate and
/// reactivate. SUSPENDED can only be reached by a direct patch and has no
/// outgoing transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum EmployeeStatus {
    Active,
    Inactive,
    Suspended,
}

impl EmployeeStatus {
    pub const ALL: [EmployeeStatus; 3] = [Self::Active, Self::Inactive, Self::Suspended];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Suspended => "SUSPENDED",
        }
    }
}

impl FromStr for EmployeeStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|t| t.as_str() == s).ok_or(())
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employee entity (DB row)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: String,
    pub tenant_id: String,
    pub code: String,
    pub name: Option<String>,
    pub user_id: Option<String>,
    pub individual_id: Option<String>,
    pub employee_type: EmployeeType,
    pub status: EmployeeStatus,
    pub department: String,
    pub designation: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<i64>,
    pub date_of_appointment: Option<i64>,
    pub date_of_retirement: Option<i64>,
    pub is_active: bool,
    /// Reason given for the last status transition
    pub status_reason: Option<String>,
    pub status_remarks: Option<String>,
    pub status_effective_from: Option<i64>,
    pub created_by: String,
    pub last_modified_by: String,
    pub created_time: i64,
    pub last_modified_time: i64,
}

/// Create employee payload (one element of the POST array)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeCreate {
    /// Generated when absent or empty
    pub code: Option<String>,
    pub name: Option<String>,
    pub user_id: Option<String>,
    pub individual_id: Option<String>,
    pub employee_type: String,
    pub department: String,
    pub designation: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<i64>,
    pub date_of_appointment: Option<i64>,
    pub date_of_retirement: Option<i64>,
    pub is_active: Option<bool>,
    pub jurisdictions: Vec<JurisdictionInput>,
}

/// Full update payload (PUT)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeUpdate {
    /// Empty keeps the stored code
    pub code: Option<String>,
    pub name: Option<String>,
    pub user_id: Option<String>,
    pub individual_id: Option<String>,
    pub employee_type: String,
    pub department: String,
    pub designation: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<i64>,
    pub date_of_appointment: Option<i64>,
    pub date_of_retirement: Option<i64>,
    /// Missing keeps the stored value
    pub is_active: Option<bool>,
}

/// Partial update payload (PATCH)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeePatch {
    pub code: Patch<String>,
    pub name: Patch<String>,
    pub user_id: Patch<String>,
    pub individual_id: Patch<String>,
    pub employee_type: Patch<String>,
    pub status: Patch<String>,
    pub department: Patch<String>,
    pub designation: Patch<String>,
    pub phone: Patch<String>,
    pub email: Patch<String>,
    pub gender: Patch<String>,
    pub date_of_birth: Patch<i64>,
    pub date_of_appointment: Patch<i64>,
    pub date_of_retirement: Patch<i64>,
    pub is_active: Patch<bool>,
}

/// Deactivation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeactivationDetails {
    pub reason_for_deactivation: String,
    pub effective_from: Option<i64>,
    pub remarks: Option<String>,
}

/// Reactivation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReactivationDetails {
    pub reason_for_reactivation: String,
    pub effective_from: Option<i64>,
    pub remarks: Option<String>,
}

/// A validated status transition, ready to persist
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub to: EmployeeStatus,
    pub is_active: bool,
    pub reason: String,
    pub effective_from: i64,
    pub remarks: Option<String>,
}

/// Employee search criteria
#[derive(Debug, Clone, Default)]
pub struct EmployeeSearchCriteria {
    pub tenant_id: String,
    pub ids: Vec<String>,
    pub codes: Vec<String>,
    pub departments: Vec<String>,
    pub designations: Vec<String>,
    pub statuses: Vec<String>,
    pub employee_types: Vec<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
    pub limit: i64,
    pub offset: i64,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Last status transition, as shown to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeDetails {
    pub reason: String,
    pub remarks: Option<String>,
    pub effective_from: Option<i64>,
}

/// Employee response projection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: String,
    pub tenant_id: String,
    pub code: String,
    pub name: Option<String>,
    pub user_id: Option<String>,
    pub individual_id: Option<String>,
    pub employee_type: EmployeeType,
    pub status: EmployeeStatus,
    pub department: String,
    pub designation: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<i64>,
    pub date_of_appointment: Option<i64>,
    pub date_of_retirement: Option<i64>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_change: Option<StatusChangeDetails>,
    pub jurisdictions: Vec<JurisdictionResponse>,
    pub audit_details: AuditDetails,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Employee {
    pub fn into_response(self, jurisdictions: Vec<JurisdictionResponse>) -> EmployeeResponse {
        let status_change = self.status_reason.map(|reason| StatusChangeDetails {
            reason,
            remarks: self.status_remarks,
            effective_from: self.status_effective_from,
        });
        EmployeeResponse {
            created_at: millis_to_datetime(self.created_time),
            updated_at: millis_to_datetime(self.last_modified_time),
            audit_details: AuditDetails {
                created_by: self.created_by,
                last_modified_by: self.last_modified_by,
                created_time: self.created_time,
                last_modified_time: self.last_modified_time,
            },
            id: self.id,
            tenant_id: self.tenant_id,
            code: self.code,
            name: self.name,
            user_id: self.user_id,
            individual_id: self.individual_id,
            employee_type: self.employee_type,
            status: self.status,
            department: self.department,
            designation: self.designation,
            phone: self.phone,
            email: self.email,
            gender: self.gender,
            date_of_birth: self.date_of_birth,
            date_of_appointment: self.date_of_appointment,
            date_of_retirement: self.date_of_retirement,
            is_active: self.is_active,
            status_change,
            jurisdictions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_parsing() {
        assert_eq!("PERMANENT".parse(), Ok(EmployeeType::Permanent));
        assert_eq!("TEMPORARY".parse(), Ok(EmployeeType::Temporary));
        assert!("permanent".parse::<EmployeeType>().is_err());
        assert_eq!("SUSPENDED".parse(), Ok(EmployeeStatus::Suspended));
        assert!("RETIRED".parse::<EmployeeStatus>().is_err());
    }

    #[test]
    fn test_create_payload_camel_case() {
        let json = r#"{
            "employeeType": "CONTRACT",
            "department": "HR",
            "designation": "Clerk",
            "dateOfAppointment": 1700000000000,
            "jurisdictions": [{"boundaryRelation": ["KA", "KA-BLR"]}]
        }"#;
        let req: EmployeeCreate = serde_json::from_str(json).unwrap();
        assert_eq!(req.employee_type, "CONTRACT");
        assert!(req.code.is_none());
        assert_eq!(req.date_of_appointment, Some(1_700_000_000_000));
        assert_eq!(req.jurisdictions[0].boundary_relation, vec!["KA", "KA-BLR"]);
    }

    #[test]
    fn test_patch_payload() {
        let json = r#"{"department": "", "phone": null}"#;
        let req: EmployeePatch = serde_json::from_str(json).unwrap();
        assert_eq!(req.department, Patch::Value(String::new()));
        assert!(req.phone.is_null());
        assert!(req.code.is_absent());
    }

    #[test]
    fn test_response_shape() {
        let row = Employee {
            id: "e1".into(),
            tenant_id: "pb.amritsar".into(),
            code: "EMP-1".into(),
            name: None,
            user_id: None,
            individual_id: None,
            employee_type: EmployeeType::Permanent,
            status: EmployeeStatus::Inactive,
            department: "HR".into(),
            designation: "Clerk".into(),
            phone: None,
            email: None,
            gender: None,
            date_of_birth: None,
            date_of_appointment: None,
            date_of_retirement: None,
            is_active: false,
            status_reason: Some("Transfer".into()),
            status_remarks: None,
            status_effective_from: Some(1_000),
            created_by: "alice".into(),
            last_modified_by: "bob".into(),
            created_time: 1_000,
            last_modified_time: 2_000,
        };
        let json = serde_json::to_value(row.into_response(vec![])).unwrap();
        assert_eq!(json["employeeType"], "PERMANENT");
        assert_eq!(json["status"], "INACTIVE");
        assert_eq!(json["isActive"], false);
        assert_eq!(json["statusChange"]["reason"], "Transfer");
        assert_eq!(json["auditDetails"]["createdBy"], "alice");
        assert_eq!(json["auditDetails"]["lastModifiedTime"], 2_000);
        assert!(json["jurisdictions"].as_array().unwrap().is_empty());
    }
}
