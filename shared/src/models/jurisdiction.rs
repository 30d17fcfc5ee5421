//! Jurisdiction Model

use serde::{Deserialize, Serialize};

use super::{AuditDetails, millis_to_datetime};

/// Jurisdiction entity (DB row)
///
/// `boundary_relation` is stored as a JSON array of boundary codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Jurisdiction {
    pub id: String,
    pub tenant_id: String,
    pub employee_id: String,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub boundary_relation: Vec<String>,
    pub is_active: bool,
    pub created_by: String,
    pub last_modified_by: String,
    pub created_time: i64,
    pub last_modified_time: i64,
}

/// Jurisdiction attached inline to an employee creation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JurisdictionInput {
    pub boundary_relation: Vec<String>,
    pub is_active: Option<bool>,
}

/// Create jurisdiction payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JurisdictionCreate {
    pub employee_id: String,
    pub boundary_relation: Vec<String>,
    pub is_active: Option<bool>,
}

/// Replace jurisdiction payload (PUT)
///
/// An empty `boundaryRelation` keeps the stored relation; a missing
/// `isActive` keeps the stored flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JurisdictionUpdate {
    pub employee_id: String,
    pub boundary_relation: Vec<String>,
    pub is_active: Option<bool>,
}

/// How multiple boundary codes combine in a search
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryMatch {
    /// Every code must be present (narrowing)
    #[default]
    All,
    /// Any code may be present (widening)
    Any,
}

/// Jurisdiction search criteria
#[derive(Debug, Clone, Default)]
pub struct JurisdictionSearchCriteria {
    pub tenant_id: String,
    pub ids: Vec<String>,
    pub employee_ids: Vec<String>,
    pub boundary_codes: Vec<String>,
    pub boundary_match: BoundaryMatch,
    pub is_active: Option<bool>,
    pub limit: i64,
    pub offset: i64,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Jurisdiction response projection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JurisdictionResponse {
    pub id: String,
    pub tenant_id: String,
    pub employee_id: String,
    pub boundary_relation: Vec<String>,
    pub is_active: bool,
    pub audit_details: AuditDetails,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Jurisdiction> for JurisdictionResponse {
    fn from(j: Jurisdiction) -> Self {
        Self {
            created_at: millis_to_datetime(j.created_time),
            updated_at: millis_to_datetime(j.last_modified_time),
            audit_details: AuditDetails {
                created_by: j.created_by,
                last_modified_by: j.last_modified_by,
                created_time: j.created_time,
                last_modified_time: j.last_modified_time,
            },
            id: j.id,
            tenant_id: j.tenant_id,
            employee_id: j.employee_id,
            boundary_relation: j.boundary_relation,
            is_active: j.is_active,
        }
    }
}

/// `{"jurisdiction": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JurisdictionEnvelope {
    pub jurisdiction: JurisdictionResponse,
}

/// `{"jurisdictions": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JurisdictionListEnvelope {
    pub jurisdictions: Vec<JurisdictionResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_match_serde() {
        assert_eq!(serde_json::to_string(&BoundaryMatch::Any).unwrap(), "\"any\"");
        let m: BoundaryMatch = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(m, BoundaryMatch::All);
        assert_eq!(BoundaryMatch::default(), BoundaryMatch::All);
    }

    #[test]
    fn test_envelope_shape() {
        let row = Jurisdiction {
            id: "j1".into(),
            tenant_id: "t1".into(),
            employee_id: "e1".into(),
            boundary_relation: vec!["KA".into()],
            is_active: true,
            created_by: "system".into(),
            last_modified_by: "system".into(),
            created_time: 0,
            last_modified_time: 0,
        };
        let json = serde_json::to_value(JurisdictionEnvelope {
            jurisdiction: row.into(),
        })
        .unwrap();
        assert_eq!(json["jurisdiction"]["employeeId"], "e1");
        assert_eq!(json["jurisdiction"]["boundaryRelation"][0], "KA");
        assert_eq!(json["jurisdiction"]["createdAt"], "1970-01-01T00:00:00Z");
    }
}
