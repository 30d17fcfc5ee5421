//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// - 0xxx: General errors
/// - 1xxx: Tenant errors
/// - 2xxx: Employee errors
/// - 3xxx: Jurisdiction errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Tenant errors (1xxx)
    Tenant,
    /// Employee errors (2xxx)
    Employee,
    /// Jurisdiction errors (3xxx)
    Jurisdiction,
    /// System errors (9xxx and anything unassigned)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Tenant,
            2000..3000 => Self::Employee,
            3000..4000 => Self::Jurisdiction,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Tenant => "tenant",
            Self::Employee => "employee",
            Self::Jurisdiction => "jurisdiction",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Tenant);
        assert_eq!(ErrorCategory::from_code(2005), ErrorCategory::Employee);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Jurisdiction);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(5000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::TenantRequired.category(), ErrorCategory::Tenant);
        assert_eq!(
            ErrorCode::EmployeeCodeExists.category(),
            ErrorCategory::Employee
        );
        assert_eq!(
            ErrorCode::JurisdictionNotFound.category(),
            ErrorCategory::Jurisdiction
        );
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&ErrorCategory::Jurisdiction).unwrap();
        assert_eq!(json, "\"jurisdiction\"");

        let category: ErrorCategory = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(category, ErrorCategory::System);
        assert_eq!(category.name(), "system");
    }
}
