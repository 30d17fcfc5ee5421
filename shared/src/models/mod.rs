//! Data models
//!
//! Shared between hrms-server and its API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are UUID strings; all timestamps are epoch milliseconds.

pub mod employee;
pub mod jurisdiction;
pub mod patch;

// Re-exports
pub use employee::*;
pub use jurisdiction::*;
pub use patch::Patch;

pub(crate) use crate::util::millis_to_datetime;

use serde::{Deserialize, Serialize};

/// Audit block carried by every persisted record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditDetails {
    pub created_by: String,
    pub last_modified_by: String,
    pub created_time: i64,
    pub last_modified_time: i64,
}
