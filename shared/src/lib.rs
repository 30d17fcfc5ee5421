//! Shared types for the HRMS service
//!
//! Error codes and API error bodies, domain models, and small utilities
//! used by the server and its tests.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};
