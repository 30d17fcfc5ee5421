//! Outbound clients for the ID generation and boundary services

pub mod boundary;
pub mod idgen;

pub use boundary::{Boundary, BoundaryLookup, HttpBoundaryClient};
pub use idgen::{HttpIdGenerator, IdGenerator, fallback_id};

use thiserror::Error;

pub const TENANT_HEADER: &str = "X-Tenant-ID";

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),
}
