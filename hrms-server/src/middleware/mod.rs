//! HTTP middleware

pub mod logging;
pub mod tenant;

pub use logging::logging_middleware;
pub use tenant::{TenantIdentity, tenant_middleware};
