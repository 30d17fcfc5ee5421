//! HRMS Server - multi-tenant employee and jurisdiction service
//!
//! # Module layout
//!
//! ```text
//! hrms-server/src/
//! ├── api/          # axum routers and handlers
//! ├── middleware/   # tenant extraction, request logging
//! ├── services/     # business orchestration
//! ├── validation/   # ordered field and transition rules
//! ├── db/           # SQLite pool, migrations, repositories
//! ├── clients/      # ID generation and boundary HTTP clients
//! ├── config.rs     # environment configuration
//! ├── state.rs      # shared application state
//! └── utils/        # logging setup
//! ```

pub mod api;
pub mod clients;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
pub mod utils;
pub mod validation;

pub use api::create_router;
pub use config::Config;
pub use db::DbService;
pub use error::{ServiceError, ServiceResult};
pub use state::AppState;
