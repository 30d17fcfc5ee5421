//! Application state for hrms-server

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::clients::{BoundaryLookup, HttpBoundaryClient, HttpIdGenerator, IdGenerator};
use crate::config::Config;
use crate::services::{EmployeeService, JurisdictionService};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub employees: Arc<EmployeeService>,
    pub jurisdictions: Arc<JurisdictionService>,
}

impl AppState {
    /// Wire services and HTTP collaborators from configuration
    pub fn new(config: Config, pool: SqlitePool) -> Result<Self, BoxError> {
        let id_generator: Arc<dyn IdGenerator> = Arc::new(HttpIdGenerator::new(&config.idgen)?);
        let boundaries: Option<Arc<dyn BoundaryLookup>> = if config.boundary.validation_enabled {
            Some(Arc::new(HttpBoundaryClient::new(&config.boundary)?))
        } else {
            None
        };
        Ok(Self::with_clients(config, pool, id_generator, boundaries))
    }

    /// Wire services around already-built collaborators
    pub fn with_clients(
        config: Config,
        pool: SqlitePool,
        id_generator: Arc<dyn IdGenerator>,
        boundaries: Option<Arc<dyn BoundaryLookup>>,
    ) -> Self {
        let employees = Arc::new(EmployeeService::new(
            pool.clone(),
            id_generator,
            boundaries.clone(),
        ));
        let jurisdictions = Arc::new(JurisdictionService::new(
            pool.clone(),
            employees.clone(),
            boundaries,
        ));

        tracing::info!(
            idgen_enabled = config.idgen.enabled,
            boundary_validation = config.boundary.validation_enabled,
            "Application state initialized"
        );

        Self {
            pool,
            config: Arc::new(config),
            employees,
            jurisdictions,
        }
    }
}
