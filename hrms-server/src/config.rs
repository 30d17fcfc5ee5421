//! HRMS server configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `SERVER_PORT` | 8080 |
//! | `SERVER_CONTEXT_PATH` | "" (routes at the root) |
//! | `DATABASE_URL` | sqlite:hrms.db |
//! | `DB_MAX_CONNECTIONS` | 5 |
//! | `ENVIRONMENT` | development |
//! | `LOG_LEVEL` | info (used when `RUST_LOG` is unset) |
//! | `LOG_FORMAT` | text (`json` for structured output) |
//! | `LOG_DIR` | unset (stdout only) |
//! | `REQUEST_TIMEOUT_MS` | 30000 |
//! | `IDGEN_HOST` | http://localhost:8100 |
//! | `IDGEN_PATH` | /idgen/v1/generate |
//! | `IDGEN_ENABLED` | true |
//! | `IDGEN_NAME` | hrms.idgen |
//! | `IDGEN_TIMEOUT_MS` | 5000 |
//! | `BOUNDARY_HOST` | http://localhost:8095 |
//! | `BOUNDARY_VALIDATION_ENABLED` | false |
//! | `BOUNDARY_TIMEOUT_MS` | 5000 |

use std::str::FromStr;
use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// ID generation service settings
#[derive(Debug, Clone)]
pub struct IdGenConfig {
    pub host: String,
    pub path: String,
    pub enabled: bool,
    /// Template code sent with every request
    pub name: String,
    pub timeout: Duration,
}

/// Boundary service settings
#[derive(Debug, Clone)]
pub struct BoundaryConfig {
    pub host: String,
    /// Check jurisdiction boundary codes against the service
    pub validation_enabled: bool,
    pub timeout: Duration,
}

/// HRMS server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    /// Prefix for every route, e.g. `/hrms`; empty mounts at the root
    pub context_path: String,
    pub database_url: String,
    pub db_max_connections: u32,
    /// Environment: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub request_timeout: Duration,
    pub idgen: IdGenConfig,
    pub boundary: BoundaryConfig,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_string(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Normalize to `/prefix` with no trailing slash; `/` and empty become empty
fn normalize_context_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = env_string("ENVIRONMENT", "development");
        let database_url = env_string("DATABASE_URL", "sqlite:hrms.db");
        if !database_url.starts_with("sqlite:") {
            return Err(format!("DATABASE_URL must be a sqlite: url, got {database_url}").into());
        }

        Ok(Self {
            http_port: env_or("SERVER_PORT", 8080),
            context_path: normalize_context_path(&env_string("SERVER_CONTEXT_PATH", "")),
            database_url,
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 5),
            environment,
            log_level: env_string("LOG_LEVEL", "info"),
            log_json: env_string("LOG_FORMAT", "text").eq_ignore_ascii_case("json"),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            request_timeout: Duration::from_millis(env_or("REQUEST_TIMEOUT_MS", 30_000)),
            idgen: IdGenConfig {
                host: env_string("IDGEN_HOST", "http://localhost:8100"),
                path: env_string("IDGEN_PATH", "/idgen/v1/generate"),
                enabled: env_or("IDGEN_ENABLED", true),
                name: env_string("IDGEN_NAME", "hrms.idgen"),
                timeout: Duration::from_millis(env_or("IDGEN_TIMEOUT_MS", 5_000)),
            },
            boundary: BoundaryConfig {
                host: env_string("BOUNDARY_HOST", "http://localhost:8095"),
                validation_enabled: env_or("BOUNDARY_VALIDATION_ENABLED", false),
                timeout: Duration::from_millis(env_or("BOUNDARY_TIMEOUT_MS", 5_000)),
            },
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    /// Development defaults with ID generation disabled; used by tests
    fn default() -> Self {
        Self {
            http_port: 8080,
            context_path: String::new(),
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 1,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            log_json: false,
            log_dir: None,
            request_timeout: Duration::from_secs(30),
            idgen: IdGenConfig {
                host: "http://localhost:8100".to_string(),
                path: "/idgen/v1/generate".to_string(),
                enabled: false,
                name: "hrms.idgen".to_string(),
                timeout: Duration::from_secs(5),
            },
            boundary: BoundaryConfig {
                host: "http://localhost:8095".to_string(),
                validation_enabled: false,
                timeout: Duration::from_secs(5),
            },
        }
    }
}
