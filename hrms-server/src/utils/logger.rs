//! Logging Infrastructure
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to this
//! crate and `tower_http`, with sqlx kept at `warn`.

use std::path::Path;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::EnvFilter;

/// Default filter directives for a bare level such as `debug`
fn default_directives(level: &str) -> String {
    format!("hrms_server={level},tower_http={level},sqlx=warn,{level}")
}

fn file_appender(log_dir: Option<&str>) -> Option<RollingFileAppender> {
    let dir = Path::new(log_dir?);
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("Cannot create log directory {}: {e}; logging to stdout", dir.display());
        return None;
    }
    Some(tracing_appender::rolling::daily(dir, "hrms-server"))
}

/// Initialize the global subscriber. Call once, from `main`.
pub fn init_logger(log_level: &str, json: bool, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    match (json, file_appender(log_dir)) {
        (true, Some(writer)) => subscriber.json().with_writer(writer).init(),
        (true, None) => subscriber.json().init(),
        (false, Some(writer)) => subscriber.with_ansi(false).with_writer(writer).init(),
        (false, None) => subscriber.init(),
    }
}
