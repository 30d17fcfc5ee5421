//! Request validation
//!
//! Each validator is an explicit list of rules checked in order; the first
//! violated rule is returned. Patterns are compiled once per process.

pub mod employee;
pub mod jurisdiction;

use regex::Regex;
use shared::error::AppError;
use std::sync::LazyLock;

pub use employee::*;
pub use jurisdiction::*;

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("static regex should not panic"));

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$")
        .expect("static regex should not panic")
});

pub const CODE_MIN_LEN: usize = 2;
pub const CODE_MAX_LEN: usize = 64;
pub const DEFAULT_LIMIT: i64 = 10;

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub(crate) fn require(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    Ok(())
}

/// limit < 1 becomes the default page size, offset < 0 becomes 0
pub(crate) fn normalize_page(limit: &mut i64, offset: &mut i64) {
    if *limit < 1 {
        *limit = DEFAULT_LIMIT;
    }
    if *offset < 0 {
        *offset = 0;
    }
}

pub(crate) fn check_sort(
    sort_by: Option<&str>,
    sort_order: Option<&str>,
    allowed: &[&str],
) -> Result<(), AppError> {
    if let Some(by) = sort_by
        && !allowed.contains(&by)
    {
        return Err(AppError::invalid_format(
            "sortBy",
            format!("sortBy must be one of: {}", allowed.join(", ")),
        ));
    }
    if let Some(order) = sort_order
        && order != "asc"
        && order != "desc"
    {
        return Err(AppError::invalid_format(
            "sortOrder",
            "sortOrder must be asc or desc",
        ));
    }
    Ok(())
}
