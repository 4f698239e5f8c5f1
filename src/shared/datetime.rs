use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;

use crate::core::error::{AppError, Result};

pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

lazy_static! {
    /// Exact shape of a database-local datetime string, second precision.
    pub static ref DATETIME_REGEX: Regex =
        Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").unwrap();
}

fn parse(datetime: &str) -> Result<NaiveDateTime> {
    if datetime.is_empty() {
        return Err(AppError::Validation("datetime is required".to_string()));
    }

    if !DATETIME_REGEX.is_match(datetime) {
        return Err(AppError::Validation(format!(
            "{} is not a valid datetime string",
            datetime
        )));
    }

    NaiveDateTime::parse_from_str(datetime, DATETIME_FORMAT).map_err(|_| {
        AppError::Validation(format!("{} is not a valid datetime string", datetime))
    })
}

/// Whether `candidate` is strictly after `now`, by epoch-second comparison.
///
/// Both arguments are database-local datetime strings; the caller supplies
/// `now` from the database clock so the comparison uses the store's
/// timezone, not the application server's. A candidate equal to `now` is
/// not future. Pure; no clock is read here.
pub fn is_future(candidate: &str, now: &str) -> Result<bool> {
    let candidate = parse(candidate)?;
    let now = parse(now)?;

    Ok(candidate.and_utc().timestamp() - now.and_utc().timestamp() > 0)
}
