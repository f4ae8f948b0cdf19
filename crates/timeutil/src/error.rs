//! Error types for timeutil parsing surfaces.
//!
//! The date arithmetic itself is total; only conversions from text
//! (weekday names, dates, directions, zone names) can fail.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeutilError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("Invalid direction: {0}")]
    InvalidDirection(String),

    #[error("ISO year out of range: {0}")]
    InvalidIsoYear(i32),
}

pub type Result<T> = std::result::Result<T, TimeutilError>;
