//! # timeutil
//!
//! Date arithmetic for weekday seeking and 4-4-5 (accounting) years.
//!
//! Everything here is a pure function over chrono date values: no clock
//! access, no shared mutable state. Day arithmetic is wall-clock
//! arithmetic, so zoned values keep their time of day across DST changes.
//!
//! ## Modules
//!
//! - [`weekday`] — nth occurrence of a weekday before/after/nearest a date
//! - [`fiscal`] — ISO week → 4-4-5 fiscal month, quarter and month bounds
//! - [`date`] — the [`CalendarDate`] abstraction both run on
//! - [`tz`] — named timezone registry
//! - [`error`] — Error types

pub mod date;
pub mod error;
pub mod fiscal;
pub mod tz;
pub mod weekday;

pub use date::{parse_date, CalendarDate};
pub use error::TimeutilError;
pub use fiscal::{bounds, fiscal_year, period, year_start, FiscalPeriod};
pub use weekday::{closest, next, nth_weekday, parse_weekday, previous, Direction};
