//! Seeking the nth occurrence of a weekday relative to a date.
//!
//! # Functions
//!
//! - [`nth_weekday`] — the general seeker, parameterized by [`Direction`]
//! - [`next`] — the next occurrence, advancing even from the same weekday
//! - [`previous`] / [`closest`] — the nearest occurrence (see notes on [`previous`])
//!
//! All offsets are computed with Sunday as day 0, and `%` keeps the sign of
//! the dividend, so backward offsets stay negative after reduction.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;
use crate::error::{Result, TimeutilError};

/// Which way [`nth_weekday`] moves to find dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Toward later dates.
    #[default]
    Forward,
    /// Toward earlier dates.
    Backward,
    /// Toward the nearer instance of the weekday; ties go forward.
    Either,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Forward => "Forward",
            Direction::Backward => "Backward",
            Direction::Either => "Either",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = TimeutilError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" | "next" => Ok(Direction::Forward),
            "backward" | "prev" | "previous" => Ok(Direction::Backward),
            "either" | "closest" | "nearest" => Ok(Direction::Either),
            _ => Err(TimeutilError::InvalidDirection(format!("'{}'", s.trim()))),
        }
    }
}

/// Parse a weekday name ("mon", "Monday", "FRI", ...).
pub fn parse_weekday(s: &str) -> Result<Weekday> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| TimeutilError::InvalidWeekday(format!("'{}'", s.trim())))
}

/// Returns the `n`th instance of `day` starting at `date`.
///
/// If `date` already falls on `day`, the result is `date` moved by `n`
/// whole weeks (backward for [`Direction::Backward`], forward otherwise),
/// so `n == 0` leaves it unchanged. Otherwise `n == 0` and `n == 1` both
/// yield the first instance in the requested direction, and each further
/// `n` adds one week in that direction.
///
/// A negative `n` returns `date` unchanged.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Weekday};
/// use timeutil::weekday::{nth_weekday, Direction};
///
/// // 4 January 2017 is a Wednesday.
/// let jan4 = NaiveDate::from_ymd_opt(2017, 1, 4).unwrap();
/// let monday = nth_weekday(jan4, Weekday::Mon, 0, Direction::Backward);
/// assert_eq!(monday, NaiveDate::from_ymd_opt(2017, 1, 2).unwrap());
/// ```
pub fn nth_weekday<D: CalendarDate>(date: D, day: Weekday, n: i64, direction: Direction) -> D {
    if n < 0 {
        return date;
    }

    let current = date.weekday();
    if current == day {
        return match direction {
            Direction::Backward => date.add_days(n.saturating_mul(-7)),
            // Either has no sane meaning here, so move forward.
            Direction::Forward | Direction::Either => date.add_days(n.saturating_mul(7)),
        };
    }

    let incr = i64::from(day.num_days_from_sunday()) - i64::from(current.num_days_from_sunday());
    let (incr, week) = match direction {
        Direction::Forward => (incr + 7, 7),
        Direction::Backward => (incr - 7, -7),
        Direction::Either => {
            let forward = (incr + 7) % 7;
            let backward = (incr - 7) % 7;
            if forward.abs() <= backward.abs() {
                (forward, 7)
            } else {
                (backward, -7)
            }
        }
    };
    let folded = if n > 0 { (n - 1).saturating_mul(week) } else { 0 };

    date.add_days((incr % 7).saturating_add(folded))
}

/// Returns the next instance of `day`, advancing even if `date` is
/// already on `day`.
pub fn next<D: CalendarDate>(date: D, day: Weekday) -> D {
    nth_weekday(date, day, 1, Direction::Forward)
}

/// Returns the nearest instance of `day`, or the one a week ahead if
/// `date` is already on `day`.
///
/// Despite the name this does not always recede: it seeks with
/// [`Direction::Either`] and behaves exactly like [`closest`]. Use
/// `nth_weekday(date, day, 1, Direction::Backward)` for a strictly
/// earlier date.
pub fn previous<D: CalendarDate>(date: D, day: Weekday) -> D {
    nth_weekday(date, day, 1, Direction::Either)
}

/// Returns the nearest instance of `day`, advancing a week if `date` is
/// already on `day`.
pub fn closest<D: CalendarDate>(date: D, day: Weekday) -> D {
    nth_weekday(date, day, 1, Direction::Either)
}
