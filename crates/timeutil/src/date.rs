//! The date abstraction the seekers and the fiscal calendar run on.
//!
//! [`CalendarDate`] is implemented for [`NaiveDate`] and for zoned
//! [`DateTime`] values. Day arithmetic is wall-clock arithmetic: adding a
//! day to 09:00 on the eve of a DST change yields 09:00 the next day, not
//! 24 elapsed hours later.

use chrono::{DateTime, Datelike, Days, LocalResult, NaiveDate, Offset, TimeDelta, TimeZone};

use crate::error::{Result, TimeutilError};

/// A calendar date value supporting weekday/ISO-week extraction (through
/// [`Datelike`]) and shifting by whole days.
pub trait CalendarDate: Datelike + Sized {
    /// The calendar date, ignoring any time of day or zone.
    fn calendar_date(&self) -> NaiveDate;

    /// The same value moved onto `date`, keeping time of day and zone.
    fn on_date(&self, date: NaiveDate) -> Self;

    /// Shift by `days` calendar days (negative moves backward).
    ///
    /// Saturates at [`NaiveDate::MIN`] / [`NaiveDate::MAX`].
    fn add_days(&self, days: i64) -> Self {
        let date = self.calendar_date();
        let shifted = if days >= 0 {
            date.checked_add_days(Days::new(days.unsigned_abs()))
                .unwrap_or(NaiveDate::MAX)
        } else {
            date.checked_sub_days(Days::new(days.unsigned_abs()))
                .unwrap_or(NaiveDate::MIN)
        };
        self.on_date(shifted)
    }
}

impl CalendarDate for NaiveDate {
    fn calendar_date(&self) -> NaiveDate {
        *self
    }

    fn on_date(&self, date: NaiveDate) -> Self {
        date
    }
}

impl<Tz: TimeZone> CalendarDate for DateTime<Tz> {
    fn calendar_date(&self) -> NaiveDate {
        self.date_naive()
    }

    fn on_date(&self, date: NaiveDate) -> Self {
        let local = date.and_time(self.time());
        let tz = self.timezone();
        match tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => dt,
            LocalResult::Ambiguous(earliest, _) => earliest,
            LocalResult::None => {
                // Wall-clock time falls in a DST gap: read it with the source offset.
                let offset = i64::from(self.offset().fix().local_minus_utc());
                tz.from_utc_datetime(&(local - TimeDelta::seconds(offset)))
            }
        }
    }
}

/// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| TimeutilError::InvalidDate(format!("'{}': {}", s, e)))
}
