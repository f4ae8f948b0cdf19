//! The 4-4-5 accounting calendar.
//!
//! Each ISO 8601 year is split into four 13-week quarters, and each quarter
//! into months of 4, 4 and 5 weeks. ISO years with 53 weeks get a synthetic
//! 13th month: a 6-week December that starts with fiscal December and
//! absorbs the leap week.
//!
//! # Functions
//!
//! - [`month`] — fiscal month (1-13) of a date
//! - [`quarter`] — fiscal quarter of a date, from its ISO week
//! - [`bounds`] — first and last day of the fiscal month containing a date
//! - [`period`] — month, quarter and bounds bundled into a [`FiscalPeriod`]
//! - [`fiscal_year`] — every fiscal month of an ISO year

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use tracing::{debug, trace};

use crate::date::CalendarDate;
use crate::error::{Result, TimeutilError};
use crate::weekday::{nth_weekday, Direction};

/// Fiscal month for each ISO week. Index 0 is unused.
const MONTHS: [u8; 54] = [
    0, //
    // Q1
    1, 1, 1, 1, // January
    2, 2, 2, 2, // February
    3, 3, 3, 3, 3, // March
    // Q2
    4, 4, 4, 4, // April
    5, 5, 5, 5, // May
    6, 6, 6, 6, 6, // June
    // Q3
    7, 7, 7, 7, // July
    8, 8, 8, 8, // August
    9, 9, 9, 9, 9, // September
    // Q4
    10, 10, 10, 10, // October
    11, 11, 11, 11, // November
    12, 12, 12, 12, 12, // December
    // Leap week: the 6-week December.
    13,
];

/// Days in the fiscal year before the first day of each month. Month 13
/// starts together with month 12. Index 0 is unused.
const DAYS_BEFORE: [i64; 14] = {
    let mut table = [0i64; 14];
    let mut m = 2;
    while m <= 12 {
        table[m] = table[m - 1] + month_length_days((m - 1) as u8);
        m += 1;
    }
    table[13] = table[12];
    table
};

/// Length of a fiscal month in days.
///
/// Every third month closes its quarter with 5 weeks; month 13 is 6 weeks;
/// the rest are 4 weeks.
pub const fn month_length_days(month: u8) -> i64 {
    match month {
        13 => 42,
        m if m % 3 == 0 => 35,
        _ => 28,
    }
}

/// The fiscal month (1-13) containing `date`.
///
/// For example, in 2017 2 January (week 01) is in month 1, while
/// 27 February (week 09) is in month 3. ISO week 53 maps to month 13.
pub fn month<D: Datelike>(date: &D) -> u8 {
    MONTHS[date.iso_week().week() as usize]
}

/// The fiscal quarter of `date`, computed as `(iso_week / 13) + 1`.
///
/// This counts whole 13-week blocks, so the closing week of each quarter
/// already reports the next one: week 13 yields 2 and weeks 52-53 yield 5.
/// [`FiscalPeriod::quarter`] derives the quarter from the month instead.
pub fn quarter<D: Datelike>(date: &D) -> u8 {
    (date.iso_week().week() / 13 + 1) as u8
}

/// The first day of ISO year `iso_year`: the Monday of the week holding
/// 4 January.
///
/// # Errors
///
/// Returns [`TimeutilError::InvalidIsoYear`] if the year lies outside
/// chrono's representable range.
pub fn year_start(iso_year: i32) -> Result<NaiveDate> {
    let jan4 =
        NaiveDate::from_ymd_opt(iso_year, 1, 4).ok_or(TimeutilError::InvalidIsoYear(iso_year))?;
    Ok(nth_weekday(jan4, Weekday::Mon, 0, Direction::Backward))
}

/// Number of ISO weeks (52 or 53) in `iso_year`.
///
/// # Errors
///
/// Returns [`TimeutilError::InvalidIsoYear`] if the year lies outside
/// chrono's representable range.
pub fn weeks_in_year(iso_year: i32) -> Result<u32> {
    // 28 December always falls in the last ISO week.
    NaiveDate::from_ymd_opt(iso_year, 12, 28)
        .map(|dec28| dec28.iso_week().week())
        .ok_or(TimeutilError::InvalidIsoYear(iso_year))
}

/// Returns the first and last day, inclusive, of the fiscal month
/// containing `date`.
///
/// The year is anchored on the ISO year of `date`, so days at the turn of
/// the calendar year that belong to a neighbouring ISO year get that
/// year's months. Zoned inputs keep their zone and time of day.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use timeutil::fiscal::bounds;
///
/// let march = NaiveDate::from_ymd_opt(2017, 3, 15).unwrap();
/// let (start, end) = bounds(&march);
/// assert_eq!(start, NaiveDate::from_ymd_opt(2017, 2, 27).unwrap());
/// assert_eq!(end, NaiveDate::from_ymd_opt(2017, 4, 2).unwrap());
/// ```
pub fn bounds<D: CalendarDate>(date: &D) -> (D, D) {
    let iso_year = date.iso_week().year();
    // Only unrepresentable at chrono's range limits.
    let jan4 = NaiveDate::from_ymd_opt(iso_year, 1, 4).unwrap_or_else(|| date.calendar_date());
    let first_monday = nth_weekday(date.on_date(jan4), Weekday::Mon, 0, Direction::Backward);

    let month = month(date);
    let start = first_monday.add_days(DAYS_BEFORE[usize::from(month)]);
    let end = start.add_days(month_length_days(month) - 1);

    trace!(
        iso_year,
        month,
        start = %start.calendar_date(),
        end = %end.calendar_date(),
        "fiscal month bounds"
    );
    (start, end)
}

/// A fiscal month of the 4-4-5 calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FiscalPeriod {
    /// The ISO year the month belongs to.
    pub iso_year: i32,
    /// Fiscal month, 1-13.
    pub month: u8,
    /// Fiscal quarter, 1-4, derived from the month (month 13 is in Q4).
    pub quarter: u8,
    /// Number of weeks in the month (4, 5 or 6).
    pub weeks: u8,
    /// First day of the month.
    pub start: NaiveDate,
    /// Last day of the month (inclusive).
    pub end: NaiveDate,
}

/// The fiscal month containing `date`.
pub fn period<D: CalendarDate>(date: &D) -> FiscalPeriod {
    let day = date.calendar_date();
    let month = month(&day);
    let (start, end) = bounds(&day);
    FiscalPeriod {
        iso_year: day.iso_week().year(),
        month,
        quarter: (month.min(12) - 1) / 3 + 1,
        weeks: (month_length_days(month) / 7) as u8,
        start,
        end,
    }
}

/// Every fiscal month of `iso_year`, in order: 12 months, plus month 13
/// when the year has 53 weeks.
///
/// # Errors
///
/// Returns [`TimeutilError::InvalidIsoYear`] if the year lies outside
/// chrono's representable range.
pub fn fiscal_year(iso_year: i32) -> Result<Vec<FiscalPeriod>> {
    let start = year_start(iso_year)?;
    let weeks = weeks_in_year(iso_year)?;

    let mut periods: Vec<FiscalPeriod> = (1..=12)
        .map(|m| period(&start.add_days(DAYS_BEFORE[m])))
        .collect();
    if weeks == 53 {
        periods.push(period(&start.add_days(52 * 7)));
    }

    debug!(iso_year, weeks, months = periods.len(), "built fiscal year");
    Ok(periods)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn d(s: &str) -> NaiveDate {
        crate::date::parse_date(s).unwrap()
    }

    // ── tables ──────────────────────────────────────────────────────────

    #[test]
    fn test_month_table_shape() {
        for m in 1..=12u8 {
            let weeks = MONTHS.iter().filter(|&&w| w == m).count() as i64;
            assert_eq!(weeks * 7, month_length_days(m), "month {m}");
        }
        assert_eq!(MONTHS[53], 13);
    }

    #[test]
    fn test_days_before_table() {
        assert_eq!(DAYS_BEFORE[1], 0);
        assert_eq!(DAYS_BEFORE[2], 28);
        assert_eq!(DAYS_BEFORE[3], 56);
        assert_eq!(DAYS_BEFORE[4], 91);
        assert_eq!(DAYS_BEFORE[7], 182);
        assert_eq!(DAYS_BEFORE[10], 273);
        assert_eq!(DAYS_BEFORE[12], 329);
        assert_eq!(DAYS_BEFORE[13], DAYS_BEFORE[12]);
        assert_eq!(DAYS_BEFORE[12] + month_length_days(12), 364);
    }

    #[test]
    fn test_month_length_days() {
        assert_eq!(month_length_days(1), 28);
        assert_eq!(month_length_days(3), 35);
        assert_eq!(month_length_days(12), 35);
        assert_eq!(month_length_days(13), 42);
    }

    // ── month / quarter ─────────────────────────────────────────────────

    #[test]
    fn test_month_examples() {
        assert_eq!(month(&d("2017-01-02")), 1);
        assert_eq!(month(&d("2017-02-27")), 3);
        assert_eq!(month(&d("2017-12-31")), 12);
        // 1 January 2017 is in week 52 of 2016.
        assert_eq!(month(&d("2017-01-01")), 12);
        // 2020 has 53 weeks; week 53 spans 28 Dec 2020 - 3 Jan 2021.
        assert_eq!(month(&d("2020-12-30")), 13);
        assert_eq!(month(&d("2021-01-03")), 13);
    }

    #[test]
    fn test_quarter_counts_thirteen_week_blocks() {
        assert_eq!(quarter(&d("2017-01-02")), 1); // week 1
        assert_eq!(quarter(&d("2017-03-20")), 1); // week 12
        assert_eq!(quarter(&d("2017-03-27")), 2); // week 13, still month 3
        assert_eq!(month(&d("2017-03-27")), 3);
        assert_eq!(quarter(&d("2017-12-25")), 5); // week 52
        assert_eq!(quarter(&d("2020-12-30")), 5); // week 53
    }

    // ── year_start / weeks_in_year ──────────────────────────────────────

    #[test]
    fn test_year_start_is_monday_of_week_one() {
        assert_eq!(year_start(2017).unwrap(), d("2017-01-02"));
        // 4 January 2015 is a Sunday.
        assert_eq!(year_start(2015).unwrap(), d("2014-12-29"));
        // 4 January 2021 is a Monday.
        assert_eq!(year_start(2021).unwrap(), d("2021-01-04"));
        assert_eq!(year_start(2019).unwrap(), d("2018-12-31"));
    }

    #[test]
    fn test_year_start_out_of_range() {
        assert_eq!(
            year_start(i32::MAX).unwrap_err(),
            TimeutilError::InvalidIsoYear(i32::MAX)
        );
    }

    #[test]
    fn test_weeks_in_year() {
        assert_eq!(weeks_in_year(2015).unwrap(), 53);
        assert_eq!(weeks_in_year(2017).unwrap(), 52);
        assert_eq!(weeks_in_year(2020).unwrap(), 53);
        assert_eq!(weeks_in_year(2026).unwrap(), 53);
        assert!(weeks_in_year(i32::MIN).is_err());
    }

    // ── bounds ──────────────────────────────────────────────────────────

    const BOUNDS_2017: [(&str, &str); 12] = [
        ("2017-01-02", "2017-01-29"),
        ("2017-01-30", "2017-02-26"),
        ("2017-02-27", "2017-04-02"),
        ("2017-04-03", "2017-04-30"),
        ("2017-05-01", "2017-05-28"),
        ("2017-05-29", "2017-07-02"),
        ("2017-07-03", "2017-07-30"),
        ("2017-07-31", "2017-08-27"),
        ("2017-08-28", "2017-10-01"),
        ("2017-10-02", "2017-10-29"),
        ("2017-10-30", "2017-11-26"),
        ("2017-11-27", "2017-12-31"),
    ];

    #[test]
    fn test_bounds_2017_fixture() {
        for (i, (start, end)) in BOUNDS_2017.iter().enumerate() {
            let m = i as u32 + 1;
            // Every 4-4-5 month covers days 4..=26 of its calendar month.
            for day in 4..=26 {
                let date = NaiveDate::from_ymd_opt(2017, m, day).unwrap();
                assert_eq!(bounds(&date), (d(start), d(end)), "{date}");
            }
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(bounds(&d("2017-01-29")), (d("2017-01-02"), d("2017-01-29")));
        assert_eq!(bounds(&d("2017-01-30")), (d("2017-01-30"), d("2017-02-26")));
    }

    #[test]
    fn test_bounds_leap_week_month() {
        let expected = (d("2020-11-23"), d("2021-01-03"));
        assert_eq!(bounds(&d("2020-12-28")), expected);
        assert_eq!(bounds(&d("2021-01-02")), expected);
        // Fiscal December of 2020 starts on the same day.
        assert_eq!(bounds(&d("2020-12-01")), (d("2020-11-23"), d("2020-12-27")));
    }

    #[test]
    fn test_bounds_when_jan4_is_sunday() {
        assert_eq!(bounds(&d("2015-01-01")), (d("2014-12-29"), d("2015-01-25")));
        assert_eq!(bounds(&d("2014-12-29")), (d("2014-12-29"), d("2015-01-25")));
    }

    #[test]
    fn test_bounds_uses_iso_year_at_year_turn() {
        // 31 December 2018 is in week 1 of 2019.
        assert_eq!(bounds(&d("2018-12-31")), (d("2018-12-31"), d("2019-01-27")));
        // 1 January 2017 is in week 52 of 2016.
        assert_eq!(bounds(&d("2017-01-01")), (d("2016-11-28"), d("2017-01-01")));
    }

    #[test]
    fn test_bounds_zoned_keeps_zone_and_time() {
        let tz = chrono_tz::America::Chicago;
        let date = tz.with_ymd_and_hms(2017, 3, 15, 8, 0, 0).unwrap();
        let (start, end) = bounds(&date);
        assert_eq!(start, tz.with_ymd_and_hms(2017, 2, 27, 8, 0, 0).unwrap());
        assert_eq!(end, tz.with_ymd_and_hms(2017, 4, 2, 8, 0, 0).unwrap());
    }

    // ── period / fiscal_year ────────────────────────────────────────────

    #[test]
    fn test_period_fields() {
        let p = period(&d("2017-03-15"));
        assert_eq!(
            p,
            FiscalPeriod {
                iso_year: 2017,
                month: 3,
                quarter: 1,
                weeks: 5,
                start: d("2017-02-27"),
                end: d("2017-04-02"),
            }
        );
        let leap = period(&d("2020-12-30"));
        assert_eq!((leap.month, leap.quarter, leap.weeks), (13, 4, 6));
    }

    #[test]
    fn test_period_serializes_dates_as_iso() {
        let json = serde_json::to_value(period(&d("2017-01-10"))).unwrap();
        assert_eq!(json["start"], "2017-01-02");
        assert_eq!(json["end"], "2017-01-29");
        assert_eq!(json["month"], 1);
    }

    #[test]
    fn test_fiscal_year_2017_matches_fixture() {
        let year = fiscal_year(2017).unwrap();
        assert_eq!(year.len(), 12);
        for (p, (start, end)) in year.iter().zip(BOUNDS_2017.iter()) {
            assert_eq!((p.start, p.end), (d(start), d(end)), "month {}", p.month);
        }
    }

    #[test]
    fn test_fiscal_year_with_leap_week() {
        let year = fiscal_year(2020).unwrap();
        assert_eq!(year.len(), 13);
        assert_eq!(year[12].month, 13);
        assert_eq!(year[12].start, year[11].start);
        assert_eq!(year[12].end, d("2021-01-03"));
    }

    #[test]
    fn test_months_tile_across_years() {
        for y in 1900..=2100 {
            let year = fiscal_year(y).unwrap();
            for pair in year[..12].windows(2) {
                assert_eq!(pair[0].end.add_days(1), pair[1].start, "{y}");
            }
            let next_start = year_start(y + 1).unwrap();
            let last = year.last().unwrap();
            assert_eq!(last.end.add_days(1), next_start, "{y}");
            if year.len() == 13 {
                assert_eq!(year[11].end.add_days(8), next_start, "{y}");
            }
        }
    }

    #[test]
    fn test_every_day_of_year_in_one_month() {
        let year = fiscal_year(2017).unwrap();
        let mut day = year_start(2017).unwrap();
        let end = year_start(2018).unwrap();
        while day < end {
            let holders: Vec<_> = year
                .iter()
                .filter(|p| p.start <= day && day <= p.end)
                .collect();
            assert_eq!(holders.len(), 1, "{day}");
            assert_eq!(bounds(&day), (holders[0].start, holders[0].end));
            day = day.add_days(1);
        }
    }

    proptest! {
        #[test]
        fn prop_bounds_contain_date(n in 1i32..=3_652_059) {
            let date = NaiveDate::from_num_days_from_ce_opt(n).unwrap();
            let (start, end) = bounds(&date);
            prop_assert!(start <= date && date <= end);
            prop_assert_eq!(start.weekday(), Weekday::Mon);
            prop_assert_eq!(end.weekday(), Weekday::Sun);
            prop_assert_eq!((end - start).num_days() + 1, month_length_days(month(&date)));
        }
    }
}
