use chrono::{NaiveDate, Weekday};
use clap::{Parser, Subcommand};
use timeutil::Direction;

/// Weekday seeking and 4-4-5 fiscal calendar lookups.
#[derive(Parser)]
#[command(
    name = "timecal",
    version,
    about = "Weekday seeking and 4-4-5 fiscal calendar lookups"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Zone used to resolve "today" when no date is given: a registry name
    /// (Eastern, Pacific, ...) or an IANA id.
    #[arg(long, global = true, env = "TIMEUTIL_TZ", default_value = "UTC")]
    pub tz: String,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Find the nth instance of a weekday.
    Nth(NthArgs),
    /// Next instance of a weekday, advancing even from the same weekday.
    Next(SeekArgs),
    /// Nearest instance of a weekday (a week ahead when already on it).
    Previous(SeekArgs),
    /// Nearest instance of a weekday (a week ahead when already on it).
    Closest(SeekArgs),
    /// Print the 4-4-5 fiscal month containing a date as JSON.
    Fiscal(DateArgs),
    /// Print every 4-4-5 fiscal month of an ISO year as JSON.
    Year(YearArgs),
    /// Print the named timezone registry as JSON.
    Zones,
}

/// Arguments for the `nth` subcommand.
#[derive(clap::Args)]
pub struct NthArgs {
    /// Target weekday (mon, tuesday, ...).
    #[arg(value_parser = timeutil::parse_weekday)]
    pub weekday: Weekday,

    /// Reference date (YYYY-MM-DD); defaults to today.
    #[arg(value_parser = timeutil::parse_date)]
    pub date: Option<NaiveDate>,

    /// Instances to move past; negative leaves the date unchanged.
    #[arg(short = 'n', long, default_value_t = 1, allow_negative_numbers = true)]
    pub count: i64,

    /// forward, backward or either.
    #[arg(short, long, default_value = "forward")]
    pub direction: Direction,
}

/// Arguments for the `next`, `previous` and `closest` subcommands.
#[derive(clap::Args)]
pub struct SeekArgs {
    /// Target weekday (mon, tuesday, ...).
    #[arg(value_parser = timeutil::parse_weekday)]
    pub weekday: Weekday,

    /// Reference date (YYYY-MM-DD); defaults to today.
    #[arg(value_parser = timeutil::parse_date)]
    pub date: Option<NaiveDate>,
}

/// Arguments for the `fiscal` subcommand.
#[derive(clap::Args)]
pub struct DateArgs {
    /// Date to look up (YYYY-MM-DD); defaults to today.
    #[arg(value_parser = timeutil::parse_date)]
    pub date: Option<NaiveDate>,
}

/// Arguments for the `year` subcommand.
#[derive(clap::Args)]
pub struct YearArgs {
    /// ISO 8601 year.
    #[arg(allow_negative_numbers = true)]
    pub year: i32,
}
