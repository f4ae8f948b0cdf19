//! Frequently used timezones.
//!
//! The American zones of 49 CFR §71.1, resolved lazily from the IANA
//! database bundled with `chrono-tz`. The identifiers are fixed, so a
//! failure to resolve one is a programming error and panics.

use std::sync::LazyLock;

use chrono_tz::Tz;
use tracing::debug;

use crate::error::{Result, TimeutilError};

/// Parse an IANA timezone name (e.g. `"America/New_York"`).
pub fn parse(zone: &str) -> Result<Tz> {
    zone.trim()
        .parse::<Tz>()
        .map_err(|_| TimeutilError::InvalidTimezone(format!("'{}'", zone.trim())))
}

/// Like [`parse`], but panics if `zone` is not a valid IANA name.
pub fn must_parse(zone: &str) -> Tz {
    parse(zone).unwrap_or_else(|e| panic!("{e}"))
}

pub static ATLANTIC: LazyLock<Tz> = LazyLock::new(|| must_parse("America/Puerto_Rico"));
pub static EASTERN: LazyLock<Tz> = LazyLock::new(|| must_parse("America/New_York"));
pub static CENTRAL: LazyLock<Tz> = LazyLock::new(|| must_parse("America/Chicago"));
pub static MOUNTAIN: LazyLock<Tz> = LazyLock::new(|| must_parse("America/Denver"));
pub static PACIFIC: LazyLock<Tz> = LazyLock::new(|| must_parse("America/Los_Angeles"));
pub static ALASKA: LazyLock<Tz> = LazyLock::new(|| must_parse("America/Anchorage"));
pub static HAWAII_ALEUTIAN: LazyLock<Tz> = LazyLock::new(|| must_parse("America/Adak"));
pub static SAMOA: LazyLock<Tz> = LazyLock::new(|| must_parse("Pacific/Pago_Pago"));
pub static CHAMORRO: LazyLock<Tz> = LazyLock::new(|| must_parse("Pacific/Guam"));

/// The named zones, in registry order.
pub static ZONES: [(&str, &LazyLock<Tz>); 9] = [
    ("Atlantic", &ATLANTIC),
    ("Eastern", &EASTERN),
    ("Central", &CENTRAL),
    ("Mountain", &MOUNTAIN),
    ("Pacific", &PACIFIC),
    ("Alaska", &ALASKA),
    ("HawaiiAleutian", &HAWAII_ALEUTIAN),
    ("Samoa", &SAMOA),
    ("Chamorro", &CHAMORRO),
];

/// Force every named zone to resolve. Call once at startup to surface a
/// bad identifier before any lookups happen.
pub fn init() {
    for (name, zone) in ZONES.iter() {
        debug!(name, zone = zone.name(), "resolved named timezone");
    }
}

/// Look up a named zone ("Eastern", "pacific", ...), ignoring ASCII case.
pub fn by_name(name: &str) -> Option<Tz> {
    let name = name.trim();
    ZONES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, zone)| ***zone)
}

/// Resolve either a registry name or an IANA timezone name.
///
/// # Errors
///
/// Returns [`TimeutilError::InvalidTimezone`] if `zone` is neither.
pub fn resolve(zone: &str) -> Result<Tz> {
    match by_name(zone) {
        Some(tz) => Ok(tz),
        None => parse(zone),
    }
}
