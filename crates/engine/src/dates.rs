//! Parsing of record dates coming from the write boundary.
//!
//! Records store UTC timestamps. Users usually enter a plain calendar date,
//! which is read as local midnight in the business timezone.

use chrono::{DateTime, LocalResult, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::{EngineError, ResultEngine};

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Argentina::Buenos_Aires;

/// Parses an IANA timezone name such as `America/Argentina/Buenos_Aires`.
pub fn parse_timezone(name: &str) -> ResultEngine<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| EngineError::InvalidDate(format!("unknown timezone: {name}")))
}

/// Accepts an RFC 3339 timestamp or a `YYYY-MM-DD` date (local midnight in `tz`).
pub fn parse_occurred_at(input: &str, tz: Tz) -> ResultEngine<DateTime<Utc>> {
    let trimmed = input.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| EngineError::InvalidDate(format!("invalid date: {trimmed}")))?;
    local_midnight(date, tz)
}

fn local_midnight(date: NaiveDate, tz: Tz) -> ResultEngine<DateTime<Utc>> {
    let naive = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
        EngineError::InvalidDate(format!("invalid date: {date}"))
    })?;
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt.with_timezone(&Utc)),
        // Midnight skipped by a DST jump: the day starts one hour later.
        LocalResult::None => {
            let shifted = naive + chrono::Duration::hours(1);
            tz.from_local_datetime(&shifted)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| EngineError::InvalidDate(format!("invalid local date: {date}")))
        }
    }
}
