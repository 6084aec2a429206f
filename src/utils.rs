/// Time helpers for log output and the CSV file
use log::warn;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::error::Result;

/// Resolve the local UTC offset, falling back to UTC
///
/// Must run before the process spawns threads; the `time` crate refuses to
/// read the local offset from a multi-threaded process on Unix.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or_else(|e| {
        warn!("Cannot determine local time offset ({}), using UTC", e);
        UtcOffset::UTC
    })
}

pub fn now_local(offset: UtcOffset) -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(offset)
}

/// Format a timestamp for human-readable logging
///
/// Converts an OffsetDateTime to DD.MM.YYYY - HH:MM:SS format
pub fn format_datetime(dt: &OffsetDateTime) -> String {
    let format = format_description!("[day].[month].[year] - [hour]:[minute]:[second]");
    dt.format(&format).unwrap_or_else(|_| dt.to_string())
}

/// CSV file name for a run started at `started_at`, on a 12-hour clock
///
/// e.g. `2024-03-05T02-07-09-PM.csv`
pub fn log_filename(started_at: &OffsetDateTime) -> Result<String> {
    let format = format_description!(
        "[year]-[month]-[day]T[hour repr:12]-[minute]-[second]-[period]"
    );
    Ok(format!("{}.csv", started_at.format(&format)?))
}

/// ISO-8601 local time with microseconds and no offset suffix
pub fn iso_timestamp(dt: &OffsetDateTime) -> Result<String> {
    let format =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]");
    Ok(dt.format(&format)?)
}
