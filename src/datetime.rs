//! Timestamp handling for `since:`/`until:` values.
//!
//! Accepts full RFC 3339 instants, civil datetimes (read as UTC), and bare
//! dates (midnight UTC). Range bounds are always emitted as UTC ISO-8601 at
//! second resolution, whatever precision the input carried.

use jiff::Timestamp;
use jiff::civil::{Date, DateTime};
use jiff::tz::TimeZone;

use crate::error::QueryError;

pub fn parse_datetime(raw: &str) -> Result<Timestamp, QueryError> {
    let trimmed = raw.trim();
    if let Ok(instant) = trimmed.parse::<Timestamp>() {
        return Ok(instant);
    }
    if let Ok(datetime) = trimmed.parse::<DateTime>() {
        return instant_of(datetime, raw);
    }
    if let Ok(date) = trimmed.parse::<Date>() {
        return instant_of(date.at(0, 0, 0, 0), raw);
    }
    Err(QueryError::InvalidDate(raw.to_string()))
}

fn instant_of(datetime: DateTime, raw: &str) -> Result<Timestamp, QueryError> {
    TimeZone::UTC
        .to_zoned(datetime)
        .map(|zoned| zoned.timestamp())
        .map_err(|_| QueryError::InvalidDate(raw.to_string()))
}

/// Second-resolution UTC rendering used inside range fragments.
pub fn format_instant(instant: Timestamp) -> String {
    instant.strftime("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_date_becomes_utc_midnight() {
        let instant = parse_datetime("2023-01-01").unwrap();
        assert_eq!(format_instant(instant), "2023-01-01T00:00:00Z");
    }

    #[test]
    fn civil_datetime_is_read_as_utc() {
        let instant = parse_datetime("2023-06-15T08:30:00").unwrap();
        assert_eq!(format_instant(instant), "2023-06-15T08:30:00Z");
    }

    #[test]
    fn offset_instants_are_normalized_to_utc() {
        let instant = parse_datetime("2023-06-15T08:30:00+02:00").unwrap();
        assert_eq!(format_instant(instant), "2023-06-15T06:30:00Z");
    }

    #[test]
    fn subsecond_precision_is_truncated_in_output() {
        let instant = parse_datetime("2023-06-15T08:30:00.750Z").unwrap();
        assert_eq!(format_instant(instant), "2023-06-15T08:30:00Z");
    }

    #[test]
    fn nonsense_is_rejected() {
        assert_eq!(
            parse_datetime("not-a-date"),
            Err(QueryError::InvalidDate("not-a-date".to_string()))
        );
    }
}
