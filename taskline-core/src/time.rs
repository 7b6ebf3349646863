//! Time utilities: the UTC↔local boundary around the engine.
//!
//! The engine itself runs on naive local wall-clock; callers holding UTC
//! instants convert here, at the edge.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Convert a UTC instant into naive local wall-clock time in an IANA tz
/// like "America/Chicago".
pub fn to_local(utc: DateTime<Utc>, tz: &str) -> Result<NaiveDateTime> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(utc.with_timezone(&tz).naive_local())
}

/// Convert a naive local wall-clock time back to UTC. Ambiguous or
/// nonexistent local times (DST transitions) are an error.
pub fn to_utc(local: NaiveDateTime, tz: &str) -> Result<DateTime<Utc>> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;

    let local_dt = tz
        .from_local_datetime(&local)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous or invalid local time (DST?): {local} {tz}"))?;

    Ok(local_dt.with_timezone(&Utc))
}

/// Parse a due date like "2026-03-02".
pub fn parse_due_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("invalid due date '{s}' (want YYYY-MM-DD): {e}"))
}

/// Parse a local datetime like "2026-03-02 09:00".
pub fn parse_local_datetime(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .map_err(|e| anyhow::anyhow!("invalid local datetime '{s}' (want YYYY-MM-DD HH:MM): {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chicago_round_trip() {
        // Feb is CST (UTC-6)
        let local = parse_local_datetime("2026-02-20 23:59").unwrap();
        let utc = to_utc(local, "America/Chicago").unwrap();
        assert_eq!(utc.to_rfc3339(), "2026-02-21T05:59:00+00:00");
        assert_eq!(to_local(utc, "America/Chicago").unwrap(), local);
    }

    #[test]
    fn test_invalid_timezone_errors() {
        let local = parse_local_datetime("2026-02-20 12:00").unwrap();
        assert!(to_utc(local, "America/Nowhere").is_err());
    }

    #[test]
    fn test_parse_due_date() {
        assert_eq!(
            parse_due_date("2026-03-02").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
        );
        assert!(parse_due_date("03/02/2026").is_err());
    }
}
