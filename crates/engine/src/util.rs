//! Internal helpers for input validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation so every operation enforces the same invariants.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::{EngineError, MoneyCents, ResultEngine};

const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Reject zero and negative amounts with a labeled error.
pub(crate) fn ensure_positive(amount: MoneyCents, label: &str) -> ResultEngine<()> {
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must be positive"
        )));
    }
    Ok(())
}

pub(crate) fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Parse an ISO-8601 date or date-time.
///
/// Values without an offset are read as UTC; a bare date means midnight UTC.
pub fn parse_iso_datetime(raw: &str) -> ResultEngine<DateTime<Utc>> {
    let trimmed = raw.trim();
    let invalid = || EngineError::InvalidDate(format!("invalid ISO-8601 date: {trimmed}"));

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| invalid())?;
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?;
    Ok(midnight.and_utc())
}

/// Parse a goal due date and require it to be strictly after `now`.
pub(crate) fn parse_due_date(raw: &str, now: DateTime<Utc>) -> ResultEngine<DateTime<Utc>> {
    let due_date = parse_iso_datetime(raw)?;
    if due_date <= now {
        return Err(EngineError::InvalidDate(
            "due date must be in the future".to_string(),
        ));
    }
    Ok(due_date)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn parses_offset_and_converts_to_utc() {
        let parsed = parse_iso_datetime("2026-04-01T10:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 4, 1, 8, 0, 0).unwrap());
    }

    #[test]
    fn naive_values_are_utc() {
        let parsed = parse_iso_datetime("2026-04-01T10:00:00.250").unwrap();
        assert_eq!(
            parsed,
            Utc.with_ymd_and_hms(2026, 4, 1, 10, 0, 0).unwrap() + Duration::milliseconds(250)
        );
        assert_eq!(
            parse_iso_datetime("2026-04-01 10:30").unwrap(),
            Utc.with_ymd_and_hms(2026, 4, 1, 10, 30, 0).unwrap()
        );
        assert_eq!(
            parse_iso_datetime("2026-04-01").unwrap(),
            Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            parse_iso_datetime("next tuesday"),
            Err(EngineError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_iso_datetime("2026-13-01"),
            Err(EngineError::InvalidDate(_))
        ));
    }

    #[test]
    fn due_date_must_be_strictly_future() {
        assert!(parse_due_date("2026-03-11T00:00:00Z", now()).is_ok());
        assert_eq!(
            parse_due_date("2026-03-10T12:00:00Z", now()),
            Err(EngineError::InvalidDate(
                "due date must be in the future".to_string()
            ))
        );
        assert!(parse_due_date("2025-01-01", now()).is_err());
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        assert!(ensure_positive(MoneyCents::new(1), "amount").is_ok());
        assert_eq!(
            ensure_positive(MoneyCents::ZERO, "target amount"),
            Err(EngineError::InvalidAmount(
                "target amount must be positive".to_string()
            ))
        );
        assert!(ensure_positive(MoneyCents::new(-5), "amount").is_err());
    }

    #[test]
    fn optional_text_drops_blank() {
        assert_eq!(normalize_optional_text(Some("  ")), None);
        assert_eq!(
            normalize_optional_text(Some(" rent ")),
            Some("rent".to_string())
        );
        assert_eq!(normalize_optional_text(None), None);
    }
}
