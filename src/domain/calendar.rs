//! Calendar arithmetic for due-date projection.
//!
//! Dates are plain calendar days ([`NaiveDate`]); times of day and time zones
//! never take part in due-date maths. All arithmetic is checked, so values
//! that would overflow the representable range come back as `None` rather
//! than panicking.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime};

const ISO_DATE: &str = "%Y-%m-%d";

/// Parse a date as stored by the task store.
///
/// Accepts a bare `yyyy-MM-dd` date, an RFC 3339 timestamp, or a naive
/// `yyyy-MM-ddTHH:MM:SS` timestamp. For timestamps only the date part is
/// kept (in the offset the timestamp was written in). Leading and trailing
/// whitespace is ignored.
#[must_use]
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, ISO_DATE) {
        return Some(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Some(timestamp.date_naive());
    }

    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|timestamp| timestamp.date())
}

/// Format a date as `yyyy-MM-dd`.
#[must_use]
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// Add `days` calendar days.
#[must_use]
pub fn add_days(date: NaiveDate, days: u32) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(u64::from(days)))
}

/// Add `months` calendar months, keeping the day of month where the target
/// month is long enough and clamping to its last day otherwise.
///
/// `2024-01-31 + 1 month` is `2024-02-29`.
#[must_use]
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Add `months` calendar months and snap to the end of the resulting month.
#[must_use]
pub fn add_months_end_of_month(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    add_months(date, months).and_then(end_of_month)
}

/// Add `years` calendar years, keeping month and day.
///
/// February 29th becomes February 28th in non-leap target years.
#[must_use]
pub fn add_years(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    years.checked_mul(12).and_then(|months| add_months(date, months))
}

/// The last day of the month containing `date`.
#[must_use]
pub fn end_of_month(date: NaiveDate) -> Option<NaiveDate> {
    let first = date.with_day(1)?;
    first.checked_add_months(Months::new(1))?.pred_opt()
}

/// Signed number of whole calendar days from `from` to `to`.
///
/// Positive when `to` is later than `from`.
#[must_use]
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, ISO_DATE).unwrap()
    }

    #[test]
    fn parses_bare_dates() {
        assert_eq!(parse_iso_date("2025-03-14"), Some(date("2025-03-14")));
        assert_eq!(parse_iso_date("  2025-03-14 "), Some(date("2025-03-14")));
    }

    #[test]
    fn parses_timestamps() {
        assert_eq!(
            parse_iso_date("2025-03-14T08:30:00Z"),
            Some(date("2025-03-14"))
        );
        assert_eq!(
            parse_iso_date("2025-03-14T23:30:00-05:00"),
            Some(date("2025-03-14"))
        );
        assert_eq!(
            parse_iso_date("2025-03-14T08:30:00.125"),
            Some(date("2025-03-14"))
        );
    }

    #[test]
    fn rejects_invalid_dates() {
        assert_eq!(parse_iso_date(""), None);
        assert_eq!(parse_iso_date("   "), None);
        assert_eq!(parse_iso_date("2025-02-30"), None);
        assert_eq!(parse_iso_date("14/03/2025"), None);
        assert_eq!(parse_iso_date("not a date"), None);
    }

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(format_iso_date(date("2025-01-05")), "2025-01-05");
    }

    #[test]
    fn month_addition_clamps_to_month_length() {
        assert_eq!(add_months(date("2024-01-31"), 1), Some(date("2024-02-29")));
        assert_eq!(add_months(date("2023-01-31"), 1), Some(date("2023-02-28")));
        assert_eq!(add_months(date("2024-01-15"), 13), Some(date("2025-02-15")));
    }

    #[test]
    fn end_of_month_addition_always_lands_on_last_day() {
        assert_eq!(
            add_months_end_of_month(date("2024-01-01"), 1),
            Some(date("2024-02-29"))
        );
        assert_eq!(
            add_months_end_of_month(date("2024-04-30"), 2),
            Some(date("2024-06-30"))
        );
        assert_eq!(
            add_months_end_of_month(date("2024-11-15"), 1),
            Some(date("2024-12-31"))
        );
    }

    #[test]
    fn year_addition_handles_leap_day() {
        assert_eq!(add_years(date("2024-02-29"), 1), Some(date("2025-02-28")));
        assert_eq!(add_years(date("2024-02-29"), 4), Some(date("2028-02-29")));
    }

    #[test]
    fn overflow_is_none() {
        assert_eq!(add_days(NaiveDate::MAX, 1), None);
        assert_eq!(add_years(date("2024-01-01"), u32::MAX), None);
    }

    #[test]
    fn days_between_is_signed() {
        assert_eq!(days_between(date("2025-02-01"), date("2025-01-01")), -31);
        assert_eq!(days_between(date("2025-01-01"), date("2025-02-01")), 31);
        assert_eq!(days_between(date("2025-01-01"), date("2025-01-01")), 0);
    }
}
