//! Calendar-day windows for date-scoped counts.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use taut_database::TimeWindow;

/// A calendar day in some offset, with its 24 hour window in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalDay {
    pub date: NaiveDate,
    pub window: TimeWindow,
}

impl LocalDay {
    /// Parse a datetime entity and truncate it to the start of its calendar day.
    ///
    /// Values carrying an offset (RFC 3339) keep it; naive datetimes and bare
    /// dates are read in `local`. The window is exactly 24 hours wide.
    pub fn parse(value: &str, local: FixedOffset) -> Option<Self> {
        let value = value.trim();

        let (date, offset) = if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
            (instant.date_naive(), *instant.offset())
        } else if let Ok(naive) = value.parse::<NaiveDateTime>() {
            (naive.date(), local)
        } else if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            (date, local)
        } else {
            return None;
        };

        Self::starting(date, offset)
    }

    /// The day `date` as observed in `offset`.
    pub fn starting(date: NaiveDate, offset: FixedOffset) -> Option<Self> {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        let start = offset
            .from_local_datetime(&midnight)
            .single()?
            .with_timezone(&Utc);

        Some(Self {
            date,
            window: TimeWindow::new(start, start + Duration::hours(24)),
        })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.window.contains(instant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn at(value: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(value).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn bare_date_spans_exactly_one_day() {
        let day = LocalDay::parse("2024-03-14", utc()).unwrap();

        assert_eq!(day.date, NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
        assert_eq!(day.window.end - day.window.start, Duration::hours(24));
        assert!(day.contains(at("2024-03-14T00:00:00Z")));
        assert!(day.contains(at("2024-03-14T23:59:59Z")));
        assert!(!day.contains(at("2024-03-15T00:00:01Z")));
        assert!(!day.contains(at("2024-03-15T00:00:00Z")));
    }

    #[test]
    fn offset_in_the_value_is_kept() {
        let day = LocalDay::parse("2024-03-14T00:00:00.000-07:00", utc()).unwrap();

        assert_eq!(day.date, NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
        assert_eq!(day.window.start, at("2024-03-14T07:00:00Z"));
        assert_eq!(day.window.end, at("2024-03-15T07:00:00Z"));
    }

    #[test]
    fn time_of_day_is_truncated() {
        let day = LocalDay::parse("2024-03-14T15:42:10", utc()).unwrap();
        assert_eq!(day.window.start, at("2024-03-14T00:00:00Z"));
    }

    #[test]
    fn naive_values_use_the_local_offset() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let day = LocalDay::parse("2024-03-14", plus_two).unwrap();
        assert_eq!(day.window.start, at("2024-03-13T22:00:00Z"));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(LocalDay::parse("tomorrow-ish", utc()).is_none());
        assert!(LocalDay::parse("", utc()).is_none());
        assert!(LocalDay::parse("2024-13-01", utc()).is_none());
    }
}
