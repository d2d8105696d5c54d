//! Time helpers — business-day boundaries
//!
//! All date-to-timestamp conversion happens in the API handler layer;
//! repositories and queries only see `i64` Unix millis.

use chrono::{Duration, NaiveDate, Utc};

use super::{AppError, AppResult};

/// Parse a date string (`YYYY-MM-DD`)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// `[start, end)` Unix millis covering one calendar day (UTC)
pub fn day_bounds_millis(date: NaiveDate) -> (i64, i64) {
    let start = date.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp_millis();
    let next = date + Duration::days(1);
    let end = next.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp_millis();
    (start, end)
}

/// `[start, end)` Unix millis for the current day (UTC)
pub fn today_bounds_millis() -> (i64, i64) {
    day_bounds_millis(Utc::now().date_naive())
}

/// Start-of-day millis for an optional `from` filter
pub fn range_start_millis(date: NaiveDate) -> i64 {
    day_bounds_millis(date).0
}

/// Exclusive end-of-day millis for an optional `to` filter
pub fn range_end_millis(date: NaiveDate) -> i64 {
    day_bounds_millis(date).1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_bounds_span_24_hours() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let (start, end) = day_bounds_millis(date);
        assert_eq!(end - start, 24 * 60 * 60 * 1000);
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("2025-03-10").is_ok());
        assert!(parse_date("10/03/2025").is_err());
        assert!(parse_date("").is_err());
    }
}
