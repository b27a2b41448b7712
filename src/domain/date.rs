//! Calendar date helpers
//!
//! Due dates are plain calendar days in `YYYY-MM-DD` form with no time-of-day
//! component. Anything that does not parse is treated as "no due date".

use chrono::{Local, NaiveDate};

/// The only accepted due date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a due date, returning `None` for missing, empty or malformed input
pub fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    let value = value?;
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Signed whole days from `today` until `date` (negative when overdue)
pub fn days_until(date: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    date.map(|d| (d - today).num_days())
}

/// The local wall-clock date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
