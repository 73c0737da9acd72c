use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Every calendar day from `start` through `end`, inclusive. Empty when
/// `start > end`.
pub fn expand_date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}

/// Parse a strict `YYYY-MM-DD` calendar day.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}
