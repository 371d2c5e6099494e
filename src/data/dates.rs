use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y %b %d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a `publish_time` cell into a date.
///
/// Accepts full dates (`2020-03-15`, `2020/03/15`, `03/15/2020`, `2020 Mar 15`),
/// timestamps (RFC 3339 or `YYYY-MM-DD[T ]HH:MM:SS`), and partial dates
/// (`2020-03`, `2020 Mar`, `2020`) which anchor to the first day of the period.
/// Returns `None` for anything else.
pub fn parse_publish_time(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }

    parse_partial_date(value)
}

/// `YYYY-MM`, `YYYY Mon` and bare `YYYY`.
fn parse_partial_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{value} 01"), "%Y %b %d") {
        return Some(date);
    }
    if value.len() == 4 && value.chars().all(|c| c.is_ascii_digit()) {
        let year = value.parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn parses_full_dates() {
        assert_eq!(parse_publish_time("2020-03-15"), ymd(2020, 3, 15));
        assert_eq!(parse_publish_time("2020/03/15"), ymd(2020, 3, 15));
        assert_eq!(parse_publish_time("03/15/2020"), ymd(2020, 3, 15));
        assert_eq!(parse_publish_time("2020 Mar 15"), ymd(2020, 3, 15));
        assert_eq!(parse_publish_time(" 2019-12-31 "), ymd(2019, 12, 31));
    }

    #[test]
    fn parses_timestamps() {
        assert_eq!(parse_publish_time("2021-07-01T08:30:00Z"), ymd(2021, 7, 1));
        assert_eq!(parse_publish_time("2021-07-01T08:30:00"), ymd(2021, 7, 1));
        assert_eq!(parse_publish_time("2021-07-01 08:30:00"), ymd(2021, 7, 1));
        assert_eq!(parse_publish_time("2021-07-01T08:30:00.250"), ymd(2021, 7, 1));
    }

    #[test]
    fn partial_dates_anchor_to_period_start() {
        assert_eq!(parse_publish_time("2020-03"), ymd(2020, 3, 1));
        assert_eq!(parse_publish_time("2020 Mar"), ymd(2020, 3, 1));
        assert_eq!(parse_publish_time("2018"), ymd(2018, 1, 1));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_publish_time(""), None);
        assert_eq!(parse_publish_time("unknown"), None);
        assert_eq!(parse_publish_time("2020-13-45"), None);
        assert_eq!(parse_publish_time("20201"), None);
    }
}
