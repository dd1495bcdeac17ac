use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

// "8 Jan 21"
const PUBLISHED_FORMAT: &str = "%-d %b %y";
// "Sat, 18 Oct"
const HEADER_FORMAT: &str = "%a, %-d %b";

/// Parse the API's `published_at` value.
///
/// The mock API serves `2021-01-22 10:00:00`, but RFC 3339 timestamps and bare
/// dates are accepted too.
pub fn parse_published_at(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_utc());
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }

    Err(anyhow!("Unrecognised publication date: {}", raw))
}

/// Format a publication date for listings. Unparseable input is shown as-is.
pub fn format_published_at(raw: &str) -> String {
    match parse_published_at(raw) {
        Ok(dt) => dt.format(PUBLISHED_FORMAT).to_string(),
        Err(e) => {
            log::warn!("{}", e);
            raw.to_string()
        }
    }
}

pub fn header_date(now: DateTime<Local>) -> String {
    now.format(HEADER_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_mock_api_dates() {
        assert_eq!(format_published_at("2021-01-22 10:00:00"), "22 Jan 21");
        assert_eq!(format_published_at("2021-02-08 09:30:00"), "8 Feb 21");
    }

    #[test]
    fn accepts_rfc3339_and_plain_dates() {
        assert_eq!(format_published_at("2021-03-05T12:00:00Z"), "5 Mar 21");
        assert_eq!(format_published_at("2020-12-31"), "31 Dec 20");
    }

    #[test]
    fn garbage_is_passed_through() {
        assert!(parse_published_at("yesterday").is_err());
        assert_eq!(format_published_at("yesterday"), "yesterday");
    }

    #[test]
    fn header_shows_weekday_and_day() {
        let now = Local.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        assert_eq!(header_date(now), "Sun, 18 Oct");
    }
}
