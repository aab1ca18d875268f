use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

/// Parses the loosely-typed date strings the upstream store delivers.
/// RFC 3339 timestamps are tried first, then the bare date formats the
/// inquiry form writes. Date-only values resolve to midnight UTC.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|naive| Utc.from_utc_datetime(&naive));
        }
    }

    None
}

pub fn month_key(moment: &DateTime<Utc>) -> (i32, u32) {
    (moment.year(), moment.month())
}

/// Calendar month immediately before the given moment, rolling
/// January back into December of the previous year.
pub fn previous_month_key(moment: &DateTime<Utc>) -> (i32, u32) {
    if moment.month() == 1 {
        (moment.year() - 1, 12)
    } else {
        (moment.year(), moment.month() - 1)
    }
}
