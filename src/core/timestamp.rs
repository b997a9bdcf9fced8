use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses the ISO-8601 variants carriers send. A trailing `Z` means `+00:00`;
/// timestamps without an offset are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let normalized = match raw.strip_suffix('Z').or_else(|| raw.strip_suffix('z')) {
        Some(stripped) => format!("{}+00:00", stripped),
        None => raw.to_string(),
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(parsed);
    }
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(&normalized, format) {
            return Some(parsed);
        }
    }

    let utc = FixedOffset::east_opt(0)?;
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return utc.from_local_datetime(&naive).single();
        }
    }
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| utc.from_local_datetime(&naive).single())
}

pub fn parse_timestamp_utc(raw: &str) -> Option<DateTime<Utc>> {
    parse_timestamp(raw).map(|parsed| parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_zulu_and_offset() {
        let zulu = parse_timestamp_utc("2026-01-28T10:30:00Z").unwrap();
        let offset = parse_timestamp_utc("2026-01-28T16:00:00+05:30").unwrap();
        assert_eq!(zulu, offset);
    }

    #[test]
    fn test_parse_space_separated_and_naive() {
        let spaced = parse_timestamp("2026-01-28 10:30:00").unwrap();
        assert_eq!(spaced.offset().local_minus_utc(), 0);
        assert_eq!(spaced.hour(), 10);
        assert!(parse_timestamp("2026-01-28 10:30:00+05:30").is_some());
        assert!(parse_timestamp("2026-01-28").is_some());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("28/01/2026").is_none());
    }
}
