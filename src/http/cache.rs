//! HTTP cache validation module
//!
//! `Last-Modified` generation and `If-Modified-Since` evaluation.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::time::SystemTime;

/// IMF-fixdate, the only format we emit
const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format a timestamp as an HTTP date, e.g. `Tue, 15 Nov 1994 08:12:31 GMT`
pub fn format_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(HTTP_DATE).to_string()
}

/// Parse an HTTP date; `None` when the value is not an IMF-fixdate
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), HTTP_DATE)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Decide whether a conditional GET can be answered with 304.
///
/// `If-None-Match` takes precedence: when present, the date is ignored and
/// the full response is sent. Comparison is done in whole seconds, the
/// resolution of HTTP dates.
pub fn is_not_modified(
    modified: SystemTime,
    if_modified_since: Option<&str>,
    has_if_none_match: bool,
) -> bool {
    if has_if_none_match {
        return false;
    }
    let Some(since) = if_modified_since.and_then(parse_http_date) else {
        return false;
    };
    DateTime::<Utc>::from(modified).timestamp() <= since.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    // Tue, 15 Nov 1994 08:12:31 GMT
    fn sample_time() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(784_887_151)
    }

    #[test]
    fn test_format_http_date() {
        assert_eq!(
            format_http_date(sample_time()),
            "Tue, 15 Nov 1994 08:12:31 GMT"
        );
    }

    #[test]
    fn test_parse_http_date() {
        let parsed = parse_http_date("Tue, 15 Nov 1994 08:12:31 GMT").unwrap();
        assert_eq!(parsed.timestamp(), 784_887_151);
        assert!(parse_http_date("yesterday").is_none());
    }

    #[test]
    fn test_not_modified_when_unchanged_or_older() {
        let header = "Tue, 15 Nov 1994 08:12:31 GMT";
        assert!(is_not_modified(sample_time(), Some(header), false));
        // Sub-second part of mtime is ignored
        let fractional = sample_time() + Duration::from_millis(400);
        assert!(is_not_modified(fractional, Some(header), false));
        let older = sample_time() - Duration::from_secs(60);
        assert!(is_not_modified(older, Some(header), false));
    }

    #[test]
    fn test_modified_when_newer() {
        let newer = sample_time() + Duration::from_secs(1);
        assert!(!is_not_modified(
            newer,
            Some("Tue, 15 Nov 1994 08:12:31 GMT"),
            false
        ));
    }

    #[test]
    fn test_if_none_match_and_garbage_disable_check() {
        let header = "Tue, 15 Nov 1994 08:12:31 GMT";
        assert!(!is_not_modified(sample_time(), Some(header), true));
        assert!(!is_not_modified(sample_time(), Some("garbage"), false));
        assert!(!is_not_modified(sample_time(), None, false));
    }
}
