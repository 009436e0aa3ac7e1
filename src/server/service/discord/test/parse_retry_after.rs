use super::*;
use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};

fn headers_with(value: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(RETRY_AFTER, HeaderValue::from_static(value));
    headers
}

/// Tests an integer `retry-after` value.
///
/// Expected: wait of that many seconds
#[test]
fn parses_whole_seconds() {
    assert_eq!(
        parse_retry_after(&headers_with("2")),
        Some(Duration::from_secs(2))
    );
}

/// Tests a fractional `retry-after` value.
///
/// Expected: truncated to whole seconds
#[test]
fn truncates_fractional_seconds() {
    assert_eq!(
        parse_retry_after(&headers_with("3.75")),
        Some(Duration::from_secs(3))
    );
}

/// Tests missing, negative and garbage values.
///
/// Expected: treated as absent
#[test]
fn invalid_values_are_absent() {
    assert_eq!(parse_retry_after(&HeaderMap::new()), None);
    assert_eq!(parse_retry_after(&headers_with("-1")), None);
    assert_eq!(parse_retry_after(&headers_with("soon")), None);
}
