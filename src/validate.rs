//! URL validation — the synchronous gate before any network work

use crate::error::{Error, Result};
use url::Url;

/// Check whether the input is a fetchable HTTP(S) URL.
///
/// The input is trimmed of surrounding whitespace before evaluation. Valid
/// iff it parses as a URL with scheme exactly `http` or `https` and a
/// non-empty host. Pure function; performs no network access.
pub fn is_valid_url(input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return false;
    }
    Url::parse(trimmed).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
    })
}

/// Validate an input URL, returning the trimmed form.
///
/// On rejection the error names the exact offending input, with a `<empty>`
/// placeholder when the trimmed input was blank. Callers use this as the
/// precondition gate: a rejected URL means no work is scheduled at all.
pub fn validate_url(input: &str) -> Result<&str> {
    let trimmed = input.trim();
    if is_valid_url(trimmed) {
        Ok(trimmed)
    } else {
        Err(Error::invalid_url(input))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_url_with_path() {
        assert!(is_valid_url("http://example.com/a"));
    }

    #[test]
    fn accepts_https_url_without_path() {
        assert!(is_valid_url("https://example.com"));
    }

    #[test]
    fn accepts_url_with_surrounding_whitespace() {
        assert!(
            is_valid_url("  https://example.com/img.png \n"),
            "input must be trimmed before evaluation"
        );
    }

    #[test]
    fn accepts_uppercase_scheme() {
        // URL parsing normalizes the scheme to lowercase
        assert!(is_valid_url("HTTP://EXAMPLE.COM/A"));
    }

    #[test]
    fn accepts_url_with_port_and_query() {
        assert!(is_valid_url("http://example.com:8080/gallery?page=2"));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(!is_valid_url(""));
    }

    #[test]
    fn rejects_whitespace_only_input() {
        assert!(!is_valid_url("   "));
    }

    #[test]
    fn rejects_non_http_scheme() {
        assert!(!is_valid_url("ftp://x.com"));
        assert!(!is_valid_url("file:///etc/passwd"));
    }

    #[test]
    fn rejects_free_text() {
        assert!(!is_valid_url("not a url"));
    }

    #[test]
    fn rejects_scheme_without_host() {
        assert!(!is_valid_url("http://"));
    }

    #[test]
    fn rejects_bare_hostname_without_scheme() {
        assert!(
            !is_valid_url("example.com/a"),
            "a scheme-less string is not fetchable and must be rejected"
        );
    }

    // --- validate_url ---

    #[test]
    fn validate_returns_trimmed_input() {
        let url = validate_url("  http://example.com/a  ").expect("should be valid");
        assert_eq!(url, "http://example.com/a");
    }

    #[test]
    fn validate_reports_offending_input() {
        let err = validate_url("ftp://x.com").expect_err("ftp must be rejected");
        assert_eq!(err.to_string(), "Invalid URL: ftp://x.com");
    }

    #[test]
    fn validate_reports_placeholder_for_empty_input() {
        let err = validate_url("").expect_err("empty must be rejected");
        assert_eq!(err.to_string(), "Invalid URL: <empty>");
    }
}
