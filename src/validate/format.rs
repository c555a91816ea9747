//! Pre-compiled matchers for the `format` keyword.
//!
//! The table is built once per process on first use and is read-only after.
//! Format names outside the table are not checked.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

const FORMAT_PATTERNS: [(&str, &str); 8] = [
    ("email", r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$"),
    ("uri", r"^[a-zA-Z][a-zA-Z0-9+\-.]*://\S*$"),
    ("date", r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$"),
    ("time", r"^[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?(Z|[+-][0-9]{2}:[0-9]{2})?$"),
    (
        "date-time",
        r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?(Z|[+-][0-9]{2}:[0-9]{2})$",
    ),
    (
        "uuid",
        r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$",
    ),
    ("ipv4", r"^([0-9]{1,3}\.){3}[0-9]{1,3}$"),
    ("ipv6", r"(?i)^[0-9a-f:]+$"),
];

static FORMATS: LazyLock<HashMap<&'static str, Regex>> = LazyLock::new(|| {
    FORMAT_PATTERNS
        .iter()
        .map(|(name, source)| {
            let regex = Regex::new(source).expect("built-in format pattern must compile");
            (*name, regex)
        })
        .collect()
});

/// The matcher for a named format, or `None` if the name is not recognised.
pub fn matcher(name: &str) -> Option<&'static Regex> {
    FORMATS.get(name)
}

/// Names of all recognised formats.
pub fn known_formats() -> impl Iterator<Item = &'static str> {
    FORMAT_PATTERNS.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepts(format: &str, input: &str) -> bool {
        matcher(format).expect("known format").is_match(input)
    }

    #[test]
    fn test_all_formats_compile() {
        for name in known_formats() {
            assert!(matcher(name).is_some(), "{} missing", name);
        }
        assert_eq!(known_formats().count(), 8);
    }

    #[test]
    fn test_unknown_format_has_no_matcher() {
        assert!(matcher("hostname").is_none());
    }

    #[test]
    fn test_email() {
        assert!(accepts("email", "alice@example.com"));
        assert!(!accepts("email", "not-an-email"));
        assert!(!accepts("email", "a@b"));
    }

    #[test]
    fn test_uri() {
        assert!(accepts("uri", "https://example.com/path?q=1"));
        assert!(!accepts("uri", "example.com"));
        assert!(!accepts("uri", "https://exa mple.com"));
    }

    #[test]
    fn test_date_time_family() {
        assert!(accepts("date", "2024-02-29"));
        assert!(!accepts("date", "2024/02/29"));
        assert!(accepts("time", "12:30:00"));
        assert!(accepts("time", "12:30:00.250+02:00"));
        assert!(accepts("date-time", "2024-02-29T12:30:00Z"));
        assert!(!accepts("date-time", "2024-02-29T12:30:00"));
    }

    #[test]
    fn test_uuid_case_insensitive() {
        assert!(accepts("uuid", "123E4567-e89b-12d3-a456-426614174000"));
        assert!(!accepts("uuid", "123e4567e89b12d3a456426614174000"));
    }

    #[test]
    fn test_ip_addresses() {
        assert!(accepts("ipv4", "192.168.0.1"));
        assert!(!accepts("ipv4", "192.168.0"));
        assert!(accepts("ipv6", "fe80::1"));
        assert!(!accepts("ipv6", "fe80::g"));
    }
}
