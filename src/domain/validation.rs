use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email pattern"));

// Matched against the normalized number: optional 7/8/+7 country code, then a
// 10-digit block starting with 4, 8 or 9.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+7|7|8)?[489]\d{9}$").expect("invalid phone pattern"));

/// True when the value is empty or whitespace-only. Used for the required
/// field check before any shape validation runs.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Loose email shape check: something left of `@`, a domain with a dot, no
/// whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Strips the separators users type into phone numbers: spaces, dashes and
/// parentheses.
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect()
}

/// Russian mobile/city number check over the normalized digits.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(&normalize_phone(phone))
}
