use regex::Regex;
use std::sync::LazyLock;

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[_a-z0-9'-]+(\.['_a-z0-9-]+)*@[a-z0-9-]+(\.[a-z0-9-]+)*(\.[a-z]{2,6})$")
        .expect("email shape pattern is valid")
});

/// Checks that a normalized address has the structure of an email address.
///
/// The whole string must match:
/// - a local part of letters, digits, `-`, `_` and `'`, optionally split into
///   dot-separated segments
/// - a single `@`
/// - dot-separated domain labels of letters, digits and `-`
/// - a final label of 2 to 6 letters
///
/// Matching is case-insensitive.
///
/// # Examples
/// ```
/// use trusted_email_validator::validation::syntax::is_email_shaped;
///
/// assert!(is_email_shaped("tes'ting@gmail.com"));
/// assert!(is_email_shaped("SHANEDEVANE@SHANEDEVANE.COM"));
/// assert!(!is_email_shaped("testing@dom[]ain.com"));
/// ```
pub fn is_email_shaped(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}
