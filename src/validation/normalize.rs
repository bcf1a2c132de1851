use regex::Regex;
use std::sync::LazyLock;

static EMBEDDED_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)['_a-z0-9.-]+@['a-z0-9.-]+\.['a-z0-9]{2,6}")
        .expect("embedded address pattern is valid")
});

/// Extracts the first address-shaped substring from free-form input.
///
/// Handles display names (`Name <addr>`), surrounding prose, trailing
/// punctuation and whitespace. When nothing address-shaped is found the input is
/// returned unchanged so the strict syntax check can reject it.
///
/// # Examples
/// ```
/// use trusted_email_validator::validation::normalize::normalize_email;
///
/// assert_eq!(normalize_email("Shane Devane <thingy@gmail.com>"), "thingy@gmail.com");
/// assert_eq!(normalize_email("not an address"), "not an address");
/// ```
pub fn normalize_email(input: &str) -> String {
    match EMBEDDED_ADDRESS.find(input) {
        Some(found) => found.as_str().trim().to_string(),
        None => input.to_string(),
    }
}

/// Splits an address at its last `@` into `(username, hostname)`.
///
/// Input without an `@` yields the whole string as the username and an empty
/// hostname.
pub fn split_address(email: &str) -> (&str, &str) {
    match email.rsplit_once('@') {
        Some((username, hostname)) => (username, hostname),
        None => (email, ""),
    }
}
