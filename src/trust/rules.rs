use crate::error::{Error, Result};
use regex::Regex;

/// The field a rule's pattern is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleField {
    Email,
    Hostname,
    Username,
    UsernameLength,
    MxCount,
    IsFree,
    IsCommon,
}

/// Values computed by earlier stages that rules can inspect.
#[derive(Debug, Clone, Copy)]
pub struct RuleSubject<'a> {
    pub email: &'a str,
    pub hostname: &'a str,
    pub username: &'a str,
    pub mx_count: usize,
    pub is_free: bool,
    pub is_common: bool,
}

impl RuleField {
    /// String form of the selected field; booleans render as `true`/`false`.
    pub fn render(self, subject: &RuleSubject<'_>) -> String {
        match self {
            RuleField::Email => subject.email.to_string(),
            RuleField::Hostname => subject.hostname.to_string(),
            RuleField::Username => subject.username.to_string(),
            RuleField::UsernameLength => subject.username.chars().count().to_string(),
            RuleField::MxCount => subject.mx_count.to_string(),
            RuleField::IsFree => subject.is_free.to_string(),
            RuleField::IsCommon => subject.is_common.to_string(),
        }
    }
}

/// A `(pattern, field, reason)` heuristic.
///
/// The pattern is anchored at the start of the field value: it matches when the
/// value begins with a match, like a prefix match. Add `$` for a full match.
#[derive(Debug, Clone)]
pub struct TrustRule {
    pattern: String,
    regex: Regex,
    field: RuleField,
    reason: String,
}

impl TrustRule {
    pub fn new(pattern: &str, field: RuleField, reason: impl Into<String>) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})")).map_err(|source| Error::InvalidRule {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            field,
            reason: reason.into(),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn field(&self) -> RuleField {
        self.field
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn matches(&self, subject: &RuleSubject<'_>) -> bool {
        self.regex.is_match(&self.field.render(subject))
    }
}

/// Built-in rules, in evaluation order.
pub const DEFAULT_RULES: &[(&str, RuleField, &str)] = &[
    (r"1$", RuleField::MxCount, "only 1 mail server reported"),
    (r".*?[0-9]+", RuleField::Username, "numbers in username"),
    (r".*?[A-Z]+[a-z]+", RuleField::Username, "mixed case in username"),
    (r"[12]$", RuleField::UsernameLength, "username is really small"),
    (r"[A-Z0-9'_-]+$", RuleField::Username, "only upper case in username"),
    (r"(?:True|true)$", RuleField::IsFree, "email is from a free provider"),
    (r"[^A-Za-z]+", RuleField::Username, "non letter at start"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(username: &'static str) -> RuleSubject<'static> {
        RuleSubject {
            email: "",
            hostname: "example.com",
            username,
            mx_count: 2,
            is_free: false,
            is_common: false,
        }
    }

    fn default_rule(reason: &str) -> TrustRule {
        let (pattern, field, reason) = DEFAULT_RULES
            .iter()
            .find(|(_, _, r)| *r == reason)
            .copied()
            .unwrap();
        TrustRule::new(pattern, field, reason).unwrap()
    }

    #[test]
    fn test_render_fields() {
        let s = RuleSubject {
            email: "Bill_990@gmail.com",
            hostname: "gmail.com",
            username: "Bill_990",
            mx_count: 5,
            is_free: true,
            is_common: false,
        };
        assert_eq!(RuleField::Email.render(&s), "Bill_990@gmail.com");
        assert_eq!(RuleField::Hostname.render(&s), "gmail.com");
        assert_eq!(RuleField::UsernameLength.render(&s), "8");
        assert_eq!(RuleField::MxCount.render(&s), "5");
        assert_eq!(RuleField::IsFree.render(&s), "true");
        assert_eq!(RuleField::IsCommon.render(&s), "false");
    }

    #[test]
    fn test_single_mail_server_rule_is_exact() {
        let rule = default_rule("only 1 mail server reported");
        let mut s = subject("bill");
        s.mx_count = 1;
        assert!(rule.matches(&s));
        s.mx_count = 11;
        assert!(!rule.matches(&s));
        s.mx_count = 21;
        assert!(!rule.matches(&s));
    }

    #[test]
    fn test_numbers_in_username() {
        let rule = default_rule("numbers in username");
        assert!(rule.matches(&subject("Bill_990")));
        assert!(rule.matches(&subject("9bill")));
        assert!(!rule.matches(&subject("bill")));
    }

    #[test]
    fn test_mixed_case() {
        let rule = default_rule("mixed case in username");
        assert!(rule.matches(&subject("ShaneDevane")));
        assert!(rule.matches(&subject("bIll")));
        assert!(!rule.matches(&subject("bill")));
        assert!(!rule.matches(&subject("BILL")));
    }

    #[test]
    fn test_really_small_username() {
        let rule = default_rule("username is really small");
        assert!(rule.matches(&subject("b")));
        assert!(rule.matches(&subject("bo")));
        assert!(!rule.matches(&subject("bob")));
        assert!(!rule.matches(&subject("abcdefghijkl")));
    }

    #[test]
    fn test_only_upper_case() {
        let rule = default_rule("only upper case in username");
        assert!(rule.matches(&subject("SHANEDEVANE")));
        assert!(rule.matches(&subject("O'NEIL_2")));
        assert!(!rule.matches(&subject("ShaneDevane")));
    }

    #[test]
    fn test_free_provider_rule_reads_boolean() {
        let rule = default_rule("email is from a free provider");
        let mut s = subject("bill");
        assert!(!rule.matches(&s));
        s.is_free = true;
        assert!(rule.matches(&s));
    }

    #[test]
    fn test_non_letter_at_start() {
        let rule = default_rule("non letter at start");
        assert!(rule.matches(&subject("_bill")));
        assert!(rule.matches(&subject("99bill")));
        assert!(!rule.matches(&subject("bill_99")));
    }

    #[test]
    fn test_patterns_are_case_sensitive() {
        let rule = TrustRule::new("admin", RuleField::Username, "role account").unwrap();
        assert!(rule.matches(&subject("admin")));
        assert!(!rule.matches(&subject("ADMIN")));
    }

    #[test]
    fn test_patterns_anchor_at_start_only() {
        let rule = TrustRule::new("info", RuleField::Username, "role account").unwrap();
        assert!(rule.matches(&subject("info.sales")));
        assert!(!rule.matches(&subject("sales.info")));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let result = TrustRule::new("[unclosed", RuleField::Username, "broken");
        assert!(matches!(result, Err(Error::InvalidRule { .. })));
    }
}
