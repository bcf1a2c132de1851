//! Rule-based trust rating.
//!
//! Every registered rule is checked in registration order; each match appends
//! its reason to the issue list. The rating is the share of rules that did
//! *not* match, truncated to an integer percentage:
//!
//! ```text
//! rating = 100 - floor(matched / total * 100)
//! ```
//!
//! An address is trusted when `rating > cut_off`.

pub mod rules;

use crate::error::{Error, Result};
use tracing::debug;

pub use rules::{DEFAULT_RULES, RuleField, RuleSubject, TrustRule};

/// Outcome of evaluating all rules against one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustOutcome {
    pub issues: Vec<String>,
    pub rating: u8,
    pub is_trusted: bool,
}

/// Ordered, extensible rule registry.
#[derive(Debug, Clone)]
pub struct TrustRules {
    rules: Vec<TrustRule>,
}

impl Default for TrustRules {
    fn default() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .map(|&(pattern, field, reason)| TrustRule::new(pattern, field, reason))
            .collect::<Result<Vec<_>>>()
            .expect("built-in trust rules compile");
        Self { rules }
    }
}

impl TrustRules {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Compiles and appends a rule; it is evaluated after all existing rules.
    pub fn register(&mut self, pattern: &str, field: RuleField, reason: impl Into<String>) -> Result<&mut Self> {
        self.rules.push(TrustRule::new(pattern, field, reason)?);
        Ok(self)
    }

    pub fn push(&mut self, rule: TrustRule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrustRule> {
        self.rules.iter()
    }

    /// Runs every rule against `subject`.
    ///
    /// Fails with [`Error::NoTrustRules`] when nothing is registered.
    pub fn evaluate(&self, subject: &RuleSubject<'_>, cut_off: u8) -> Result<TrustOutcome> {
        if self.rules.is_empty() {
            return Err(Error::NoTrustRules);
        }

        let issues: Vec<String> = self
            .rules
            .iter()
            .filter(|rule| rule.matches(subject))
            .map(|rule| rule.reason().to_string())
            .collect();

        let rating = rating(issues.len(), self.rules.len());
        debug!(
            "Trust rating for {}: {} ({} of {} rules matched)",
            subject.email,
            rating,
            issues.len(),
            self.rules.len()
        );

        Ok(TrustOutcome {
            issues,
            rating,
            is_trusted: rating > cut_off,
        })
    }
}

fn rating(matched: usize, total: usize) -> u8 {
    (100 - matched * 100 / total) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject<'a>(email: &'a str, username: &'a str, mx_count: usize, is_free: bool) -> RuleSubject<'a> {
        RuleSubject {
            email,
            hostname: email.rsplit_once('@').map(|(_, h)| h).unwrap_or(""),
            username,
            mx_count,
            is_free,
            is_common: false,
        }
    }

    #[test]
    fn test_rating_truncates() {
        assert_eq!(rating(0, 7), 100);
        assert_eq!(rating(3, 7), 58);
        assert_eq!(rating(1, 3), 67);
        assert_eq!(rating(7, 7), 0);
    }

    #[test]
    fn test_default_rules_in_order() {
        let rules = TrustRules::default();
        let reasons: Vec<&str> = rules.iter().map(|r| r.reason()).collect();
        assert_eq!(
            reasons,
            vec![
                "only 1 mail server reported",
                "numbers in username",
                "mixed case in username",
                "username is really small",
                "only upper case in username",
                "email is from a free provider",
                "non letter at start",
            ]
        );
    }

    #[test]
    fn test_bill_990_is_not_trusted_at_default_cut_off() {
        let rules = TrustRules::default();
        let outcome = rules
            .evaluate(&subject("Bill_990@gmail.com", "Bill_990", 5, true), 60)
            .unwrap();

        assert_eq!(
            outcome.issues,
            vec![
                "numbers in username",
                "mixed case in username",
                "email is from a free provider",
            ]
        );
        assert_eq!(outcome.rating, 58);
        assert!(!outcome.is_trusted);
    }

    #[test]
    fn test_bill_990_is_trusted_at_low_cut_off() {
        let outcome = TrustRules::default()
            .evaluate(&subject("Bill_990@gmail.com", "Bill_990", 5, true), 10)
            .unwrap();
        assert_eq!(outcome.issues.len(), 3);
        assert!(outcome.is_trusted);
    }

    #[test]
    fn test_company_address_is_trusted() {
        let outcome = TrustRules::default()
            .evaluate(&subject("ShaneDevane@microsoft.com", "ShaneDevane", 1, false), 60)
            .unwrap();
        assert_eq!(
            outcome.issues,
            vec!["only 1 mail server reported", "mixed case in username"]
        );
        assert_eq!(outcome.rating, 72);
        assert!(outcome.is_trusted);
    }

    #[test]
    fn test_cut_off_comparison_is_strict() {
        let mut rules = TrustRules::empty();
        rules.register("x", RuleField::Username, "starts with x").unwrap();
        rules.register("y", RuleField::Username, "starts with y").unwrap();

        let outcome = rules.evaluate(&subject("x@example.com", "x", 2, false), 50).unwrap();
        assert_eq!(outcome.rating, 50);
        assert!(!outcome.is_trusted);

        let outcome = rules.evaluate(&subject("x@example.com", "x", 2, false), 49).unwrap();
        assert!(outcome.is_trusted);
    }

    #[test]
    fn test_registered_rules_run_after_defaults() {
        let mut rules = TrustRules::default();
        rules
            .register("true$", RuleField::IsCommon, "username is a common role account")
            .unwrap();

        let mut s = subject("contact@example.com", "contact", 2, false);
        s.is_common = true;
        let outcome = rules.evaluate(&s, 60).unwrap();

        assert_eq!(rules.len(), 8);
        assert_eq!(
            outcome.issues.last().map(String::as_str),
            Some("username is a common role account")
        );
    }

    #[test]
    fn test_duplicate_reasons_are_kept() {
        let mut rules = TrustRules::empty();
        rules.register("b", RuleField::Username, "suspicious").unwrap();
        rules.register(".*l", RuleField::Username, "suspicious").unwrap();

        let outcome = rules.evaluate(&subject("bill@example.com", "bill", 2, false), 60).unwrap();
        assert_eq!(outcome.issues, vec!["suspicious", "suspicious"]);
        assert_eq!(outcome.rating, 0);
    }

    #[test]
    fn test_empty_registry_fails_fast() {
        let result = TrustRules::empty().evaluate(&subject("bill@example.com", "bill", 2, false), 60);
        assert!(matches!(result, Err(Error::NoTrustRules)));
    }
}
