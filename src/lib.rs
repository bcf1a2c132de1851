//! # trusted_email_validator
//!
//! Validates email addresses and rates how much they can be trusted.
//!
//! Each address goes through normalization, a strict syntax check,
//! free-provider and common-username classification, an MX lookup and a set of
//! pattern-based trust rules. The outcome is one immutable
//! [`ValidationResult`].
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use trusted_email_validator::{ValidatorConfig, ValidatorContext};
//!
//! # fn main() -> trusted_email_validator::Result<()> {
//! let context = Arc::new(ValidatorContext::from_config(&ValidatorConfig::from_env()?)?);
//!
//! assert!(trusted_email_validator::is_valid(&context, "email@gmail.com", false)?);
//! assert!(trusted_email_validator::is_free(&context, "email@gmail.com", false)?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod session;
pub mod trust;
pub mod validation;

pub use config::{Settings, ValidatorConfig};
pub use context::ValidatorContext;
pub use error::{Error, Result};
pub use models::validation::ValidationResult;
pub use session::TrustedEmailValidator;
pub use trust::{RuleField, TrustRule, TrustRules};

use std::sync::Arc;

/// Runs a fresh session for `email` and returns its result.
pub fn validate(context: &Arc<ValidatorContext>, email: &str, skip_mx_lookup: bool) -> Result<ValidationResult> {
    let mut validator = TrustedEmailValidator::new(Arc::clone(context), email);
    validator.set_skip_mx_lookup(skip_mx_lookup);
    validator.as_record()
}

pub fn is_valid(context: &Arc<ValidatorContext>, email: &str, skip_mx_lookup: bool) -> Result<bool> {
    Ok(validate(context, email, skip_mx_lookup)?.is_valid())
}

pub fn is_free(context: &Arc<ValidatorContext>, email: &str, skip_mx_lookup: bool) -> Result<bool> {
    Ok(validate(context, email, skip_mx_lookup)?.is_free())
}

pub fn is_trusted(context: &Arc<ValidatorContext>, email: &str, skip_mx_lookup: bool) -> Result<bool> {
    Ok(validate(context, email, skip_mx_lookup)?.is_trusted())
}
