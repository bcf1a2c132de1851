use crate::config::Settings;
use crate::context::ValidatorContext;
use crate::error::{Error, Result};
use crate::models::validation::{
    ClassificationRecord, ConfigRecord, MetaRecord, MxRecord, RESULT_VERSION, TrustRecord,
    ValidationResult,
};
use crate::trust::RuleSubject;
use crate::validation::classify::classify;
use crate::validation::dnsmx::{MxExchange, resolve_mx};
use crate::validation::normalize::{normalize_email, split_address};
use crate::validation::syntax::is_email_shaped;
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use tracing::debug;

/// # Validator Session
///
/// Validates one address. The first [`execute`](Self::execute) runs the whole
/// pipeline and caches the result; later calls return the cached result
/// untouched, timestamp included. [`re_execute`](Self::re_execute) throws the
/// cache away and runs again with the session's current settings.
///
/// ## Pipeline
/// 1. Normalize the raw input and split it into username and hostname
/// 2. Syntax check; a failure stops here with every other field at its default
/// 3. Free-provider and common-username classification
/// 4. MX lookup (unless skipped); a failed lookup stops here
/// 5. Trust rules and rating
///
/// ## Example
/// ```no_run
/// use std::sync::Arc;
/// use trusted_email_validator::{TrustedEmailValidator, ValidatorConfig, ValidatorContext};
///
/// # fn main() -> trusted_email_validator::Result<()> {
/// let context = Arc::new(ValidatorContext::from_config(&ValidatorConfig::from_env()?)?);
/// let mut validator = TrustedEmailValidator::new(Arc::clone(&context), "Bill_990@gmail.com");
/// validator.set_trust_cut_off(10)?;
/// let result = validator.execute()?;
/// println!("trusted: {} ({})", result.is_trusted(), result.trust.trust_rating);
/// # Ok(())
/// # }
/// ```
pub struct TrustedEmailValidator {
    context: Arc<ValidatorContext>,
    email: String,
    hostname: String,
    username: String,
    settings: Settings,
    result: Option<ValidationResult>,
}

impl TrustedEmailValidator {
    /// Creates a session with the context's default settings. Nothing is
    /// computed until [`execute`](Self::execute).
    pub fn new(context: Arc<ValidatorContext>, raw: &str) -> Self {
        let email = normalize_email(raw);
        let (username, hostname) = split_address(&email);
        let (username, hostname) = (username.to_string(), hostname.to_string());
        let settings = context.settings();

        Self {
            context,
            email,
            hostname,
            username,
            settings,
            result: None,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Takes effect on the next (re-)execution.
    pub fn set_skip_mx_lookup(&mut self, skip: bool) {
        self.settings.skip_mx_lookup = skip;
    }

    /// Takes effect on the next (re-)execution. Ratings run 0-100, so a larger
    /// cut-off is rejected and the current one is kept.
    pub fn set_trust_cut_off(&mut self, cut_off: u8) -> Result<&mut Self> {
        if cut_off > 100 {
            return Err(Error::Config(format!(
                "trust cut-off must be between 0 and 100, got {cut_off}"
            )));
        }
        self.settings.trust_cut_off = cut_off;
        Ok(self)
    }

    pub fn is_computed(&self) -> bool {
        self.result.is_some()
    }

    /// Returns the cached result, computing it first if needed.
    pub fn execute(&mut self) -> Result<&ValidationResult> {
        let result = match self.result.take() {
            Some(result) => result,
            None => self.run(None)?,
        };
        let result: &ValidationResult = self.result.insert(result);
        Ok(result)
    }

    /// Discards any cached result and runs the pipeline again. The new
    /// `checked_at` is always later than the discarded one.
    pub fn re_execute(&mut self) -> Result<&mut Self> {
        let previous = self.result.take().map(|result| result.meta.checked_at);
        let result = self.run(previous)?;
        self.result = Some(result);
        Ok(self)
    }

    /// Issues matched by the last execution, in rule order.
    pub fn trust_issues(&self) -> &[String] {
        self.result
            .as_ref()
            .map(|result| result.trust.trust_issues.as_slice())
            .unwrap_or_default()
    }

    pub fn trust_rating(&self) -> u8 {
        self.result.as_ref().map_or(0, |result| result.trust.trust_rating)
    }

    /// Every exchange found by the last execution, in resolver order.
    pub fn mx_records(&self) -> &[MxExchange] {
        self.result
            .as_ref()
            .map(|result| result.mx.mx_records.as_slice())
            .unwrap_or_default()
    }

    pub fn as_record(&mut self) -> Result<ValidationResult> {
        Ok(self.execute()?.clone())
    }

    /// JSON form of the result, with `checked_at` as Unix epoch seconds.
    pub fn as_serialized_form(&mut self) -> Result<String> {
        Ok(self.execute()?.to_json()?)
    }

    fn run(&self, previous: Option<DateTime<Utc>>) -> Result<ValidationResult> {
        let settings = self.settings;
        let checked_at = next_timestamp(previous);

        let mut classification = ClassificationRecord {
            is_email: is_email_shaped(&self.email),
            ..ClassificationRecord::default()
        };
        let mut mx = MxRecord::default();
        let mut trust = TrustRecord::default();

        if classification.is_email {
            let lists = self.context.reference().get()?;
            let found = classify(&lists, &self.hostname, &self.username);
            classification.is_free = found.is_free_provider;
            classification.is_common = found.is_common_username;

            let resolution = resolve_mx(
                self.context.resolver(),
                &self.hostname,
                settings.skip_mx_lookup,
            );
            classification.is_valid = resolution.is_valid;
            mx = MxRecord {
                has_mx: !resolution.exchanges.is_empty(),
                primary_exchange: resolution.exchanges.first().cloned(),
                mx_count: resolution.exchanges.len(),
                lookup_failed: resolution.failure.is_some(),
                failure_reason: resolution.failure.as_ref().map(ToString::to_string),
                mx_records: resolution.exchanges,
            };

            if mx.lookup_failed {
                debug!("MX lookup failed for {}, skipping trust rules", self.email);
            } else {
                let outcome = self.context.rules().evaluate(
                    &RuleSubject {
                        email: &self.email,
                        hostname: &self.hostname,
                        username: &self.username,
                        mx_count: mx.mx_count,
                        is_free: classification.is_free,
                        is_common: classification.is_common,
                    },
                    settings.trust_cut_off,
                )?;
                trust = TrustRecord {
                    is_trusted: outcome.is_trusted,
                    trust_rating: outcome.rating,
                    trust_issues: outcome.issues,
                };
            }
        } else {
            debug!("{:?} is not email shaped, skipping remaining checks", self.email);
        }

        Ok(ValidationResult {
            meta: MetaRecord {
                email: self.email.clone(),
                hostname: self.hostname.clone(),
                username: self.username.clone(),
                checked_at,
                version: RESULT_VERSION,
            },
            mx,
            classification,
            trust,
            config: ConfigRecord {
                skip_mx_lookup: settings.skip_mx_lookup,
                trust_cut_off: settings.trust_cut_off,
            },
        })
    }
}

// The clock may not have ticked since the previous run.
fn next_timestamp(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    match previous {
        Some(previous) if now <= previous => previous + TimeDelta::nanoseconds(1),
        _ => now,
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;
