use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_FREE_PROVIDERS_FILE: &str = "data/email_providers_free.txt";
pub const DEFAULT_COMMON_USERNAMES_FILE: &str = "data/common_usernames.txt";
pub const DEFAULT_TRUST_CUT_OFF: u8 = 60;

/// # Validator Configuration
///
/// Process-wide settings, read from the environment (after `.env` has been
/// loaded by the caller).
///
/// ## Environment Variables
/// - `FREE_PROVIDERS_FILE`: free-provider hostname list
/// - `COMMON_USERNAMES_FILE`: common username list
/// - `DNS_TIMEOUT_MS`: per-query resolver timeout (default 2000)
/// - `DNS_ATTEMPTS`: attempts made by the DNS layer for one query (default 2)
/// - `SKIP_MX_LOOKUP`: default for new sessions (default `false`)
/// - `TRUST_CUT_OFF`: default cut-off for new sessions, 0-100 (default 60)
/// - `BIND_ADDRESS`: HTTP listen address (default `127.0.0.1:8080`)
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorConfig {
    pub free_providers_path: PathBuf,
    pub common_usernames_path: PathBuf,
    pub dns_timeout: Duration,
    pub dns_attempts: usize,
    pub settings: Settings,
    pub bind_address: String,
}

/// Per-session knobs. Owned by each session and read at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub skip_mx_lookup: bool,
    pub trust_cut_off: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            skip_mx_lookup: false,
            trust_cut_off: DEFAULT_TRUST_CUT_OFF,
        }
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            free_providers_path: PathBuf::from(DEFAULT_FREE_PROVIDERS_FILE),
            common_usernames_path: PathBuf::from(DEFAULT_COMMON_USERNAMES_FILE),
            dns_timeout: Duration::from_secs(2),
            dns_attempts: 2,
            settings: Settings::default(),
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

impl ValidatorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let trust_cut_off = parse_or(&lookup, "TRUST_CUT_OFF", defaults.settings.trust_cut_off)?;
        if trust_cut_off > 100 {
            return Err(Error::Config(format!(
                "TRUST_CUT_OFF must be between 0 and 100, got {trust_cut_off}"
            )));
        }

        let dns_attempts = parse_or(&lookup, "DNS_ATTEMPTS", defaults.dns_attempts)?;
        if dns_attempts == 0 {
            return Err(Error::Config("DNS_ATTEMPTS must be at least 1".to_string()));
        }

        Ok(Self {
            free_providers_path: lookup("FREE_PROVIDERS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.free_providers_path),
            common_usernames_path: lookup("COMMON_USERNAMES_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.common_usernames_path),
            dns_timeout: Duration::from_millis(parse_or(
                &lookup,
                "DNS_TIMEOUT_MS",
                defaults.dns_timeout.as_millis() as u64,
            )?),
            dns_attempts,
            settings: Settings {
                skip_mx_lookup: parse_or(&lookup, "SKIP_MX_LOOKUP", defaults.settings.skip_mx_lookup)?,
                trust_cut_off,
            },
            bind_address: lookup("BIND_ADDRESS").unwrap_or(defaults.bind_address),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("{key}={raw:?}: {e}"))),
        None => Ok(default),
    }
}
