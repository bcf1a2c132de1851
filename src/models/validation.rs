use crate::validation::dnsmx::MxExchange;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Revision of the pipeline and default rule set that produced a result.
pub const RESULT_VERSION: u32 = 1;

/// Who and when: the address as it was checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MetaRecord {
    pub email: String,
    pub hostname: String,
    pub username: String,
    /// Unix epoch seconds in serialized form
    #[serde(with = "chrono::serde::ts_seconds")]
    #[schema(value_type = i64)]
    pub checked_at: DateTime<Utc>,
    pub version: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MxRecord {
    pub has_mx: bool,
    /// First exchange in resolver order
    pub primary_exchange: Option<MxExchange>,
    pub mx_count: usize,
    pub lookup_failed: bool,
    pub failure_reason: Option<String>,
    /// Every exchange, in resolver order
    pub mx_records: Vec<MxExchange>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClassificationRecord {
    /// Email-shaped and, unless MX lookup was skipped, has mail exchanges
    pub is_valid: bool,
    pub is_email: bool,
    pub is_free: bool,
    pub is_common: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TrustRecord {
    pub is_trusted: bool,
    pub trust_rating: u8,
    pub trust_issues: Vec<String>,
}

/// Session settings in effect when the result was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConfigRecord {
    pub skip_mx_lookup: bool,
    pub trust_cut_off: u8,
}

/// # Validation Result
///
/// Everything one execution of a session found out about an address. Built once
/// per execution and never modified afterwards.
///
/// ## Example JSON
/// ```json
/// {
///   "email": "Bill_990@gmail.com",
///   "hostname": "gmail.com",
///   "username": "Bill_990",
///   "checked_at": 1760572800,
///   "version": 1,
///   "has_mx": true,
///   "primary_exchange": { "exchange": "gmail-smtp-in.l.google.com.", "preference": 5 },
///   "mx_count": 5,
///   "lookup_failed": false,
///   "failure_reason": null,
///   "mx_records": [{ "exchange": "gmail-smtp-in.l.google.com.", "preference": 5 }],
///   "is_valid": true,
///   "is_email": true,
///   "is_free": true,
///   "is_common": false,
///   "is_trusted": false,
///   "trust_rating": 58,
///   "trust_issues": ["numbers in username", "mixed case in username", "email is from a free provider"],
///   "skip_mx_lookup": false,
///   "trust_cut_off": 60
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationResult {
    #[serde(flatten)]
    pub meta: MetaRecord,
    #[serde(flatten)]
    pub mx: MxRecord,
    #[serde(flatten)]
    pub classification: ClassificationRecord,
    #[serde(flatten)]
    pub trust: TrustRecord,
    #[serde(flatten)]
    pub config: ConfigRecord,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.classification.is_valid
    }

    pub fn is_free(&self) -> bool {
        self.classification.is_free
    }

    pub fn is_trusted(&self) -> bool {
        self.trust.is_trusted
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
