use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use trust_dns_resolver::{
    Resolver,
    config::{ResolverConfig, ResolverOpts},
    error::{ResolveError, ResolveErrorKind},
    proto::{
        error::ProtoErrorKind,
        op::ResponseCode,
    },
};
use utoipa::ToSchema;

/// One mail exchange reported for a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MxExchange {
    pub exchange: String,
    pub preference: u16,
}

impl MxExchange {
    pub fn new(exchange: impl Into<String>, preference: u16) -> Self {
        Self {
            exchange: exchange.into(),
            preference,
        }
    }
}

/// Ways a single MX query can fail. The `Display` text is what ends up in
/// `failure_reason`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MxLookupError {
    #[error("the DNS operation timed out")]
    Timeout,
    #[error("the DNS query name does not exist: {0}")]
    NxDomain(String),
    #[error("no nameservers available to answer the query")]
    NoNameservers,
    #[error("the DNS response does not contain an answer: {0}")]
    NoAnswer(String),
    #[error("socket error: {0}")]
    Socket(String),
    #[error("DNS lookup failed: {0}")]
    Other(String),
}

/// The resolver seam: everything the pipeline needs from DNS.
///
/// Records come back in the order the resolver returned them; callers must not
/// assume they are sorted by preference.
#[cfg_attr(test, mockall::automock)]
pub trait LookupMx: Send + Sync {
    fn lookup_mx(&self, hostname: &str) -> Result<Vec<MxExchange>, MxLookupError>;
}

/// [`LookupMx`] backed by the system's trust-dns resolver.
pub struct TrustDnsLookup {
    resolver: Resolver,
}

impl TrustDnsLookup {
    /// Creates a resolver with the default upstream configuration.
    ///
    /// `timeout` bounds each query; expiry is reported as
    /// [`MxLookupError::Timeout`] rather than aborting the caller.
    pub fn new(timeout: Duration, attempts: usize) -> std::io::Result<Self> {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = attempts;

        Ok(Self {
            resolver: Resolver::new(ResolverConfig::default(), opts)?,
        })
    }
}

impl LookupMx for TrustDnsLookup {
    fn lookup_mx(&self, hostname: &str) -> Result<Vec<MxExchange>, MxLookupError> {
        let response = self.resolver.mx_lookup(hostname).map_err(classify_error)?;
        Ok(response
            .iter()
            .map(|mx| MxExchange::new(mx.exchange().to_string(), mx.preference()))
            .collect())
    }
}

fn classify_error(err: ResolveError) -> MxLookupError {
    let message = err.to_string();
    match err.kind() {
        ResolveErrorKind::Timeout => MxLookupError::Timeout,
        ResolveErrorKind::NoConnections => MxLookupError::NoNameservers,
        ResolveErrorKind::NoRecordsFound { response_code, .. } => match *response_code {
            ResponseCode::NXDomain => MxLookupError::NxDomain(message),
            ResponseCode::ServFail | ResponseCode::Refused => MxLookupError::NoNameservers,
            _ => MxLookupError::NoAnswer(message),
        },
        ResolveErrorKind::Io(io) => MxLookupError::Socket(io.to_string()),
        // Transport failures surface wrapped in the protocol layer's error.
        ResolveErrorKind::Proto(proto) => match proto.kind() {
            ProtoErrorKind::Io(io) => MxLookupError::Socket(io.to_string()),
            ProtoErrorKind::Timeout => MxLookupError::Timeout,
            _ => MxLookupError::Other(message),
        },
        _ => MxLookupError::Other(message),
    }
}

/// Outcome of the MX stage for one execution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MxResolution {
    pub is_valid: bool,
    pub exchanges: Vec<MxExchange>,
    pub failure: Option<MxLookupError>,
}

/// Runs the MX stage: skipped entirely when `skip_mx_lookup` is set, otherwise
/// exactly one query with no retry.
///
/// A successful query with zero records is treated as
/// [`MxLookupError::NoAnswer`].
pub fn resolve_mx(resolver: &dyn LookupMx, hostname: &str, skip_mx_lookup: bool) -> MxResolution {
    if skip_mx_lookup {
        debug!("Skipping MX lookup for {}", hostname);
        return MxResolution {
            is_valid: true,
            ..MxResolution::default()
        };
    }

    match resolver.lookup_mx(hostname) {
        Ok(exchanges) if !exchanges.is_empty() => {
            debug!("Domain {} has {} MX record(s)", hostname, exchanges.len());
            MxResolution {
                is_valid: true,
                exchanges,
                failure: None,
            }
        }
        Ok(_) => {
            debug!("Domain {} returned an empty MX answer", hostname);
            MxResolution {
                failure: Some(MxLookupError::NoAnswer(format!(
                    "no MX records found for {hostname}"
                ))),
                ..MxResolution::default()
            }
        }
        Err(e) => {
            debug!("MX record lookup failed for {}: {}", hostname, e);
            MxResolution {
                failure: Some(e),
                ..MxResolution::default()
            }
        }
    }
}

#[cfg(test)]
#[path = "dnsmx_test.rs"]
mod dnsmx_test;
