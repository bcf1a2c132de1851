use crate::config::{Settings, ValidatorConfig};
use crate::error::{Error, Result};
use crate::trust::TrustRules;
use crate::validation::dnsmx::{LookupMx, TrustDnsLookup};
use crate::validation::reference::ReferenceData;
use std::sync::Arc;
use tracing::info;

/// Process-level state shared by every session: the load-once reference
/// lists, the MX resolver, the trust rule registry and default settings.
///
/// Build one per process, register any extra rules, then hand out
/// `Arc<ValidatorContext>` to sessions.
pub struct ValidatorContext {
    reference: ReferenceData,
    resolver: Arc<dyn LookupMx>,
    rules: TrustRules,
    settings: Settings,
}

impl ValidatorContext {
    pub fn new(reference: ReferenceData, resolver: Arc<dyn LookupMx>) -> Self {
        Self {
            reference,
            resolver,
            rules: TrustRules::default(),
            settings: Settings::default(),
        }
    }

    /// Context backed by the system DNS resolver, with list paths and defaults
    /// taken from `config`. Reference data is not read until first needed.
    pub fn from_config(config: &ValidatorConfig) -> Result<Self> {
        let resolver = TrustDnsLookup::new(config.dns_timeout, config.dns_attempts)
            .map_err(Error::ResolverInit)?;
        info!(
            "DNS resolver initialized - timeout: {}ms, attempts: {}",
            config.dns_timeout.as_millis(),
            config.dns_attempts
        );

        Ok(Self::new(
            ReferenceData::new(&config.free_providers_path, &config.common_usernames_path),
            Arc::new(resolver),
        )
        .with_settings(config.settings))
    }

    pub fn with_rules(mut self, rules: TrustRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn rules_mut(&mut self) -> &mut TrustRules {
        &mut self.rules
    }

    pub fn rules(&self) -> &TrustRules {
        &self.rules
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn resolver(&self) -> &dyn LookupMx {
        self.resolver.as_ref()
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }
}
