use crate::config::LocaleConfig;
use crate::models::AvailableLocale;
use crate::utils::i18n::{normalize_locale, primary_subtag};
use crate::utils::{ApiError, ApiResult};

/// Outcome of checking a requested locale before it is persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleDecision {
    /// Store and activate this identifier
    Accept(String),
    /// Leave the session untouched
    Reject,
}

/// Read-only view over the configured locales
#[derive(Debug, Clone)]
pub struct LocaleService {
    default_locale: String,
    validate: bool,
    available: Vec<AvailableLocale>,
}

impl LocaleService {
    pub fn new(config: &LocaleConfig) -> Self {
        Self {
            default_locale: config.default.clone(),
            validate: config.validate,
            available: config.available.clone(),
        }
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn available(&self) -> &[AvailableLocale] {
        &self.available
    }

    pub fn validates(&self) -> bool {
        self.validate
    }

    /// Match a requested identifier against the available locales.
    ///
    /// Comparison ignores case and `_`/`-`; when no entry matches exactly,
    /// an entry matching the primary subtag is used ("tr-TR" -> "tr").
    pub fn resolve(&self, requested: &str) -> Option<&AvailableLocale> {
        let wanted = normalize_locale(requested);
        if wanted.is_empty() {
            return None;
        }

        self.available
            .iter()
            .find(|l| normalize_locale(&l.id) == wanted)
            .or_else(|| {
                let primary = primary_subtag(&wanted);
                self.available.iter().find(|l| normalize_locale(&l.id) == primary)
            })
    }

    /// Strict lookup used by the JSON API
    pub fn lookup(&self, requested: &str) -> ApiResult<&AvailableLocale> {
        self.resolve(requested)
            .ok_or_else(|| ApiError::unsupported_locale(requested))
    }

    /// Decide what to persist for a `/language/{locale}` request.
    ///
    /// With validation off the raw identifier is accepted unchanged.
    pub fn decide(&self, requested: &str) -> LocaleDecision {
        if !self.validate {
            return LocaleDecision::Accept(requested.to_string());
        }

        match self.resolve(requested) {
            Some(locale) => LocaleDecision::Accept(locale.id.clone()),
            None => LocaleDecision::Reject,
        }
    }
}
