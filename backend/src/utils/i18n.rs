//! Internationalization utilities
//!
//! Locale identifier normalization and translation lookup. The active
//! locale itself is request-scoped (see [`crate::models::ActiveLocale`]);
//! nothing in this module holds global locale state.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_i18n::t;

/// Locale used when neither the session nor the configuration provides one
pub const DEFAULT_LOCALE: &str = "en";

/// Session key holding the visitor's chosen locale
pub const LOCALE_SESSION_KEY: &str = "locale";

// BCP 47-ish: primary language subtag plus optional region/script/variant subtags
static LOCALE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{2,8}([-_][A-Za-z0-9]{1,8})*$").expect("valid regex"));

/// Check whether a string looks like a locale identifier ("en", "pt-BR", "zh_Hant")
pub fn is_well_formed(locale: &str) -> bool {
    LOCALE_ID_RE.is_match(locale)
}

/// Normalize locale string for comparison
/// Accepts: "tr", "TR", "tr-TR", "tr_TR", " en-us " etc.
pub fn normalize_locale(locale: &str) -> String {
    locale.trim().to_lowercase().replace('_', "-")
}

/// Primary language subtag of a locale identifier ("pt-br" -> "pt")
pub fn primary_subtag(locale: &str) -> &str {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
}

/// Translate a message key for the given locale.
///
/// Unknown locales fall back to the catalog fallback (English).
pub fn translate(key: &str, locale: &str) -> String {
    t!(key, locale = locale).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("tr"), "tr");
        assert_eq!(normalize_locale("TR"), "tr");
        assert_eq!(normalize_locale("tr_TR"), "tr-tr");
        assert_eq!(normalize_locale(" en-US "), "en-us");
        assert_eq!(normalize_locale(""), "");
    }

    #[test]
    fn test_primary_subtag() {
        assert_eq!(primary_subtag("pt-br"), "pt");
        assert_eq!(primary_subtag("zh_Hant"), "zh");
        assert_eq!(primary_subtag("en"), "en");
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed("en"));
        assert!(is_well_formed("pt-BR"));
        assert!(is_well_formed("zh_Hant_TW"));
        assert!(is_well_formed("xx"));
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("e"));
        assert!(!is_well_formed("en US"));
        assert!(!is_well_formed("<script>"));
        assert!(!is_well_formed("en-"));
    }

    #[test]
    fn test_translate_follows_locale() {
        assert_eq!(translate("welcome.title", "en"), "Welcome");
        assert_eq!(translate("welcome.title", "tr"), "Hoş geldiniz");
        // Unknown locale falls back to English
        assert_eq!(translate("welcome.title", "xx"), "Welcome");
    }
}
