//! Locale type: flexible, validated locale representation.

use crate::i18n::{LocaleConfig, LocaleRegistry};
use anyhow::{bail, Result};

/// A validated locale.
///
/// Only locales that exist in the registry and are enabled can be
/// constructed, so a `Locale` value is always safe to resolve against
/// the bundled dictionaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    /// BCP 47 tag (e.g. "en", "pt-BR")
    code: &'static str,
}

impl Locale {
    pub const EN: Locale = Locale { code: "en" };
    pub const PT_BR: Locale = Locale { code: "pt-BR" };

    /// Create a Locale from a locale code string.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is supported and enabled
    /// * `Err` if the code is unknown or the locale is disabled
    pub fn from_code(code: &str) -> Result<Locale> {
        let registry = LocaleRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Locale {
                code: config.code, // Use the static str from the registry
            }),
            Some(_) => bail!("Locale '{}' is not enabled", code),
            None => bail!("Unknown locale code: '{}'", code),
        }
    }

    /// The default locale (the one partial dictionaries fall back to).
    pub fn default_locale() -> Locale {
        let config = LocaleRegistry::get().default_locale();
        Locale { code: config.code }
    }

    /// The BCP 47 tag as a static string.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// The full locale configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not in the registry, which cannot happen for
    /// a `Locale` constructed via `from_code` or the constants.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale code should always be valid")
    }

    /// English name of the locale.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Native name of the locale.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Whether this is the default locale.
    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_english_constant() {
        let english = Locale::EN;
        assert_eq!(english.code(), "en");
        assert_eq!(english.name(), "English");
        assert!(english.is_default());
    }

    #[test]
    fn test_pt_br_constant() {
        let pt_br = Locale::PT_BR;
        assert_eq!(pt_br.code(), "pt-BR");
        assert_eq!(pt_br.name(), "Brazilian Portuguese");
        assert!(!pt_br.is_default());
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_english() {
        let locale = Locale::from_code("en").expect("Should succeed");
        assert_eq!(locale.code(), "en");
    }

    #[test]
    fn test_from_code_pt_br() {
        let locale = Locale::from_code("pt-BR").expect("Should succeed");
        assert_eq!(locale.code(), "pt-BR");
        assert_eq!(locale.native_name(), "Português (Brasil)");
    }

    #[test]
    fn test_from_code_invalid() {
        let result = Locale::from_code("fr");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_code_empty() {
        assert!(Locale::from_code("").is_err());
    }

    // ==================== default_locale Tests ====================

    #[test]
    fn test_default_locale_returns_english() {
        let default = Locale::default_locale();
        assert_eq!(default.code(), "en");
        assert!(default.is_default());
    }

    // ==================== Trait Tests ====================

    #[test]
    fn test_locale_equality() {
        let locale1 = Locale::EN;
        let locale2 = Locale::from_code("en").unwrap();
        assert_eq!(locale1, locale2);
    }

    #[test]
    fn test_locale_inequality() {
        assert_ne!(Locale::EN, Locale::PT_BR);
    }

    #[test]
    fn test_locale_copy() {
        let locale1 = Locale::PT_BR;
        let locale2 = locale1; // Copy
        assert_eq!(locale1, locale2);
    }

    #[test]
    fn test_locale_debug() {
        let debug = format!("{:?}", Locale::PT_BR);
        assert!(debug.contains("pt-BR"));
    }
}
