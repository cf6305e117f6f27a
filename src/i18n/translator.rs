//! Translation lookup over the bundled per-locale dictionaries.
//!
//! Dictionaries are JSON trees compiled into the binary with `include_str!`
//! and parsed once; there is no file or network I/O at request time.
//!
//! Lookup contract:
//! - `translate` walks a dot-delimited key path ("nav.home") through the
//!   locale's dictionary. A key missing from the locale dictionary is
//!   retried against the default locale's dictionary (per-key fallback);
//!   a key missing from both is returned unchanged, never an error.
//! - `get_translations` returns a whole dictionary; an unsupported locale
//!   code yields the default locale's dictionary in its entirety.

use crate::i18n::{Locale, LocaleRegistry};
use serde_json::Value;
use std::sync::OnceLock;

static EN_DICTIONARY: OnceLock<Value> = OnceLock::new();
static PT_BR_DICTIONARY: OnceLock<Value> = OnceLock::new();

/// The parsed dictionary for a locale.
///
/// # Panics
/// Panics if a bundled dictionary is not valid JSON. The dictionaries are
/// compiled into the binary, so this is caught by any test run.
fn dictionary(locale: Locale) -> &'static Value {
    match locale.code() {
        "pt-BR" => PT_BR_DICTIONARY.get_or_init(|| {
            serde_json::from_str(include_str!("../../locales/pt-BR.json"))
                .expect("locales/pt-BR.json should be valid JSON")
        }),
        _ => EN_DICTIONARY.get_or_init(|| {
            serde_json::from_str(include_str!("../../locales/en.json"))
                .expect("locales/en.json should be valid JSON")
        }),
    }
}

/// Full dictionary for a locale code.
///
/// Any code outside the supported set resolves to the default locale's
/// dictionary (whole-dictionary fallback, distinct from the per-key
/// fallback `translate` performs).
pub fn get_translations(code: &str) -> &'static Value {
    let registry = LocaleRegistry::get();
    if registry.is_supported(code) {
        // from_code cannot fail for a supported code
        let locale = Locale::from_code(code).unwrap_or_else(|_| Locale::default_locale());
        dictionary(locale)
    } else {
        dictionary(Locale::default_locale())
    }
}

/// Walk a dot-delimited key path through a dictionary tree.
///
/// Returns `None` if any segment is missing or the final value is not a
/// string (a branch node is not a translation).
fn resolve<'a>(dict: &'a Value, key: &str) -> Option<&'a str> {
    let mut current = dict;
    for segment in key.split('.') {
        current = current.get(segment)?;
    }
    current.as_str()
}

/// Key→string translator bound to one locale.
#[derive(Debug, Clone, Copy)]
pub struct Translator {
    locale: Locale,
}

impl Translator {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Resolve a dotted key to a string.
    ///
    /// Falls back per-key to the default locale, then to the key itself.
    pub fn translate(&self, key: &str) -> String {
        if let Some(value) = resolve(dictionary(self.locale), key) {
            return value.to_string();
        }

        if !self.locale.is_default() {
            if let Some(value) = resolve(dictionary(Locale::default_locale()), key) {
                return value.to_string();
            }
        }

        key.to_string()
    }
}

/// Convenience form of `Translator::new(locale).translate(key)`.
pub fn get_translation(locale: Locale, key: &str) -> String {
    Translator::new(locale).translate(key)
}

/// Localized URL segment for a route name, identity fallback.
///
/// Each locale with renamed segments gets its own set of arms; anything
/// unmatched passes through unchanged, so the default locale keeps the
/// canonical segments and new routes work before a translation lands.
pub fn localize_route(locale: Locale, segment: &str) -> &str {
    match (locale.code(), segment) {
        ("pt-BR", "about") => "sobre",
        ("pt-BR", "contact") => "contato",
        ("pt-BR", "learn") => "aprenda",
        _ => segment,
    }
}
