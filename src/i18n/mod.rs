//! Internationalization (i18n) module.
//!
//! Everything locale-related lives here: the registry of supported locales,
//! the validated `Locale` type, and the translation lookup over the bundled
//! per-locale dictionaries.
//!
//! # Architecture
//!
//! - `registry`: single source of truth for supported locales and their metadata
//! - `locale`: type-safe `Locale` value validated against the registry
//! - `translator`: dotted-key lookup with per-key fallback to the default locale
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::{Locale, Translator};
//!
//! let t = Translator::new(Locale::PT_BR);
//! assert_eq!(t.translate("nav.about"), "Sobre");
//! ```

mod locale;
mod registry;
mod translator;

pub use locale::Locale;
pub use registry::{LocaleConfig, LocaleRegistry};
pub use translator::{get_translation, get_translations, localize_route, Translator};
