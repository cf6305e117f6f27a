//! Locale-aware routing middleware.
//!
//! Every page request passes through here before any handler runs. The
//! middleware is a small state machine, terminal at redirect-or-passthrough:
//!
//! 1. Skip check: static assets, API routes, and framework paths bypass
//!    locale handling entirely.
//! 2. Locale-presence check: a path already carrying a supported locale
//!    segment passes through untouched.
//! 3. Detection: the `Accept-Language` header is scanned in textual order
//!    and the path is redirected to `/{locale}{path}`.
//!
//! Detection is prefix-first, NOT quality-weighted: `en;q=0.1,pt;q=0.9`
//! resolves to `en` because it appears first. This is a frozen
//! simplification of RFC 4647 negotiation, not a bug.

use crate::i18n::{Locale, LocaleRegistry};
use crate::server::AppState;
use axum::{
    extract::{Request, State},
    http::header::ACCEPT_LANGUAGE,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

/// Path prefixes that never get locale handling.
const SKIP_PREFIXES: &[&str] = &["/api/", "/_next/", "/static/", "/assets/"];

/// Exact paths that never get locale handling.
const SKIP_PATHS: &[&str] = &["/healthz", "/favicon.ico", "/robots.txt", "/sitemap.xml"];

/// Whether a path bypasses locale handling entirely.
///
/// Any path whose final segment contains a file extension is treated as a
/// static asset, so `/logo.png` is never redirected.
pub fn should_skip(path: &str) -> bool {
    if SKIP_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
        return true;
    }
    if SKIP_PATHS.contains(&path) {
        return true;
    }

    path.rsplit('/').next().is_some_and(|segment| segment.contains('.'))
}

/// Whether the path already starts with a supported locale segment.
pub fn has_locale_prefix(path: &str) -> bool {
    let first_segment = path.trim_start_matches('/').split('/').next().unwrap_or("");
    LocaleRegistry::get().is_supported(first_segment)
}

/// Pick a locale from an `Accept-Language` header value.
///
/// Tags are taken in textual order with quality values stripped; the first
/// tag with a `pt` prefix selects pt-BR, the first with an `en` prefix
/// selects en, and anything else falls through to the default. Tags are
/// matched case-insensitively (RFC 5646 tags are case-insensitive).
pub fn detect_locale(accept_language: Option<&str>, default: Locale) -> Locale {
    let Some(header) = accept_language else {
        return default;
    };

    for tag in header.split(',') {
        let tag = tag.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        if tag.starts_with("pt") {
            return Locale::PT_BR;
        }
        if tag.starts_with("en") {
            return Locale::EN;
        }
    }

    default
}

/// Axum middleware: redirect locale-less page paths to `/{locale}{path}`.
pub async fn locale_redirect(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();

    if should_skip(path) || has_locale_prefix(path) {
        return next.run(request).await;
    }

    let default = Locale::from_code(&state.config.default_locale).unwrap_or(Locale::EN);
    let accept_language = request
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());
    let locale = detect_locale(accept_language, default);

    let target = match request.uri().query() {
        Some(query) => format!("/{}{}?{}", locale.code(), path, query),
        None => format!("/{}{}", locale.code(), path),
    };

    debug!("Redirecting {} -> {}", path, target);
    Redirect::temporary(&target).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Skip Check Tests ====================

    #[test]
    fn test_skip_api_paths() {
        assert!(should_skip("/api/contact"));
        assert!(should_skip("/api/anything/else"));
    }

    #[test]
    fn test_skip_framework_and_asset_prefixes() {
        assert!(should_skip("/_next/static/chunk.js"));
        assert!(should_skip("/static/css/site.css"));
        assert!(should_skip("/assets/hero.webp"));
    }

    #[test]
    fn test_skip_exact_paths() {
        assert!(should_skip("/healthz"));
        assert!(should_skip("/favicon.ico"));
        assert!(should_skip("/robots.txt"));
    }

    #[test]
    fn test_skip_file_extensions_anywhere() {
        assert!(should_skip("/logo.png"));
        assert!(should_skip("/images/photo.jpg"));
    }

    #[test]
    fn test_page_paths_are_not_skipped() {
        assert!(!should_skip("/"));
        assert!(!should_skip("/about"));
        assert!(!should_skip("/blog/some-post"));
        assert!(!should_skip("/en/about"));
    }

    // ==================== Locale-Presence Tests ====================

    #[test]
    fn test_locale_prefix_detected() {
        assert!(has_locale_prefix("/en"));
        assert!(has_locale_prefix("/en/about"));
        assert!(has_locale_prefix("/pt-BR/blog/post"));
    }

    #[test]
    fn test_no_locale_prefix() {
        assert!(!has_locale_prefix("/about"));
        assert!(!has_locale_prefix("/"));
        assert!(!has_locale_prefix("/fr/about"));
        assert!(!has_locale_prefix("/english/about"));
    }

    // ==================== Detection Tests ====================

    #[test]
    fn test_detect_no_header_uses_default() {
        assert_eq!(detect_locale(None, Locale::EN), Locale::EN);
        assert_eq!(detect_locale(None, Locale::PT_BR), Locale::PT_BR);
    }

    #[test]
    fn test_detect_portuguese_variants() {
        assert_eq!(detect_locale(Some("pt-BR"), Locale::EN), Locale::PT_BR);
        assert_eq!(detect_locale(Some("pt-PT,en"), Locale::EN), Locale::PT_BR);
        assert_eq!(detect_locale(Some("pt"), Locale::EN), Locale::PT_BR);
    }

    #[test]
    fn test_detect_english_variants() {
        assert_eq!(detect_locale(Some("en-US,en;q=0.9"), Locale::EN), Locale::EN);
        assert_eq!(detect_locale(Some("en-GB"), Locale::EN), Locale::EN);
    }

    #[test]
    fn test_detect_first_match_wins_ignoring_quality() {
        // Textual order beats quality values by design
        assert_eq!(
            detect_locale(Some("en;q=0.1,pt;q=0.9"), Locale::EN),
            Locale::EN
        );
        assert_eq!(
            detect_locale(Some("pt;q=0.1,en;q=0.9"), Locale::EN),
            Locale::PT_BR
        );
    }

    #[test]
    fn test_detect_skips_unknown_tags() {
        assert_eq!(detect_locale(Some("fr-FR,de,pt-BR"), Locale::EN), Locale::PT_BR);
        assert_eq!(detect_locale(Some("fr,de,es"), Locale::EN), Locale::EN);
    }

    #[test]
    fn test_detect_is_case_insensitive() {
        assert_eq!(detect_locale(Some("PT-BR"), Locale::EN), Locale::PT_BR);
        assert_eq!(detect_locale(Some("Pt-br,EN"), Locale::EN), Locale::PT_BR);
        assert_eq!(detect_locale(Some("EN-US"), Locale::PT_BR), Locale::EN);
    }

    #[test]
    fn test_detect_handles_whitespace_and_empty_header() {
        assert_eq!(detect_locale(Some(" pt-BR , en"), Locale::EN), Locale::PT_BR);
        assert_eq!(detect_locale(Some(""), Locale::EN), Locale::EN);
        assert_eq!(detect_locale(Some(",,,"), Locale::EN), Locale::EN);
    }
}
