//! Router assembly and shared application state.

use crate::config::Config;
use crate::contact;
use crate::email::Mailer;
use crate::i18n::{localize_route, Locale, Translator};
use crate::rate_limit::{rate_limit_middleware, RateLimitConfig, RateLimiter};
use crate::routing::locale_redirect;
use axum::{
    extract::OriginalUri,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub limiter: Arc<RateLimiter>,
    pub mailer: Option<Arc<Mailer>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let limiter = RateLimiter::in_memory(RateLimitConfig::from_config(&config));
        let mailer = config.email.clone().map(|email| Arc::new(Mailer::new(email)));

        Self {
            config: Arc::new(config),
            limiter: Arc::new(limiter),
            mailer,
        }
    }
}

/// Assemble the full application router.
///
/// The locale-redirect middleware wraps everything; its own skip check
/// keeps API and asset paths out of locale handling. The rate limiter
/// wraps only the contact route.
pub fn build_router(state: AppState) -> Router {
    let contact_routes = Router::new()
        .route("/api/contact", post(contact::submit_contact))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    Router::new()
        .merge(contact_routes)
        .route("/healthz", get(health))
        .fallback(render_page)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            locale_redirect,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Localized page shell for any path under a locale segment.
///
/// The rendering layer proper is out of scope here; this resolves the
/// strings a page needs so the frontend stays free of dictionary logic.
async fn render_page(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    let path = uri.path();
    let first_segment = path.trim_start_matches('/').split('/').next().unwrap_or("");

    let Ok(locale) = Locale::from_code(first_segment) else {
        // Reachable only for skip-listed paths with no handler of their own
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Page not found" })),
        );
    };

    let t = Translator::new(locale);
    let nav: serde_json::Map<String, serde_json::Value> = ["home", "about", "blog", "learn", "contact"]
        .into_iter()
        .map(|segment| {
            (
                localize_route(locale, segment).to_string(),
                t.translate(&format!("nav.{}", segment)).into(),
            )
        })
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "locale": locale.code(),
            "title": t.translate("site.title"),
            "description": t.translate("site.description"),
            "nav": nav,
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_config() -> Config {
        Config {
            port: 0,
            default_locale: "en".to_string(),
            rate_limit_window: Duration::from_secs(60),
            rate_limit_max_requests: 5,
            contact_form_token: None,
            email: None,
        }
    }

    #[test]
    fn test_state_without_email_has_no_mailer() {
        let state = AppState::new(test_config());
        assert!(state.mailer.is_none());
    }

    #[test]
    fn test_state_with_email_builds_mailer() {
        let mut config = test_config();
        config.email = Some(crate::config::EmailConfig {
            api_url: "https://api.example.com".to_string(),
            api_key: "key".to_string(),
            from_address: "a@example.com".to_string(),
            to_address: "b@example.com".to_string(),
        });

        let state = AppState::new(config);
        assert!(state.mailer.is_some());
    }

    #[test]
    fn test_limiter_uses_configured_bounds() {
        let state = AppState::new(test_config());
        assert_eq!(state.limiter.config().max_requests, 5);
        assert_eq!(state.limiter.config().window, Duration::from_secs(60));
    }
}
