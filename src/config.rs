use anyhow::Result;
use std::time::Duration;

/// Configuration for the outbound email service.
///
/// All four values must be present for email dispatch to work; if any is
/// missing the contact endpoint answers 503 instead of attempting a send.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Base URL of the HTTP email API (e.g. https://api.resend.com)
    pub api_url: String,
    pub api_key: String,
    pub from_address: String,
    pub to_address: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // Locale
    pub default_locale: String,

    // Rate limiting
    pub rate_limit_window: Duration,
    pub rate_limit_max_requests: u32,

    // Contact form
    pub contact_form_token: Option<String>,

    // Email dispatch (None = service unconfigured)
    pub email: Option<EmailConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            default_locale: std::env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "en".to_string()),

            // Rate limiting (defaults: 15 minutes / 5 requests)
            rate_limit_window: Duration::from_millis(
                std::env::var("RATE_LIMIT_WINDOW_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(15 * 60 * 1000),
            ),
            rate_limit_max_requests: std::env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),

            contact_form_token: std::env::var("CONTACT_FORM_TOKEN")
                .ok()
                .filter(|v| !v.is_empty()),

            email: email_config_from_env(),
        })
    }
}

/// Build the email configuration if every required variable is set.
///
/// A partially-configured email service is treated as unconfigured so the
/// server can still boot and serve pages; only /api/contact degrades (503).
fn email_config_from_env() -> Option<EmailConfig> {
    let api_url = std::env::var("EMAIL_API_URL").ok().filter(|v| !v.is_empty())?;
    let api_key = std::env::var("EMAIL_API_KEY").ok().filter(|v| !v.is_empty())?;
    let from_address = std::env::var("EMAIL_FROM").ok().filter(|v| !v.is_empty())?;
    let to_address = std::env::var("EMAIL_TO").ok().filter(|v| !v.is_empty())?;

    Some(EmailConfig {
        api_url,
        api_key,
        from_address,
        to_address,
    })
}
