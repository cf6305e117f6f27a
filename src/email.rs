//! Email dispatch through an HTTP email API.

use crate::config::EmailConfig;
use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum EmailError {
    /// Service credentials are missing; surfaced to callers as 503.
    #[error("email service is not configured")]
    Unconfigured,

    /// Request never reached the API (network, TLS, timeout).
    #[error("email API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("email API error ({status}): {body}")]
    Api { status: StatusCode, body: String },
}

#[derive(Debug, Serialize)]
struct SendEmailRequest {
    from: String,
    to: String,
    subject: String,
    text: String,
}

/// Client for the outbound email service.
pub struct Mailer {
    client: reqwest::Client,
    config: EmailConfig,
}

impl Mailer {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Deliver a contact-form submission to the site owner's inbox.
    pub async fn send_contact_email(
        &self,
        name: &str,
        email: &str,
        reason: &str,
        message: &str,
    ) -> Result<(), EmailError> {
        let url = format!("{}/emails", self.config.api_url.trim_end_matches('/'));

        let request = SendEmailRequest {
            from: self.config.from_address.clone(),
            to: self.config.to_address.clone(),
            subject: format!("New contact form message from {} ({})", name, reason),
            text: format!(
                "Name: {}\nEmail: {}\nReason: {}\n\n{}",
                name, email, reason, message
            ),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::Api { status, body });
        }

        info!("Contact email dispatched for {}", email);
        Ok(())
    }
}
