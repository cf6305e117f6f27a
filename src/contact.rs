//! Contact form submission pipeline.
//!
//! Sequential and fail-closed: body parse -> required fields -> length
//! bounds -> email shape -> spam check -> email dispatch. A spam verdict is
//! answered with the same 200 a genuine success gets and no email is sent,
//! so automated senders cannot tell they were detected.

use crate::email::EmailError;
use crate::error::AppError;
use crate::server::AppState;
use crate::spam::{spam_checks, SpamConfig};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::OnceLock;
use tracing::info;

const MAX_NAME_LEN: usize = 100;
const MAX_EMAIL_LEN: usize = 100;
const MAX_REASON_LEN: usize = 200;
const MAX_MESSAGE_LEN: usize = 5_000;

const INVALID_FORMAT: &str = "Invalid request format";
const MISSING_FIELDS: &str = "Missing required fields";
const LENGTH_EXCEEDED: &str = "Field length exceeded";
const INVALID_EMAIL: &str = "Invalid email address";

/// Sent on real success and on masked spam alike.
const SUCCESS_MESSAGE: &str = "Thank you for your message! I will get back to you soon.";

/// One contact form submission. Exists for the duration of a single
/// request and is never persisted.
///
/// Every field is optional at the type level so presence can be validated
/// explicitly and answered with the right error message.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub reason: Option<String>,
    pub message: Option<String>,
    pub honeypot: Option<String>,
    /// Wire name is `recaptchaToken`; the snake_case form is accepted too.
    #[serde(alias = "recaptchaToken")]
    pub token: Option<String>,
    /// Unix milliseconds at which the form page was loaded
    #[serde(alias = "pageLoadTime")]
    pub page_load_time: Option<i64>,
}

fn email_regex() -> &'static regex::Regex {
    static EMAIL_REGEX: OnceLock<regex::Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
    })
}

/// The four required fields, validated and ready for dispatch.
#[derive(Debug)]
struct ValidatedSubmission<'a> {
    name: &'a str,
    email: &'a str,
    reason: &'a str,
    message: &'a str,
}

/// Presence check: a blank or whitespace-only field counts as missing.
fn required(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn validate(submission: &ContactSubmission) -> Result<ValidatedSubmission<'_>, AppError> {
    let (Some(name), Some(email), Some(reason), Some(message)) = (
        required(&submission.name),
        required(&submission.email),
        required(&submission.reason),
        required(&submission.message),
    ) else {
        return Err(AppError::Validation(MISSING_FIELDS));
    };

    if name.chars().count() > MAX_NAME_LEN
        || email.chars().count() > MAX_EMAIL_LEN
        || reason.chars().count() > MAX_REASON_LEN
        || message.chars().count() > MAX_MESSAGE_LEN
    {
        return Err(AppError::Validation(LENGTH_EXCEEDED));
    }

    if !email_regex().is_match(email) {
        return Err(AppError::Validation(INVALID_EMAIL));
    }

    Ok(ValidatedSubmission {
        name,
        email,
        reason,
        message,
    })
}

/// POST /api/contact
pub async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(submission) = payload.map_err(|_| AppError::Validation(INVALID_FORMAT))?;

    let validated = validate(&submission)?;

    let spam_config = SpamConfig {
        expected_token: state.config.contact_form_token.clone(),
    };
    let verdict = spam_checks(&submission, &spam_config);
    if verdict.is_spam {
        // Masked: identical response to a genuine success, no email sent.
        // The reason stays in the server log only.
        let reason = verdict.reason.map(|r| r.code()).unwrap_or("unknown");
        info!("Spam submission masked (reason: {})", reason);
        return Ok(Json(json!({ "message": SUCCESS_MESSAGE })));
    }

    let mailer = state.mailer.as_ref().ok_or(EmailError::Unconfigured)?;
    mailer
        .send_contact_email(
            validated.name,
            validated.email,
            validated.reason,
            validated.message,
        )
        .await?;

    Ok(Json(json!({ "message": SUCCESS_MESSAGE })))
}
