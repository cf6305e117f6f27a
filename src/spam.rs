//! Heuristic spam detection for contact submissions.
//!
//! Checks run in a fixed priority order and short-circuit at the first
//! positive signal: honeypot > timing > token > link density > repeated
//! characters. One positive signal marks the whole submission spam. The
//! pipeline never errors; a check whose input is absent is skipped, not
//! failed.

use crate::contact::ContactSubmission;
use chrono::Utc;
use std::sync::OnceLock;
use subtle::ConstantTimeEq;

/// Minimum plausible time between page load and submit.
const MIN_FILL_TIME_MS: i64 = 3_000;

/// Links beyond this count in a message trip the content check.
const MAX_LINKS: usize = 3;

/// A single character repeated this many times consecutively trips the
/// content check.
const MAX_CHAR_RUN: usize = 10;

/// Inputs the checker needs besides the submission itself.
#[derive(Debug, Clone, Default)]
pub struct SpamConfig {
    /// Shared verification token; None disables the token check entirely.
    pub expected_token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpamReason {
    Honeypot,
    TooFast,
    InvalidToken,
    TooManyLinks,
    RepeatedCharacters,
}

impl SpamReason {
    /// Stable reason code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            SpamReason::Honeypot => "honeypot",
            SpamReason::TooFast => "too-fast",
            SpamReason::InvalidToken => "invalid-token",
            SpamReason::TooManyLinks => "too-many-links",
            SpamReason::RepeatedCharacters => "repeated-characters",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpamVerdict {
    pub is_spam: bool,
    pub reason: Option<SpamReason>,
}

impl SpamVerdict {
    pub fn clean() -> Self {
        Self {
            is_spam: false,
            reason: None,
        }
    }

    pub fn spam(reason: SpamReason) -> Self {
        Self {
            is_spam: true,
            reason: Some(reason),
        }
    }
}

/// Constant-time string comparison to prevent timing attacks.
/// Use this for comparing tokens and other sensitive values.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

fn link_regex() -> &'static regex::Regex {
    static LINK_REGEX: OnceLock<regex::Regex> = OnceLock::new();
    LINK_REGEX.get_or_init(|| regex::Regex::new(r"https?://").expect("valid regex"))
}

/// Longest run of one character repeated consecutively.
///
/// Manual scan: the regex crate has no backreferences, so `(.)\1{9,}`
/// is not an option.
fn longest_char_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<char> = None;

    for c in text.chars() {
        if Some(c) == previous {
            current += 1;
        } else {
            current = 1;
            previous = Some(c);
        }
        longest = longest.max(current);
    }

    longest
}

/// Run every heuristic against a submission.
pub fn spam_checks(submission: &ContactSubmission, config: &SpamConfig) -> SpamVerdict {
    spam_checks_at(submission, config, Utc::now().timestamp_millis())
}

fn spam_checks_at(
    submission: &ContactSubmission,
    config: &SpamConfig,
    now_ms: i64,
) -> SpamVerdict {
    // Honeypot: hidden field a human never fills in
    if submission
        .honeypot
        .as_deref()
        .is_some_and(|value| !value.is_empty())
    {
        return SpamVerdict::spam(SpamReason::Honeypot);
    }

    // Timing: submitted faster than a human could fill the form
    if let Some(page_load_time) = submission.page_load_time {
        if now_ms - page_load_time < MIN_FILL_TIME_MS {
            return SpamVerdict::spam(SpamReason::TooFast);
        }
    }

    // Verification token, only when one is configured
    if let Some(expected) = &config.expected_token {
        let valid = submission
            .token
            .as_deref()
            .is_some_and(|token| constant_time_compare(token, expected));
        if !valid {
            return SpamVerdict::spam(SpamReason::InvalidToken);
        }
    }

    let message = submission.message.as_deref().unwrap_or("");

    if link_regex().find_iter(message).count() > MAX_LINKS {
        return SpamVerdict::spam(SpamReason::TooManyLinks);
    }

    if longest_char_run(message) >= MAX_CHAR_RUN {
        return SpamVerdict::spam(SpamReason::RepeatedCharacters);
    }

    SpamVerdict::clean()
}
