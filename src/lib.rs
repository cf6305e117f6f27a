//! Backend for a personal portfolio site.
//!
//! The interesting parts are locale-aware routing with translation lookup
//! and the contact form pipeline (rate limiting, spam heuristics, email
//! dispatch). Page rendering itself is a thin localized shell; the content
//! lives with the frontend.

pub mod config;
pub mod contact;
pub mod email;
pub mod error;
pub mod i18n;
pub mod rate_limit;
pub mod routing;
pub mod server;
pub mod spam;
