// Public fallible APIs in this crate share one concrete error contract (`VocabError`).
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod client;
pub mod config;
pub mod error;
pub mod index;
pub mod locale;
pub mod models;
pub(crate) mod query;
pub mod store;
pub mod text;

pub use client::Vocabulary;
pub use config::AppConfig;
pub use error::{ErrorPayload, Result, VocabError};
pub use locale::Locale;
