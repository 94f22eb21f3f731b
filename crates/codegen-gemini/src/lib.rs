//! Client for the Google Gemini `generateContent` API.
//!
//! Provider error shapes (plain string or nested `{code, message, status}`
//! object, in 2xx or non-2xx responses) are normalised into [`GeminiError`]
//! here and never leak past this crate.

mod client;
mod error;
pub mod types;

pub use client::{GeminiClient, GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::{ApiErrorKind, GeminiError};
