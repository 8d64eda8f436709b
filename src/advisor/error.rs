//! Error types for the advisor.

use thiserror::Error;

/// Failure reported by a [`TextGenerator`](super::TextGenerator).
///
/// [`AdvisorClient`](super::AdvisorClient) absorbs these into fixed prose.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded deadline.
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// Provider returned an error response (4xx, 5xx).
    #[error("Provider error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Provider response doesn't match the expected format.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Missing API key or similar.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Why a chat question was not submitted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatError {
    #[error("question is empty")]
    EmptyQuestion,

    #[error("an answer is still pending")]
    AnswerPending,
}
