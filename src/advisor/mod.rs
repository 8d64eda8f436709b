//! AI-assisted config review and operator chat.
//!
//! The text-generation provider is an injected [`TextGenerator`]. Every
//! provider failure is absorbed into a fixed, human-readable reply, so the
//! advisor never breaks the session.

mod chat;
mod context;
mod error;
pub mod gemini;

pub use chat::*;
pub use context::*;
pub use error::*;
pub use gemini::GeminiGenerator;

use async_trait::async_trait;
use std::sync::Arc;

/// Reply when a config review cannot be produced.
pub const REVIEW_FAILURE: &str =
    "Failed to analyze configuration. Please check your connection and API key.";

/// Reply when a rule explanation cannot be produced.
pub const EXPLAIN_FAILURE: &str = "Explanation unavailable.";

/// Reply when a chat question cannot be answered.
pub const CHAT_FAILURE: &str =
    "I'm sorry, I couldn't process your request right now. Please check your API key.";

/// Substituted for an empty review.
pub const REVIEW_EMPTY: &str = "No issues found.";

/// Substituted for an empty chat answer.
pub const CHAT_EMPTY: &str = "Sorry, I couldn't get an answer.";

/// Opaque "generate text from prompt" capability.
#[async_trait]
pub trait TextGenerator: Send + Sync + 'static {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Prompt construction plus failure substitution on top of a [`TextGenerator`].
#[derive(Clone)]
pub struct AdvisorClient {
    generator: Arc<dyn TextGenerator>,
}

impl AdvisorClient {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Ask for the top optimizations or security fixes in a forwarder config.
    pub async fn review_config(&self, yaml: &str) -> String {
        let prompt = format!(
            "Review this MosDNS YAML configuration and suggest the 3 most valuable \
             optimizations or security improvements, covering performance, privacy \
             and best practices.\n\nConfig:\n{yaml}\n\n\
             Reply with a short markdown bulleted list."
        );
        self.generate_or("review_config", &prompt, REVIEW_FAILURE, REVIEW_EMPTY)
            .await
    }

    /// Explain one rule or plugin snippet in plain language.
    pub async fn explain_rule(&self, rule_text: &str) -> String {
        let prompt = format!(
            "Explain in simple terms what this MosDNS rule or plugin configuration does:\n\n{rule_text}"
        );
        self.generate_or("explain_rule", &prompt, EXPLAIN_FAILURE, EXPLAIN_FAILURE)
            .await
    }

    /// Answer an operator question using a snapshot of console state.
    pub async fn answer_with_context(&self, question: &str, context: &AdvisorContext) -> String {
        let prompt = format!(
            "You are an experienced MosDNS administrator helping an operator.\n\n\
             Current system status and recent query logs (JSON):\n{}\n\n\
             Operator question: \"{question}\"\n\n\
             Answer from the data above. Call out SERVFAIL or NXDOMAIN responses and \
             high latency when you see them. Be concise and friendly, and use markdown.",
            context.to_prompt_json()
        );
        self.generate_or("answer_with_context", &prompt, CHAT_FAILURE, CHAT_EMPTY)
            .await
    }

    async fn generate_or(
        &self,
        operation: &'static str,
        prompt: &str,
        on_failure: &str,
        on_empty: &str,
    ) -> String {
        match self.generator.generate(prompt).await {
            Ok(text) if text.trim().is_empty() => on_empty.to_string(),
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(operation, error = %e, "Advisor request failed");
                on_failure.to_string()
            }
        }
    }
}

impl std::fmt::Debug for AdvisorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvisorClient").finish_non_exhaustive()
    }
}
