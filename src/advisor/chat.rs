//! Session-scoped chat transcript with single-flight submission.

use super::{AdvisorClient, AdvisorContext, ChatError};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Opening assistant message of every session.
pub const GREETING: &str = "Hello! I'm your MosDNS expert. I have access to your current logs \
                            and status. How can I help you today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Append-only transcript; never persisted.
///
/// At most one question is outstanding at a time, so messages land in strict
/// request order: question, answer, question, answer.
pub struct ChatSession {
    advisor: AdvisorClient,
    transcript: Mutex<Vec<ChatMessage>>,
    pending: AtomicBool,
}

/// Clears the pending flag even if the answer future is dropped.
struct PendingGuard<'a>(&'a AtomicBool);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ChatSession {
    pub fn new(advisor: AdvisorClient) -> Self {
        Self {
            advisor,
            transcript: Mutex::new(vec![ChatMessage::assistant(GREETING)]),
            pending: AtomicBool::new(false),
        }
    }

    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Whether a question is awaiting its answer.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Submit a question and wait for the answer.
    ///
    /// The assistant message is always appended, carrying the fixed failure
    /// text if the provider failed, and returned.
    pub async fn ask(
        &self,
        question: &str,
        context: &AdvisorContext,
    ) -> Result<ChatMessage, ChatError> {
        if question.trim().is_empty() {
            return Err(ChatError::EmptyQuestion);
        }
        if self
            .pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ChatError::AnswerPending);
        }
        let _guard = PendingGuard(&self.pending);

        self.append(ChatMessage::user(question));
        let answer = self.advisor.answer_with_context(question, context).await;
        let message = ChatMessage::assistant(answer);
        self.append(message.clone());

        Ok(message)
    }

    fn append(&self, message: ChatMessage) {
        self.transcript
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message);
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("messages", &self.transcript().len())
            .field("pending", &self.is_pending())
            .finish()
    }
}
