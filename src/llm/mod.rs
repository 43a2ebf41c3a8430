// ABOUTME: Chat-completion collaborator contract for the nutrition chat layer
// ABOUTME: Defines the provider trait, message types, and capability flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriBot Intelligence

//! # Chat-Completion Provider Interface
//!
//! The hosted language model is an external collaborator of the
//! recommendation core: the chat layer consumes it through [`LlmProvider`]
//! and must keep working (degraded) when it fails. The trait is deliberately
//! small; which model answers is a provider concern, configured once at
//! construction rather than per request.
//!
//! ## Example
//!
//! ```rust,no_run
//! use nutribot::llm::{LlmProvider, ChatMessage, ChatRequest};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let request = ChatRequest::new(vec![
//!         ChatMessage::user("Posso substituir o frango por peixe?"),
//!     ]);
//!     let response = provider.complete(&request).await;
//! }
//! ```

mod gemini;
pub mod prompts;

pub use gemini::GeminiProvider;
pub use prompts::get_nutribot_system_prompt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

bitflags::bitflags! {
    /// Provider feature flags.
    ///
    /// The chat layer checks these before shaping a request; providers
    /// without [`LlmCapabilities::SYSTEM_MESSAGES`] receive the system
    /// instruction folded into the user turn instead.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LlmCapabilities: u8 {
        /// Accepts a dedicated system instruction
        const SYSTEM_MESSAGES = 0b0000_0001;
        /// Supports JSON mode output
        const JSON_MODE = 0b0000_0010;
    }
}

impl LlmCapabilities {
    /// Flags for a basic text-only provider
    #[must_use]
    pub const fn text_only() -> Self {
        Self::SYSTEM_MESSAGES
    }

    /// Flags for a full-featured provider
    #[must_use]
    pub const fn full_featured() -> Self {
        Self::SYSTEM_MESSAGES.union(Self::JSON_MODE)
    }

    /// Whether a dedicated system instruction is accepted
    #[must_use]
    pub const fn supports_system_messages(&self) -> bool {
        self.contains(Self::SYSTEM_MESSAGES)
    }
}

/// Who said a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction
    System,
    /// The end user
    User,
    /// The model
    Assistant,
}

/// One turn of the conversation, as kept in the chat history and sent to
/// the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who said it
    pub role: MessageRole,
    /// What was said
    pub content: String,
}

impl ChatMessage {
    /// Message with an explicit role
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// System-instruction turn
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// User turn
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Model turn
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// One completion request. The model identity is not part of the request;
/// it belongs to the provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation turns, oldest first
    pub messages: Vec<ChatMessage>,
    /// System instruction, sent separately from the message list
    pub system_prompt: Option<String>,
    /// Sampling temperature override
    pub temperature: Option<f32>,
    /// Output token cap
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Request with the given turns and no overrides
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            system_prompt: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Attach a system instruction
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Override the sampling temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Cap the generated output length
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// A completed model turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated text
    pub content: String,
    /// Model that produced it
    pub model: String,
    /// Token accounting, when the provider reports it
    pub usage: Option<TokenUsage>,
    /// Why generation stopped (stop, length, ...)
    pub finish_reason: Option<String>,
}

/// Token accounting for one completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Tokens generated
    pub completion_tokens: u32,
    /// Prompt plus completion
    pub total_tokens: u32,
}

/// Contract implemented by chat-completion providers.
///
/// Providers may fail transiently; callers in the chat layer own the
/// degradation rules (see [`crate::chat`]).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Machine-readable provider name
    fn name(&self) -> &'static str;

    /// Human-readable provider name
    fn display_name(&self) -> &'static str;

    /// Provider capabilities
    fn capabilities(&self) -> LlmCapabilities;

    /// Identifier of the model this provider answers with
    fn default_model(&self) -> &str;

    /// Perform a chat completion
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails or the response cannot be
    /// decoded.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError>;

    /// Check provider health
    ///
    /// # Errors
    ///
    /// Returns an error if the health check fails.
    async fn health_check(&self) -> Result<bool, AppError>;
}
