// ABOUTME: Google Gemini LLM provider implementation for the nutrition chat
// ABOUTME: Calls the Generative Language API with system instruction support
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriBot Intelligence

//! # Gemini Provider
//!
//! Implementation of the [`LlmProvider`] trait for Google's Gemini models.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with an API key from Google
//! AI Studio. `GEMINI_MODEL` overrides the default model.

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, MessageRole, TokenUsage};
use crate::constants::env_config;
use crate::errors::AppError;

/// Default model to use
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<ContentPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContentPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

// ============================================================================
// Provider
// ============================================================================

/// Gemini chat-completion provider
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    default_model: String,
}

impl GeminiProvider {
    /// Create a provider with an explicit API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            default_model: DEFAULT_MODEL.to_owned(),
        }
    }

    /// Create a provider from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `GEMINI_API_KEY` is not set.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = env::var(env_config::GEMINI_API_KEY)
            .map_err(|_| AppError::config_missing(env_config::GEMINI_API_KEY))?;
        let mut provider = Self::new(api_key);
        if let Ok(model) = env::var(env_config::GEMINI_MODEL) {
            provider = provider.with_default_model(model);
        }
        Ok(provider)
    }

    /// Override the default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    fn build_request(request: &ChatRequest) -> GeminiRequest {
        // Gemini has no assistant role; prior assistant turns are sent as
        // "model" content, and any system message in the list is folded into
        // the system instruction.
        let mut system_texts: Vec<String> = request.system_prompt.iter().cloned().collect();
        let mut contents = Vec::new();
        for message in &request.messages {
            match message.role {
                MessageRole::System => system_texts.push(message.content.clone()),
                MessageRole::User => contents.push(Self::content("user", message)),
                MessageRole::Assistant => contents.push(Self::content("model", message)),
            }
        }

        let system_instruction = if system_texts.is_empty() {
            None
        } else {
            Some(GeminiContent {
                role: None,
                parts: vec![ContentPart {
                    text: system_texts.join("\n\n"),
                }],
            })
        };

        let generation_config =
            if request.temperature.is_some() || request.max_tokens.is_some() {
                Some(GenerationConfig {
                    temperature: request.temperature,
                    max_output_tokens: request.max_tokens,
                })
            } else {
                None
            };

        GeminiRequest {
            contents,
            system_instruction,
            generation_config,
        }
    }

    fn content(role: &str, message: &ChatMessage) -> GeminiContent {
        GeminiContent {
            role: Some(role.to_owned()),
            parts: vec![ContentPart {
                text: message.content.clone(),
            }],
        }
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("default_model", &self.default_model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn display_name(&self) -> &'static str {
        "Google Gemini"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::full_featured()
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = self.default_model.as_str();
        let url = format!(
            "{API_BASE_URL}/models/{model}:generateContent?key={}",
            self.api_key
        );
        let body = Self::build_request(request);

        debug!(model, messages = request.messages.len(), "gemini completion request");

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(%status, "gemini completion failed");
            return Err(AppError::external_service(
                "gemini",
                format!("HTTP {status}: {detail}"),
            ));
        }

        let parsed: GeminiResponse = response.json().await?;
        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service("gemini", "response has no candidates"))?;

        let content = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(ChatResponse {
            content,
            model: model.to_owned(),
            usage: parsed.usage_metadata.map(|u| TokenUsage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            }),
            finish_reason: candidate.finish_reason,
        })
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        let url = format!("{API_BASE_URL}/models?key={}", self.api_key);
        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }
}
