// ABOUTME: Integration tests for the nutrition chat layer with a scripted provider
// ABOUTME: Covers topic gating, graceful degradation, and context seeding
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriBot Intelligence

//! Tests for the chat layer including:
//! - Topic-relevance gating (off-topic refusal, failure treated as accepted)
//! - Retry prompt on completion failure
//! - Recipe context and mismatch caveat seeding

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use nutribot::catalog;
use nutribot::chat::NutritionChat;
use nutribot::constants::chat_messages;
use nutribot::errors::AppError;
use nutribot::llm::{
    ChatRequest, ChatResponse, LlmCapabilities, LlmProvider,
};
use nutribot::models::{CompatibilityMismatch, DiabetesType, Recommendation};

/// Scripted provider: pops one canned outcome per `complete` call and
/// records every request it receives.
struct ScriptedProvider {
    script: Mutex<VecDeque<Result<String, ()>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    fn new(script: Vec<Result<String, ()>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn recorded(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::full_featured()
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(content)) => Ok(ChatResponse {
                content,
                model: "scripted-model".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
            _ => Err(AppError::external_service("scripted", "injected failure")),
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

fn recommendation(mismatch: bool) -> Recommendation<'static> {
    let recipe = catalog::find_by_name("Tilapia grelhada").unwrap();
    Recommendation {
        recipe,
        ingredient_warning: None,
        mismatch: mismatch.then_some(CompatibilityMismatch {
            recipe_compatibility: recipe.compatibility,
            user_type: DiabetesType::Type1,
        }),
    }
}

// ============================================================================
// Topic Gate
// ============================================================================

#[tokio::test]
async fn test_off_topic_turn_is_refused() {
    let provider = ScriptedProvider::new(vec![Ok("NAO".to_owned())]);
    let mut chat = NutritionChat::new(provider, &recommendation(false));

    let reply = chat.send("quanto custa um carro novo?").await;
    assert_eq!(reply, chat_messages::OFF_TOPIC_REPLY);

    // user turn + refusal appended after the greeting
    assert_eq!(chat.history().len(), 3);
}

#[tokio::test]
async fn test_gate_failure_is_treated_as_on_topic() {
    // First call (classification) fails, second (completion) succeeds.
    let provider = ScriptedProvider::new(vec![Err(()), Ok("Pode sim!".to_owned())]);
    let mut chat = NutritionChat::new(provider, &recommendation(false));

    let reply = chat.send("posso trocar o limão?").await;
    assert_eq!(reply, "Pode sim!");
}

#[tokio::test]
async fn test_gate_prompt_demands_sim_or_nao() {
    let provider = ScriptedProvider::new(vec![Ok("SIM".to_owned()), Ok("claro".to_owned())]);
    let mut chat = NutritionChat::new(provider, &recommendation(false));
    chat.send("a receita tem gluten?").await;

    let requests = chat_requests(&chat);
    let gate = &requests[0];
    assert!(gate.messages[0].content.contains("SIM"));
    assert!(gate.messages[0].content.contains("NAO"));
    assert!(gate.messages[0].content.contains("a receita tem gluten?"));
}

// ============================================================================
// Degradation
// ============================================================================

#[tokio::test]
async fn test_completion_failure_yields_retry_prompt() {
    let provider = ScriptedProvider::new(vec![Ok("SIM".to_owned()), Err(())]);
    let mut chat = NutritionChat::new(provider, &recommendation(false));

    let reply = chat.send("qual o valor calórico?").await;
    assert_eq!(reply, chat_messages::CONNECTION_RETRY_REPLY);

    // The degraded reply still lands in the visible history.
    assert_eq!(
        chat.history().last().unwrap().content,
        chat_messages::CONNECTION_RETRY_REPLY
    );
}

// ============================================================================
// Context Seeding
// ============================================================================

#[tokio::test]
async fn test_completion_request_carries_recipe_context() {
    let provider = ScriptedProvider::new(vec![Ok("SIM".to_owned()), Ok("ok".to_owned())]);
    let mut chat = NutritionChat::new(provider, &recommendation(false));
    chat.send("como preparo?").await;

    let requests = chat_requests(&chat);
    let completion = requests.last().unwrap();
    let prompt = &completion.messages.last().unwrap().content;
    assert!(prompt.contains("Tilapia grelhada"));
    assert!(prompt.contains("como preparo?"));
    assert!(completion.system_prompt.is_some());
}

#[tokio::test]
async fn test_mismatch_caveat_reaches_the_model() {
    let provider = ScriptedProvider::new(vec![Ok("SIM".to_owned()), Ok("ok".to_owned())]);
    let mut chat = NutritionChat::new(provider, &recommendation(true));
    chat.send("posso comer mesmo assim?").await;

    let requests = chat_requests(&chat);
    let prompt = &requests.last().unwrap().messages.last().unwrap().content;
    assert!(prompt.contains("ATENÇÃO CRÍTICA"));
    assert!(prompt.contains("tipo2"));
    assert!(prompt.contains("Tipo 1"));
}

#[tokio::test]
async fn test_greeting_references_the_recipe() {
    let provider = ScriptedProvider::new(vec![]);
    let chat = NutritionChat::new(provider, &recommendation(false));
    assert!(chat.greeting().contains("Tilapia grelhada"));
}

fn chat_requests(chat: &NutritionChat<ScriptedProvider>) -> Vec<ChatRequest> {
    chat.provider().recorded()
}
