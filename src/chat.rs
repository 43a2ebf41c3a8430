// ABOUTME: Nutrition chat layer seeding conversational context from a recommendation
// ABOUTME: Topic-gates user turns and degrades gracefully on collaborator failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriBot Intelligence

//! # Nutrition Chat
//!
//! Once a recipe has been recommended, the user can ask follow-up nutrition
//! questions. This layer owns the conversation state and the two degradation
//! rules for the chat-completion collaborator:
//!
//! - topic-relevance classification failure is treated as "topic accepted";
//! - completion failure produces a fixed, user-visible retry prompt instead
//!   of an error.
//!
//! When the recommendation carries a compatibility mismatch, every model
//! turn is instructed to open with a nutritional-safety caveat.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::constants::chat_messages;
use crate::llm::{get_nutribot_system_prompt, ChatMessage, ChatRequest, LlmProvider, MessageRole};
use crate::models::Recommendation;

/// One user-facing chat session, seeded from a recommendation
pub struct NutritionChat<P: LlmProvider> {
    provider: P,
    session_id: Uuid,
    history: Vec<ChatMessage>,
    context: String,
    caveat: Option<String>,
}

impl<P: LlmProvider> NutritionChat<P> {
    /// Start a session for a freshly produced recommendation
    #[must_use]
    pub fn new(provider: P, recommendation: &Recommendation<'_>) -> Self {
        let recipe = recommendation.recipe;
        let context = format!(
            "Você é um assistente virtual nutricional. O usuário recebeu a recomendação \
             da receita: {} ({}). Ingredientes: {}.",
            recipe.name, recipe.description, recipe.ingredients
        );
        let caveat = recommendation.mismatch.map(|mismatch| {
            format!(
                "ATENÇÃO CRÍTICA: Esta receita é classificada para {}, mas o usuário é {}. \
                 Sua resposta DEVE começar obrigatoriamente com uma ressalva de segurança \
                 nutricional sobre isso.",
                mismatch.recipe_compatibility.as_token(),
                mismatch.user_type.as_label()
            )
        });

        let greeting = format!(
            "Encontrei uma receita para você: {}! Posso tirar dúvidas sobre ela ou sobre nutrição.",
            recipe.name
        );

        let session_id = Uuid::new_v4();
        info!(%session_id, recipe = recipe.name, mismatch = caveat.is_some(), "chat session started");

        Self {
            provider,
            session_id,
            history: vec![ChatMessage::assistant(greeting)],
            context,
            caveat,
        }
    }

    /// Session identifier
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The underlying chat-completion provider
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Conversation history as shown to the user
    #[must_use]
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// The assistant's opening message
    #[must_use]
    pub fn greeting(&self) -> &str {
        &self.history[0].content
    }

    /// Classify whether a user turn is on topic (food, health, diabetes,
    /// cooking, recipes). Classification failures are accepted as on-topic.
    pub async fn is_on_topic(&self, text: &str) -> bool {
        let prompt = format!(
            "O texto '{text}' tem relacao com alimentacao, saude, diabetes, culinaria \
             ou receitas? Responda APENAS 'SIM' ou 'NAO'."
        );
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);
        match self.provider.complete(&request).await {
            Ok(response) => response.content.to_uppercase().contains("SIM"),
            Err(error) => {
                debug!(%error, "topic classification failed, accepting topic");
                true
            }
        }
    }

    /// Run one full user turn: gate the topic, complete through the
    /// provider, and append both sides to the history. Always returns a
    /// user-visible reply.
    pub async fn send(&mut self, text: &str) -> String {
        self.history.push(ChatMessage::user(text));

        if !self.is_on_topic(text).await {
            return self.reply(chat_messages::OFF_TOPIC_REPLY.to_owned());
        }

        let request = self.build_request(text);
        match self.provider.complete(&request).await {
            Ok(response) => self.reply(response.content),
            Err(error) => {
                warn!(%error, session_id = %self.session_id, "chat completion failed");
                self.reply(chat_messages::CONNECTION_RETRY_REPLY.to_owned())
            }
        }
    }

    /// Build the provider request for the current turn. The recipe context
    /// (and the safety caveat, when present) is folded into the final user
    /// message so it survives providers without system-message support.
    fn build_request(&self, text: &str) -> ChatRequest {
        let caveat = self.caveat.as_deref().unwrap_or_default();
        let prompt_final = format!(
            "Contexto: {}. {caveat} Pergunta do usuário: {text}",
            self.context
        );

        // Replay prior turns, replacing the just-pushed raw user message
        // with the context-wrapped prompt.
        let mut messages: Vec<ChatMessage> = self
            .history
            .iter()
            .take(self.history.len().saturating_sub(1))
            .filter(|m| m.role != MessageRole::System)
            .cloned()
            .collect();
        messages.push(ChatMessage::user(prompt_final));

        let mut request = ChatRequest::new(messages);
        if self.provider.capabilities().supports_system_messages() {
            request = request.with_system_prompt(get_nutribot_system_prompt());
        }
        request
    }

    fn reply(&mut self, content: String) -> String {
        self.history.push(ChatMessage::assistant(content.clone()));
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CompatibilityMismatch, DiabetesCompatibility, DiabetesType, MealSlot, Recipe,
        Recommendation,
    };

    struct NullProvider;

    #[async_trait::async_trait]
    impl LlmProvider for NullProvider {
        fn name(&self) -> &'static str {
            "null"
        }
        fn display_name(&self) -> &'static str {
            "Null"
        }
        fn capabilities(&self) -> crate::llm::LlmCapabilities {
            crate::llm::LlmCapabilities::text_only()
        }
        fn default_model(&self) -> &str {
            "null"
        }
        async fn complete(
            &self,
            _request: &ChatRequest,
        ) -> Result<crate::llm::ChatResponse, crate::errors::AppError> {
            Err(crate::errors::AppError::internal("no backend"))
        }
        async fn health_check(&self) -> Result<bool, crate::errors::AppError> {
            Ok(false)
        }
    }

    fn recipe() -> Recipe {
        Recipe {
            name: "Tilapia grelhada",
            meal_slot: MealSlot::Main,
            compatibility: DiabetesCompatibility::Type2,
            ingredients: "Tilapia, sal, limao, alho, peixe",
            description: "Opção leve e proteica.",
        }
    }

    #[test]
    fn test_greeting_names_the_recipe() {
        let recipe = recipe();
        let recommendation = Recommendation {
            recipe: &recipe,
            ingredient_warning: None,
            mismatch: None,
        };
        let chat = NutritionChat::new(NullProvider, &recommendation);
        assert!(chat.greeting().contains("Tilapia grelhada"));
        assert_eq!(chat.history().len(), 1);
    }

    #[test]
    fn test_mismatch_caveat_is_folded_into_the_prompt() {
        let recipe = recipe();
        let recommendation = Recommendation {
            recipe: &recipe,
            ingredient_warning: None,
            mismatch: Some(CompatibilityMismatch {
                recipe_compatibility: DiabetesCompatibility::Type2,
                user_type: DiabetesType::Type1,
            }),
        };
        let mut chat = NutritionChat::new(NullProvider, &recommendation);
        chat.history.push(ChatMessage::user("posso comer?"));
        let request = chat.build_request("posso comer?");

        let last = request.messages.last().unwrap();
        assert!(last.content.contains("ATENÇÃO CRÍTICA"));
        assert!(last.content.contains("tipo2"));
        assert!(last.content.contains("Tipo 1"));
        assert!(last.content.contains("posso comer?"));
    }
}
