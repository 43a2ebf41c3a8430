// ABOUTME: Application constants and fixed token vocabularies
// ABOUTME: Centralizes sentinel tokens, environment variable names, and canned chat replies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriBot Intelligence

//! Application-wide constants.
//!
//! Grouped by concern so call sites read as `constants::ingredient_tokens::SKIP_TOKENS`.

/// Service identification for logging and diagnostics
pub mod service_names {
    /// Canonical service name
    pub const NUTRIBOT: &str = "nutribot";
}

/// Environment variable names for process configuration
pub mod env_config {
    /// Gemini API key for the chat-completion collaborator
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Override for the default Gemini model
    pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
    /// Supabase project base URL for the auth collaborator
    pub const SUPABASE_URL: &str = "SUPABASE_URL";
    /// Supabase anon/service key for the auth collaborator
    pub const SUPABASE_KEY: &str = "SUPABASE_KEY";
    /// Enables the classifier-assisted selection strategy ("1"/"true"/"yes"/"on")
    pub const CLASSIFIER_ENABLED: &str = "NUTRIBOT_CLASSIFIER";
    /// Fixed seed for the tie-breaking RNG (unset = entropy-seeded)
    pub const RNG_SEED: &str = "NUTRIBOT_RNG_SEED";
}

/// Sentinel vocabulary for the preferred-ingredient input
pub mod ingredient_tokens {
    /// Normalized tokens meaning "no ingredient preference".
    ///
    /// These come from the conversational UI, where users answer the
    /// ingredient question with "não"/"n/a" or leave it blank.
    pub const SKIP_TOKENS: &[&str] = &["", "nao", "na"];
}

/// Token vocabulary for diabetes-type detection (matched by containment
/// over the space-stripped, normalized input)
pub mod diabetes_tokens {
    /// Tokens recognized as type 1 diabetes
    pub const TYPE1: &[&str] = &["tipo1", "type1"];
    /// Tokens recognized as type 2 diabetes
    pub const TYPE2: &[&str] = &["tipo2", "type2"];
}

/// Fixed user-visible chat replies (pt-BR, matching the catalog locale)
pub mod chat_messages {
    /// Reply when the topic gate rejects a user turn
    pub const OFF_TOPIC_REPLY: &str =
        "Desculpe, só posso responder sobre nutrição, diabetes e receitas.";
    /// Reply when the chat-completion collaborator fails
    pub const CONNECTION_RETRY_REPLY: &str = "Tive um problema de conexão. Tente novamente.";
}
