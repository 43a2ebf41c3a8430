// ABOUTME: Environment-based process configuration for collaborators and the engine
// ABOUTME: Reads Gemini, Supabase, classifier, and RNG settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriBot Intelligence

//! Environment-only configuration.
//!
//! Collaborator credentials are optional at load time: a process that never
//! opens a chat session does not need a Gemini key. The individual clients
//! fail with `CONFIG_MISSING` when they are actually constructed without
//! their settings.

use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

use crate::constants::env_config;
use crate::errors::AppResult;

/// Deployment environment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }
}

/// Chat-completion collaborator settings
#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    /// Gemini API key; absent when the chat layer is unused
    pub api_key: Option<String>,
    /// Optional model override
    pub model: Option<String>,
}

/// Authentication collaborator settings
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// Supabase project URL
    pub base_url: Option<String>,
    /// Supabase anon/service key
    pub api_key: Option<String>,
}

impl AuthConfig {
    /// Whether both settings are present
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.base_url.is_some() && self.api_key.is_some()
    }
}

/// Recommendation engine settings
#[derive(Debug, Clone, Default)]
pub struct RecommenderConfig {
    /// Train and use the classifier-assisted selection strategy
    pub classifier_enabled: bool,
    /// Fixed seed for tie-breaking; unset means entropy-seeded
    pub rng_seed: Option<u64>,
}

/// Full process configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub environment: Environment,
    pub llm: LlmConfig,
    pub auth: AuthConfig,
    pub recommender: RecommenderConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Currently infallible (malformed optional values degrade with a
    /// warning); kept fallible for configuration that may grow stricter.
    pub fn from_env() -> AppResult<Self> {
        let environment = Environment::from_str_or_default(
            &env::var("ENVIRONMENT").unwrap_or_default(),
        );

        let rng_seed = match env::var(env_config::RNG_SEED) {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(seed) => Some(seed),
                Err(_) => {
                    warn!(
                        value = raw,
                        "ignoring non-numeric {}", env_config::RNG_SEED
                    );
                    None
                }
            },
            Err(_) => None,
        };

        Ok(Self {
            environment,
            llm: LlmConfig {
                api_key: env::var(env_config::GEMINI_API_KEY).ok(),
                model: env::var(env_config::GEMINI_MODEL).ok(),
            },
            auth: AuthConfig {
                base_url: env::var(env_config::SUPABASE_URL).ok(),
                api_key: env::var(env_config::SUPABASE_KEY).ok(),
            },
            recommender: RecommenderConfig {
                classifier_enabled: env::var(env_config::CLASSIFIER_ENABLED)
                    .map(|v| flag_enabled(&v))
                    .unwrap_or(false),
                rng_seed,
            },
        })
    }
}

fn flag_enabled(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            env_config::GEMINI_API_KEY,
            env_config::GEMINI_MODEL,
            env_config::SUPABASE_URL,
            env_config::SUPABASE_KEY,
            env_config::CLASSIFIER_ENABLED,
            env_config::RNG_SEED,
            "ENVIRONMENT",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_with_empty_environment() {
        clear_env();
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert!(config.llm.api_key.is_none());
        assert!(!config.auth.is_configured());
        assert!(!config.recommender.classifier_enabled);
        assert!(config.recommender.rng_seed.is_none());
    }

    #[test]
    #[serial]
    fn test_classifier_flag_and_seed() {
        clear_env();
        env::set_var(env_config::CLASSIFIER_ENABLED, "yes");
        env::set_var(env_config::RNG_SEED, "42");
        let config = AppConfig::from_env().unwrap();
        assert!(config.recommender.classifier_enabled);
        assert_eq!(config.recommender.rng_seed, Some(42));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_malformed_seed_degrades_to_none() {
        clear_env();
        env::set_var(env_config::RNG_SEED, "not-a-number");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.recommender.rng_seed, None);
        clear_env();
    }

    #[test]
    fn test_flag_parsing() {
        assert!(flag_enabled("1"));
        assert!(flag_enabled("TRUE"));
        assert!(flag_enabled("on"));
        assert!(!flag_enabled("0"));
        assert!(!flag_enabled("disabled"));
    }
}
