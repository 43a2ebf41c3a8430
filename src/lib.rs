// ABOUTME: Main library entry point for the NutriBot meal-recommendation assistant
// ABOUTME: Exposes the recommendation engine, catalog, chat layer, and collaborator clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriBot Intelligence

#![deny(unsafe_code)]

//! # NutriBot
//!
//! A conversational meal-recommendation assistant for diabetic users. Given
//! a meal slot, a diabetes type, and an optional preferred ingredient, the
//! engine selects a recipe from a small fixed catalog; the chat layer then
//! answers follow-up nutrition questions through a hosted language model.
//!
//! ## Architecture
//!
//! - **Catalog**: fixed in-memory table of 20 pt-BR recipes
//! - **Recommender**: candidate filtering, an optional classifier-assisted
//!   strategy, a deterministic fallback ladder, and mismatch reporting
//! - **Chat**: conversation seeding, topic gating, graceful degradation
//! - **Collaborators**: Gemini chat completion and Supabase authentication,
//!   consumed through traits so tests can substitute fakes
//!
//! ## Example
//!
//! ```rust
//! use nutribot::catalog;
//! use nutribot::models::MealRequest;
//! use nutribot::recommender::RecommendationEngine;
//! use rand::SeedableRng;
//!
//! let engine = RecommendationEngine::new(catalog::recipes());
//! let request = MealRequest::new("cafe", "tipo 2", None);
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
//! let recommendation = engine.recommend(&request, &mut rng).unwrap();
//! println!("{}", recommendation.recipe.name);
//! ```

/// Authentication collaborator contract and Supabase client
pub mod auth;

/// Static recipe catalog
pub mod catalog;

/// Nutrition chat layer over a recommendation
pub mod chat;

/// Environment-based process configuration
pub mod config;

/// Application constants and fixed token vocabularies
pub mod constants;

/// Unified error handling system
pub mod errors;

/// LLM provider abstraction and Gemini implementation
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Core domain models
pub mod models;

/// The recommendation engine
pub mod recommender;

/// Text normalization helpers
pub mod text;
