// ABOUTME: System prompts for LLM interactions loaded at compile time
// ABOUTME: Provides the NutriBot nutrition-assistant system prompt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriBot Intelligence

//! # System Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy
//! maintenance.

/// NutriBot nutrition assistant system prompt
///
/// Contains instructions for the assistant: role and tone, topic
/// boundaries, and how to handle compatibility caveats.
pub const NUTRIBOT_SYSTEM_PROMPT: &str = include_str!("nutribot_system.md");

/// Get the system prompt for the NutriBot assistant
///
/// This is the default system prompt used when starting a new conversation.
#[must_use]
pub const fn get_nutribot_system_prompt() -> &'static str {
    NUTRIBOT_SYSTEM_PROMPT
}
