// ABOUTME: Text normalization for locale-insensitive catalog matching
// ABOUTME: Lowercases input and strips combining diacritical marks via NFD decomposition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriBot Intelligence

//! # Text Normalizer
//!
//! Free-text inputs (meal slots, diabetes types, ingredient preferences) are
//! compared against a pt-BR recipe catalog. Matching must not depend on case
//! or diacritics, so every comparison in the recommendation engine goes
//! through [`normalize`] first.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize free text for comparison: lowercase, NFD-decompose, and drop
/// combining marks (`"Açaí"` becomes `"acai"`).
///
/// Idempotent: `normalize(normalize(s)) == normalize(s)`. Never fails.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}
