// ABOUTME: Core domain models for diabetes-aware meal recommendation
// ABOUTME: Defines Recipe, MealSlot, DiabetesCompatibility, DiabetesType, and result types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriBot Intelligence

//! # Domain Models
//!
//! Data structures shared across the recommendation engine and the chat layer.
//! The catalog vocabulary is pt-BR (`cafe`/`principal`/`lanche`,
//! `tipo1`/`tipo2`/`ambos`); parsing additionally accepts the English aliases
//! used by API callers. All parsing operates on [`crate::text::normalize`]d
//! input.

use serde::{Deserialize, Serialize};

use crate::constants::diabetes_tokens;
use crate::text::normalize;

/// Coarse meal category. Lunch and dinner both resolve to [`MealSlot::Main`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealSlot {
    /// Breakfast (`cafe`)
    #[serde(rename = "cafe")]
    Breakfast,
    /// Main meal - lunch or dinner (`principal`)
    #[serde(rename = "principal")]
    Main,
    /// Snack (`lanche`)
    #[serde(rename = "lanche")]
    Snack,
}

impl MealSlot {
    /// Parse a normalized slot string. `almoco`/`jantar`/`lunch`/`dinner`
    /// all map to the main slot; unrecognized values parse to `None`.
    #[must_use]
    pub fn parse(normalized: &str) -> Option<Self> {
        match normalized.trim() {
            "cafe" | "breakfast" => Some(Self::Breakfast),
            "principal" | "main" | "almoco" | "jantar" | "lunch" | "dinner" => Some(Self::Main),
            "lanche" | "snack" => Some(Self::Snack),
            _ => None,
        }
    }

    /// Catalog token for this slot
    #[must_use]
    pub const fn as_token(&self) -> &'static str {
        match self {
            Self::Breakfast => "cafe",
            Self::Main => "principal",
            Self::Snack => "lanche",
        }
    }
}

impl std::fmt::Display for MealSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}

/// Diabetes-compatibility label carried by every catalog recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiabetesCompatibility {
    /// Suitable for type 1 diabetes only (`tipo1`)
    #[serde(rename = "tipo1")]
    Type1,
    /// Suitable for type 2 diabetes only (`tipo2`)
    #[serde(rename = "tipo2")]
    Type2,
    /// Suitable for both types (`ambos`)
    #[serde(rename = "ambos")]
    Both,
}

impl DiabetesCompatibility {
    /// Catalog token for this label
    #[must_use]
    pub const fn as_token(&self) -> &'static str {
        match self {
            Self::Type1 => "tipo1",
            Self::Type2 => "tipo2",
            Self::Both => "ambos",
        }
    }
}

impl std::fmt::Display for DiabetesCompatibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}

/// The user's stated diabetes type.
///
/// Unrecognized inputs degrade to [`DiabetesType::Unknown`], which accepts
/// every compatibility label rather than failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiabetesType {
    /// Type 1 diabetes
    Type1,
    /// Type 2 diabetes
    Type2,
    /// Not stated or not recognized: permissive matching
    Unknown,
}

impl DiabetesType {
    /// Parse a raw diabetes-type string by token containment over the
    /// space-stripped normalized input ("Tipo 1", "tipo1", "type 1" all
    /// resolve to `Type1`).
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let token = normalize(raw).replace(' ', "");
        if diabetes_tokens::TYPE1.iter().any(|t| token.contains(t)) {
            Self::Type1
        } else if diabetes_tokens::TYPE2.iter().any(|t| token.contains(t)) {
            Self::Type2
        } else {
            Self::Unknown
        }
    }

    /// Whether a recipe with the given compatibility label is valid for
    /// this user. `Unknown` accepts everything.
    #[must_use]
    pub const fn accepts(&self, compatibility: DiabetesCompatibility) -> bool {
        match self {
            Self::Type1 => matches!(
                compatibility,
                DiabetesCompatibility::Type1 | DiabetesCompatibility::Both
            ),
            Self::Type2 => matches!(
                compatibility,
                DiabetesCompatibility::Type2 | DiabetesCompatibility::Both
            ),
            Self::Unknown => true,
        }
    }

    /// User-facing label ("Tipo 1", "Tipo 2", "Desconhecido")
    #[must_use]
    pub const fn as_label(&self) -> &'static str {
        match self {
            Self::Type1 => "Tipo 1",
            Self::Type2 => "Tipo 2",
            Self::Unknown => "Desconhecido",
        }
    }
}

impl std::fmt::Display for DiabetesType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

/// A catalog recipe. The catalog is a fixed literal table, so all fields
/// borrow `'static` data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recipe {
    /// Unique recipe name
    pub name: &'static str,
    /// Meal slot this recipe belongs to
    pub meal_slot: MealSlot,
    /// Diabetes-compatibility label
    pub compatibility: DiabetesCompatibility,
    /// Comma-delimited ingredient phrases, as authored in the catalog
    pub ingredients: &'static str,
    /// Short human-readable description (no role in matching)
    pub description: &'static str,
}

impl Recipe {
    /// Iterate the individual ingredient phrases, trimmed
    pub fn ingredient_list(&self) -> impl Iterator<Item = &'static str> {
        self.ingredients
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Substring match of a normalized ingredient token against the
    /// normalized ingredient list ("frango" matches "frango desfiado").
    #[must_use]
    pub fn contains_ingredient(&self, normalized_token: &str) -> bool {
        normalize(self.ingredients).contains(normalized_token)
    }
}

/// One recommendation request, constructed per conversational turn.
/// Raw strings are kept as entered; normalization happens in the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealRequest {
    /// Requested meal slot ("cafe", "almoço", "breakfast", ...)
    pub meal_slot: String,
    /// Stated diabetes type ("Tipo 1", "type2", ...)
    pub diabetes_type: String,
    /// Optional preferred ingredient, free text
    pub preferred_ingredient: Option<String>,
}

impl MealRequest {
    /// Create a request from raw user inputs
    #[must_use]
    pub fn new(
        meal_slot: impl Into<String>,
        diabetes_type: impl Into<String>,
        preferred_ingredient: Option<String>,
    ) -> Self {
        Self {
            meal_slot: meal_slot.into(),
            diabetes_type: diabetes_type.into(),
            preferred_ingredient,
        }
    }
}

/// Advisory annotation: the selected recipe's compatibility label excludes
/// the user's stated type. Not an error; the chat layer surfaces it as a
/// safety caveat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityMismatch {
    /// Compatibility label of the selected recipe
    pub recipe_compatibility: DiabetesCompatibility,
    /// The user's stated diabetes type
    pub user_type: DiabetesType,
}

/// Successful recommendation result consumed by the chat layer
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation<'a> {
    /// The selected recipe
    pub recipe: &'a Recipe,
    /// Present when the preferred ingredient could not be satisfied from
    /// the diabetes-compatible candidate set
    pub ingredient_warning: Option<String>,
    /// Present iff the selected recipe's compatibility excludes the user's type
    pub mismatch: Option<CompatibilityMismatch>,
}
