// ABOUTME: Diabetes-aware recipe recommendation engine with classifier and fallback strategies
// ABOUTME: Filters catalog candidates, selects a recipe, and reports compatibility mismatches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriBot Intelligence

//! # Recommendation Engine
//!
//! The core of NutriBot: given a meal slot, a diabetes type, and an optional
//! preferred ingredient, select one recipe from the catalog.
//!
//! Selection is a two-stage strategy. When a [`TrainedModel`] is configured,
//! its prediction is tried first and validated against the hard constraints;
//! any inconsistency falls back to the deterministic priority ladder
//! (ingredient+slot+diabetes, then ingredient+slot, then slot+diabetes, then
//! slot only). Ties are broken uniformly at random through a caller-supplied
//! RNG so repeated identical requests see some variety while tests can pin
//! the seed.
//!
//! Each call is a pure function over `(catalog, request, model, rng)`: the
//! engine holds no mutable state and may be shared freely across concurrent
//! requests.

pub mod classifier;
mod fallback;

pub use classifier::{
    train_model, FeatureSchema, IngredientCountWeighting, SampleWeighting, SelectorOutcome,
    TrainedModel, UniformWeighting,
};

use rand::Rng;
use tracing::debug;

use crate::errors::AppResult;
use crate::models::{
    CompatibilityMismatch, DiabetesType, MealRequest, MealSlot, Recipe, Recommendation,
};
use crate::text::normalize;

/// Candidate sets produced by filtering the catalog for one request.
///
/// `strict` matches slot AND diabetes compatibility; `relaxed` matches slot
/// only. `strict` is always a subset of `relaxed`.
#[derive(Debug)]
pub struct CandidateSets<'a> {
    /// Resolved meal slot, `None` when the input was unrecognized
    pub slot: Option<MealSlot>,
    /// Parsed diabetes type (permissive `Unknown` on unrecognized input)
    pub user_type: DiabetesType,
    /// Recipes matching slot and compatibility
    pub strict: Vec<&'a Recipe>,
    /// Recipes matching slot regardless of compatibility
    pub relaxed: Vec<&'a Recipe>,
}

/// Filter the catalog into strict and relaxed candidate sets.
///
/// Lunch/dinner inputs resolve to the main slot; an unrecognized diabetes
/// type degrades to accepting every compatibility label rather than failing.
/// Pure function over the catalog snapshot.
#[must_use]
pub fn filter_candidates<'a>(
    catalog: &'a [Recipe],
    meal_slot: &str,
    diabetes_type: &str,
) -> CandidateSets<'a> {
    let slot = MealSlot::parse(&normalize(meal_slot));
    let user_type = DiabetesType::parse(diabetes_type);

    let relaxed: Vec<&Recipe> = match slot {
        Some(slot) => catalog.iter().filter(|r| r.meal_slot == slot).collect(),
        None => Vec::new(),
    };
    let strict: Vec<&Recipe> = relaxed
        .iter()
        .copied()
        .filter(|r| user_type.accepts(r.compatibility))
        .collect();

    CandidateSets {
        slot,
        user_type,
        strict,
        relaxed,
    }
}

/// The recommendation engine: a catalog reference plus an optionally
/// configured classifier model, both shared read-only.
///
/// The catalog and model lifetimes are independent so results, which borrow
/// only catalog rows, can outlive the model reference.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationEngine<'c, 'm> {
    catalog: &'c [Recipe],
    model: Option<&'m TrainedModel>,
}

impl<'c, 'm> RecommendationEngine<'c, 'm> {
    /// Engine using only the deterministic fallback selector
    #[must_use]
    pub const fn new(catalog: &'c [Recipe]) -> Self {
        Self {
            catalog,
            model: None,
        }
    }

    /// Engine that tries the classifier strategy before the fallback ladder.
    ///
    /// The model is constructed once at process start (see
    /// [`classifier::train_model`]) and passed in explicitly; the engine
    /// never trains or caches anything itself.
    #[must_use]
    pub const fn with_model(catalog: &'c [Recipe], model: &'m TrainedModel) -> Self {
        Self {
            catalog,
            model: Some(model),
        }
    }

    /// Whether a classifier strategy is configured
    #[must_use]
    pub const fn has_classifier(&self) -> bool {
        self.model.is_some()
    }

    /// Recommend one recipe for the request.
    ///
    /// # Errors
    ///
    /// Fails only when no recipe exists for the requested meal slot
    /// ([`crate::errors::ErrorCode::RecipeNotFound`]). Every other condition
    /// is an annotation on a successful [`Recommendation`].
    pub fn recommend<R: Rng>(
        &self,
        request: &MealRequest,
        rng: &mut R,
    ) -> AppResult<Recommendation<'c>> {
        let sets = filter_candidates(self.catalog, &request.meal_slot, &request.diabetes_type);
        let ingredient = requested_ingredient(request);

        if let Some(model) = self.model {
            match model.select(self.catalog, &sets, ingredient.as_deref()) {
                SelectorOutcome::Selected(recipe) => {
                    debug!(recipe = recipe.name, "classifier prediction accepted");
                    return Ok(Recommendation {
                        recipe,
                        ingredient_warning: None,
                        mismatch: detect_mismatch(recipe, sets.user_type),
                    });
                }
                SelectorOutcome::Inconsistent => {
                    debug!("classifier prediction inconsistent, using fallback selector");
                }
            }
        }

        let (recipe, ingredient_warning) =
            fallback::select(&sets, ingredient.as_deref(), request, rng)?;
        debug!(
            recipe = recipe.name,
            warned = ingredient_warning.is_some(),
            "fallback selector chose recipe"
        );

        Ok(Recommendation {
            recipe,
            ingredient_warning,
            mismatch: detect_mismatch(recipe, sets.user_type),
        })
    }
}

/// Normalized ingredient token, or `None` when the input is absent or one of
/// the "no preference" sentinels.
fn requested_ingredient(request: &MealRequest) -> Option<String> {
    let raw = request.preferred_ingredient.as_deref()?;
    let token = normalize(raw).trim().to_owned();
    if crate::constants::ingredient_tokens::SKIP_TOKENS.contains(&token.as_str()) {
        None
    } else {
        Some(token)
    }
}

/// Post-selection mismatch check, run on every selection path.
fn detect_mismatch(recipe: &Recipe, user_type: DiabetesType) -> Option<CompatibilityMismatch> {
    if user_type.accepts(recipe.compatibility) {
        None
    } else {
        Some(CompatibilityMismatch {
            recipe_compatibility: recipe.compatibility,
            user_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_strict_subset_of_relaxed() {
        let sets = filter_candidates(catalog::recipes(), "principal", "tipo 1");
        assert!(!sets.strict.is_empty());
        assert!(sets.strict.len() <= sets.relaxed.len());
        for recipe in &sets.strict {
            assert!(sets.relaxed.contains(recipe));
            assert!(sets.user_type.accepts(recipe.compatibility));
        }
    }

    #[test]
    fn test_lunch_and_dinner_resolve_to_main() {
        let lunch = filter_candidates(catalog::recipes(), "almoço", "tipo 2");
        let dinner = filter_candidates(catalog::recipes(), "jantar", "tipo 2");
        assert_eq!(lunch.slot, Some(MealSlot::Main));
        assert_eq!(dinner.slot, Some(MealSlot::Main));
        assert_eq!(lunch.strict.len(), dinner.strict.len());
    }

    #[test]
    fn test_unknown_diabetes_type_is_permissive() {
        let sets = filter_candidates(catalog::recipes(), "lanche", "gestacional");
        assert_eq!(sets.user_type, DiabetesType::Unknown);
        assert_eq!(sets.strict.len(), sets.relaxed.len());
    }

    #[test]
    fn test_unrecognized_slot_yields_empty_sets() {
        let sets = filter_candidates(catalog::recipes(), "nonexistent-slot", "tipo 1");
        assert_eq!(sets.slot, None);
        assert!(sets.strict.is_empty());
        assert!(sets.relaxed.is_empty());
    }

    #[test]
    fn test_sentinel_ingredients_are_ignored() {
        for raw in ["", "  ", "nao", "Não", "NA"] {
            let request = MealRequest::new("cafe", "tipo 2", Some(raw.to_owned()));
            assert_eq!(requested_ingredient(&request), None, "sentinel {raw:?}");
        }
        let request = MealRequest::new("cafe", "tipo 2", Some("Frango".to_owned()));
        assert_eq!(requested_ingredient(&request).as_deref(), Some("frango"));
    }
}
