// ABOUTME: Deterministic fallback selector implementing the prioritized search ladder
// ABOUTME: Ingredient+slot+diabetes, then ingredient+slot, then slot+diabetes, then failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriBot Intelligence

use rand::seq::SliceRandom;
use rand::Rng;

use super::CandidateSets;
use crate::errors::{AppError, AppResult};
use crate::models::{MealRequest, Recipe};

/// Select a recipe through the priority ladder.
///
/// 1. Ingredient match inside the compatibility-filtered set: no warning.
/// 2. Ingredient match in the slot-only set: the chosen recipe sits outside
///    the user's compatible set, so the ingredient warning is attached and
///    the caller's mismatch check will flag it.
/// 3. No usable ingredient, or no ingredient match anywhere: any recipe from
///    the compatibility-filtered set.
/// 4. Nothing matches the slot at all: the only hard failure.
///
/// Ties are broken uniformly at random via `rng`.
pub(super) fn select<'a, R: Rng>(
    sets: &CandidateSets<'a>,
    ingredient: Option<&str>,
    request: &MealRequest,
    rng: &mut R,
) -> AppResult<(&'a Recipe, Option<String>)> {
    if let Some(token) = ingredient {
        if let Some(recipe) = pick_with_ingredient(&sets.strict, token, rng) {
            return Ok((recipe, None));
        }
        if let Some(recipe) = pick_with_ingredient(&sets.relaxed, token, rng) {
            return Ok((recipe, Some(ingredient_warning(request))));
        }
    }

    match sets.strict.choose(rng).copied() {
        Some(recipe) => Ok((recipe, None)),
        None => Err(AppError::no_recipe_for_slot(request.meal_slot.trim())),
    }
}

fn pick_with_ingredient<'a, R: Rng>(
    candidates: &[&'a Recipe],
    token: &str,
    rng: &mut R,
) -> Option<&'a Recipe> {
    let matches: Vec<&Recipe> = candidates
        .iter()
        .copied()
        .filter(|r| r.contains_ingredient(token))
        .collect();
    matches.choose(rng).copied()
}

/// Warning text kept verbatim from the production assistant (the wording
/// predates the ladder split and reads as "not found" even though the
/// ingredient was found outside the compatible set).
fn ingredient_warning(request: &MealRequest) -> String {
    let ingredient = request.preferred_ingredient.as_deref().unwrap_or_default();
    format!(
        "Não encontrei nenhuma receita com '{}' para {}. Selecionei uma alternativa compatível:",
        ingredient.trim(),
        request.meal_slot.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::recommender::filter_candidates;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_strict_ingredient_match_has_no_warning() {
        let sets = filter_candidates(catalog::recipes(), "principal", "tipo 1");
        let request = MealRequest::new("principal", "tipo 1", Some("frango".to_owned()));
        let (recipe, warning) = select(&sets, Some("frango"), &request, &mut rng()).unwrap();
        assert!(recipe.contains_ingredient("frango"));
        assert!(warning.is_none());
    }

    #[test]
    fn test_relaxed_ingredient_match_attaches_warning() {
        // Tilapia only appears in a tipo2 main recipe, so a tipo1 user can
        // only get it from the relaxed set.
        let sets = filter_candidates(catalog::recipes(), "principal", "tipo 1");
        let request = MealRequest::new("principal", "tipo 1", Some("tilapia".to_owned()));
        let (recipe, warning) = select(&sets, Some("tilapia"), &request, &mut rng()).unwrap();
        assert_eq!(recipe.name, "Tilapia grelhada");
        let warning = warning.expect("relaxed match carries the ingredient warning");
        assert!(warning.contains("tilapia"));
        assert!(warning.contains("principal"));
    }

    #[test]
    fn test_unmatched_ingredient_falls_back_to_strict_set() {
        let sets = filter_candidates(catalog::recipes(), "lanche", "tipo 2");
        let request = MealRequest::new("lanche", "tipo 2", Some("jiló".to_owned()));
        let (recipe, warning) = select(&sets, Some("jilo"), &request, &mut rng()).unwrap();
        assert!(sets.strict.contains(&recipe));
        assert!(warning.is_none());
    }

    #[test]
    fn test_empty_slot_is_the_only_failure() {
        let sets = filter_candidates(catalog::recipes(), "brunch", "tipo 2");
        let request = MealRequest::new("brunch", "tipo 2", None);
        let result = select(&sets, None, &request, &mut rng());
        assert!(result.is_err());
    }
}
