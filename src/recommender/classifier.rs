// ABOUTME: Classifier-assisted selection strategy backed by a small decision tree
// ABOUTME: Encodes requests as one-hot feature rows, predicts a recipe, validates the prediction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriBot Intelligence

//! # Classifier-Assisted Selector
//!
//! An optional selection strategy: a small decision tree trained once at
//! process start over the full catalog. The feature space is sparse and the
//! catalog tiny, so the raw prediction is treated as an unverified hint -
//! it is accepted only after validation against the hard constraints (meal
//! slot and diabetes compatibility). Any inconsistency is reported as an
//! explicit [`SelectorOutcome::Inconsistent`] value and the caller proceeds
//! with the deterministic fallback ladder; the classifier never surfaces an
//! invalid recipe.
//!
//! Training is deterministic: feature columns are ordered (diabetes one-hot
//! first, then ingredient indicators sorted by token), splits and leaf labels
//! tie-break on the lowest index. Sample weights come from a pluggable
//! [`SampleWeighting`] strategy; the default biases learning toward recipes
//! with richer ingredient signals.

use std::collections::BTreeSet;

use super::CandidateSets;
use crate::models::{DiabetesType, Recipe};
use crate::text::normalize;

/// Outcome of the classifier selection stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorOutcome<'a> {
    /// Prediction passed validation against slot and compatibility
    Selected(&'a Recipe),
    /// Prediction violated a hard constraint; use the fallback selector
    Inconsistent,
}

/// Per-recipe training weight strategy
pub trait SampleWeighting {
    /// Weight for one catalog row. Must be positive.
    fn weight(&self, recipe: &Recipe) -> f64;
}

/// Default weighting: proportional to the ingredient-list length, biasing
/// the tree toward recipes with richer ingredient signals
#[derive(Debug, Clone, Copy, Default)]
pub struct IngredientCountWeighting;

impl SampleWeighting for IngredientCountWeighting {
    #[allow(clippy::cast_precision_loss)] // ingredient counts are tiny
    fn weight(&self, recipe: &Recipe) -> f64 {
        recipe.ingredient_list().count().max(1) as f64
    }
}

/// Trivial weighting: every recipe counts the same
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformWeighting;

impl SampleWeighting for UniformWeighting {
    fn weight(&self, _recipe: &Recipe) -> f64 {
        1.0
    }
}

/// Ordered feature columns: the diabetes one-hot columns followed by one
/// indicator column per distinct normalized ingredient token in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

const INGREDIENT_COLUMN_PREFIX: &str = "ing:";

impl FeatureSchema {
    /// Derive the schema from a catalog snapshot
    #[must_use]
    pub fn from_catalog(catalog: &[Recipe]) -> Self {
        let mut columns: Vec<String> = ["tipo1", "tipo2", "ambos"]
            .iter()
            .map(|&c| c.to_owned())
            .collect();

        // BTreeSet keeps ingredient columns in a stable sorted order
        let tokens: BTreeSet<String> = catalog
            .iter()
            .flat_map(Recipe::ingredient_list)
            .map(normalize)
            .collect();
        columns.extend(
            tokens
                .into_iter()
                .map(|t| format!("{INGREDIENT_COLUMN_PREFIX}{t}")),
        );

        Self { columns }
    }

    /// Number of feature columns
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema is empty (never true for a non-empty catalog)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Encode one request as a feature row.
    ///
    /// The diabetes one-hot falls back to the `ambos` column when no exact
    /// type column exists (the `Unknown` case). An ingredient indicator is
    /// set only when the token is present and appears in the trained schema;
    /// unknown ingredients are silently ignored.
    #[must_use]
    pub fn encode_request(&self, user_type: DiabetesType, ingredient: Option<&str>) -> Vec<bool> {
        let mut row = vec![false; self.columns.len()];

        let type_column = match user_type {
            DiabetesType::Type1 => "tipo1",
            DiabetesType::Type2 => "tipo2",
            DiabetesType::Unknown => "ambos",
        };
        if let Some(index) = self.index_of(type_column).or_else(|| self.index_of("ambos")) {
            row[index] = true;
        }

        if let Some(token) = ingredient {
            if let Some(index) = self.index_of(&format!("{INGREDIENT_COLUMN_PREFIX}{token}")) {
                row[index] = true;
            }
        }

        row
    }

    /// Encode one catalog row as a training sample
    fn encode_recipe(&self, recipe: &Recipe) -> Vec<bool> {
        let mut row = vec![false; self.columns.len()];
        if let Some(index) = self.index_of(recipe.compatibility.as_token()) {
            row[index] = true;
        }
        for token in recipe.ingredient_list().map(normalize) {
            if let Some(index) = self.index_of(&format!("{INGREDIENT_COLUMN_PREFIX}{token}")) {
                row[index] = true;
            }
        }
        row
    }
}

/// A trained decision tree plus its feature schema.
///
/// Constructed once by [`train_model`] and then shared read-only; the engine
/// receives it by reference and never mutates or retrains it.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    schema: FeatureSchema,
    labels: Vec<String>,
    root: Node,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        label: usize,
    },
    Split {
        column: usize,
        low: Box<Node>,
        high: Box<Node>,
    },
}

struct Sample {
    features: Vec<bool>,
    label: usize,
    weight: f64,
}

/// Train the decision tree over the full catalog.
///
/// Deterministic for a given catalog and weighting strategy: column order is
/// fixed by the schema and all tie-breaks use the lowest index.
#[must_use]
pub fn train_model(catalog: &[Recipe], weighting: &dyn SampleWeighting) -> TrainedModel {
    let schema = FeatureSchema::from_catalog(catalog);
    let labels: Vec<String> = catalog.iter().map(|r| r.name.to_owned()).collect();

    let samples: Vec<Sample> = catalog
        .iter()
        .enumerate()
        .map(|(label, recipe)| Sample {
            features: schema.encode_recipe(recipe),
            label,
            weight: weighting.weight(recipe).max(f64::MIN_POSITIVE),
        })
        .collect();

    let sample_refs: Vec<&Sample> = samples.iter().collect();
    let columns: Vec<usize> = (0..schema.len()).collect();
    let root = grow(&sample_refs, &columns, labels.len());

    TrainedModel {
        schema,
        labels,
        root,
    }
}

fn grow(samples: &[&Sample], columns: &[usize], label_count: usize) -> Node {
    let majority = majority_label(samples, label_count);
    if columns.is_empty() || samples.len() <= 1 || is_pure(samples) {
        return Node::Leaf { label: majority };
    }

    let parent_impurity = gini(samples, label_count);
    let total: f64 = samples.iter().map(|s| s.weight).sum();

    let mut best: Option<(usize, f64)> = None;
    for &column in columns {
        let (low, high): (Vec<&Sample>, Vec<&Sample>) =
            samples.iter().copied().partition(|s| !s.features[column]);
        if low.is_empty() || high.is_empty() {
            continue;
        }
        let low_weight: f64 = low.iter().map(|s| s.weight).sum();
        let high_weight: f64 = high.iter().map(|s| s.weight).sum();
        let weighted_child_impurity = (low_weight * gini(&low, label_count)
            + high_weight * gini(&high, label_count))
            / total;
        let gain = parent_impurity - weighted_child_impurity;
        // Strict comparison keeps the lowest column index on ties
        if gain > 1e-12 && best.map_or(true, |(_, g)| gain > g) {
            best = Some((column, gain));
        }
    }

    let Some((column, _)) = best else {
        return Node::Leaf { label: majority };
    };

    let (low, high): (Vec<&Sample>, Vec<&Sample>) =
        samples.iter().copied().partition(|s| !s.features[column]);
    let remaining: Vec<usize> = columns.iter().copied().filter(|&c| c != column).collect();

    Node::Split {
        column,
        low: Box::new(grow(&low, &remaining, label_count)),
        high: Box::new(grow(&high, &remaining, label_count)),
    }
}

fn is_pure(samples: &[&Sample]) -> bool {
    samples
        .windows(2)
        .all(|pair| pair[0].label == pair[1].label)
}

fn gini(samples: &[&Sample], label_count: usize) -> f64 {
    let total: f64 = samples.iter().map(|s| s.weight).sum();
    if total <= 0.0 {
        return 0.0;
    }
    let mut per_label = vec![0.0_f64; label_count];
    for sample in samples {
        per_label[sample.label] += sample.weight;
    }
    1.0 - per_label
        .iter()
        .map(|&w| {
            let p = w / total;
            p * p
        })
        .sum::<f64>()
}

fn majority_label(samples: &[&Sample], label_count: usize) -> usize {
    let mut per_label = vec![0.0_f64; label_count];
    for sample in samples {
        per_label[sample.label] += sample.weight;
    }
    // Lowest label index wins ties
    per_label
        .iter()
        .enumerate()
        .fold((0, f64::MIN), |(best_idx, best_w), (idx, &w)| {
            if w > best_w {
                (idx, w)
            } else {
                (best_idx, best_w)
            }
        })
        .0
}

impl TrainedModel {
    /// The feature-column schema the tree was trained with
    #[must_use]
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Predict a recipe name for the encoded request. The prediction is an
    /// unverified hint; callers must validate it via [`TrainedModel::select`].
    #[must_use]
    pub fn predict(&self, user_type: DiabetesType, ingredient: Option<&str>) -> &str {
        let row = self.schema.encode_request(user_type, ingredient);
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { label } => return &self.labels[*label],
                Node::Split { column, low, high } => {
                    node = if row[*column] { high } else { low };
                }
            }
        }
    }

    /// Run the full classifier stage: predict, then validate the prediction
    /// against the requested slot and the user's compatibility set.
    #[must_use]
    pub fn select<'a>(
        &self,
        catalog: &'a [Recipe],
        sets: &CandidateSets<'a>,
        ingredient: Option<&str>,
    ) -> SelectorOutcome<'a> {
        let Some(slot) = sets.slot else {
            return SelectorOutcome::Inconsistent;
        };

        let predicted = self.predict(sets.user_type, ingredient);
        match catalog.iter().find(|r| r.name == predicted) {
            Some(recipe)
                if recipe.meal_slot == slot && sets.user_type.accepts(recipe.compatibility) =>
            {
                SelectorOutcome::Selected(recipe)
            }
            _ => SelectorOutcome::Inconsistent,
        }
    }
}
