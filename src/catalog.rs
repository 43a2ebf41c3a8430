// ABOUTME: Static in-memory recipe catalog for diabetes-aware meal recommendation
// ABOUTME: Fixed literal table of 20 pt-BR recipes with slot, compatibility, and ingredients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriBot Intelligence

//! # Recipe Catalog
//!
//! The catalog is a fixed literal table, finite for the process lifetime:
//! there are no create/update/delete operations over it. All requests share
//! it read-only, so no locking is needed.

use crate::models::{DiabetesCompatibility, MealSlot, Recipe};
use crate::text::normalize;

use DiabetesCompatibility::{Both, Type1, Type2};
use MealSlot::{Breakfast, Main, Snack};

static RECIPES: [Recipe; 20] = [
    Recipe {
        name: "Omelete de claras",
        meal_slot: Breakfast,
        compatibility: Type2,
        ingredients: "Ovos, tomate, sal, azeite, ovo",
        description: "Opção focada em proteína, com baixo teor de carboidratos.",
    },
    Recipe {
        name: "Creme de abacate com cacau",
        meal_slot: Breakfast,
        compatibility: Both,
        ingredients: "Abacate, cacau em po, adocante natural, leite vegetal, castanhas, fruta",
        description: "Rico em gorduras saudáveis e fibras.",
    },
    Recipe {
        name: "Iogurte com granola caseira",
        meal_slot: Breakfast,
        compatibility: Both,
        ingredients: "Iogurte natural, aveia, mel, castanhas, iogurte",
        description: "Mistura equilibrada de proteínas e fibras.",
    },
    Recipe {
        name: "Tapioca com queijo branco",
        meal_slot: Breakfast,
        compatibility: Type2,
        ingredients: "Goma de tapioca, queijo branco, sal, queijo",
        description: "Carboidrato simples combinado com proteína.",
    },
    Recipe {
        name: "Panqueca integral",
        meal_slot: Breakfast,
        compatibility: Type1,
        ingredients: "Farinha integral, ovo, leite, acucar mascavo, ovo",
        description: "Carboidrato de absorção mais lenta.",
    },
    Recipe {
        name: "Nhoque ao molho mediterraneo",
        meal_slot: Main,
        compatibility: Type1,
        ingredients:
            "Mandioquinha, clara, margarina, farinha, azeite, berinjela, abobrinha, tomate, vegetal",
        description: "Prato de carboidrato complexo e legumes.",
    },
    Recipe {
        name: "Maminha ao molho de ervas",
        meal_slot: Main,
        compatibility: Type2,
        ingredients:
            "Maminha, sal, alho, azeite, manjericao, salsa, tomilho, creme de leite light, carne",
        description: "Carne magra com baixo teor de gordura.",
    },
    Recipe {
        name: "Risoto do mar",
        meal_slot: Main,
        compatibility: Both,
        ingredients:
            "Badejo, cebola, arroz integral, vinho branco, brocolis, creme de leite light, acafrao, peixe",
        description: "Rico em fibras e proteínas.",
    },
    Recipe {
        name: "Ravioli de curcuma com alho-poro",
        meal_slot: Main,
        compatibility: Type1,
        ingredients:
            "Farinha de trigo, ovo, azeite, curcuma, queijo de minas light, alho-poro, manjericao, azeitona, queijo",
        description: "Massa caseira com legumes e ingredientes naturais.",
    },
    Recipe {
        name: "Charutinho caipira",
        meal_slot: Main,
        compatibility: Both,
        ingredients:
            "Couve-manteiga, frango desfiado, cebola, milho verde, salsa, caldo de legumes, frango",
        description: "Prato completo com vegetais e proteína magra.",
    },
    Recipe {
        name: "Estrogonofe de frango com berinjela",
        meal_slot: Main,
        compatibility: Both,
        ingredients:
            "Frango, pimenta, azeite, cebola, berinjela, tomate, mostarda, catchup light, creme de leite light, frango",
        description: "Versão adaptada, baixo carboidrato.",
    },
    Recipe {
        name: "Sopa de cebola especial",
        meal_slot: Main,
        compatibility: Type2,
        ingredients:
            "Alho-poro, cebola, cebolinha, azeite, farinha, mostarda, caldo de galinha, leite em po desnatado, cebola",
        description: "Sopa nutritiva com baixo teor calórico.",
    },
    Recipe {
        name: "Tilapia grelhada",
        meal_slot: Main,
        compatibility: Type2,
        ingredients: "Tilapia, sal, limao, alho, peixe",
        description: "Opção leve e proteica.",
    },
    Recipe {
        name: "Arroz de couve-flor",
        meal_slot: Main,
        compatibility: Type2,
        ingredients: "Couve-flor, azeite, sal, alho, vegetal",
        description: "Excelente substituto do arroz tradicional.",
    },
    Recipe {
        name: "Sopa de legumes",
        meal_slot: Main,
        compatibility: Both,
        ingredients: "Abobrinha, cenoura, alho, tomate, agua, vegetal",
        description: "Sopa leve, rica em fibras.",
    },
    Recipe {
        name: "Quiche de presunto",
        meal_slot: Snack,
        compatibility: Type2,
        ingredients:
            "Iogurte, margarina, farinha, presunto magro, acelga, queijo parmesao light, queijo",
        description: "Lanche salgado equilibrado.",
    },
    Recipe {
        name: "Refresco de melancia",
        meal_slot: Snack,
        compatibility: Type1,
        ingredients: "Melancia, agua, iogurte desnatado, gengibre, fruta",
        description: "Lanche refrescante.",
    },
    Recipe {
        name: "Salada de frutas ao forno",
        meal_slot: Snack,
        compatibility: Type1,
        ingredients: "Pessego diet, banana, manga, morango, fruta",
        description: "Frutas assadas com creme dietético.",
    },
    Recipe {
        name: "Mix de castanhas",
        meal_slot: Snack,
        compatibility: Type2,
        ingredients: "Castanhas, nozes, amendoas, castanha",
        description: "Fonte de gorduras boas e fibras.",
    },
    Recipe {
        name: "Frutas com chia",
        meal_slot: Snack,
        compatibility: Both,
        ingredients: "Morango, banana, chia, fruta",
        description: "Lanche rico em fibras e antioxidantes.",
    },
];

/// The full catalog, shared read-only by all requests
#[must_use]
pub fn recipes() -> &'static [Recipe] {
    &RECIPES
}

/// Look up a recipe by name (case/diacritic-insensitive)
#[must_use]
pub fn find_by_name(name: &str) -> Option<&'static Recipe> {
    let wanted = normalize(name);
    RECIPES.iter().find(|r| normalize(r.name) == wanted)
}
