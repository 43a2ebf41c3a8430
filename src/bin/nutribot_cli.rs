// ABOUTME: NutriBot CLI - recommend a recipe and chat about it from the terminal
// ABOUTME: Wires configuration, the engine, and the Gemini/Supabase collaborators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriBot Intelligence
//!
//! Usage:
//! ```bash
//! # One-shot recommendation
//! nutribot-cli recommend --meal cafe --diabetes "tipo 2"
//! nutribot-cli recommend --meal almoco --diabetes "tipo 1" --ingredient frango --seed 42
//!
//! # Recommendation followed by an interactive nutrition chat (needs GEMINI_API_KEY)
//! nutribot-cli chat --meal jantar --diabetes "tipo 2" --ingredient peixe
//! ```

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use nutribot::auth::{AuthProvider, SupabaseAuthProvider};
use nutribot::catalog;
use nutribot::chat::NutritionChat;
use nutribot::config::AppConfig;
use nutribot::errors::AppResult;
use nutribot::llm::GeminiProvider;
use nutribot::logging::{init_logging, LoggingConfig};
use nutribot::models::{MealRequest, Recommendation};
use nutribot::recommender::{train_model, IngredientCountWeighting, RecommendationEngine};

#[derive(Parser)]
#[command(
    name = "nutribot-cli",
    about = "NutriBot meal recommendation CLI",
    long_about = "Recommends a diabetes-compatible recipe from the catalog and optionally \
                  opens an LLM-backed nutrition chat about it."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Recommend one recipe and print it
    Recommend(RequestArgs),
    /// Recommend one recipe, then chat about it interactively
    Chat {
        #[command(flatten)]
        request: RequestArgs,
        /// Sign in with this email before chatting (requires SUPABASE_URL/KEY)
        #[arg(long)]
        email: Option<String>,
        /// Password for --email
        #[arg(long)]
        password: Option<String>,
    },
}

#[derive(clap::Args)]
struct RequestArgs {
    /// Meal slot: cafe, almoco, jantar, lanche (or breakfast/lunch/dinner/snack)
    #[arg(long)]
    meal: String,
    /// Diabetes type, e.g. "tipo 1" or "tipo 2"
    #[arg(long)]
    diabetes: String,
    /// Preferred ingredient (optional)
    #[arg(long)]
    ingredient: Option<String>,
    /// Fixed RNG seed for reproducible tie-breaking
    #[arg(long)]
    seed: Option<u64>,
    /// Use the classifier-assisted selection strategy
    #[arg(long)]
    classifier: bool,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    init_logging(&LoggingConfig::from_env())?;
    let config = AppConfig::from_env()?;

    let cli = Cli::parse();
    match cli.command {
        Command::Recommend(args) => {
            let recommendation = recommend(&config, &args)?;
            print_recommendation(&recommendation);
        }
        Command::Chat {
            request,
            email,
            password,
        } => {
            sign_in_if_configured(&config, email.as_deref(), password.as_deref()).await?;
            let recommendation = recommend(&config, &request)?;
            print_recommendation(&recommendation);
            run_chat(&config, &recommendation).await?;
        }
    }
    Ok(())
}

fn recommend(config: &AppConfig, args: &RequestArgs) -> AppResult<Recommendation<'static>> {
    let request = MealRequest::new(&args.meal, &args.diabetes, args.ingredient.clone());

    let seed = args.seed.or(config.recommender.rng_seed);
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    if args.classifier || config.recommender.classifier_enabled {
        let model = train_model(catalog::recipes(), &IngredientCountWeighting);
        info!(columns = model.schema().len(), "classifier trained");
        RecommendationEngine::with_model(catalog::recipes(), &model).recommend(&request, &mut rng)
    } else {
        RecommendationEngine::new(catalog::recipes()).recommend(&request, &mut rng)
    }
}

fn print_recommendation(recommendation: &Recommendation<'_>) {
    let recipe = recommendation.recipe;
    println!("Sugestão: {}", recipe.name);
    println!("  Descrição: {}", recipe.description);
    println!("  Ingredientes: {}", recipe.ingredients);
    println!("  Categoria de diabetes: {}", recipe.compatibility);

    if let Some(warning) = &recommendation.ingredient_warning {
        println!("  Aviso: {warning}");
    }
    if let Some(mismatch) = &recommendation.mismatch {
        println!(
            "  Atenção: esta receita é ideal para {}, mas você indicou ser {}.",
            mismatch.recipe_compatibility, mismatch.user_type
        );
    }
}

async fn sign_in_if_configured(
    config: &AppConfig,
    email: Option<&str>,
    password: Option<&str>,
) -> AppResult<()> {
    let (Some(email), Some(password)) = (email, password) else {
        return Ok(());
    };
    if !config.auth.is_configured() {
        println!("SUPABASE_URL/SUPABASE_KEY não configurados; seguindo sem login.");
        return Ok(());
    }
    let provider = SupabaseAuthProvider::from_env()?;
    let session = provider.sign_in(email, password).await?;
    info!(user = %session.email, "authenticated");
    println!("Olá, {}!", session.email);
    Ok(())
}

async fn run_chat(config: &AppConfig, recommendation: &Recommendation<'_>) -> AppResult<()> {
    if config.llm.api_key.is_none() {
        println!("GEMINI_API_KEY não configurada; chat indisponível.");
        return Ok(());
    }
    let provider = GeminiProvider::from_env()?;
    let mut chat = NutritionChat::new(provider, recommendation);

    println!();
    println!("{}", chat.greeting());
    println!("(digite 'sair' para encerrar)");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("sair") {
            break;
        }

        let reply = chat.send(line).await;
        println!("{reply}");
    }
    Ok(())
}
