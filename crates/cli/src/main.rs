//! Refoodify CLI - pantry tracking, recipes and food-waste tips.
//!
//! # Usage
//!
//! ```bash
//! # Track an item and see what is about to expire
//! refoodify pantry add Yogurt 2 2026-10-21 --storage fridge
//! refoodify pantry soon
//!
//! # Mark item #1 as used and check the impact counters
//! refoodify pantry use 1
//! refoodify pantry impact
//!
//! # Recipes for the given ingredients (defaults to expiring pantry items)
//! refoodify recipes find milk spinach
//!
//! # Tips
//! refoodify tips random
//! refoodify tips save t4
//!
//! # Ingredient analyzer
//! refoodify analyze "tomato, pasta, carrot"
//! ```
//!
//! # Commands
//!
//! - `pantry` - add, list, remove and use items; expiring items, impact, suggestions
//! - `recipes` - find by ingredients, search, details (needs the proxy)
//! - `tips` - catalogue, tip of the day, saved tips, web search
//! - `analyze` - categorize ingredients and estimate waste risk

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use refoodify_cli::commands;
use refoodify_cli::config::{parse_api_url, parse_recipe_limit};
use refoodify_cli::{CliConfig, CliError, FileStorage, RecipeApiClient};
use refoodify_core::PantryStore;
use refoodify_core::analyzer::IngredientCategory;
use refoodify_core::tips::{SavedTips, TipCategory};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[derive(Parser)]
#[command(name = "refoodify")]
#[command(author, version, about = "Refoodify pantry and food-waste tools")]
struct Cli {
    /// Data file (overrides `REFOODIFY_DATA_FILE`)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Proxy base URL (overrides `REFOODIFY_API_URL`)
    #[arg(long, global = true, value_parser = parse_api_url)]
    api_url: Option<Url>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage pantry items
    Pantry {
        #[command(subcommand)]
        action: PantryAction,
    },
    /// Look up recipes through the proxy
    Recipes {
        #[command(subcommand)]
        action: RecipesAction,
    },
    /// Food-waste tips
    Tips {
        #[command(subcommand)]
        action: TipsAction,
    },
    /// Categorize ingredients and estimate waste risk
    Analyze {
        /// Ingredients separated by commas, new lines or double spaces
        ingredients: Vec<String>,

        /// Only list ingredients in this category
        #[arg(short, long)]
        category: Option<IngredientCategory>,
    },
}

#[derive(Subcommand)]
enum PantryAction {
    /// Add an item
    Add {
        /// Food name
        name: String,

        /// Quantity label, e.g. "1 L"
        quantity: String,

        /// Expiry date (YYYY-MM-DD)
        expiry: String,

        /// Storage location (fridge, pantry, freezer or any label)
        #[arg(short, long, default_value = "Fridge")]
        storage: String,
    },
    /// List items with their status
    List {
        /// Include items already used
        #[arg(short, long)]
        all: bool,
    },
    /// Remove an item by its number in `pantry list`
    Remove { number: usize },
    /// Mark an item as used
    Use { number: usize },
    /// Items expiring within five days
    Soon,
    /// Saved, expired and CO2 counters
    Impact,
    /// Recipe ideas for expiring items
    Suggest,
}

#[derive(Subcommand)]
enum RecipesAction {
    /// Recipes using the given ingredients, or the expiring pantry items
    Find {
        ingredients: Vec<String>,

        /// Number of recipes, 1-100 (overrides `REFOODIFY_RECIPE_LIMIT`)
        #[arg(short, long, value_parser = parse_recipe_limit)]
        number: Option<u8>,
    },
    /// Free-text recipe search
    Search {
        query: Vec<String>,

        #[arg(short, long, value_parser = parse_recipe_limit)]
        number: Option<u8>,
    },
    /// Show one recipe
    Details { id: u64 },
}

#[derive(Subcommand)]
enum TipsAction {
    /// Browse the tips catalogue
    List {
        /// Only tips containing this text
        #[arg(short, long, default_value = "")]
        query: String,

        /// Only tips in this category, e.g. `zero-waste-hacks`
        #[arg(short, long)]
        category: Option<TipCategory>,
    },
    /// Show a random tip
    Random,
    /// Save a tip, or unsave it if already saved
    Save { id: String },
    /// List saved tips
    Saved,
    /// Search the web for storage advice
    Search { query: Vec<String> },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout only carries command output.
fn init_tracing(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "refoodify_cli=info,refoodify_core=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = CliConfig::from_env()?;
    if let Some(path) = cli.data_file {
        config.data_file = path;
    }
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    tracing::debug!(?config, "Configuration loaded");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let storage = FileStorage::new(&config.data_file);

    match cli.command {
        Commands::Pantry { action } => run_pantry(action, storage, &mut out)?,
        Commands::Recipes { action } => {
            let client = RecipeApiClient::new(config.api_url.clone())?;
            match action {
                RecipesAction::Find {
                    ingredients,
                    number,
                } => {
                    let ingredients = if ingredients.is_empty() {
                        expiring_names(storage)
                    } else {
                        ingredients
                    };
                    let number = number.unwrap_or(config.recipe_limit);
                    commands::recipes::find(&client, &ingredients, number, &mut out).await?;
                }
                RecipesAction::Search { query, number } => {
                    let number = number.unwrap_or(config.recipe_limit);
                    commands::recipes::search(&client, &query.join(" "), number, &mut out).await?;
                }
                RecipesAction::Details { id } => {
                    commands::recipes::details(&client, id, &mut out).await?;
                }
            }
        }
        Commands::Tips { action } => {
            let mut saved = SavedTips::open(storage);
            match action {
                TipsAction::List { query, category } => {
                    commands::tips::list(&saved, &query, category, &mut out)?;
                }
                TipsAction::Random => commands::tips::random(&mut rand::rng(), &mut out)?,
                TipsAction::Save { id } => commands::tips::toggle(&mut saved, &id, &mut out)?,
                TipsAction::Saved => commands::tips::saved(&saved, &mut out)?,
                TipsAction::Search { query } => {
                    let client = RecipeApiClient::new(config.api_url.clone())?;
                    commands::tips::search(&client, &query.join(" "), &mut out).await?;
                }
            }
        }
        Commands::Analyze {
            ingredients,
            category,
        } => commands::analyze::run(&ingredients.join(", "), category, &mut out)?,
    }

    out.flush()?;
    Ok(())
}

fn run_pantry(
    action: PantryAction,
    storage: FileStorage,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut store = PantryStore::open(storage);
    match action {
        PantryAction::Add {
            name,
            quantity,
            expiry,
            storage,
        } => commands::pantry::add(&mut store, &name, &quantity, &expiry, &storage, out),
        PantryAction::List { all } => commands::pantry::list(&store, all, out),
        PantryAction::Remove { number } => commands::pantry::remove(&mut store, number, out),
        PantryAction::Use { number } => commands::pantry::mark_used(&mut store, number, out),
        PantryAction::Soon => commands::pantry::expiring_soon(&store, out),
        PantryAction::Impact => commands::pantry::impact(&store, out),
        PantryAction::Suggest => commands::pantry::suggest(&store, out),
    }
}

/// Names of pantry items that are about to expire.
fn expiring_names(storage: FileStorage) -> Vec<String> {
    let store = PantryStore::open(storage);
    store
        .expiring_soon()
        .iter()
        .map(|tracked| tracked.item.name().to_string())
        .collect()
}
