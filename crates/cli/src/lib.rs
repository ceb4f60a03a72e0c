pub mod commands;
pub mod snapshot;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use bidwise_core::{
    Condition, EngineConfig, PricingEngine, RecommendationEngine, SearchEngine, WritingAnalyzer,
};
use commands::CommandResult;

#[derive(Debug, Parser)]
#[command(
    name = "bidwise",
    about = "Bidwise marketplace intelligence CLI",
    long_about = "Run the Bidwise search, recommendation, pricing, and description-quality \
                  engines against a product snapshot exported by the marketplace backend.",
    after_help = "Examples:\n  bidwise --snapshot products.json search \"iphone\"\n  \
                  bidwise --snapshot products.json recommend user-42 --limit 10\n  \
                  bidwise --snapshot products.json price electronics --condition new"
)]
pub struct Cli {
    /// Path to the products snapshot (JSON array)
    #[arg(long, global = true, default_value = "products.json")]
    snapshot: PathBuf,
    /// Optional TOML tuning file overriding engine weights
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Maximum results per list
    #[arg(long, global = true, default_value_t = 6)]
    limit: usize,
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ConditionArg {
    New,
    Used,
}

impl From<ConditionArg> for Condition {
    fn from(value: ConditionArg) -> Self {
        match value {
            ConditionArg::New => Condition::New,
            ConditionArg::Used => Condition::Used,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Fuzzy-search products")]
    Search { query: String },
    #[command(about = "Autocomplete suggestions for a partial query")]
    Suggest { query: String },
    #[command(about = "Trending search terms and most-bid products")]
    Trending,
    #[command(about = "Personalized recommendations for a user")]
    Recommend { user_id: String },
    #[command(about = "Products similar to a given listing")]
    Similar { product_id: String },
    #[command(about = "Bidders on other listings in this listing's category")]
    Buyers { product_id: String },
    #[command(about = "Suggest a list price for a category")]
    Price {
        category: String,
        #[arg(long, value_enum, default_value = "used")]
        condition: ConditionArg,
        #[arg(long, default_value = "")]
        name: String,
    },
    #[command(about = "Predict how likely a price is to attract bids")]
    Forecast { price: f64, category: String },
    #[command(about = "Suggest the next bid for a listing")]
    Bid { product_id: String },
    #[command(about = "Market trend analysis, optionally per category")]
    Trends { category: Option<String> },
    #[command(about = "Score a product description draft")]
    Quality {
        #[arg(long)]
        text: String,
        #[arg(long)]
        category: Option<String>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let result = execute(cli);
    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn execute(cli: Cli) -> CommandResult {
    let tuning = match &cli.config {
        Some(path) => match EngineConfig::load(path) {
            Ok(config) => config,
            Err(error) => {
                return CommandResult::failure("config", "config_load", error.to_string(), 2)
            }
        },
        None => EngineConfig::default(),
    };

    let products = match snapshot::load(&cli.snapshot) {
        Ok(products) => products,
        Err(error) => {
            return CommandResult::failure("snapshot", "snapshot_load", format!("{error:#}"), 2)
        }
    };
    tracing::info!(
        products = products.len(),
        snapshot = %cli.snapshot.display(),
        "snapshot loaded"
    );

    let mut search_engine = SearchEngine::with_weights(tuning.search);
    search_engine.refresh(&products);
    let mut recommender = RecommendationEngine::new();
    recommender.refresh(&products);
    let mut pricing = PricingEngine::with_tuning(tuning.pricing);
    pricing.refresh(&products);
    let analyzer = WritingAnalyzer::new();

    let limit = cli.limit;
    match cli.command {
        Command::Search { query } => commands::search::run(&search_engine, &query, limit),
        Command::Suggest { query } => commands::search::suggest(&search_engine, &query, limit),
        Command::Trending => commands::search::trending(&search_engine, &recommender, limit),
        Command::Recommend { user_id } => {
            commands::recommend::run(&recommender, &user_id, limit)
        }
        Command::Similar { product_id } => {
            commands::recommend::similar(&recommender, &product_id, limit)
        }
        Command::Buyers { product_id } => commands::recommend::buyers(&recommender, &product_id),
        Command::Price { category, condition, name } => {
            commands::price::run(&pricing, &name, &category, condition.into())
        }
        Command::Forecast { price, category } => {
            commands::price::forecast(&pricing, price, &category)
        }
        Command::Bid { product_id } => {
            commands::price::bid(&pricing, &recommender, &product_id)
        }
        Command::Trends { category } => {
            commands::price::trends(&pricing, category.as_deref())
        }
        Command::Quality { text, category } => {
            commands::quality::run(&analyzer, &text, category.as_deref())
        }
    }
}
