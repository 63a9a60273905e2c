//! # Cartwise CLI Application
//!
//! Command-line access to the catalog search engine, mainly for trying out
//! filters and inspecting what the assistant's tool call would return.
//!
//! ## Subcommands
//!
//! - `search`: run a structured product search
//! - `tool`: dispatch a raw `query_knowledge_base` call as the LLM would
//! - `catalog`: load the catalog and summarize its categories

mod telemetry;

use cartwise::catalog::{CatalogConfig, FileCatalogSource, DEFAULT_CATALOG_URL};
use cartwise::search::{FilterParams, SearchConfig, SearchEngine};
use cartwise::tools::{dispatch, ToolCall};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use termcolor::{ColorChoice, StandardStream};
use tracing::{error, instrument};

/// Environment variable overriding the catalog location
const CATALOG_URL_ENV: &str = "CARTWISE_CATALOG_URL";

#[derive(Parser)]
#[command(author, version, about = "Catalog search with graceful price relaxation", long_about = None)]
struct Cli {
    /// Export traces and metrics over OTLP/HTTP
    #[arg(long, global = true)]
    otlp: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search the product catalog
    Search(SearchArgs),

    /// Dispatch an LLM tool call and show what the model would receive
    Tool(ToolArgs),

    /// Load the catalog and list its categories
    Catalog(CatalogArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Catalog URL or local JSON file
    #[arg(long)]
    catalog: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Product category (substring of the category or title)
    #[arg(short, long)]
    category: Option<String>,

    /// Lower price bound in toman
    #[arg(long)]
    min_price: Option<u64>,

    /// Upper price bound in toman
    #[arg(long)]
    max_price: Option<u64>,

    /// Whitespace separated keywords
    #[arg(short, long)]
    keywords: Option<String>,

    /// Brand that must appear in the title
    #[arg(short, long)]
    brand: Option<String>,

    /// Relax prices when fewer strict matches than this are found
    #[arg(long, default_value = "5")]
    relax_threshold: usize,

    /// Price tolerance used when relaxing, in toman
    #[arg(long, default_value = "2000000")]
    tolerance: u64,

    /// Output format (text|json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,
}

#[derive(Args, Debug)]
struct ToolArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Tool name, e.g. query_knowledge_base
    #[arg(required = true)]
    name: String,

    /// Tool arguments as JSON
    #[arg(required = true)]
    args: String,
}

#[derive(Args, Debug)]
struct CatalogArgs {
    #[command(flatten)]
    source: SourceArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _otel = telemetry::init_tracing_subscriber(cli.otlp)?;

    match cli.command {
        Some(Commands::Search(args)) => search_command(args).await?,
        Some(Commands::Tool(args)) => tool_command(args).await?,
        Some(Commands::Catalog(args)) => catalog_command(args).await?,
        None => {
            let _ = Cli::parse_from(["cartwise", "--help"]);
        }
    }

    Ok(())
}

/// Build an engine for the requested catalog location
fn build_engine(source: &SourceArgs, config: SearchConfig) -> anyhow::Result<SearchEngine> {
    let location = source
        .catalog
        .clone()
        .or_else(|| std::env::var(CATALOG_URL_ENV).ok())
        .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());

    if location.starts_with("http://") || location.starts_with("https://") {
        let catalog_config = CatalogConfig::builder()
            .url(location)
            .timeout_secs(source.timeout)
            .build();
        Ok(SearchEngine::with_http(&catalog_config, config)?)
    } else {
        Ok(SearchEngine::new(
            Arc::new(FileCatalogSource::new(location)),
            config,
        ))
    }
}

/// Load the catalog behind a spinner; a failed load leaves it empty
async fn load_catalog(engine: &SearchEngine) -> anyhow::Result<usize> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("Loading catalog...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let count = match engine.try_load().await {
        Ok(count) => count,
        Err(e) => {
            error!("Catalog unavailable: {}", e);
            spinner.finish_with_message(format!("Catalog unavailable: {}", e));
            return Ok(0);
        }
    };

    spinner.finish_with_message(format!("Loaded {} products", count));
    Ok(count)
}

#[instrument]
async fn search_command(args: SearchArgs) -> anyhow::Result<()> {
    let config = SearchConfig::builder()
        .relax_threshold(args.relax_threshold)
        .price_tolerance(args.tolerance)
        .build();
    let engine = build_engine(&args.source, config)?;
    load_catalog(&engine).await?;

    let params = FilterParams {
        category: args.category,
        min_price: args.min_price,
        max_price: args.max_price,
        keywords: args.keywords,
        brand: args.brand,
    };
    let results = engine.search(&params);

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&results)?),
        _ => {
            println!("Found {} results", results.len());
            let mut stdout = StandardStream::stdout(ColorChoice::Auto);
            cartwise::render_products(&mut stdout, &results)?;
        }
    }

    Ok(())
}

#[instrument]
async fn tool_command(args: ToolArgs) -> anyhow::Result<()> {
    let raw_args: serde_json::Value = serde_json::from_str(&args.args)?;
    let call = ToolCall::parse(&args.name, raw_args)?;

    let engine = build_engine(&args.source, SearchConfig::default())?;
    load_catalog(&engine).await?;

    let outcome = dispatch(&engine, call).await?;

    println!("Context for the model:");
    println!("{}", outcome.context);
    println!();

    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    cartwise::render_products(&mut stdout, &outcome.products)?;

    Ok(())
}

#[instrument]
async fn catalog_command(args: CatalogArgs) -> anyhow::Result<()> {
    let engine = build_engine(&args.source, SearchConfig::default())?;
    let count = load_catalog(&engine).await?;

    println!("Products: {}", count);
    for (category, products) in engine.catalog().categories() {
        println!("{} - {} products", category, products);
    }

    Ok(())
}
