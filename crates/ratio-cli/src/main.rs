//! ratio-cli: fetch a company's statements and print its financial ratios by year.
//!
//! Usage:
//!   ratio-cli --symbol AJBU --region SI
//!   ratio-cli --symbol AAPL                 # region from DEFAULT_REGION (US)
//!   ratio-cli --file financials.json        # saved get-financials payload
//!   ratio-cli --symbol AAPL --json          # machine-readable table

mod config;
mod report;

use std::process::ExitCode;

use anyhow::{Context, Result};
use ratio_analysis::{RatioAnalysisEngine, RatioTable};
use ratio_core::{FinancialsSource, RawFinancials};
use yahoo_finance_client::YahooFinanceClient;

use config::CliConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Remote { symbol: String, region: Option<String> },
    File(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliArgs {
    input: Input,
    json: bool,
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .filter(|v| !v.starts_with("--"))
        .cloned()
}

fn parse_args(args: &[String]) -> Option<CliArgs> {
    let json = args.iter().any(|a| a == "--json");
    let input = if let Some(path) = flag_value(args, "--file") {
        Input::File(path)
    } else {
        Input::Remote {
            symbol: flag_value(args, "--symbol")?,
            region: flag_value(args, "--region"),
        }
    };
    Some(CliArgs { input, json })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  ratio-cli --symbol SYMBOL [--region REGION] [--json]");
    eprintln!("  ratio-cli --file PAYLOAD.json [--json]");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  RAPIDAPI_KEY / RAPIDAPI_HOST   RapidAPI credentials");
    eprintln!("  RAPIDAPI_KEYS_FILE             JSON file with x-rapidapi-key / x-rapidapi-host");
    eprintln!("  RATIO_INVENTORY_SOURCE         inventory (default) | accounts_payable");
    eprintln!("  DEFAULT_REGION                 region when --region is omitted (default US)");
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ratio_cli=info,ratio_analysis=info".into());
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    // Logs go to stderr so stdout stays clean for the table.
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Load the payload; `None` when the provider had no data for the symbol.
async fn load_financials(input: &Input, config: &CliConfig) -> Result<Option<RawFinancials>> {
    match input {
        Input::File(path) => {
            let body = std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
            Ok(Some(RawFinancials::from_json_str(&body)?))
        }
        Input::Remote { symbol, region } => {
            let region = region.as_deref().unwrap_or(&config.default_region);
            let client = YahooFinanceClient::new(config.credentials()?, config.client_config());
            tracing::info!("Fetching financials for {} ({}) from {}", symbol, region, client.base_url());
            Ok(client.fetch_financials(symbol, region).await?)
        }
    }
}

fn print_table(table: &RatioTable, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(table)?);
        return Ok(());
    }

    print!("{}", report::format_table(table));
    if let Some(latest) = table.latest() {
        println!();
        print!("{}", report::format_headline(latest));
    }
    Ok(())
}

async fn run(args: CliArgs) -> Result<()> {
    let config = CliConfig::from_env()?;
    tracing::debug!("Configuration: {:?}", config);

    let Some(financials) = load_financials(&args.input, &config).await? else {
        println!("No data available for this symbol");
        return Ok(());
    };

    let engine = RatioAnalysisEngine::with_config(config.extraction_config());
    let table = engine.analyze(&financials)?;
    if table.is_empty() {
        tracing::warn!("No fiscal year appears in both the income statement and balance sheet history");
    }

    print_table(&table, args.json)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let argv: Vec<String> = std::env::args().collect();
    let Some(args) = parse_args(&argv) else {
        print_usage();
        return ExitCode::from(2);
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
