//! # FabQuote CLI
//!
//! Headless front end for `quote_core`: reads extractor payloads from JSON
//! files, prices them, and writes the quote as JSON.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;

use quote_core::calculations::estimate::{quick_estimate, simulate_margin, ComplexityLevel};
use quote_core::catalog::{CatalogRequest, CostCatalog};
use quote_core::{
    calculate_quote, logging, DocumentPayload, GeometryPayload, PricingOverrides, PricingParameters, Quote,
    QuoteError, QuoteRequest, SurfaceTreatment,
};

const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_NO_INPUT: u8 = 2;
const EXIT_INVALID: u8 = 3;

#[derive(Parser)]
#[command(name = "quote_cli")]
#[command(about = "Fabrication quotes from CAD and specification extractor output")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price extractor payloads into a quote
    #[command(after_help = "\
Examples:
  quote_cli quote --geometry dxf.json --document pdf.json --project 'Block C'
  quote_cli quote --document pdf.json --treatment anodizing_natural --margin 25
  quote_cli quote --geometry dxf.json --params rates.toml -o quote.json
  quote_cli quote -d spec_a.json -d spec_b.json --compact")]
    Quote {
        /// Geometry extractor output (JSON). Repeatable; payloads are merged.
        #[arg(long, short = 'g')]
        geometry: Vec<PathBuf>,

        /// Document extractor output (JSON). Repeatable; payloads are merged.
        #[arg(long, short = 'd')]
        document: Vec<PathBuf>,

        /// Pricing parameters (.toml or .json); defaults when omitted
        #[arg(long, short = 'p', env = "FABQUOTE_PARAMS")]
        params: Option<PathBuf>,

        /// Surface treatment code
        #[arg(long, short = 't', default_value = "powder_coating_standard")]
        treatment: String,

        /// Project name
        #[arg(long, default_value = "New Quote")]
        project: String,

        /// Labor rate override (EUR/h)
        #[arg(long)]
        labor_rate: Option<f64>,

        /// Profit margin override (%)
        #[arg(long)]
        margin: Option<f64>,

        /// Overhead override (%)
        #[arg(long)]
        overhead: Option<f64>,

        /// Metal price override (USD/kg)
        #[arg(long)]
        metal_price: Option<f64>,

        /// Hedging buffer override (%)
        #[arg(long)]
        hedging: Option<f64>,

        /// Pricing threads
        #[arg(long, short = 'j', default_value_t = 1)]
        workers: usize,

        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Per-kg estimate from total weight
    Estimate {
        /// Total weight (kg)
        #[arg(long, short = 'w')]
        weight: f64,

        /// low, medium or high
        #[arg(long, short = 'c', default_value = "medium")]
        complexity: String,
    },

    /// Re-price an existing quote at another margin
    Margin {
        /// Quote JSON written by `quote`
        quote: PathBuf,

        /// Target margin (%)
        #[arg(long)]
        target: f64,
    },

    /// List surface treatments and their rates
    Treatments {
        /// Pricing parameters (.toml or .json)
        #[arg(long, short = 'p', env = "FABQUOTE_PARAMS")]
        params: Option<PathBuf>,
    },

    /// Search the cost catalog
    Search {
        /// Designation, code or keywords
        term: String,
    },

    /// Cost a list of catalog requests (JSON array of {type, name, quantity})
    CatalogCost {
        requests: PathBuf,
    },
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            let code = match err.downcast_ref::<QuoteError>() {
                Some(QuoteError::NoInputData { .. }) => EXIT_NO_INPUT,
                Some(QuoteError::InvalidInput { .. }) | Some(QuoteError::Config { .. }) => EXIT_INVALID,
                _ => EXIT_ERROR,
            };
            eprintln!("error: {err:#}");
            ExitCode::from(code)
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Quote {
            geometry,
            document,
            params,
            treatment,
            project,
            labor_rate,
            margin,
            overhead,
            metal_price,
            hedging,
            workers,
            output,
            compact,
        } => {
            let geometry = GeometryPayload::merge(
                geometry
                    .iter()
                    .map(|path| read_json(path))
                    .collect::<Result<Vec<GeometryPayload>>>()?,
            );
            let document = DocumentPayload::merge(
                document
                    .iter()
                    .map(|path| read_json(path))
                    .collect::<Result<Vec<DocumentPayload>>>()?,
            );

            let request = QuoteRequest {
                project_name: project,
                surface_treatment: SurfaceTreatment::parse_or_default(&treatment),
                parameters: load_params(params.as_deref())?,
                overrides: PricingOverrides {
                    labor_rate_eur_hr: labor_rate,
                    margin_pct: margin,
                    overhead_pct: overhead,
                    metal_price_usd_kg: metal_price,
                    hedging_buffer_pct: hedging,
                    ..PricingOverrides::default()
                },
                workers,
            };

            let quote = calculate_quote(&geometry, &document, &request, &CostCatalog::standard())?;
            tracing::info!(id = %quote.id, total = quote.summary.total_quote, "quote ready");
            write_json(&quote, output.as_deref(), compact)
        }

        Commands::Estimate { weight, complexity } => {
            if !weight.is_finite() || weight < 0.0 {
                return Err(QuoteError::invalid_input("weight", weight.to_string(), "Weight must be non-negative").into());
            }
            write_json(&quick_estimate(weight, ComplexityLevel::parse(&complexity)), None, false)
        }

        Commands::Margin { quote, target } => {
            let quote: Quote = read_json(&quote)?;
            write_json(&simulate_margin(&quote.summary, target)?, None, false)
        }

        Commands::Treatments { params } => {
            let params = load_params(params.as_deref())?;
            for treatment in SurfaceTreatment::ALL {
                println!(
                    "{:<26} {:<26} {:>6.2} EUR/m2",
                    treatment.code(),
                    treatment.display_name(),
                    treatment.rate(&params)
                );
            }
            Ok(())
        }

        Commands::Search { term } => write_json(&CostCatalog::standard().search(&term), None, false),

        Commands::CatalogCost { requests } => {
            let requests: Vec<CatalogRequest> = read_json(&requests)?;
            write_json(&CostCatalog::standard().cost_items(&requests), None, false)
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn load_params(path: Option<&Path>) -> Result<PricingParameters> {
    let Some(path) = path else {
        return Ok(PricingParameters::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let params = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => PricingParameters::from_toml_str(&text),
        _ => PricingParameters::from_json_str(&text),
    }?;
    tracing::debug!(path = %path.display(), "pricing parameters loaded");
    Ok(params)
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    match output {
        Some(path) => fs::write(path, json).with_context(|| format!("writing {}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}
