//! # agri-forecast
//!
//! Command-line front end: month-level commodity value lookups.

use agri_forecast::predictor::DEFAULT_HORIZON;
use agri_forecast::registry::CommodityRegistry;
use agri_forecast::source::CsvDirectorySource;
use agri_forecast::timeline::Provenance;
use agri_forecast::{Error, Prediction, Predictor, PredictorConfig, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "agri-forecast")]
#[command(about = "Monthly commodity sales lookup and SARIMA forecasting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Setup {
    /// Directory holding the commodity CSV files
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Commodity registry (TOML); the built-in table is used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Months forecast past the last observation
    #[arg(long, default_value_t = DEFAULT_HORIZON)]
    horizon: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up the value for one month
    Predict {
        /// Commodity name, case-insensitive
        #[arg(short, long)]
        commodity: String,

        #[arg(short, long)]
        year: i32,

        /// Month number, 1-12
        #[arg(short, long)]
        month: u32,

        #[command(flatten)]
        setup: Setup,
    },

    /// List known commodities
    Commodities {
        /// Commodity registry (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the years a commodity can be queried for
    Range {
        /// Commodity name, case-insensitive
        #[arg(short, long)]
        commodity: String,

        #[command(flatten)]
        setup: Setup,
    },
}

fn load_registry(config: Option<&PathBuf>) -> Result<CommodityRegistry> {
    match config {
        Some(path) => CommodityRegistry::from_path(path),
        None => Ok(CommodityRegistry::builtin()),
    }
}

fn build_predictor(setup: &Setup) -> Result<Predictor> {
    let registry = load_registry(setup.config.as_ref())?;
    let source = CsvDirectorySource::new(&setup.data_dir);
    let config = PredictorConfig {
        horizon: setup.horizon,
    };
    Ok(Predictor::new(registry, source, config))
}

fn run_predict(commodity: &str, year: i32, month: u32, setup: &Setup) -> Result<()> {
    let predictor = build_predictor(setup)?;
    match predictor.predict(commodity, year, month)? {
        Prediction::Resolved(found) => {
            let label = match found.provenance {
                Provenance::Observed => "Historical",
                Provenance::Forecast => "Predicted",
            };
            println!("{label} Sales for {}: {:.2}", found.date, found.value);
        }
        Prediction::OutOfRange(_) => {
            println!("The selected date is out of the available range.");
        }
        Prediction::NotSupported { .. } => println!("Model is in progress....."),
    }
    Ok(())
}

fn run_commodities(config: Option<&PathBuf>) -> Result<()> {
    let registry = load_registry(config)?;
    for name in registry.catalogue() {
        match registry.get(name) {
            Some(entry) => println!(
                "{name:<16} {}  ({})",
                entry.hyperparameters(),
                entry.source
            ),
            None => println!("{name:<16} not yet supported"),
        }
    }
    Ok(())
}

fn run_range(commodity: &str, setup: &Setup) -> Result<()> {
    let predictor = build_predictor(setup)?;
    match predictor.year_range(commodity)? {
        Some((first, last)) => println!("{commodity}: {first} - {last}"),
        None => println!("Model is in progress....."),
    }
    Ok(())
}

fn report(err: &Error) {
    if err.is_internal() {
        eprintln!("Internal error: {err}");
    } else {
        eprintln!("Error: {err}");
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agri_forecast=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Predict {
            commodity,
            year,
            month,
            setup,
        } => run_predict(commodity, *year, *month, setup),
        Commands::Commodities { config } => run_commodities(config.as_ref()),
        Commands::Range { commodity, setup } => run_range(commodity, setup),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}
