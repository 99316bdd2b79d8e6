//! CRSP CLI binary.
//!
//! Builds the market, bond, risk-parity and momentum series from CRSP and
//! Kenneth French files, prints their summary tables and optionally exports
//! every frame.

mod logging;
mod output;

use clap::{Parser, Subcommand};
use crsp::{PipelineConfig, run_market, run_momentum, run_risk_parity};
use crsp_data::{load_bonds, load_decile_benchmark, load_fama_french, load_riskless, load_stocks};
use crsp_output::{ExportFormat, FrameExport, PerformanceTable};
use crsp_portfolios::{
    OutOfRange, PortfolioCategory, Weighting, bond_returns, portfolios_by_category,
};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use output::OutputDir;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "crsp")]
#[command(about = "CRSP market, bond, risk-parity and momentum portfolio series", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON pipeline configuration; flags override its fields
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for exported frames, tables and the run report
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Export format (csv, json or pretty-json)
    #[arg(long, global = true, default_value = "csv")]
    format: ExportFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Stock market returns compared with the Fama-French market factor
    Market {
        /// CRSP monthly stock file
        #[arg(long)]
        stocks: PathBuf,

        /// Fama-French three-factor file
        #[arg(long)]
        ff: PathBuf,
    },

    /// Treasury market returns
    Bonds {
        /// CRSP monthly Treasury file
        #[arg(long)]
        bonds: PathBuf,
    },

    /// Value-weighted, 60/40 and risk-parity stock/bond portfolios
    RiskParity {
        /// CRSP monthly stock file
        #[arg(long)]
        stocks: PathBuf,

        /// CRSP monthly Treasury file
        #[arg(long)]
        bonds: PathBuf,

        /// CRSP riskless file
        #[arg(long)]
        riskless: PathBuf,

        /// Estimate volatility through month t-1 instead of t
        #[arg(long)]
        lag_volatility: bool,
    },

    /// Momentum decile portfolios
    Momentum {
        /// CRSP monthly stock file
        #[arg(long)]
        stocks: PathBuf,

        /// Fama-French three-factor file (risk-free rate)
        #[arg(long)]
        ff: PathBuf,

        /// Daniel-Moskowitz decile benchmark
        #[arg(long)]
        dm: Option<PathBuf>,

        /// Kenneth French decile benchmark
        #[arg(long)]
        krf: Option<PathBuf>,

        /// Put values outside the breakpoints in the end deciles
        #[arg(long)]
        clamp: bool,

        /// Weighting inside each decile (value or equal)
        #[arg(long)]
        weighting: Option<Weighting>,
    },

    /// List the available portfolio constructions
    Portfolios,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _logger = logging::init(cli.verbose)?;

    let mut config = match &cli.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            PipelineConfig::from_json_file(path)?
        }
        None => PipelineConfig::default(),
    };
    let mut out = OutputDir::new(cli.output.clone(), cli.format)?;
    let quiet = cli.verbose > 0;

    match cli.command {
        Commands::Market { stocks, ff } => {
            let pb = spinner(quiet, "Loading stock and factor files...");
            let stocks = load_stocks(&stocks)?;
            let factors = load_fama_french(&ff)?;
            pb.set_message("Building market portfolio...");
            let run = run_market(&stocks, &factors, &config)?;
            pb.finish_and_clear();

            println!("{}\n", run.table);
            println!("{}", run.comparison);

            out.write("stock_market", &FrameExport::new(&run.monthly))?;
            out.write("market_table", &run.table)?;
            out.write("market_comparison", &run.comparison)?;
            out.finish("market", &config)?;
        }
        Commands::Bonds { bonds } => {
            let pb = spinner(quiet, "Loading Treasury file...");
            let bonds = load_bonds(&bonds)?;
            pb.set_message("Building bond portfolio...");
            let monthly = bond_returns(&bonds, &config.bonds)?;
            pb.finish_and_clear();

            println!("Bond market returns: {} months", monthly.height());
            println!("{monthly}");

            out.write("bond_market", &FrameExport::new(&monthly))?;
            out.finish("bonds", &config)?;
        }
        Commands::RiskParity {
            stocks,
            bonds,
            riskless,
            lag_volatility,
        } => {
            config.risk_parity.lag_volatility |= lag_volatility;

            let pb = spinner(quiet, "Loading stock, Treasury and riskless files...");
            let stocks = load_stocks(&stocks)?;
            let bonds = load_bonds(&bonds)?;
            let riskless = load_riskless(&riskless)?;
            pb.set_message("Building risk-parity portfolios...");
            let run = run_risk_parity(&stocks, &bonds, &riskless, &config)?;
            pb.finish_and_clear();

            println!("{}", run.table);

            out.write("excess_universe", &FrameExport::new(&run.universe))?;
            out.write("risk_parity", &FrameExport::new(&run.portfolios))?;
            out.write("risk_parity_table", &run.table)?;
            out.finish("risk-parity", &config)?;
        }
        Commands::Momentum {
            stocks,
            ff,
            dm,
            krf,
            clamp,
            weighting,
        } => {
            if clamp {
                config.deciles.out_of_range = OutOfRange::Clamp;
            }
            if let Some(weighting) = weighting {
                config.decile_returns.weighting = weighting;
            }

            let pb = spinner(quiet, "Loading stock, factor and benchmark files...");
            let stocks = load_stocks(&stocks)?;
            let factors = load_fama_french(&ff)?;
            let dm = load_optional(dm.as_deref())?;
            let krf = load_optional(krf.as_deref())?;
            pb.set_message("Ranking and sorting into deciles...");
            let run = run_momentum(&stocks, &factors, dm.as_ref(), krf.as_ref(), &config)?;
            pb.finish_and_clear();

            let tables: Vec<PerformanceTable> =
                run.dm_table.into_iter().chain(run.krf_table).collect();
            for table in &tables {
                println!("{table}\n");
            }
            if tables.is_empty() {
                println!(
                    "No month of the momentum sample ({}) has decile returns",
                    config.samples.momentum
                );
            }

            out.write("momentum_deciles", &FrameExport::new(&run.panel))?;
            out.write("momentum_returns", &FrameExport::new(&run.returns))?;
            out.write("momentum_tables", &tables)?;
            out.finish("momentum", &config)?;
        }
        Commands::Portfolios => list_portfolios(),
    }

    Ok(())
}

fn load_optional(path: Option<&Path>) -> crsp_data::Result<Option<polars::prelude::DataFrame>> {
    path.map(load_decile_benchmark).transpose()
}

/// Spinner on stderr; hidden when log output is enabled.
fn spinner(hidden: bool, message: &str) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.to_string());
    pb
}

fn list_portfolios() {
    println!("\nAvailable portfolio constructions:\n");
    for category in PortfolioCategory::all() {
        println!("{category}");
        for info in portfolios_by_category(category) {
            println!("  {:<18} {}", info.name, info.description);
            println!("  {:<18} reads: {}", "", info.required_columns.join(", "));
        }
        println!();
    }
}
