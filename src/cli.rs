//! CLI definition and dispatch.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::adapters::csv_adapter::CsvExportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::asset::default_catalog;
use crate::domain::config_validation::validate_simulation_config;
use crate::domain::error::TickersimError;
use crate::domain::path::{DEFAULT_VOLATILITY, generate_path};
use crate::domain::portfolio::generate_portfolio;
use crate::domain::position::reference_book;
use crate::domain::session::{OrderSide, PATH_PUBLISH_DELAY, Session, SessionConfig};
use crate::domain::timeframe::Timeframe;
use crate::ports::config_port::ConfigPort;
use crate::ports::export_port::ExportPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "tickersim",
    about = "Synthetic crypto market and portfolio simulator"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a full simulated session
    Run {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        asset: Option<String>,
        #[arg(long)]
        timeframe: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        /// Log an order into the session activity log (buy or sell)
        #[arg(long)]
        order: Option<String>,
        #[arg(long, default_value_t = 1.0)]
        quantity: f64,
        /// Write a plain-text session report
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Directory for CSV exports of the generated series
        #[arg(long)]
        export_dir: Option<PathBuf>,
        /// Skip the artificial publish delay
        #[arg(long)]
        no_delay: bool,
    },
    /// Generate a single price path
    Path {
        #[arg(long)]
        asset: Option<String>,
        #[arg(long)]
        timeframe: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write CSV here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Emit JSON instead of CSV
        #[arg(long)]
        json: bool,
    },
    /// Generate the 30-day portfolio walk
    Portfolio {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Validate a simulation configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List the asset catalog
    Info,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run {
            config,
            asset,
            timeframe,
            seed,
            order,
            quantity,
            output,
            export_dir,
            no_delay,
        } => run_session(&RunOptions {
            config,
            asset,
            timeframe,
            seed,
            order,
            quantity,
            output,
            export_dir,
            no_delay,
        }),
        Command::Path {
            asset,
            timeframe,
            seed,
            config,
            output,
            json,
        } => run_path(
            asset.as_deref(),
            timeframe.as_deref(),
            seed,
            config.as_ref(),
            output.as_ref(),
            json,
        ),
        Command::Portfolio { seed, output, json } => run_portfolio(seed, output.as_ref(), json),
        Command::Validate { config } => run_validate(&config),
        Command::Info => run_info(),
    }
}

/// Options for the `run` subcommand, mirroring its CLI surface.
#[derive(Debug, Default)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub asset: Option<String>,
    pub timeframe: Option<String>,
    pub seed: Option<u64>,
    pub order: Option<String>,
    pub quantity: f64,
    pub output: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
    pub no_delay: bool,
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = TickersimError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Layer the session config: built-in defaults, then the INI file, then CLI
/// overrides.
pub fn build_session_config(
    adapter: Option<&dyn ConfigPort>,
    asset_override: Option<&str>,
    timeframe_override: Option<&str>,
) -> Result<SessionConfig, TickersimError> {
    let mut config = SessionConfig::default();

    if let Some(adapter) = adapter {
        if let Some(asset) = adapter.get_string("simulation", "asset") {
            config.asset = asset.trim().to_uppercase();
        }
        if let Some(tf) = adapter.get_string("simulation", "timeframe") {
            config.timeframe = Timeframe::from_str(&tf)?;
        }
        config.volatility = adapter.get_double("simulation", "volatility", DEFAULT_VOLATILITY);
    }

    if let Some(asset) = asset_override {
        config.asset = asset.trim().to_uppercase();
    }
    if let Some(tf) = timeframe_override {
        config.timeframe = Timeframe::from_str(tf)?;
    }

    Ok(config)
}

/// CLI seed wins over the config file; absent both, the OS seeds the run.
pub fn resolve_seed(cli_seed: Option<u64>, adapter: Option<&dyn ConfigPort>) -> Option<u64> {
    cli_seed.or_else(|| {
        adapter
            .and_then(|c| c.get_string("simulation", "seed"))
            .and_then(|s| s.trim().parse().ok())
    })
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

pub fn run_session(opts: &RunOptions) -> ExitCode {
    // Stage 1: load and validate config
    let adapter = match &opts.config {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            match load_config(path) {
                Ok(a) => Some(a),
                Err(code) => return code,
            }
        }
        None => None,
    };

    if let Some(adapter) = &adapter {
        if let Err(e) = validate_simulation_config(adapter) {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    let adapter_ref = adapter.as_ref().map(|a| a as &dyn ConfigPort);

    // Stage 2: resolve session config and RNG
    let session_config = match build_session_config(
        adapter_ref,
        opts.asset.as_deref(),
        opts.timeframe.as_deref(),
    ) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let mut rng = make_rng(resolve_seed(opts.seed, adapter_ref));

    // Stage 3: open the session (runs the portfolio walk)
    let mut session = match Session::start(
        &mut rng,
        default_catalog(),
        reference_book(),
        &session_config,
    ) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 4: generate and publish the initial path
    let request = session.request_path();
    eprintln!(
        "Simulating {} at {} ({} points)...",
        request.symbol,
        session.timeframe(),
        request.point_count,
    );
    if !opts.no_delay {
        std::thread::sleep(PATH_PUBLISH_DELAY);
    }
    let series = generate_path(
        &mut rng,
        request.base_price,
        request.volatility,
        request.point_count,
    );
    session.publish_path(&request, series);

    // Stage 5: log the requested order, if any
    if let Some(order) = &opts.order {
        let side = match OrderSide::from_str(order) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };
        if let Err(e) = session.place_order(side, opts.quantity) {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    // Stage 6: console summary
    let metrics = session.metrics();
    let asset = session.selected_asset();
    eprintln!("\n=== Session Summary ===");
    eprintln!("Asset:         {} ({})", asset.symbol, asset.name);
    eprintln!("Ref Price:     ${:.2}", asset.price);
    eprintln!("Total Value:   ${:.2}", metrics.total_value);
    eprintln!("Position P&L:  ${:.2}", metrics.pnl);
    eprintln!("Return:        {:.2}%", metrics.pnl_percent);
    eprintln!("Daily Change:  ${:.2}", metrics.daily_change);
    if !session.alerts().is_empty() {
        eprintln!("\n=== Recent Activity ===");
        for entry in session.alerts().entries() {
            eprintln!("  [{}] {}", entry.timestamp, entry.message);
        }
    }

    // Stage 7: report and exports
    let report_path = opts.output.clone().or_else(|| {
        adapter_ref
            .and_then(|c| c.get_string("report", "output_path"))
            .map(PathBuf::from)
    });
    if let Some(path) = report_path {
        let reporter = TextReportAdapter::new();
        match reporter.write(&session, &metrics, &path.display().to_string()) {
            Ok(()) => eprintln!("\nReport written to: {}", path.display()),
            Err(e) => {
                eprintln!("error: failed to write report: {e}");
                return (&e).into();
            }
        }
    }

    if let Some(dir) = &opts.export_dir {
        let exporter = CsvExportAdapter::new();
        let prices_path = dir.join("prices.csv");
        let portfolio_path = dir.join("portfolio.csv");
        let result = exporter
            .export_prices(session.price_history(), &prices_path)
            .and_then(|()| exporter.export_portfolio(session.portfolio(), &portfolio_path));
        match result {
            Ok(()) => eprintln!("Series exported to: {}", dir.display()),
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    }

    ExitCode::SUCCESS
}

pub fn run_path(
    asset_override: Option<&str>,
    timeframe_override: Option<&str>,
    seed: Option<u64>,
    config_path: Option<&PathBuf>,
    output: Option<&PathBuf>,
    json: bool,
) -> ExitCode {
    let adapter = match config_path {
        Some(path) => match load_config(path) {
            Ok(a) => Some(a),
            Err(code) => return code,
        },
        None => None,
    };
    let adapter_ref = adapter.as_ref().map(|a| a as &dyn ConfigPort);

    let session_config =
        match build_session_config(adapter_ref, asset_override, timeframe_override) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };

    let catalog = default_catalog();
    let asset = match crate::domain::asset::find(&catalog, &session_config.asset) {
        Some(a) => a,
        None => {
            let err = TickersimError::UnknownAsset {
                symbol: session_config.asset.clone(),
            };
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    let mut rng = make_rng(resolve_seed(seed, adapter_ref));
    let series = generate_path(
        &mut rng,
        asset.price,
        session_config.volatility,
        session_config.timeframe.point_count(),
    );

    emit_series(&series, output, json)
}

pub fn run_portfolio(seed: Option<u64>, output: Option<&PathBuf>, json: bool) -> ExitCode {
    let mut rng = make_rng(seed);
    let series = generate_portfolio(&mut rng);
    emit_series(&series, output, json)
}

fn emit_series<T: serde::Serialize>(series: &[T], output: Option<&PathBuf>, json: bool) -> ExitCode {
    let result = if json {
        serde_json::to_string_pretty(series)
            .map_err(|e| TickersimError::Export {
                reason: format!("JSON encode error: {e}"),
            })
            .map(|text| println!("{text}"))
    } else if let Some(path) = output {
        crate::adapters::csv_adapter::write_series(series, path)
            .map(|()| eprintln!("Series written to: {}", path.display()))
    } else {
        stream_csv(series)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn stream_csv<T: serde::Serialize>(series: &[T]) -> Result<(), TickersimError> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    for record in series {
        writer.serialize(record).map_err(|e| TickersimError::Export {
            reason: format!("CSV write error: {e}"),
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_simulation_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    match build_session_config(Some(&adapter), None, None) {
        Ok(config) => {
            eprintln!("\nResolved simulation:");
            eprintln!("  asset:      {}", config.asset);
            eprintln!("  timeframe:  {}", config.timeframe);
            eprintln!("  volatility: {}", config.volatility);
            eprintln!("\nConfiguration is valid");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info() -> ExitCode {
    let catalog = default_catalog();
    for asset in &catalog {
        println!(
            "{:<6} {:<12} ${:<12.2} {:+.2}%  vol {:<7} cap {}",
            asset.symbol, asset.name, asset.price, asset.change_24h, asset.volume, asset.market_cap,
        );
    }
    eprintln!("{} assets available", catalog.len());

    let labels: Vec<&str> = Timeframe::ALL.iter().map(|tf| tf.label()).collect();
    eprintln!("timeframes: {}", labels.join(", "));
    ExitCode::SUCCESS
}
