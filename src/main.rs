//! neoscope — query close approaches of near-Earth objects.
//!
//! Entry point: parses the command line, initialises structured logging,
//! loads and links both data files, then runs the requested subcommand.

mod cli;

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::Layer as _;

use cli::{Cli, Command, InspectArgs, QueryArgs};
use neoscope::core::filter::{limit, FilterCriteria};
use neoscope::core::filter_preset::QueryPreset;
use neoscope::core::loader::{load_approaches, load_neos};
use neoscope::export::write_results;
use neoscope::util::constants;
use neoscope::util::time::format_duration;
use neoscope::{NeoDatabase, Result};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref());

    tracing::info!("{} v{} starting", constants::APP_NAME, constants::APP_VERSION);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let started = Instant::now();
    let neos = load_neos(&cli.neofile)?;
    let approaches = load_approaches(&cli.cadfile)?;
    let db = NeoDatabase::with_policy(neos, approaches, cli.unresolved.into())?;
    tracing::debug!("Database ready in {}", format_duration(started.elapsed()));

    match &cli.command {
        Command::Inspect(args) => inspect(&db, args),
        Command::Query(args) => query(&db, args),
    }
}

/// Print one NEO and, with `--verbose`, its close approaches.
fn inspect(db: &NeoDatabase, args: &InspectArgs) -> Result<()> {
    let neo = match (&args.target.pdes, &args.target.name) {
        (Some(pdes), _) => db.get_by_designation(pdes),
        (None, Some(name)) => db.get_by_name(name),
        (None, None) => None,
    };

    let Some(neo) = neo else {
        println!("No matching NEOs exist in the database.");
        return Ok(());
    };

    println!("{neo}");
    if args.verbose {
        for view in db.approaches_of(neo) {
            println!("- {view}");
        }
    }
    Ok(())
}

/// Run a filtered query and print or export the results.
fn query(db: &NeoDatabase, args: &QueryArgs) -> Result<()> {
    let (base, preset_limit) = match &args.preset {
        Some(path) => {
            let preset = QueryPreset::load(path)?;
            (preset.criteria, preset.limit)
        }
        None => (FilterCriteria::default(), None),
    };
    let criteria = base.merged_with(&args.criteria());
    let max = args.limit.or(preset_limit);

    if let Some(path) = &args.save_preset {
        QueryPreset::new(&preset_name(path), criteria.clone(), max).save(path)?;
    }

    let filters = criteria.create_filters();
    tracing::info!("Running query with {} filters", filters.len());

    match &args.outfile {
        None => {
            let max = max.or(Some(constants::DEFAULT_PRINT_LIMIT));
            for result in limit(db.query(&filters), max) {
                println!("{}", result?);
            }
        }
        Some(path) => {
            write_results(limit(db.query(&filters), max), path)?;
        }
    }
    Ok(())
}

fn preset_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("query")
        .to_owned()
}

/// Initialise the tracing subscriber.
///
/// - **stderr layer**: filtered by `RUST_LOG` env var (default: `info`).
/// - **file layer** (if `log_file` is `Some`): always writes at `debug`
///   level, appending to the given file.
fn init_logging(log_file: Option<&Path>) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    if let Some(log_path) = log_file {
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
        {
            Ok(file) => {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(file))
                    .with_filter(tracing_subscriber::EnvFilter::new("debug"));

                tracing_subscriber::registry()
                    .with(stderr_layer.with_filter(env_filter))
                    .with(file_layer)
                    .init();
                return;
            }
            Err(e) => eprintln!("Cannot open log file {}: {e}", log_path.display()),
        }
    }

    // Fallback: stderr only
    tracing_subscriber::registry()
        .with(stderr_layer.with_filter(env_filter))
        .init();
}
