//! Command-line interface definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use neoscope::core::filter::FilterCriteria;
use neoscope::util::constants::{DEFAULT_CAD_FILE, DEFAULT_NEO_FILE, LOG_FILE_NAME};
use neoscope::util::time::parse_date_input;
use neoscope::LinkPolicy;

#[derive(Debug, Parser)]
#[command(name = "neoscope", version)]
#[command(about = "Explore close approaches of near-Earth objects")]
pub struct Cli {
    /// CSV file with near-Earth object data
    #[arg(long, global = true, default_value = DEFAULT_NEO_FILE)]
    pub neofile: PathBuf,

    /// JSON file with close-approach data
    #[arg(long, global = true, default_value = DEFAULT_CAD_FILE)]
    pub cadfile: PathBuf,

    /// Also write debug-level logs to this file
    #[arg(long, global = true, value_name = LOG_FILE_NAME)]
    pub log_file: Option<PathBuf>,

    /// How to treat close approaches whose designation matches no NEO
    #[arg(long, global = true, value_enum, default_value_t = UnresolvedMode::Warn)]
    pub unresolved: UnresolvedMode,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a single NEO by primary designation or by name
    Inspect(InspectArgs),

    /// List close approaches matching the given criteria
    Query(QueryArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnresolvedMode {
    /// Keep them silently
    Allow,
    /// Keep them and log a warning
    Warn,
    /// Abort loading
    Reject,
}

impl From<UnresolvedMode> for LinkPolicy {
    fn from(mode: UnresolvedMode) -> Self {
        match mode {
            UnresolvedMode::Allow => LinkPolicy::Allow,
            UnresolvedMode::Warn => LinkPolicy::Warn,
            UnresolvedMode::Reject => LinkPolicy::Reject,
        }
    }
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub target: InspectTarget,

    /// Also list every close approach of the NEO
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct InspectTarget {
    /// Primary designation, e.g. "433"
    #[arg(short, long)]
    pub pdes: Option<String>,

    /// IAU name, e.g. "Eros"
    #[arg(short, long)]
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Only approaches on this date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Only approaches on or after this date
    #[arg(short, long, value_parser = parse_date)]
    pub start_date: Option<NaiveDate>,

    /// Only approaches on or before this date
    #[arg(short, long, value_parser = parse_date)]
    pub end_date: Option<NaiveDate>,

    /// Minimum approach distance in au
    #[arg(long)]
    pub min_distance: Option<f64>,

    /// Maximum approach distance in au
    #[arg(long)]
    pub max_distance: Option<f64>,

    /// Minimum relative velocity in km/s
    #[arg(long)]
    pub min_velocity: Option<f64>,

    /// Maximum relative velocity in km/s
    #[arg(long)]
    pub max_velocity: Option<f64>,

    /// Minimum NEO diameter in km
    #[arg(long)]
    pub min_diameter: Option<f64>,

    /// Maximum NEO diameter in km
    #[arg(long)]
    pub max_diameter: Option<f64>,

    /// Only potentially hazardous NEOs
    #[arg(long, conflicts_with = "not_hazardous")]
    pub hazardous: bool,

    /// Only NEOs that are not potentially hazardous
    #[arg(long)]
    pub not_hazardous: bool,

    /// Maximum number of results (0 for all)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Start from the criteria and limit stored in this preset file
    #[arg(long)]
    pub preset: Option<PathBuf>,

    /// Save the effective criteria and limit as a preset
    #[arg(long)]
    pub save_preset: Option<PathBuf>,

    /// Write results to a .csv or .json file instead of printing them
    #[arg(short, long)]
    pub outfile: Option<PathBuf>,
}

impl QueryArgs {
    /// Criteria given explicitly on the command line.
    pub fn criteria(&self) -> FilterCriteria {
        let hazardous = if self.hazardous {
            Some(true)
        } else if self.not_hazardous {
            Some(false)
        } else {
            None
        };
        FilterCriteria {
            date: self.date,
            start_date: self.start_date,
            end_date: self.end_date,
            distance_min: self.min_distance,
            distance_max: self.max_distance,
            velocity_min: self.min_velocity,
            velocity_max: self.max_velocity,
            diameter_min: self.min_diameter,
            diameter_max: self.max_diameter,
            hazardous,
        }
    }
}

fn parse_date(input: &str) -> Result<NaiveDate, String> {
    parse_date_input(input).ok_or_else(|| format!("'{input}' is not a YYYY-MM-DD date"))
}
