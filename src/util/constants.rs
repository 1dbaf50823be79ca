//! Application-wide constants for neoscope.
//!
//! Default data paths, timestamp formats and output column names live here
//! so the loaders, writers and CLI agree on them.

/// Application display name used in log lines and `--version`.
pub const APP_NAME: &str = "neoscope";

/// Application version string.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default path of the NEO CSV file, relative to the working directory.
pub const DEFAULT_NEO_FILE: &str = "data/neos.csv";

/// Default path of the close-approach JSON file.
pub const DEFAULT_CAD_FILE: &str = "data/cad.json";

/// Number of results printed to stdout when `--limit` is not given and no
/// output file is requested.
pub const DEFAULT_PRINT_LIMIT: usize = 10;

/// `chrono` format of calendar dates in the close-approach data,
/// e.g. `1900-Jan-01 00:11`.
pub const CD_FORMAT: &str = "%Y-%b-%d %H:%M";

/// `chrono` format used for every timestamp we print or export.
pub const OUTPUT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Column names in the NEO CSV file.
pub const NEO_COLUMN_DESIGNATION: &str = "pdes";
pub const NEO_COLUMN_NAME: &str = "name";
pub const NEO_COLUMN_DIAMETER: &str = "diameter";
pub const NEO_COLUMN_HAZARDOUS: &str = "pha";

/// Field names in the close-approach JSON `fields` header.
pub const CAD_FIELD_DESIGNATION: &str = "des";
pub const CAD_FIELD_TIME: &str = "cd";
pub const CAD_FIELD_DISTANCE: &str = "dist";
pub const CAD_FIELD_VELOCITY: &str = "v_rel";

/// Column order of CSV exports.
pub const CSV_EXPORT_HEADER: [&str; 7] = [
    "datetime_utc",
    "distance_au",
    "velocity_km_s",
    "designation",
    "name",
    "diameter_km",
    "potentially_hazardous",
];

/// Log file name suggested in `--help` for `--log-file`.
pub const LOG_FILE_NAME: &str = "neoscope.log";
