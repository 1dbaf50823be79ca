//! Writers for close-approach query results.
//!
//! Both writers consume the lazy `Result` stream produced by
//! [`NeoDatabase::query`](crate::core::database::NeoDatabase::query)
//! (usually behind [`limit`](crate::core::filter::limit)) and stop at the
//! first error. Output goes to a sibling `.part` file that replaces the
//! target only once everything was written, so a failed export never leaves
//! a truncated file behind.

pub mod csv_export;
pub mod json_export;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::core::database::ApproachView;
use crate::util::error::{NeoError, Result};

pub use csv_export::write_to_csv;
pub use json_export::write_to_json;

/// Check that `path` can be created as an output file.
///
/// The parent directory (the working directory for a bare file name) must
/// exist, and `path` itself must not be a directory.
///
/// # Errors
/// Returns [`NeoError::Export`] describing the problem.
pub fn validate_export_path(path: &Path) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        return Err(NeoError::Export(format!(
            "Output directory {} does not exist",
            parent.display()
        )));
    }
    if !parent.is_dir() {
        return Err(NeoError::Export(format!(
            "Output parent {} is not a directory",
            parent.display()
        )));
    }
    if path.is_dir() {
        return Err(NeoError::Export(format!(
            "Output path {} is a directory",
            path.display()
        )));
    }
    Ok(())
}

/// Staging file for an export to `path`: `out.json` → `out.json.part`.
pub(crate) fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("export"));
    name.push(".part");
    path.with_file_name(name)
}

/// Run `write` against the staging file for `path`, then rename it over
/// `path`. On any error the staging file is removed and `path` is untouched.
pub(crate) fn write_staged<F>(path: &Path, write: F) -> Result<usize>
where
    F: FnOnce(&Path) -> Result<usize>,
{
    let staging = staging_path(path);
    let outcome = write(&staging).and_then(|count| {
        // rename is atomic within the same filesystem
        std::fs::rename(&staging, path)
            .map(|()| count)
            .map_err(|e| NeoError::Export(format!("Failed to move export into place: {e}")))
    });

    if outcome.is_err() {
        if let Err(e) = std::fs::remove_file(&staging) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Cannot remove partial export {}: {e}", staging.display());
            }
        }
    }
    outcome
}

/// Write `results` to `path`, choosing the format from its extension
/// (`.csv` or `.json`, case-insensitive).
///
/// # Errors
/// Returns [`NeoError::Export`] for any other extension, plus whatever the
/// chosen writer returns.
pub fn write_results<'a, I>(results: I, path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = Result<ApproachView<'a>>>,
{
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => write_to_csv(results, path),
        "json" => write_to_json(results, path),
        other => Err(NeoError::Export(format!(
            "Unsupported output extension: .{other} (expected .csv or .json)"
        ))),
    }
}
