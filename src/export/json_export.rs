//! JSON export for close-approach query results.
//!
//! Serialises the stream as a pretty-printed JSON array, one element at a
//! time through a Serde sequence, so the results are never collected.

use crate::core::database::ApproachView;
use crate::util::error::{NeoError, Result};
use serde::ser::{SerializeSeq, Serializer};
use std::io::Write;
use std::path::Path;

#[derive(serde::Serialize)]
struct JsonApproach<'a> {
    datetime_utc: String,
    distance_au: f64,
    velocity_km_s: f64,
    designation: &'a str,
    neo: Option<JsonNeo<'a>>,
}

#[derive(serde::Serialize)]
struct JsonNeo<'a> {
    designation: &'a str,
    name: &'a str,
    diameter_km: Option<f64>,
    potentially_hazardous: bool,
}

impl<'a> JsonApproach<'a> {
    fn from_view(view: &ApproachView<'a>) -> Self {
        let approach = view.approach();
        Self {
            datetime_utc: approach.time_str(),
            distance_au: approach.distance,
            velocity_km_s: approach.velocity,
            designation: &approach.designation,
            neo: view.neo().map(|neo| JsonNeo {
                designation: &neo.designation,
                name: neo.name.as_deref().unwrap_or(""),
                diameter_km: neo.has_diameter().then_some(neo.diameter),
                potentially_hazardous: neo.hazardous,
            }),
        }
    }
}

/// Write the given approach stream to a JSON file at `path`.
///
/// Output is a pretty-printed array of objects with `datetime_utc`,
/// `distance_au`, `velocity_km_s`, `designation` and a nested `neo` object
/// (`null` for approaches without a linked NEO). Returns the number of
/// elements written.
///
/// # Errors
/// Returns [`NeoError::Export`] if the file cannot be created or written,
/// or the first error yielded by `results`. On error no file is left at
/// `path` (an existing one is kept as it was).
pub fn write_to_json<'a, I>(results: I, path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = Result<ApproachView<'a>>>,
{
    super::validate_export_path(path)?;
    let count = super::write_staged(path, |staging| {
        let file = std::fs::File::create(staging)
            .map_err(|e| NeoError::Export(format!("Failed to create JSON file: {e}")))?;

        let mut writer = std::io::BufWriter::new(file);
        let mut serializer = serde_json::Serializer::pretty(&mut writer);
        let mut seq = serializer
            .serialize_seq(None)
            .map_err(|e| NeoError::Export(format!("Failed to write JSON: {e}")))?;

        let mut count = 0usize;
        for result in results {
            let view = result?;
            seq.serialize_element(&JsonApproach::from_view(&view))
                .map_err(|e| NeoError::Export(format!("Failed to write JSON element: {e}")))?;
            count += 1;
        }
        seq.end()
            .map_err(|e| NeoError::Export(format!("Failed to write JSON: {e}")))?;

        // Explicit flush so I/O errors are not silently swallowed by BufWriter::drop.
        writer
            .flush()
            .map_err(|e| NeoError::Export(format!("Failed to flush JSON output: {e}")))?;
        Ok(count)
    })?;

    tracing::info!("Exported {count} close approaches to JSON: {}", path.display());
    Ok(count)
}
