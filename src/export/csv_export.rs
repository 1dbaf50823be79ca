//! CSV export for close-approach query results.
//!
//! Streams each approach as one row; nothing is buffered beyond the CSV
//! writer's own buffer.

use crate::core::database::ApproachView;
use crate::util::constants::CSV_EXPORT_HEADER;
use crate::util::error::{NeoError, Result};
use std::path::Path;

/// Write the given approach stream to a CSV file at `path`.
///
/// Columns: datetime_utc, distance_au, velocity_km_s, designation, name,
/// diameter_km, potentially_hazardous. The NEO columns are empty for
/// approaches without a linked NEO. Returns the number of rows written.
///
/// # Errors
/// Returns [`NeoError::Export`] if the file cannot be created or written,
/// or the first error yielded by `results`. On error no file is left at
/// `path` (an existing one is kept as it was).
pub fn write_to_csv<'a, I>(results: I, path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = Result<ApproachView<'a>>>,
{
    super::validate_export_path(path)?;
    let count = super::write_staged(path, |staging| {
        let mut writer = csv::Writer::from_path(staging)
            .map_err(|e| NeoError::Export(format!("Failed to create CSV file: {e}")))?;

        writer
            .write_record(CSV_EXPORT_HEADER)
            .map_err(|e| NeoError::Export(format!("Failed to write CSV header: {e}")))?;

        let mut count = 0usize;
        for result in results {
            let view = result?;
            writer
                .write_record(csv_row(&view))
                .map_err(|e| NeoError::Export(format!("Failed to write CSV row: {e}")))?;
            count += 1;
        }

        writer
            .flush()
            .map_err(|e| NeoError::Export(format!("Failed to flush CSV: {e}")))?;
        Ok(count)
    })?;

    tracing::info!("Exported {count} close approaches to CSV: {}", path.display());
    Ok(count)
}

fn csv_row(view: &ApproachView<'_>) -> [String; 7] {
    let neo = view.neo();
    [
        view.time_str(),
        view.distance.to_string(),
        view.velocity.to_string(),
        view.designation.clone(),
        neo.and_then(|n| n.name.clone()).unwrap_or_default(),
        neo.map(|n| format_diameter(n.diameter)).unwrap_or_default(),
        neo.map(|n| format_flag(n.hazardous).to_owned()).unwrap_or_default(),
    ]
}

fn format_diameter(km: f64) -> String {
    if km.is_nan() {
        "nan".to_owned()
    } else {
        km.to_string()
    }
}

fn format_flag(flag: bool) -> &'static str {
    if flag {
        "True"
    } else {
        "False"
    }
}
