//! Extract NEOs and close approaches from the NASA data files.
//!
//! [`load_neos`] reads the small-body CSV export; [`load_approaches`] reads
//! the close-approach (CAD) JSON API response. Both return unlinked entities
//! ready for [`NeoDatabase::new`](crate::core::database::NeoDatabase::new).
//!
//! Only structural problems fail a load (unreadable file, missing key
//! column, malformed JSON). Bad cell values fall back to the entity model's
//! sentinels.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use serde_json::Value as JsonValue;

use crate::core::model::{CloseApproach, NearEarthObject};
use crate::util::constants::*;
use crate::util::error::{NeoError, Result};
use crate::util::time::format_duration;

/// Read near-Earth objects from a CSV file with a header row.
///
/// Uses the `pdes`, `name`, `diameter` and `pha` columns and ignores the
/// rest. Only `pdes` is required. A `pha` of `"Y"` marks the object
/// hazardous. Rows with an empty designation are skipped.
///
/// # Errors
/// Returns [`NeoError::Load`] if the file cannot be opened, has no `pdes`
/// column, or contains a structurally invalid row.
pub fn load_neos(path: &Path) -> Result<Vec<NearEarthObject>> {
    let started = Instant::now();
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| NeoError::Load(format!("Failed to open {}: {e}", path.display())))?;

    let headers = reader
        .headers()
        .map_err(|e| NeoError::Load(format!("Failed to read CSV header: {e}")))?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);

    let designation_idx = column(NEO_COLUMN_DESIGNATION).ok_or_else(|| {
        NeoError::Load(format!(
            "{} has no '{NEO_COLUMN_DESIGNATION}' column",
            path.display()
        ))
    })?;
    let name_idx = column(NEO_COLUMN_NAME);
    let diameter_idx = column(NEO_COLUMN_DIAMETER);
    let hazardous_idx = column(NEO_COLUMN_HAZARDOUS);

    let mut neos = Vec::new();
    let mut skipped = 0usize;
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| NeoError::Load(format!("CSV row {row_no}: {e}")))?;
        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).map(str::trim);

        let designation = cell(Some(designation_idx)).unwrap_or_default();
        if designation.is_empty() {
            skipped += 1;
            continue;
        }

        neos.push(NearEarthObject::new(
            designation,
            cell(name_idx).map(str::to_owned),
            cell(diameter_idx).and_then(parse_float),
            cell(hazardous_idx).map(|pha| pha == "Y"),
        ));
    }

    if skipped > 0 {
        tracing::warn!("Skipped {skipped} NEO rows without a designation");
    }
    tracing::info!(
        "Loaded {} NEOs from {} in {}",
        neos.len(),
        path.display(),
        format_duration(started.elapsed())
    );
    Ok(neos)
}

/// Read close approaches from a CAD API JSON file.
///
/// The file is an object with a `fields` header and a `data` array of rows;
/// the `des`, `cd`, `dist` and `v_rel` columns are located by name. Cells
/// may be strings, numbers or `null`.
///
/// # Errors
/// Returns [`NeoError::Load`] if the file cannot be read, is not valid JSON,
/// lacks `fields`/`data`, is missing one of the required fields, or has a
/// row that is not an array.
pub fn load_approaches(path: &Path) -> Result<Vec<CloseApproach>> {
    let started = Instant::now();
    let file = File::open(path)
        .map_err(|e| NeoError::Load(format!("Failed to open {}: {e}", path.display())))?;
    let root: JsonValue = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| NeoError::Load(format!("Failed to parse {}: {e}", path.display())))?;

    let fields = root
        .get("fields")
        .and_then(JsonValue::as_array)
        .ok_or_else(|| NeoError::Load("Expected a 'fields' array".into()))?;
    let field = |name: &str| {
        fields
            .iter()
            .position(|f| f.as_str() == Some(name))
            .ok_or_else(|| NeoError::Load(format!("Missing '{name}' in 'fields'")))
    };
    let designation_idx = field(CAD_FIELD_DESIGNATION)?;
    let time_idx = field(CAD_FIELD_TIME)?;
    let distance_idx = field(CAD_FIELD_DISTANCE)?;
    let velocity_idx = field(CAD_FIELD_VELOCITY)?;

    // A response with zero matches may omit `data` entirely.
    let rows = match root.get("data") {
        None | Some(JsonValue::Null) => &[][..],
        Some(data) => data
            .as_array()
            .ok_or_else(|| NeoError::Load("Expected 'data' to be an array".into()))?
            .as_slice(),
    };

    let mut approaches = Vec::with_capacity(rows.len());
    for (row_no, row) in rows.iter().enumerate() {
        let row = row
            .as_array()
            .ok_or_else(|| NeoError::Load(format!("Row {row_no} is not a JSON array")))?;

        let designation = row.get(designation_idx).and_then(json_text).unwrap_or_default();
        let time = row.get(time_idx).and_then(json_text);
        approaches.push(CloseApproach::new(
            designation,
            time.as_deref(),
            row.get(distance_idx).and_then(json_float),
            row.get(velocity_idx).and_then(json_float),
        ));
    }

    tracing::info!(
        "Loaded {} close approaches from {} in {}",
        approaches.len(),
        path.display(),
        format_duration(started.elapsed())
    );
    Ok(approaches)
}

fn parse_float(s: &str) -> Option<f64> {
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok()
}

fn json_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_float(val: &JsonValue) -> Option<f64> {
    match val {
        JsonValue::String(s) => parse_float(s.trim()),
        JsonValue::Number(n) => n.as_f64(),
        _ => None,
    }
}
