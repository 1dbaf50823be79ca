//! Serialisable query presets.
//!
//! A [`QueryPreset`] stores a named [`FilterCriteria`] plus an optional
//! result limit as pretty-printed JSON, so a query can be re-run with
//! `neoscope query --preset FILE`.

use std::path::Path;

use super::filter::FilterCriteria;
use crate::util::error::{NeoError, Result};

/// A named, serialisable snapshot of a query.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QueryPreset {
    /// Display name of the preset.
    pub name: String,
    /// Filter criteria; dates are stored as `YYYY-MM-DD`.
    #[serde(default)]
    pub criteria: FilterCriteria,
    /// Maximum number of results, `None` for unlimited.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl QueryPreset {
    /// Create a preset from criteria and a limit.
    pub fn new(name: &str, criteria: FilterCriteria, limit: Option<usize>) -> Self {
        Self {
            name: name.to_owned(),
            criteria,
            limit,
        }
    }

    /// Read a preset from a JSON file.
    ///
    /// # Errors
    /// [`NeoError::Load`] if the file is missing or not a valid preset.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            NeoError::Load(format!("Failed to read preset {}: {e}", path.display()))
        })?;
        let preset: Self = serde_json::from_str(&text).map_err(|e| {
            NeoError::Load(format!("Invalid preset {}: {e}", path.display()))
        })?;
        tracing::debug!("Loaded preset '{}' from {}", preset.name, path.display());
        Ok(preset)
    }

    /// Write this preset to `path` as pretty-printed JSON.
    ///
    /// # Errors
    /// [`NeoError::Export`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| NeoError::Export(format!("Failed to serialise preset: {e}")))?;
        std::fs::write(path, json).map_err(|e| {
            NeoError::Export(format!("Failed to write preset {}: {e}", path.display()))
        })?;
        tracing::info!("Saved preset '{}' to {}", self.name, path.display());
        Ok(())
    }

    /// Criteria of this preset with the specified fields of `overrides`
    /// taking precedence.
    pub fn criteria_with(&self, overrides: &FilterCriteria) -> FilterCriteria {
        self.criteria.merged_with(overrides)
    }
}
