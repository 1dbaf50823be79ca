//! Unified error types for neoscope.
//!
//! All fallible operations throughout the codebase return `Result<T, NeoError>`.
//! Lookup misses are not errors: `get_by_designation` and `get_by_name`
//! return `Option` instead.

/// Unified error type used throughout neoscope.
///
/// Each variant captures enough context to attribute the failure to a
/// specific file, approach or filter.
#[derive(Debug, thiserror::Error)]
pub enum NeoError {
    /// A filter was built or evaluated with a value that its attribute
    /// accessor cannot compare against. This is a programming error.
    #[error("Unsupported criterion: {attribute} filter cannot compare against {value}")]
    UnsupportedCriterion {
        /// Name of the attribute accessor (e.g. `"Diameter"`).
        attribute: String,
        /// Rendering of the offending reference value.
        value: String,
    },

    /// The value a filter needs is not available on this approach, e.g. a
    /// diameter filter on an approach with no linked NEO.
    #[error("Missing {attribute} for close approach of '{designation}'")]
    MissingAttribute {
        /// Foreign-key designation of the approach being evaluated.
        designation: String,
        /// Name of the attribute that could not be extracted.
        attribute: String,
    },

    /// An approach references a designation with no matching NEO and the
    /// database was built with [`crate::core::database::LinkPolicy::Reject`].
    #[error("{count} close approach(es) reference unknown NEOs (first: '{first}')")]
    UnresolvedDesignation {
        /// Number of unresolved approaches.
        count: usize,
        /// The first unresolved designation, in storage order.
        first: String,
    },

    /// A data file could not be read or has the wrong structure.
    #[error("Load failed: {0}")]
    Load(String),

    /// Export (CSV or JSON) failed, typically an I/O error.
    #[error("Export failed: {0}")]
    Export(String),

    /// Catch-all for I/O errors (file reads, writes, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NeoError>;

/// Build a [`NeoError::MissingAttribute`] for the given approach designation.
pub fn missing_attribute(designation: &str, attribute: impl Into<String>) -> NeoError {
    NeoError::MissingAttribute {
        designation: designation.to_owned(),
        attribute: attribute.into(),
    }
}
