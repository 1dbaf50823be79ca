//! neoscope library crate.
//!
//! Re-exports the core modules so that the binary and the integration tests
//! can access them. The binary entry point is in `main.rs`.

pub mod core;
pub mod export;
pub mod util;

pub use crate::core::database::{ApproachView, LinkPolicy, NeoDatabase, Query};
pub use crate::core::filter::{limit, AttributeFilter, Comparison, FilterCriteria};
pub use crate::core::model::{CloseApproach, NearEarthObject};
pub use crate::util::error::{NeoError, Result};
