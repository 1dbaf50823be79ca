//! Core domain modules for neoscope.
//!
//! Contains the entity model, the file loaders, the linked database with its
//! lazy query, and the attribute filters.

pub mod database;
pub mod filter;
pub mod filter_preset;
pub mod loader;
pub mod model;
