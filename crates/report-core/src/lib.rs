//! Core domain types for the variant report tool.
//!
//! Holds the data model shared by the ingestion and rendering layers,
//! the error type, the variant sort ordering, and the CLI settings.

pub mod error;
pub mod models;
pub mod ordering;
pub mod render;
pub mod settings;

pub use error::{ReportError, Result};
