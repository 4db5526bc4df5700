//! Ingestion and aggregation layer for the variant report tool.
//!
//! Responsible for parsing the XML rule document into a cluster-to-variant
//! mapping, decoding tabular event rows, deduplicating and aggregating
//! them per variant, and running the top-level report pipeline.

pub mod aggregator;
pub mod pipeline;
pub mod reader;
pub mod rules;

pub use report_core as core;
