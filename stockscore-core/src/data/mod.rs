//! Bar ingestion from disk.
//!
//! The engine itself never performs I/O; this module exists so the CLI and
//! test fixtures have a real input path. Loading is the only fallible
//! surface in the crate.

pub mod csv;

pub use csv::{load_csv, DataError};
