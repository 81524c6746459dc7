//! # Moran IO
//!
//! Persistence layer for Moran process runs.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - JSON and gzip-compressed JSON files
//! - Run archives pairing a [`moran_data::RunSummary`] with its history

/// Error types and result aliases for I/O operations
pub mod error;
/// Run archives and file helpers
pub mod persistence;

pub use error::{IoError, Result};
pub use persistence::{
    load_archive, read_json_file, save_archive, summarize, write_json_file, RunArchive,
};
