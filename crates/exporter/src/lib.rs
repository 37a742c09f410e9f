//! # Stockcast Exporter
//!
//! Serializes the prediction table a user is viewing into a CSV download.
//! Rows follow the fixed dashboard column order; every field is quoted and
//! embedded quotes are doubled, so the output parses back with any standard
//! CSV reader.

pub mod csv_export;
pub mod error;

pub use csv_export::{CSV_MIME_TYPE, CsvDownload, CsvExporter, ExportLayout, format_confidence};
pub use error::ExportError;
