//! Site Split - attendance workbook filler
//!
//! Writes role/department headcount figures into the Site Split spreadsheet
//! template and hands back the filled workbook. Target cells are located by
//! scanning the template's header band, so reordered or respelled columns keep
//! working; formula cells (totals, percentages) are never overwritten.
//!
//! # Features
//!
//! - Token-based header resolution over a 3-row band (`HeaderScanResolver`)
//! - Fixed fallback table (`StaticTableResolver`), swappable by configuration
//! - Formula-preserving writes with forced-zero MET rows
//! - Read-only template scanner that prints a paste-able static table
//!
//! # Example
//!
//! ```no_run
//! use site_split::config::ExportConfig;
//! use site_split::export::{ExportRequest, SiteSplitExporter};
//!
//! let exporter = SiteSplitExporter::new(ExportConfig::default());
//! let request: ExportRequest = serde_json::from_str(
//!     r#"{"rows": {"VTO": {"Inbound": {"AMZN": 5, "TEMP": 2}}}, "shift": "Night"}"#,
//! )?;
//! let workbook = exporter.export(&request)?;
//!
//! println!("{} ({} bytes)", workbook.filename, workbook.bytes.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod normalize;
pub mod resolver;
pub mod scanner;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{SiteSplitError, SiteSplitResult};
pub use types::{CellMapping, CellRef, Department, DeptCells, Payload, SubCategory};
