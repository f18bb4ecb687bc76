//! cargo-audit-xlsx - turn `cargo audit --json` reports into Excel workbooks
//!
//! The pipeline has three stages:
//!
//! - [`schema`]: the static catalog of output columns and their descriptions
//! - [`transform`]: decode the report and flatten each vulnerability record
//!   into an ordered row, skipping malformed records individually
//! - [`workbook`]: merge the rows (plus an optional column glossary) into a
//!   persistent .xlsx document, preserving any unrelated sheets it contains
//!
//! # Example
//!
//! ```no_run
//! use cargo_audit_xlsx::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> cargo_audit_xlsx::error::Result<()> {
//! let parsed = parse_report(Path::new("audit.json"))?;
//! write_workbook(
//!     &parsed.rows,
//!     parsed.component_count,
//!     Path::new("cargo_audit.xlsx"),
//!     true,
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod error;
pub mod report;
pub mod schema;
pub mod transform;
pub mod workbook;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{AuditError, ExitCode, Result};
    pub use crate::schema::{affected_columns, all_columns, vulnerability_columns, ColumnDescriptor};
    pub use crate::transform::{parse_report, CellValue, ComponentCount, FlatRow, ParsedReport};
    pub use crate::workbook::{write_workbook, DESCRIPTORS_SHEET, RESULTS_SHEET};
}
