//! Reporting on evaluation results.
//!
//! - [`ReportBuilder`] — per-index rule lookup, per-rule counts, export table
//! - [`Table`] — column-named rows with CSV output

mod builder;
mod table;

pub use builder::{ReportBuilder, VIOLATION_COLUMN};
pub use table::{Cell, Table};
