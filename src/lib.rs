//! # spc-rules
//!
//! Statistical process control (SPC) rule evaluation for a single
//! time-ordered metric series.
//!
//! Given the series and optional specification limits, the crate computes
//! baseline statistics (mean, σ, ±3σ control band) and flags, per sample,
//! which pattern rules fire. Results can be turned into per-index rule
//! lookups, per-rule counts and an export table.
//!
//! ## Modules
//!
//! - [`spc`] — Baseline estimation, rule catalog, run rules, rule engine
//! - [`report`] — Rule lookup, violation summary, export table (CSV)
//! - [`config`] — Immutable dashboard text configuration
//!
//! ## Example
//!
//! ```
//! use spc_rules::report::ReportBuilder;
//! use spc_rules::spc::{Limit, RuleEngine};
//!
//! let series = [10.2, 9.9, 10.1, 10.0, 9.8, 10.3, 10.1, 12.9];
//! let eval = RuleEngine::default().evaluate(&series, &Limit::Scalar(12.0), &Limit::Absent);
//!
//! let report = ReportBuilder::default();
//! assert_eq!(report.rules_at_index(&eval.flags, 7), vec!["Rule 11"]);
//! ```
//!
//! ## Design Philosophy
//!
//! - **Batch and pure**: every call recomputes from its arguments
//! - **Absorb, don't throw**: short series and unusable limits mean "no
//!   violation"; only an undefined baseline is surfaced

pub mod config;
pub mod error;
pub mod report;
pub mod spc;

pub use config::DashboardConfig;
pub use error::{Error, StatsError};
