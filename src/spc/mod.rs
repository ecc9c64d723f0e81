//! Statistical Process Control (SPC) rule evaluation.
//!
//! Given a time-ordered series and optional specification limits, computes
//! the baseline (mean, σ, ±3σ band) and flags, per sample, which pattern
//! rules fire.
//!
//! # Components
//!
//! - [`LimitEstimator`] — mean, sample σ and control limits
//! - [`RuleCatalog`] — ordered rule list with activation state
//! - [`RunRule`] — one pure predicate per rule, implemented for [`RuleId`]
//! - [`RuleEngine`] — runs the active rules and ORs their flags
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - Nelson, L.S. (1984). "The Shewhart Control Chart — Tests for Special Causes",
//!   *Journal of Quality Technology* 16(4), pp. 237-239.

mod catalog;
mod chart;
mod engine;
mod estimator;
mod limit;
mod rules;

pub use catalog::{Activation, Requires, RuleCatalog, RuleId, RuleSpec, Window};
pub use chart::{BaselineStats, Side};
pub use engine::{Evaluation, RuleEngine};
pub use estimator::LimitEstimator;
pub use limit::{Limit, ABSENT_PLACEHOLDER};
pub use rules::{
    check_rule1, check_rule10, check_rule11, check_rule2, check_rule3, check_rule4, check_rule5,
    check_rule5b, check_rule5c, check_rule6, check_rule7, check_rule8, check_rule9, RuleContext,
    RunRule,
};
