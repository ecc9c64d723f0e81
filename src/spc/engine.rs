//! Rule evaluation over a whole series.
//!
//! Every call is a full batch recompute: estimate the baseline, run the active
//! rules of the catalog in order, and OR their flags into one violation array.
//! Nothing is cached between calls.

use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::catalog::{RuleCatalog, RuleId};
use super::chart::BaselineStats;
use super::estimator::LimitEstimator;
use super::limit::Limit;
use super::rules::{RuleContext, RunRule};
use crate::error::StatsError;

/// Result of evaluating one series.
///
/// `flags[i]` belongs to `rules[i]`; both follow catalog order with the
/// conditional specification-limit rule last when present. Every flag array
/// and `violation_flags` have the series length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Baseline, or why it is undefined.
    pub stats: Result<BaselineStats, StatsError>,
    /// Rules that were evaluated, in flag-list order.
    pub rules: Vec<RuleId>,
    /// One flag array per evaluated rule.
    pub flags: Vec<Vec<bool>>,
    /// Elementwise OR across `flags`.
    pub violation_flags: Vec<bool>,
}

impl Evaluation {
    /// True if no rule fired anywhere.
    pub fn is_in_control(&self) -> bool {
        !self.violation_flags.iter().any(|&v| v)
    }

    /// Indices where at least one rule fired.
    pub fn violation_indices(&self) -> Vec<usize> {
        self.violation_flags
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v)
            .map(|(i, _)| i)
            .collect()
    }

    /// Flags of one rule, if it took part in the evaluation.
    pub fn flags_for(&self, rule: RuleId) -> Option<&[bool]> {
        self.rules
            .iter()
            .position(|&r| r == rule)
            .map(|i| self.flags[i].as_slice())
    }
}

/// Runs the active subset of a [`RuleCatalog`] against a series.
///
/// # Examples
///
/// ```
/// use spc_rules::spc::{Limit, RuleEngine};
///
/// let engine = RuleEngine::default();
/// let series = [100.0, 102.0, 98.0, 101.0, 99.0, 100.5, 97.0, 103.0];
///
/// let eval = engine.evaluate(&series, &Limit::Absent, &Limit::Absent);
/// assert_eq!(eval.flags.len(), 8);
/// assert_eq!(eval.violation_flags.len(), series.len());
///
/// let eval = engine.evaluate(&series, &Limit::Scalar(102.5), &Limit::Absent);
/// assert_eq!(eval.flags.len(), 9);
/// assert!(eval.violation_flags[7]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    catalog: RuleCatalog,
}

impl RuleEngine {
    pub fn new(catalog: RuleCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Estimate the baseline from `series` and evaluate the active rules.
    ///
    /// Never fails: an undefined baseline is reported in
    /// [`Evaluation::stats`] and the rules that depend on it yield no flags.
    #[instrument(skip_all, fields(n = series.len()))]
    pub fn evaluate(&self, series: &[f64], usl: &Limit, lsl: &Limit) -> Evaluation {
        let stats = LimitEstimator::estimate(series);
        if let Err(e) = &stats {
            warn!(error = %e, "baseline undefined, sigma rules suppressed");
        }
        self.run(series, stats, usl, lsl)
    }

    /// Evaluate the active rules against a caller-supplied baseline, e.g.
    /// limits frozen from an earlier reference period.
    #[instrument(skip_all, fields(n = series.len()))]
    pub fn evaluate_against(
        &self,
        series: &[f64],
        stats: BaselineStats,
        usl: &Limit,
        lsl: &Limit,
    ) -> Evaluation {
        self.run(series, Ok(stats), usl, lsl)
    }

    fn run(
        &self,
        series: &[f64],
        stats: Result<BaselineStats, StatsError>,
        usl: &Limit,
        lsl: &Limit,
    ) -> Evaluation {
        let limit_provided = usl.is_provided() || lsl.is_provided();
        if !limit_provided && (*usl != Limit::Absent || *lsl != Limit::Absent) {
            debug!("specification limits carry no numeric value, treated as absent");
        }

        let rules = self.catalog.active(limit_provided);
        debug!(?rules, "evaluating rules");

        let ctx = RuleContext {
            series,
            stats: stats.as_ref().ok(),
            usl,
            lsl,
        };
        let flags: Vec<Vec<bool>> = rules.iter().map(|rule| rule.check(&ctx)).collect();

        let mut violation_flags = vec![false; series.len()];
        for (rule, rule_flags) in rules.iter().zip(&flags) {
            let mut hits = 0_usize;
            for (v, &f) in violation_flags.iter_mut().zip(rule_flags) {
                *v |= f;
                hits += usize::from(f);
            }
            if hits > 0 {
                debug!(rule = %rule, hits, "rule fired");
            }
        }

        Evaluation {
            stats,
            rules,
            flags,
            violation_flags,
        }
    }
}
