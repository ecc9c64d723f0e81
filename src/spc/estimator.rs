//! Baseline estimation from the series itself.
//!
//! Uses the arithmetic mean and the sample standard deviation (n - 1 divisor)
//! for every σ-derived quantity. With fewer than two samples the deviation is
//! undefined and the estimator says so instead of returning NaN.

use u_numflow::stats;

use super::chart::BaselineStats;
use crate::error::StatsError;

/// Computes [`BaselineStats`] from a series.
///
/// # Examples
///
/// ```
/// use spc_rules::spc::LimitEstimator;
/// use spc_rules::StatsError;
///
/// let stats = LimitEstimator::estimate(&[2.0, 4.0, 6.0]).unwrap();
/// assert_eq!(stats.mean, 4.0);
/// assert_eq!(stats.std, 2.0);
///
/// assert_eq!(
///     LimitEstimator::estimate(&[]),
///     Err(StatsError::InsufficientData { n: 0 })
/// );
/// ```
pub struct LimitEstimator;

impl LimitEstimator {
    /// Estimate mean, σ and the ±3σ band.
    ///
    /// # Errors
    ///
    /// - [`StatsError::InsufficientData`] if `series.len() < 2`
    /// - [`StatsError::NonFiniteSample`] if any sample is NaN or infinite
    /// - [`StatsError::NonFiniteStatistics`] if mean, σ or the ±3σ band
    ///   overflow for extreme finite samples
    pub fn estimate(series: &[f64]) -> Result<BaselineStats, StatsError> {
        let n = series.len();
        if n < 2 {
            return Err(StatsError::InsufficientData { n });
        }
        if let Some(index) = series.iter().position(|v| !v.is_finite()) {
            return Err(StatsError::NonFiniteSample { index });
        }

        let mean = stats::mean(series).ok_or(StatsError::InsufficientData { n })?;
        let std = stats::std_dev(series).ok_or(StatsError::InsufficientData { n })?;

        let baseline = BaselineStats::new(mean, std);
        let finite = [baseline.mean, baseline.std, baseline.ucl, baseline.lcl]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(StatsError::NonFiniteStatistics);
        }
        Ok(baseline)
    }
}
