//! Baseline statistics for an individuals control chart.
//!
//! The center line is the series mean and the control band is derived from
//! the sample standard deviation. Zone boundaries at 1σ, 2σ and 3σ are what
//! the run rules compare against.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - Western Electric (1956). *Statistical Quality Control Handbook*.

use serde::{Deserialize, Serialize};

/// Mean, standard deviation and the ±3σ control band of a series.
///
/// # Invariants
///
/// - `std >= 0` and all values are finite when produced by
///   [`LimitEstimator`](super::LimitEstimator)
/// - `ucl = mean + 3 * std`, `lcl = mean - 3 * std`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineStats {
    /// Arithmetic mean (center line).
    pub mean: f64,
    /// Sample standard deviation (n - 1 divisor).
    pub std: f64,
    /// Upper control limit (mean + 3σ).
    pub ucl: f64,
    /// Lower control limit (mean - 3σ).
    pub lcl: f64,
}

impl BaselineStats {
    /// Build stats from a mean and standard deviation, deriving UCL/LCL.
    ///
    /// # Examples
    ///
    /// ```
    /// use spc_rules::spc::BaselineStats;
    ///
    /// let stats = BaselineStats::new(100.0, 10.0);
    /// assert_eq!(stats.ucl, 130.0);
    /// assert_eq!(stats.lcl, 70.0);
    /// ```
    pub fn new(mean: f64, std: f64) -> Self {
        Self {
            mean,
            std,
            ucl: mean + 3.0 * std,
            lcl: mean - 3.0 * std,
        }
    }

    /// Upper boundary of the k-sigma zone (`mean + k·σ`).
    pub fn upper(&self, k: f64) -> f64 {
        self.mean + k * self.std
    }

    /// Lower boundary of the k-sigma zone (`mean - k·σ`).
    pub fn lower(&self, k: f64) -> f64 {
        self.mean - k * self.std
    }

    /// Which side of the k-sigma band a value falls on.
    ///
    /// Boundaries are exclusive: a value exactly on `mean ± k·σ` is inside.
    pub fn side_beyond(&self, value: f64, k: f64) -> Side {
        if value > self.upper(k) {
            Side::Above
        } else if value < self.lower(k) {
            Side::Below
        } else {
            Side::Neither
        }
    }

    /// True if `value` lies strictly inside `mean ± k·σ`.
    pub fn within(&self, value: f64, k: f64) -> bool {
        value < self.upper(k) && value > self.lower(k)
    }
}

/// Position of a value relative to a band or the center line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Above,
    Below,
    /// On the boundary or inside the band.
    Neither,
}

impl Side {
    /// Side of `value` relative to `center`; equality is `Neither`.
    pub fn of(value: f64, center: f64) -> Self {
        if value > center {
            Side::Above
        } else if value < center {
            Side::Below
        } else {
            Side::Neither
        }
    }
}
