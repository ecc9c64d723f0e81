//! Run rules for detecting non-random patterns in a series.
//!
//! Each rule is a pure function of the series, the baseline and/or the
//! specification limits, returning one flag per sample. Windowed rules mark
//! the *whole* triggering window, not only its last point, so a chart can
//! highlight the complete pattern. Overlapping triggers are merged by OR.
//!
//! A series shorter than a rule's window yields an all-false array.
//!
//! # References
//!
//! - Nelson, L.S. (1984). "The Shewhart Control Chart — Tests for Special Causes",
//!   *Journal of Quality Technology* 16(4), pp. 237-239.
//! - Western Electric (1956). *Statistical Quality Control Handbook*.
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.

use super::catalog::{Requires, RuleId};
use super::chart::{BaselineStats, Side};
use super::limit::Limit;

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub series: &'a [f64],
    /// `None` when the baseline is undefined.
    pub stats: Option<&'a BaselineStats>,
    pub usl: &'a Limit,
    pub lsl: &'a Limit,
}

/// Trait for applying a run rule to a series.
pub trait RunRule {
    /// Flag every sample covered by a triggering pattern.
    ///
    /// The result always has `ctx.series.len()` entries. Rules needing a
    /// baseline return all-false when `ctx.stats` is `None`.
    fn check(&self, ctx: &RuleContext<'_>) -> Vec<bool>;
}

impl RunRule for RuleId {
    fn check(&self, ctx: &RuleContext<'_>) -> Vec<bool> {
        let series = ctx.series;
        let stats = match (self.requires(), ctx.stats) {
            (Requires::Baseline, None) => return vec![false; series.len()],
            (_, stats) => stats,
        };

        match (self, stats) {
            (RuleId::Rule1, Some(s)) => check_rule1(series, s),
            (RuleId::Rule2, Some(s)) => check_rule2(series, s),
            (RuleId::Rule3, Some(s)) => check_rule3(series, s),
            (RuleId::Rule4, Some(s)) => check_rule4(series, s),
            (RuleId::Rule5, _) => check_rule5(series),
            (RuleId::Rule5b, _) => check_rule5b(series),
            (RuleId::Rule5c, _) => check_rule5c(series),
            (RuleId::Rule6, _) => check_rule6(series),
            (RuleId::Rule7, Some(s)) => check_rule7(series, s),
            (RuleId::Rule8, Some(s)) => check_rule8(series, s),
            (RuleId::Rule9, Some(s)) => check_rule9(series, s),
            (RuleId::Rule10, Some(s)) => check_rule10(series, s),
            (RuleId::Rule11, _) => check_rule11(series, ctx.usl, ctx.lsl),
            (_, None) => vec![false; series.len()],
        }
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Slide a `width`-point window over the series and mark every window for
/// which `triggers` holds. Starts run over `0..=n - width`.
fn mark_windows<F>(series: &[f64], width: usize, triggers: F) -> Vec<bool>
where
    F: Fn(&[f64]) -> bool,
{
    let mut flags = vec![false; series.len()];
    for (start, window) in series.windows(width).enumerate() {
        if triggers(window) {
            flags[start..start + width].fill(true);
        }
    }
    flags
}

/// Mark maximal runs of at least `min_len` consecutive points strictly on
/// one side of `center`. A point equal to the center ends a run.
fn mark_runs(series: &[f64], center: f64, min_len: usize) -> Vec<bool> {
    let mut flags = vec![false; series.len()];
    let mut start = 0_usize;
    let mut side = Side::Neither;

    for i in 0..=series.len() {
        let current = series.get(i).map_or(Side::Neither, |&v| Side::of(v, center));
        if current != side || current == Side::Neither {
            if side != Side::Neither && i - start >= min_len {
                flags[start..i].fill(true);
            }
            start = i;
            side = current;
        }
    }
    flags
}

/// Sign of each first difference: `Above` = up, `Below` = down, `Neither` = flat.
fn steps(window: &[f64]) -> impl Iterator<Item = Side> + '_ {
    window.windows(2).map(|w| Side::of(w[1], w[0]))
}

fn strictly_monotonic(window: &[f64]) -> bool {
    steps(window).all(|s| s == Side::Above) || steps(window).all(|s| s == Side::Below)
}

/// Count points beyond `k`σ on the upper and lower side.
fn count_beyond(window: &[f64], stats: &BaselineStats, k: f64) -> (usize, usize) {
    window
        .iter()
        .fold((0, 0), |(above, below), &v| match stats.side_beyond(v, k) {
            Side::Above => (above + 1, below),
            Side::Below => (above, below + 1),
            Side::Neither => (above, below),
        })
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Rule 1: a point beyond mean ± 3σ.
pub fn check_rule1(series: &[f64], stats: &BaselineStats) -> Vec<bool> {
    series
        .iter()
        .map(|&v| stats.side_beyond(v, 3.0) != Side::Neither)
        .collect()
}

/// Rule 2: 2 of 3 consecutive points beyond 2σ, same side.
///
/// An early warning of a potential shift.
pub fn check_rule2(series: &[f64], stats: &BaselineStats) -> Vec<bool> {
    mark_windows(series, 3, |w| {
        let (above, below) = count_beyond(w, stats, 2.0);
        above >= 2 || below >= 2
    })
}

/// Rule 3: 4 of 5 consecutive points beyond 1σ, same side.
pub fn check_rule3(series: &[f64], stats: &BaselineStats) -> Vec<bool> {
    mark_windows(series, 5, |w| {
        let (above, below) = count_beyond(w, stats, 1.0);
        above >= 4 || below >= 4
    })
}

/// Rule 4: a run of 8 or more points strictly on one side of the mean.
///
/// Indicates a sustained shift in the process mean. The entire run is marked.
pub fn check_rule4(series: &[f64], stats: &BaselineStats) -> Vec<bool> {
    mark_runs(series, stats.mean, 8)
}

/// Rule 5: 6 points strictly increasing or strictly decreasing.
pub fn check_rule5(series: &[f64]) -> Vec<bool> {
    mark_windows(series, 6, strictly_monotonic)
}

/// Rule 5b: 5 points strictly increasing or decreasing.
///
/// Same test as Rule 5 on a shorter window, so trends surface one sample earlier.
pub fn check_rule5b(series: &[f64]) -> Vec<bool> {
    mark_windows(series, 5, strictly_monotonic)
}

/// Rule 5c: 6 points non-decreasing (or non-increasing) with at least one
/// strict step.
pub fn check_rule5c(series: &[f64]) -> Vec<bool> {
    mark_windows(series, 6, |w| {
        // NaN compares as a flat step, which this rule would otherwise accept
        if w.iter().any(|v| v.is_nan()) {
            return false;
        }
        let (up, down) = steps(w).fold((0, 0), |(up, down), s| match s {
            Side::Above => (up + 1, down),
            Side::Below => (up, down + 1),
            Side::Neither => (up, down),
        });
        (up > 0 && down == 0) || (down > 0 && up == 0)
    })
}

/// Rule 6: 14 points whose first differences strictly alternate in sign.
///
/// Indicates systematic variation (e.g., two alternating streams). A flat
/// step breaks the pattern.
pub fn check_rule6(series: &[f64]) -> Vec<bool> {
    mark_windows(series, 14, |w| {
        let dirs: Vec<Side> = steps(w).collect();
        dirs.iter().all(|&d| d != Side::Neither) && dirs.windows(2).all(|p| p[0] != p[1])
    })
}

/// Rule 7: 15 consecutive points strictly within mean ± 1σ.
///
/// Indicates stratification: reduced variation suggesting mixed streams.
pub fn check_rule7(series: &[f64], stats: &BaselineStats) -> Vec<bool> {
    mark_windows(series, 15, |w| w.iter().all(|&v| stats.within(v, 1.0)))
}

/// Rule 8: 8 consecutive points beyond 1σ, either side.
///
/// Indicates a mixture pattern where points avoid the center zone.
pub fn check_rule8(series: &[f64], stats: &BaselineStats) -> Vec<bool> {
    mark_windows(series, 8, |w| {
        w.iter().all(|&v| stats.side_beyond(v, 1.0) != Side::Neither)
    })
}

/// Rule 9: a run of 9 or more points strictly on one side of the mean.
pub fn check_rule9(series: &[f64], stats: &BaselineStats) -> Vec<bool> {
    mark_runs(series, stats.mean, 9)
}

/// Rule 10: at least 24 of 25 consecutive points strictly within mean ± 1σ.
pub fn check_rule10(series: &[f64], stats: &BaselineStats) -> Vec<bool> {
    mark_windows(series, 25, |w| {
        w.iter().filter(|&&v| stats.within(v, 1.0)).count() >= 24
    })
}

/// Rule 11: a point above its USL or below its LSL.
///
/// Samples without an applicable limit are never flagged.
pub fn check_rule11(series: &[f64], usl: &Limit, lsl: &Limit) -> Vec<bool> {
    series
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            usl.at(i).is_some_and(|u| v > u) || lsl.at(i).is_some_and(|l| v < l)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> BaselineStats {
        BaselineStats::new(0.0, 1.0)
    }

    fn true_indices(flags: &[bool]) -> Vec<usize> {
        flags
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f)
            .map(|(i, _)| i)
            .collect()
    }

    // --- Rule 1: Beyond 3σ ---

    #[test]
    fn test_rule1_point_above_ucl() {
        let flags = check_rule1(&[0.0, 3.5, 0.0], &unit());
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn test_rule1_point_below_lcl() {
        let flags = check_rule1(&[0.0, -3.1, 0.0], &unit());
        assert_eq!(true_indices(&flags), vec![1]);
    }

    #[test]
    fn test_rule1_on_limit_is_not_violation() {
        let flags = check_rule1(&[3.0, -3.0], &unit());
        assert!(flags.iter().all(|f| !f));
    }

    // --- Rule 2: 2 of 3 beyond 2σ ---

    #[test]
    fn test_rule2_marks_whole_window() {
        let flags = check_rule2(&[0.0, 2.5, 0.0, 2.5, 0.0], &unit());
        // windows [1..=3] triggers
        assert_eq!(true_indices(&flags), vec![1, 2, 3]);
    }

    #[test]
    fn test_rule2_overlapping_windows_merge() {
        let flags = check_rule2(&[2.5, 2.5, 2.5, 0.0], &unit());
        assert_eq!(true_indices(&flags), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_rule2_not_triggered_mixed_sides() {
        let flags = check_rule2(&[2.5, 0.0, -2.5], &unit());
        assert!(flags.iter().all(|f| !f));
    }

    #[test]
    fn test_rule2_short_series() {
        assert_eq!(check_rule2(&[2.5, 2.5], &unit()), vec![false, false]);
    }

    // --- Rule 3: 4 of 5 beyond 1σ ---

    #[test]
    fn test_rule3_four_of_five_above() {
        let flags = check_rule3(&[1.5, 1.5, 0.0, 1.5, 1.5], &unit());
        assert!(flags.iter().all(|&f| f));
    }

    #[test]
    fn test_rule3_three_of_five_not_enough() {
        let flags = check_rule3(&[1.5, 1.5, 0.0, 0.0, 1.5], &unit());
        assert!(flags.iter().all(|f| !f));
    }

    #[test]
    fn test_rule3_below() {
        let flags = check_rule3(&[0.0, -1.5, -1.5, -1.5, 0.5, -1.5], &unit());
        assert_eq!(true_indices(&flags), vec![1, 2, 3, 4, 5]);
    }

    // --- Rule 4: run of 8 on one side ---

    #[test]
    fn test_rule4_eight_above_then_below() {
        let mut values = vec![0.0];
        values.extend([1.0; 8]);
        values.push(-1.0);
        let flags = check_rule4(&values, &unit());
        assert_eq!(true_indices(&flags), (1..=8).collect::<Vec<_>>());
        assert!(!flags[0]);
        assert!(!flags[9]);
    }

    #[test]
    fn test_rule4_seven_not_enough() {
        let mut values = vec![0.5; 7];
        values.push(-0.5);
        let flags = check_rule4(&values, &unit());
        assert!(flags.iter().all(|f| !f));
    }

    #[test]
    fn test_rule4_run_reaching_end() {
        let mut values = vec![-1.0, -1.0];
        values.extend([-0.2; 8]);
        let flags = check_rule4(&values, &unit());
        assert!(flags.iter().all(|&f| f));
    }

    #[test]
    fn test_rule4_point_on_mean_breaks_run() {
        let values = [1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0];
        let flags = check_rule4(&values, &unit());
        assert!(flags.iter().all(|f| !f));
    }

    #[test]
    fn test_rule4_side_change_breaks_run() {
        let values = [1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0];
        let flags = check_rule4(&values, &unit());
        assert!(flags.iter().all(|f| !f));
    }

    // --- Rules 5 / 5b / 5c: trends ---

    #[test]
    fn test_rule5_six_increasing() {
        let flags = check_rule5(&[20.0, 21.0, 22.0, 23.0, 24.0, 25.0]);
        assert!(flags.iter().all(|&f| f));
    }

    #[test]
    fn test_rule5_six_decreasing() {
        let flags = check_rule5(&[30.0, 29.0, 28.0, 27.0, 26.0, 25.0, 40.0]);
        assert_eq!(true_indices(&flags), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_rule5_five_not_enough_but_rule5b_fires() {
        let values = [20.0, 21.0, 22.0, 23.0, 24.0];
        assert!(check_rule5(&values).iter().all(|f| !f));
        assert!(check_rule5b(&values).iter().all(|&f| f));
    }

    #[test]
    fn test_rule5_flat_step_breaks_trend() {
        let values = [1.0, 2.0, 3.0, 3.0, 4.0, 5.0];
        assert!(check_rule5(&values).iter().all(|f| !f));
        assert!(check_rule5b(&values).iter().all(|f| !f));
    }

    #[test]
    fn test_rule5c_allows_flat_steps() {
        let values = [1.0, 2.0, 2.0, 3.0, 3.0, 4.0];
        assert!(check_rule5c(&values).iter().all(|&f| f));
    }

    #[test]
    fn test_rule5c_requires_a_strict_step() {
        let values = [2.0; 6];
        assert!(check_rule5c(&values).iter().all(|f| !f));
    }

    #[test]
    fn test_rule5c_mixed_direction() {
        let values = [1.0, 2.0, 2.0, 1.0, 3.0, 4.0];
        assert!(check_rule5c(&values).iter().all(|f| !f));
    }

    // --- Rule 6: 14 alternating ---

    #[test]
    fn test_rule6_fourteen_alternating() {
        let values: Vec<f64> = (0..14).map(|i| if i % 2 == 0 { 24.0 } else { 26.0 }).collect();
        assert!(check_rule6(&values).iter().all(|&f| f));
    }

    #[test]
    fn test_rule6_thirteen_not_enough() {
        let values: Vec<f64> = (0..13).map(|i| if i % 2 == 0 { 24.0 } else { 26.0 }).collect();
        assert!(check_rule6(&values).iter().all(|f| !f));
    }

    #[test]
    fn test_rule6_flat_step_breaks_alternation() {
        let mut values: Vec<f64> = (0..14).map(|i| if i % 2 == 0 { 24.0 } else { 26.0 }).collect();
        values[7] = values[6];
        assert!(check_rule6(&values).iter().all(|f| !f));
    }

    // --- Rule 7: 15 within 1σ ---

    #[test]
    fn test_rule7_fifteen_within() {
        let values: Vec<f64> = (0..15).map(|i| -0.5 + (i % 3) as f64 * 0.25).collect();
        assert!(check_rule7(&values, &unit()).iter().all(|&f| f));
    }

    #[test]
    fn test_rule7_fourteen_not_enough() {
        let values = [0.5; 14];
        assert!(check_rule7(&values, &unit()).iter().all(|f| !f));
    }

    #[test]
    fn test_rule7_boundary_is_not_within() {
        let mut values = vec![0.5; 15];
        values[7] = 1.0;
        assert!(check_rule7(&values, &unit()).iter().all(|f| !f));
    }

    // --- Rule 8: 8 beyond 1σ on either side ---

    #[test]
    fn test_rule8_eight_beyond_mixed_sides() {
        let values = [2.0, -2.0, 2.0, -2.0, 2.0, -2.0, 2.0, -2.0];
        assert!(check_rule8(&values, &unit()).iter().all(|&f| f));
    }

    #[test]
    fn test_rule8_seven_not_enough() {
        let values = [2.0, -2.0, 2.0, -2.0, 2.0, -2.0, 2.0, 0.0];
        assert!(check_rule8(&values, &unit()).iter().all(|f| !f));
    }

    // --- Rule 9: run of 9 ---

    #[test]
    fn test_rule9_needs_nine() {
        let eight = [-0.5; 8];
        assert!(check_rule9(&eight, &unit()).iter().all(|f| !f));
        let nine = [-0.5; 9];
        assert!(check_rule9(&nine, &unit()).iter().all(|&f| f));
    }

    #[test]
    fn test_rule9_nine_above() {
        let mut values = vec![-1.0];
        values.extend([0.5; 9]);
        values.push(-1.0);
        let flags = check_rule9(&values, &unit());
        assert_eq!(true_indices(&flags), (1..=9).collect::<Vec<_>>());

        let mut eight = vec![0.5; 8];
        eight.push(-1.0);
        assert!(check_rule9(&eight, &unit()).iter().all(|f| !f));
    }

    // --- Rule 10: 24 of 25 within 1σ ---

    #[test]
    fn test_rule10_one_outlier_allowed() {
        let mut values = vec![0.1; 25];
        values[12] = 2.0;
        assert!(check_rule10(&values, &unit()).iter().all(|&f| f));
        values[13] = 2.0;
        assert!(check_rule10(&values, &unit()).iter().all(|f| !f));
    }

    // --- Rule 11: specification limits ---

    #[test]
    fn test_rule11_scalar_limits() {
        let flags = check_rule11(&[100.0, 111.0, 89.0], &Limit::Scalar(110.0), &Limit::Scalar(90.0));
        assert_eq!(flags, vec![false, true, true]);
    }

    #[test]
    fn test_rule11_per_point_limits_with_gaps() {
        let usl = Limit::PerPoint(vec![Some(110.0), None, Some(95.0)]);
        let flags = check_rule11(&[120.0, 500.0, 96.0], &usl, &Limit::Absent);
        assert_eq!(flags, vec![true, false, true]);
    }

    #[test]
    fn test_rule11_absent_limits_never_fire() {
        let flags = check_rule11(&[1e9, -1e9], &Limit::Absent, &Limit::Absent);
        assert_eq!(flags, vec![false, false]);
    }

    // --- Dispatch ---

    #[test]
    fn test_single_outlier_only_fires_rule1() {
        let mut values = vec![0.0; 10];
        values[4] = 4.0;
        let stats = unit();
        let ctx = RuleContext {
            series: &values,
            stats: Some(&stats),
            usl: &Limit::Absent,
            lsl: &Limit::Absent,
        };
        for rule in [
            RuleId::Rule1,
            RuleId::Rule2,
            RuleId::Rule3,
            RuleId::Rule4,
            RuleId::Rule5,
            RuleId::Rule5b,
            RuleId::Rule7,
            RuleId::Rule8,
        ] {
            let flags = rule.check(&ctx);
            assert_eq!(flags.len(), values.len());
            let expected: Vec<usize> = if rule == RuleId::Rule1 { vec![4] } else { vec![] };
            assert_eq!(true_indices(&flags), expected, "{rule}");
        }
    }

    #[test]
    fn test_baseline_rules_without_stats_are_all_false() {
        let values = [10.0, 50.0, -40.0];
        let ctx = RuleContext {
            series: &values,
            stats: None,
            usl: &Limit::Absent,
            lsl: &Limit::Absent,
        };
        assert_eq!(RuleId::Rule1.check(&ctx), vec![false; 3]);
        assert_eq!(RuleId::Rule4.check(&ctx), vec![false; 3]);
    }

    #[test]
    fn test_series_rules_run_without_stats() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ctx = RuleContext {
            series: &values,
            stats: None,
            usl: &Limit::Absent,
            lsl: &Limit::Absent,
        };
        assert_eq!(RuleId::Rule5b.check(&ctx), vec![true; 5]);
    }

    #[test]
    fn test_empty_series_every_rule() {
        let stats = unit();
        let ctx = RuleContext {
            series: &[],
            stats: Some(&stats),
            usl: &Limit::Scalar(1.0),
            lsl: &Limit::Absent,
        };
        for rule in [RuleId::Rule1, RuleId::Rule4, RuleId::Rule6, RuleId::Rule10, RuleId::Rule11] {
            assert!(rule.check(&ctx).is_empty());
        }
    }
}
