//! Specification limits (USL / LSL).
//!
//! Upstream data marks "no limit" in several ways: a missing value, a null,
//! the placeholder string `"-"`, or a column whose entries are all
//! non-numeric. [`Limit`] collapses these into one tagged value, and
//! [`Limit::is_provided`] is the single predicate that decides whether the
//! specification-limit rule takes part in an evaluation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder used by upstream sources for "no limit".
pub const ABSENT_PLACEHOLDER: &str = "-";

/// A specification limit: absent, one value for all samples, or one per sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Limit {
    #[default]
    Absent,
    Scalar(f64),
    /// Per-sample values; `None` where a sample has no limit.
    PerPoint(Vec<Option<f64>>),
}

impl Limit {
    /// Whether this limit carries at least one usable number.
    ///
    /// # Examples
    ///
    /// ```
    /// use spc_rules::spc::Limit;
    ///
    /// assert!(!Limit::Absent.is_provided());
    /// assert!(!Limit::from_texts(["-", "-", "-"]).is_provided());
    /// assert!(Limit::from(vec![110.0, 90.0, 95.0]).is_provided());
    /// ```
    pub fn is_provided(&self) -> bool {
        match self {
            Limit::Absent => false,
            Limit::Scalar(v) => !v.is_nan(),
            Limit::PerPoint(values) => values.iter().flatten().any(|v| !v.is_nan()),
        }
    }

    /// The limit applying to sample `index`, if any.
    ///
    /// Per-point lists shorter than the series yield `None` past their end.
    pub fn at(&self, index: usize) -> Option<f64> {
        let value = match self {
            Limit::Absent => None,
            Limit::Scalar(v) => Some(*v),
            Limit::PerPoint(values) => values.get(index).copied().flatten(),
        };
        value.filter(|v| !v.is_nan())
    }

    /// Coerce a single text value. Blank, `"-"` and non-numeric text are absent.
    pub fn from_text(text: &str) -> Self {
        match coerce_text(text) {
            Some(v) => Limit::Scalar(v),
            None => Limit::Absent,
        }
    }

    /// Coerce one text value per sample. Entries that do not parse are missing.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Limit::PerPoint(
            texts
                .into_iter()
                .map(|t| coerce_text(t.as_ref()))
                .collect(),
        )
    }

    /// Coerce a loosely typed JSON value.
    ///
    /// `null`, `"-"`, booleans and objects are absent; numbers and numeric
    /// strings are scalars; arrays become per-point limits with the same
    /// element coercion.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(items) => Limit::PerPoint(items.iter().map(coerce_json).collect()),
            other => match coerce_json(other) {
                Some(v) => Limit::Scalar(v),
                None => Limit::Absent,
            },
        }
    }
}

impl From<f64> for Limit {
    fn from(value: f64) -> Self {
        Limit::Scalar(value)
    }
}

impl From<Option<f64>> for Limit {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Limit::Absent, Limit::Scalar)
    }
}

impl From<Vec<f64>> for Limit {
    fn from(values: Vec<f64>) -> Self {
        Limit::PerPoint(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<f64>>> for Limit {
    fn from(values: Vec<Option<f64>>) -> Self {
        Limit::PerPoint(values)
    }
}

fn coerce_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == ABSENT_PLACEHOLDER {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn coerce_json(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => coerce_text(s),
        _ => None,
    }
}
