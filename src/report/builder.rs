//! Turns raw flag arrays into per-index rule lookups, per-rule counts and an
//! export table.
//!
//! Flag arrays are matched to rule names by position, using the catalog's
//! unconditional prefix and appending the conditional rules only when the
//! flag list is longer than that prefix.

use tracing::warn;

use super::table::Table;
use crate::spc::RuleCatalog;

/// Column holding the overall violation flag in an export table.
pub const VIOLATION_COLUMN: &str = "Violation";

/// Formats evaluation flags for display and export.
///
/// # Examples
///
/// ```
/// use spc_rules::report::ReportBuilder;
///
/// let report = ReportBuilder::default();
/// let mut flags = vec![vec![false, false]; 8];
/// flags[0][1] = true; // Rule 1
/// flags[5][1] = true; // Rule 5b
///
/// assert_eq!(report.rules_at_index(&flags, 1), vec!["Rule 1", "Rule 5b"]);
/// assert!(report.rules_at_index(&flags, 0).is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    catalog: RuleCatalog,
}

impl ReportBuilder {
    pub fn new(catalog: RuleCatalog) -> Self {
        Self { catalog }
    }

    fn names(&self, flags: &[Vec<bool>]) -> Vec<&'static str> {
        let names = self.catalog.names_for(flags.len());
        if names.len() < flags.len() {
            warn!(
                flags = flags.len(),
                names = names.len(),
                "more flag arrays than catalog rules, extra arrays ignored"
            );
        }
        names
    }

    /// Names of the rules whose flag is set at `index`, in catalog order.
    ///
    /// An index past the end of the flags yields no rules.
    pub fn rules_at_index(&self, flags: &[Vec<bool>], index: usize) -> Vec<&'static str> {
        self.names(flags)
            .into_iter()
            .zip(flags)
            .filter(|(_, f)| f.get(index).copied().unwrap_or(false))
            .map(|(name, _)| name)
            .collect()
    }

    /// Number of flagged samples per rule, in catalog order.
    pub fn rule_hit_counts(&self, flags: &[Vec<bool>]) -> Vec<usize> {
        flags
            .iter()
            .map(|f| f.iter().filter(|&&v| v).count())
            .collect()
    }

    /// `(rule name, flagged sample count)` pairs, in catalog order.
    pub fn violation_summary(&self, flags: &[Vec<bool>]) -> Vec<(&'static str, usize)> {
        self.names(flags)
            .into_iter()
            .zip(self.rule_hit_counts(flags))
            .collect()
    }

    /// A copy of `table` with a [`VIOLATION_COLUMN`] and one boolean column
    /// per rule appended.
    ///
    /// The input table is not modified. Flag arrays are aligned to the row
    /// count; a column that already exists under the same name is replaced.
    pub fn export_table(
        &self,
        table: &Table,
        violation_flags: &[bool],
        rule_flags: &[Vec<bool>],
    ) -> Table {
        let mut export = table.clone();
        export.set_bool_column(VIOLATION_COLUMN, violation_flags);
        for (name, flags) in self.names(rule_flags).into_iter().zip(rule_flags) {
            export.set_bool_column(name, flags);
        }
        export
    }
}
