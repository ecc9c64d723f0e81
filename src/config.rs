//! Dashboard text configuration.
//!
//! An immutable value built once (defaults or JSON) and handed to whatever
//! renders the charts. The rule legend is not part of it; render that from
//! [`RuleCatalog::legend_markdown`](crate::spc::RuleCatalog::legend_markdown)
//! so it always matches the rules actually evaluated.

use serde::Deserialize;

use crate::error::Error;

/// Display strings for the control-chart dashboard.
///
/// # Examples
///
/// ```
/// use spc_rules::DashboardConfig;
///
/// let config = DashboardConfig::from_json(r#"{ "no_data": "Nothing here." }"#).unwrap();
/// assert_eq!(config.no_data(), "Nothing here.");
/// assert_eq!(
///     config.chart_title("Pressure", "Plant Y"),
///     "Control Chart for Pressure - Installation Plant Y"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    title_main: String,
    /// Template with `{var}` and `{inst}` placeholders.
    title_chart: String,
    no_data: String,
    select_text: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title_main: "KPI Dashboard - Main Page".to_string(),
            title_chart: "Control Chart for {var} - Installation {inst}".to_string(),
            no_data: "No data available for this combination.".to_string(),
            select_text: "Select a Variable and Installation to view the control chart:"
                .to_string(),
        }
    }
}

impl DashboardConfig {
    /// Parse from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn title_main(&self) -> &str {
        &self.title_main
    }

    pub fn no_data(&self) -> &str {
        &self.no_data
    }

    pub fn select_text(&self) -> &str {
        &self.select_text
    }

    /// Chart title for one variable / installation selection.
    pub fn chart_title(&self, var: &str, inst: &str) -> String {
        self.title_chart
            .replace("{var}", var)
            .replace("{inst}", inst)
    }
}
