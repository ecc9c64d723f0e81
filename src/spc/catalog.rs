//! The rule catalog.
//!
//! A fixed, ordered list of every known pattern rule together with its
//! activation state. Evaluation order, flag-list positions and report column
//! names all follow catalog order, so consumers can rely on positional
//! correspondence between flag arrays and rule names.
//!
//! Rules 5c, 6, 9 and 10 are implemented but disabled in the standard
//! catalog; enabling one is a [`RuleCatalog::with_activation`] call.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a rule in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleId {
    Rule1,
    Rule2,
    Rule3,
    Rule4,
    Rule5,
    Rule5b,
    Rule5c,
    Rule6,
    Rule7,
    Rule8,
    Rule9,
    Rule10,
    Rule11,
}

impl RuleId {
    /// Display name, also used as the export column header.
    pub fn name(self) -> &'static str {
        match self {
            RuleId::Rule1 => "Rule 1",
            RuleId::Rule2 => "Rule 2",
            RuleId::Rule3 => "Rule 3",
            RuleId::Rule4 => "Rule 4",
            RuleId::Rule5 => "Rule 5",
            RuleId::Rule5b => "Rule 5b",
            RuleId::Rule5c => "Rule 5c",
            RuleId::Rule6 => "Rule 6",
            RuleId::Rule7 => "Rule 7",
            RuleId::Rule8 => "Rule 8",
            RuleId::Rule9 => "Rule 9",
            RuleId::Rule10 => "Rule 10",
            RuleId::Rule11 => "Rule 11",
        }
    }

    /// What a rule inspects besides the series.
    pub fn requires(self) -> Requires {
        match self {
            RuleId::Rule5 | RuleId::Rule5b | RuleId::Rule5c | RuleId::Rule6 => Requires::Series,
            RuleId::Rule11 => Requires::SpecLimits,
            _ => Requires::Baseline,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inputs a rule needs beyond the raw series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requires {
    /// Only the sample values (trend and alternation rules).
    Series,
    /// Mean and σ from the baseline.
    Baseline,
    /// USL / LSL.
    SpecLimits,
}

/// Shape of the pattern a rule looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Window {
    /// A fixed window of this many consecutive points.
    Points(usize),
    /// A maximal run of at least this many points.
    Run(usize),
}

/// When a rule takes part in an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Always,
    /// Only when a USL or LSL is provided.
    WhenLimitProvided,
    Disabled,
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSpec {
    pub id: RuleId,
    /// Human-readable trigger definition, used for legends.
    pub description: &'static str,
    pub window: Window,
    pub activation: Activation,
}

const STANDARD_RULES: [RuleSpec; 13] = [
    RuleSpec {
        id: RuleId::Rule1,
        description: "1 point > 3σ from the mean.",
        window: Window::Points(1),
        activation: Activation::Always,
    },
    RuleSpec {
        id: RuleId::Rule2,
        description: "2 out of 3 consecutive points > 2σ from the mean (same side).",
        window: Window::Points(3),
        activation: Activation::Always,
    },
    RuleSpec {
        id: RuleId::Rule3,
        description: "4 out of 5 consecutive points > 1σ from the mean (same side).",
        window: Window::Points(5),
        activation: Activation::Always,
    },
    RuleSpec {
        id: RuleId::Rule4,
        description: "8 consecutive points on one side of the mean.",
        window: Window::Run(8),
        activation: Activation::Always,
    },
    RuleSpec {
        id: RuleId::Rule5,
        description: "6 consecutive points trending up or down.",
        window: Window::Points(6),
        activation: Activation::Always,
    },
    RuleSpec {
        id: RuleId::Rule5b,
        description: "5 consecutive points trending up or down (faster detection).",
        window: Window::Points(5),
        activation: Activation::Always,
    },
    RuleSpec {
        id: RuleId::Rule5c,
        description: "6 points with non-strict monotonic trend.",
        window: Window::Points(6),
        activation: Activation::Disabled,
    },
    RuleSpec {
        id: RuleId::Rule6,
        description: "14 consecutive points alternating up and down.",
        window: Window::Points(14),
        activation: Activation::Disabled,
    },
    RuleSpec {
        id: RuleId::Rule7,
        description: "15 consecutive points within 1σ of the mean.",
        window: Window::Points(15),
        activation: Activation::Always,
    },
    RuleSpec {
        id: RuleId::Rule8,
        description: "8 consecutive points outside 1σ (both sides).",
        window: Window::Points(8),
        activation: Activation::Always,
    },
    RuleSpec {
        id: RuleId::Rule9,
        description: "9 consecutive points on the same side of the mean.",
        window: Window::Run(9),
        activation: Activation::Disabled,
    },
    RuleSpec {
        id: RuleId::Rule10,
        description: "24 out of 25 points within 1σ of the mean.",
        window: Window::Points(25),
        activation: Activation::Disabled,
    },
    RuleSpec {
        id: RuleId::Rule11,
        description: "Data point is above USL or below LSL.",
        window: Window::Points(1),
        activation: Activation::WhenLimitProvided,
    },
];

/// Ordered rule catalog.
///
/// # Examples
///
/// ```
/// use spc_rules::spc::{Activation, RuleCatalog, RuleId};
///
/// let catalog = RuleCatalog::standard();
/// assert_eq!(catalog.base_names().len(), 8);
///
/// let with_rule6 = catalog.with_activation(RuleId::Rule6, Activation::Always);
/// assert_eq!(with_rule6.base_names().len(), 9);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleCatalog {
    rules: Vec<RuleSpec>,
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleCatalog {
    /// The standard catalog: 1, 2, 3, 4, 5, 5b, 7, 8 always; 11 with limits.
    pub fn standard() -> Self {
        Self {
            rules: STANDARD_RULES.to_vec(),
        }
    }

    /// A copy of this catalog with one rule's activation changed.
    pub fn with_activation(&self, id: RuleId, activation: Activation) -> Self {
        let mut rules = self.rules.clone();
        for spec in rules.iter_mut().filter(|s| s.id == id) {
            spec.activation = activation;
        }
        Self { rules }
    }

    /// Every entry, in catalog order.
    pub fn rules(&self) -> &[RuleSpec] {
        &self.rules
    }

    /// Look up an entry by id.
    pub fn get(&self, id: RuleId) -> Option<&RuleSpec> {
        self.rules.iter().find(|s| s.id == id)
    }

    /// Rules that take part in an evaluation, in catalog order.
    ///
    /// Conditional rules follow every unconditional one so that the
    /// unconditional prefix of the flag list never shifts.
    pub fn active(&self, limit_provided: bool) -> Vec<RuleId> {
        let mut active: Vec<RuleId> = self
            .rules
            .iter()
            .filter(|s| s.activation == Activation::Always)
            .map(|s| s.id)
            .collect();
        if limit_provided {
            active.extend(
                self.rules
                    .iter()
                    .filter(|s| s.activation == Activation::WhenLimitProvided)
                    .map(|s| s.id),
            );
        }
        active
    }

    /// Names of the unconditional rules, in flag-list order.
    pub fn base_names(&self) -> Vec<&'static str> {
        self.active(false).into_iter().map(RuleId::name).collect()
    }

    /// Names matching a flag list of `flag_count` entries.
    ///
    /// The conditional rules are appended only when the list is longer than
    /// the unconditional prefix.
    pub fn names_for(&self, flag_count: usize) -> Vec<&'static str> {
        let mut names = self.base_names();
        if flag_count > names.len() {
            names = self.active(true).into_iter().map(RuleId::name).collect();
        }
        names
    }

    /// Markdown legend of the rules that can take part in an evaluation.
    pub fn legend_markdown(&self) -> String {
        let mut out = String::from("**SPC Rules Applied:**\n");
        for spec in self
            .rules
            .iter()
            .filter(|s| s.activation != Activation::Disabled)
        {
            out.push_str(&format!("- **{}:** {}\n", spec.id.name(), spec.description));
        }
        out
    }
}
