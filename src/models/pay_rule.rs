//! Pay rule definitions.
//!
//! A pay rule pairs condition predicates with action templates. Conditions
//! and actions are strongly-typed tagged variants validated at load time,
//! replacing the JSON-encoded blobs the legacy system evaluated on every
//! match.
//!
//! Rules are evaluated in ascending priority order, and all matching active
//! rules apply; priority governs deterministic ordering, not
//! short-circuiting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{EngineError, EngineResult};

/// A half-open time-of-day range condition over the clock-in hour.
///
/// Ranges where `start_hour > end_hour` wrap around midnight, so a night
/// shift window of 22:00-06:00 matches hours 22, 23, 0..5.
///
/// # Example
///
/// ```
/// use payroll_engine::models::TimeRange;
///
/// let night = TimeRange { start_hour: 22, end_hour: 6 };
/// assert!(night.contains(23));
/// assert!(night.contains(2));
/// assert!(!night.contains(12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Inclusive start hour (0-23).
    pub start_hour: u32,
    /// Exclusive end hour (0-24).
    pub end_hour: u32,
}

impl TimeRange {
    /// Returns true when the given hour of day falls inside the range.
    pub fn contains(&self, hour: u32) -> bool {
        if self.start_hour <= self.end_hour {
            self.start_hour <= hour && hour < self.end_hour
        } else {
            // Wrap-around range crossing midnight.
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

/// Condition predicates for a pay rule.
///
/// Every field is optional; an absent field places no constraint on that
/// dimension. A rule whose conditions are entirely absent never matches
/// (fail-closed).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleConditions {
    /// Days of week the rule applies to, as offsets from Monday (0=Mon,
    /// 5=Sat, 6=Sun).
    #[serde(default)]
    pub day_of_week: Option<BTreeSet<u8>>,
    /// Time-of-day window matched against the entry's clock-in hour.
    #[serde(default)]
    pub time_range: Option<TimeRange>,
    /// Matches entries whose total hours strictly exceed this threshold.
    #[serde(default)]
    pub overtime_threshold: Option<Decimal>,
    /// Allowlist of employee IDs.
    #[serde(default)]
    pub employee_ids: Option<BTreeSet<String>>,
    /// Allowlist of employee roles.
    #[serde(default)]
    pub roles: Option<BTreeSet<String>>,
}

impl RuleConditions {
    /// Returns true when no condition is present on any dimension.
    pub fn is_empty(&self) -> bool {
        self.day_of_week.is_none()
            && self.time_range.is_none()
            && self.overtime_threshold.is_none()
            && self.employee_ids.is_none()
            && self.roles.is_none()
    }
}

/// An action template contributed by a matching rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleAction {
    /// Pays a multiple of the base rate for the entry's hours (or the hours
    /// above the rule's own overtime threshold, when one is present).
    PayMultiplier {
        /// The rate multiplier (e.g., 1.5).
        multiplier: Decimal,
        /// Overrides the default `{rule}_hours` component name.
        #[serde(default)]
        component: Option<String>,
    },
    /// Pays a fixed amount independent of hours.
    FlatAllowance {
        /// The flat amount.
        amount: Decimal,
        /// Overrides the default `{rule}_allowance` component name.
        #[serde(default)]
        component: Option<String>,
    },
    /// Pays an additional per-hour amount on top of base pay.
    ShiftDifferential {
        /// The per-hour differential amount.
        differential: Decimal,
        /// Overrides the default `{rule}_differential` component name.
        #[serde(default)]
        component: Option<String>,
    },
}

/// A pay rule: conditions, actions, priority, and active flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayRule {
    /// Unique rule name (also the stem of default component names).
    pub name: String,
    /// Condition predicates; all present conditions must hold.
    #[serde(default)]
    pub conditions: RuleConditions,
    /// Actions applied when the rule matches.
    pub actions: Vec<RuleAction>,
    /// Evaluation order; lower values are evaluated first.
    #[serde(default)]
    pub priority: i32,
    /// Whether the rule participates in evaluation.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl PayRule {
    /// Validates the rule definition.
    ///
    /// Rejects rules with no actions, negative multipliers, amounts,
    /// differentials, or thresholds, and malformed time ranges.
    pub fn validate(&self) -> EngineResult<()> {
        if self.actions.is_empty() {
            return Err(EngineError::InvalidRule {
                rule: self.name.clone(),
                message: "rule has no actions".to_string(),
            });
        }
        if let Some(threshold) = self.conditions.overtime_threshold {
            if threshold < Decimal::ZERO {
                return Err(EngineError::InvalidRule {
                    rule: self.name.clone(),
                    message: "overtime_threshold must be non-negative".to_string(),
                });
            }
        }
        if let Some(range) = self.conditions.time_range {
            if range.start_hour > 23 || range.end_hour > 24 {
                return Err(EngineError::InvalidRule {
                    rule: self.name.clone(),
                    message: "time_range hours must be within 0-23 / 0-24".to_string(),
                });
            }
        }
        for action in &self.actions {
            let (value, what) = match action {
                RuleAction::PayMultiplier { multiplier, .. } => (*multiplier, "multiplier"),
                RuleAction::FlatAllowance { amount, .. } => (*amount, "amount"),
                RuleAction::ShiftDifferential { differential, .. } => {
                    (*differential, "differential")
                }
            };
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidRule {
                    rule: self.name.clone(),
                    message: format!("{what} must be non-negative"),
                });
            }
        }
        Ok(())
    }
}

/// An ordered collection of pay rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// The rule definitions.
    pub rules: Vec<PayRule>,
}

impl RuleSet {
    /// Creates a ruleset from a list of rules.
    pub fn new(rules: Vec<PayRule>) -> Self {
        Self { rules }
    }

    /// Returns the active rules in evaluation order: ascending priority,
    /// then name for a deterministic tiebreak.
    pub fn active_by_priority(&self) -> Vec<&PayRule> {
        let mut active: Vec<&PayRule> = self.rules.iter().filter(|r| r.is_active).collect();
        active.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.name.cmp(&b.name)));
        active
    }
}
