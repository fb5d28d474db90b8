//! Pay rule evaluation.
//!
//! The rule engine evaluates a ruleset snapshot against a single time entry
//! plus employee context, producing named pay components. Engines are
//! constructed per request or batch job and passed explicitly; there is no
//! process-wide singleton.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::warn;

use crate::models::{ComponentValue, PayComponent, PayRule, RuleAction, RuleSet, TimeEntry};

/// Employee context for rule evaluation.
#[derive(Debug, Clone)]
pub struct RuleContext {
    /// The employee's ID, matched against employee allowlists.
    pub employee_id: String,
    /// The employee's role, matched against role allowlists.
    pub role: String,
}

/// Evaluates a ruleset against time entries.
///
/// The engine holds an immutable snapshot of the ruleset, so evaluation is
/// deterministic for the lifetime of the engine.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{RuleContext, RuleEngine};
/// use payroll_engine::models::{PayRule, RuleAction, RuleConditions, RuleSet, TimeEntry};
/// use rust_decimal::Decimal;
/// use std::collections::BTreeSet;
///
/// let ruleset = RuleSet::new(vec![PayRule {
///     name: "weekend".to_string(),
///     conditions: RuleConditions {
///         day_of_week: Some(BTreeSet::from([5, 6])),
///         ..RuleConditions::default()
///     },
///     actions: vec![RuleAction::PayMultiplier {
///         multiplier: Decimal::new(15, 1),
///         component: None,
///     }],
///     priority: 10,
///     is_active: true,
/// }]);
///
/// let engine = RuleEngine::new(ruleset);
/// let ctx = RuleContext {
///     employee_id: "emp_001".to_string(),
///     role: "operator".to_string(),
/// };
///
/// // 2026-01-17 is a Saturday.
/// let start = chrono::NaiveDateTime::parse_from_str("2026-01-17 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let mut entry = TimeEntry::open("emp_001", start);
/// entry.close(start + chrono::Duration::hours(8)).unwrap();
///
/// let components = engine.evaluate(&entry, &ctx);
/// assert!(components.contains_key("weekend_hours"));
/// ```
#[derive(Debug, Clone)]
pub struct RuleEngine {
    ruleset: RuleSet,
}

impl RuleEngine {
    /// Creates an engine over a ruleset snapshot.
    pub fn new(ruleset: RuleSet) -> Self {
        Self { ruleset }
    }

    /// Returns the ruleset this engine evaluates.
    pub fn ruleset(&self) -> &RuleSet {
        &self.ruleset
    }

    /// Tests whether a rule matches an entry in the given context.
    ///
    /// Every present condition must hold (logical AND); an absent condition
    /// places no constraint. A rule with no conditions at all never matches
    /// (fail-closed).
    pub fn matches(rule: &PayRule, entry: &TimeEntry, ctx: &RuleContext) -> bool {
        let conditions = &rule.conditions;

        if conditions.is_empty() {
            return false;
        }

        if let Some(days) = &conditions.day_of_week {
            let day = entry.day_of_week().num_days_from_monday() as u8;
            if !days.contains(&day) {
                return false;
            }
        }

        if let Some(range) = &conditions.time_range {
            if !range.contains(entry.start_hour()) {
                return false;
            }
        }

        if let Some(threshold) = conditions.overtime_threshold {
            if entry.total_hours() <= threshold {
                return false;
            }
        }

        if let Some(employee_ids) = &conditions.employee_ids {
            if !employee_ids.contains(&ctx.employee_id) {
                return false;
            }
        }

        if let Some(roles) = &conditions.roles {
            if !roles.contains(&ctx.role) {
                return false;
            }
        }

        true
    }

    /// Applies a matching rule's actions to an entry, producing named
    /// components.
    ///
    /// For a multiplier action the hours subject to the multiplier are the
    /// hours above the rule's own overtime threshold when one is present,
    /// otherwise the entry's full hours. Default component names embed the
    /// rule name so that keys stay unique across rules unless a rule
    /// explicitly overrides the name.
    pub fn apply(rule: &PayRule, entry: &TimeEntry) -> Vec<(String, PayComponent)> {
        let total_hours = entry.total_hours();

        rule.actions
            .iter()
            .map(|action| match action {
                RuleAction::PayMultiplier {
                    multiplier,
                    component,
                } => {
                    let hours = match rule.conditions.overtime_threshold {
                        Some(threshold) => (total_hours - threshold).max(Decimal::ZERO),
                        None => total_hours,
                    };
                    let name = component
                        .clone()
                        .unwrap_or_else(|| format!("{}_hours", rule.name));
                    (
                        name,
                        PayComponent {
                            value: ComponentValue::Hours {
                                hours,
                                multiplier: *multiplier,
                            },
                            source_rule: rule.name.clone(),
                        },
                    )
                }
                RuleAction::FlatAllowance { amount, component } => {
                    let name = component
                        .clone()
                        .unwrap_or_else(|| format!("{}_allowance", rule.name));
                    (
                        name,
                        PayComponent {
                            value: ComponentValue::Allowance { amount: *amount },
                            source_rule: rule.name.clone(),
                        },
                    )
                }
                RuleAction::ShiftDifferential {
                    differential,
                    component,
                } => {
                    let name = component
                        .clone()
                        .unwrap_or_else(|| format!("{}_differential", rule.name));
                    (
                        name,
                        PayComponent {
                            value: ComponentValue::Differential {
                                hours: total_hours,
                                differential: *differential,
                            },
                            source_rule: rule.name.clone(),
                        },
                    )
                }
            })
            .collect()
    }

    /// Evaluates all active rules against an entry, producing the merged
    /// component map.
    ///
    /// Rules run in ascending priority order. A malformed rule is skipped
    /// with a logged warning and never aborts evaluation of the rest. When
    /// two rules emit the same component name, the later rule overwrites
    /// the earlier one; the overwrite is logged so configuration collisions
    /// are visible.
    pub fn evaluate(&self, entry: &TimeEntry, ctx: &RuleContext) -> BTreeMap<String, PayComponent> {
        let mut components = BTreeMap::new();

        for rule in self.ruleset.active_by_priority() {
            if let Err(e) = rule.validate() {
                warn!(rule = %rule.name, error = %e, "skipping malformed rule");
                continue;
            }

            if !Self::matches(rule, entry, ctx) {
                continue;
            }

            for (name, component) in Self::apply(rule, entry) {
                if let Some(previous) = components.insert(name.clone(), component) {
                    warn!(
                        component = %name,
                        overwritten = %previous.source_rule,
                        by = %rule.name,
                        "same-named component overwritten by later rule"
                    );
                }
            }
        }

        components
    }
}
