//! Payroll compilation.
//!
//! The compiler orchestrates the rule engine and overtime tiering across a
//! pay period, producing a [`PayCalculation`] aggregate per employee. A
//! calculation is a materialized cache: recompiling the same inputs
//! overwrites rather than merges, and the output is byte-identical for
//! unchanged inputs.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::ledger::TimeLedger;
use crate::models::{
    ComponentValue, Employee, EntryException, PayCalculation, PayCodeCatalog, PayComponent,
    PayPeriod, PayrollRunReport,
};

use super::overtime_tiering::{
    DEFAULT_DAILY_OVERTIME_THRESHOLD, DEFAULT_TIER_ONE_SPAN, tier,
};
use super::rule_engine::{RuleContext, RuleEngine};

/// Tiering configuration for the compiler.
///
/// The period granularity decision (daily versus weekly aggregation before
/// tiering) lives here: the compiler sums raw hours across the period and
/// tiers the sum once, so the thresholds should be chosen for the period
/// length being compiled.
#[derive(Debug, Clone, Copy)]
pub struct CompilerConfig {
    /// Hours paid at the regular rate before overtime starts.
    pub daily_threshold: Decimal,
    /// Width of the 1.5x band.
    pub tier_one_span: Decimal,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            daily_threshold: DEFAULT_DAILY_OVERTIME_THRESHOLD,
            tier_one_span: DEFAULT_TIER_ONE_SPAN,
        }
    }
}

/// Compiles pay periods into [`PayCalculation`] aggregates.
///
/// Constructed per batch job with its rule engine and pay code catalog,
/// and passed explicitly to callers; holds no mutable state.
#[derive(Debug, Clone)]
pub struct PayrollCompiler {
    engine: RuleEngine,
    catalog: PayCodeCatalog,
    config: CompilerConfig,
}

impl PayrollCompiler {
    /// Creates a compiler over a rule engine and pay code catalog with the
    /// given tiering configuration.
    pub fn new(engine: RuleEngine, catalog: PayCodeCatalog, config: CompilerConfig) -> Self {
        Self {
            engine,
            catalog,
            config,
        }
    }

    /// Compiles one employee's pay period.
    ///
    /// Closed worked entries in range are evaluated against the ruleset and
    /// their components summed by name; raw worked hours are summed and
    /// tiered for the headline regular/1.5x/2.0x totals. Entries whose
    /// interval is inconsistent (non-positive worked time on a closed
    /// entry) are flagged as exceptions, never silently zeroed. Open
    /// entries are not compiled.
    ///
    /// Absence entries are priced through their pay code, not the ruleset:
    /// an approved paid absence contributes its hours at the code's rate
    /// factor, an unpaid (or zero-factor) absence contributes nothing, and
    /// an absence still awaiting required approval is flagged as an
    /// exception. Absence hours never count toward overtime tiering.
    ///
    /// Gross pay is the sum of each component priced at the employee's
    /// base rate: hours x rate x multiplier, plus flat allowances, plus
    /// hours x differential.
    pub fn compile(
        &self,
        ledger: &TimeLedger,
        employee: &Employee,
        period: &PayPeriod,
    ) -> EngineResult<PayCalculation> {
        if period.end_date < period.start_date {
            return Err(EngineError::InvalidTimeEntry {
                entry_id: format!("period {}..{}", period.start_date, period.end_date),
                message: "period end before period start".to_string(),
            });
        }

        let ctx = RuleContext {
            employee_id: employee.id.clone(),
            role: employee.role.clone(),
        };

        let mut components: BTreeMap<String, PayComponent> = BTreeMap::new();
        let mut exceptions = Vec::new();
        let mut total_hours = Decimal::ZERO;

        for entry in ledger.entries_for(&employee.id, period) {
            if entry.is_open() {
                continue;
            }

            let hours = entry.total_hours();
            if hours <= Decimal::ZERO {
                exceptions.push(EntryException {
                    entry_id: entry.id.to_string(),
                    message: "closed entry has non-positive worked hours".to_string(),
                });
                continue;
            }

            if let Some(absence) = &entry.absence {
                let code = match self.catalog.get(&absence.pay_code) {
                    Some(code) => code,
                    None => {
                        exceptions.push(EntryException {
                            entry_id: entry.id.to_string(),
                            message: format!("unknown absence pay code {}", absence.pay_code),
                        });
                        continue;
                    }
                };

                if code.config.requires_approval && !absence.is_approved() {
                    exceptions.push(EntryException {
                        entry_id: entry.id.to_string(),
                        message: format!("absence under {} awaits approval", code.code),
                    });
                    continue;
                }

                if !code.config.is_paid || code.config.pay_rate_factor == Decimal::ZERO {
                    continue;
                }

                merge_component(
                    &mut components,
                    format!("{}_hours", code.code.to_lowercase()),
                    PayComponent {
                        value: ComponentValue::Hours {
                            hours,
                            multiplier: code.config.pay_rate_factor,
                        },
                        source_rule: code.code.clone(),
                    },
                );
                continue;
            }

            total_hours += hours;

            for (name, component) in self.engine.evaluate(entry, &ctx) {
                merge_component(&mut components, name, component);
            }
        }

        let split = tier(
            total_hours,
            self.config.daily_threshold,
            self.config.tier_one_span,
        );

        let gross_pay = components
            .values()
            .map(|c| c.amount_at(employee.base_hourly_rate))
            .sum();

        Ok(PayCalculation {
            employee_id: employee.id.clone(),
            period: *period,
            components,
            total_hours,
            regular_hours: split.regular,
            overtime_1_5_hours: split.overtime_1_5,
            overtime_2_0_hours: split.overtime_2_0,
            gross_pay,
            exceptions,
        })
    }

    /// Compiles a batch of employees for one period.
    ///
    /// Inactive employees are skipped. One employee's failure is recorded
    /// in the report's error list and never aborts the rest of the batch.
    pub fn compile_many(
        &self,
        ledger: &TimeLedger,
        employees: &[Employee],
        period: &PayPeriod,
    ) -> PayrollRunReport {
        let mut report = PayrollRunReport::default();

        for employee in employees.iter().filter(|e| e.is_active) {
            match self.compile(ledger, employee, period) {
                Ok(calculation) => report.calculations.push(calculation),
                Err(e) => {
                    warn!(employee = %employee.id, error = %e, "payroll compilation failed");
                    report
                        .errors
                        .push(format!("employee {}: {}", employee.id, e));
                }
            }
        }

        report
    }
}

/// Merges a component into the period accumulator, summing same-named
/// components of the same kind.
fn merge_component(
    components: &mut BTreeMap<String, PayComponent>,
    name: String,
    component: PayComponent,
) {
    match components.get_mut(&name) {
        None => {
            components.insert(name, component);
        }
        Some(existing) => match (&mut existing.value, component.value) {
            (
                ComponentValue::Hours { hours, .. },
                ComponentValue::Hours {
                    hours: new_hours, ..
                },
            ) => *hours += new_hours,
            (
                ComponentValue::Allowance { amount },
                ComponentValue::Allowance { amount: new_amount },
            ) => *amount += new_amount,
            (
                ComponentValue::Differential { hours, .. },
                ComponentValue::Differential {
                    hours: new_hours, ..
                },
            ) => *hours += new_hours,
            (_, value) => {
                // Mismatched kinds under one name: a configuration
                // collision. The later entry wins, consistent with the
                // engine's overwrite policy.
                warn!(component = %name, "component kind collision during aggregation");
                existing.value = value;
                existing.source_rule = component.source_rule;
            }
        },
    }
}
