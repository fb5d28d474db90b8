//! Pay calculation result models.
//!
//! This module contains the [`PayCalculation`] aggregate produced by the
//! payroll compiler. A calculation is derived data: it is always
//! reproducible by replaying the period's time entries against the ruleset
//! and catalog, and recompilation overwrites rather than merges.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::PayPeriod;

/// The priced value of a pay component.
///
/// Components come in three shapes matching the three rule action kinds:
/// hours at a rate multiplier, a flat allowance amount, and hours carrying
/// a per-hour differential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentValue {
    /// Hours paid at `base_rate * multiplier`.
    Hours {
        /// The hours subject to the multiplier.
        hours: Decimal,
        /// The rate multiplier.
        multiplier: Decimal,
    },
    /// A fixed amount independent of hours.
    Allowance {
        /// The flat amount.
        amount: Decimal,
    },
    /// Hours paid an additional per-hour amount on top of base pay.
    Differential {
        /// The hours the differential applies to.
        hours: Decimal,
        /// The per-hour differential amount.
        differential: Decimal,
    },
}

/// A named, priced unit of compensation contributed by one matching rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayComponent {
    /// The component value (hours/multiplier, amount, or differential).
    #[serde(flatten)]
    pub value: ComponentValue,
    /// The rule name or pay code that contributed this component.
    pub source_rule: String,
}

impl PayComponent {
    /// Prices this component against a base hourly rate.
    pub fn amount_at(&self, base_rate: Decimal) -> Decimal {
        match &self.value {
            ComponentValue::Hours { hours, multiplier } => *hours * base_rate * *multiplier,
            ComponentValue::Allowance { amount } => *amount,
            ComponentValue::Differential {
                hours,
                differential,
            } => *hours * *differential,
        }
    }
}

/// A per-entry problem found during compilation.
///
/// Entries with inconsistent intervals are flagged rather than silently
/// zeroed, so payroll staff can repair them before export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryException {
    /// The ID of the offending time entry.
    pub entry_id: String,
    /// A description of the problem.
    pub message: String,
}

/// The complete result of compiling one employee's pay period.
///
/// Components are keyed in a `BTreeMap` so that recompiling the same inputs
/// produces byte-identical serialized output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayCalculation {
    /// The employee this calculation is for.
    pub employee_id: String,
    /// The pay period compiled.
    pub period: PayPeriod,
    /// Pay components by name, summed across the period's entries.
    pub components: BTreeMap<String, PayComponent>,
    /// Total raw worked hours across the period.
    pub total_hours: Decimal,
    /// Hours paid at the regular rate.
    pub regular_hours: Decimal,
    /// Hours in the 1.5x overtime band.
    pub overtime_1_5_hours: Decimal,
    /// Hours in the 2.0x double-time band.
    pub overtime_2_0_hours: Decimal,
    /// Gross pay: priced components plus allowances.
    pub gross_pay: Decimal,
    /// Entries that could not be compiled.
    pub exceptions: Vec<EntryException>,
}

/// The outcome of compiling a batch of employees.
///
/// One employee's failure never aborts the batch; failures are recorded
/// here and the remaining employees are processed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayrollRunReport {
    /// Successful calculations, in input order.
    pub calculations: Vec<PayCalculation>,
    /// Human-readable descriptions of per-employee failures.
    pub errors: Vec<String>,
}
