//! Employee model.
//!
//! This module defines the Employee struct used as rule-evaluation context
//! and as the pricing basis for pay components.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an employee whose attendance is compiled into pay.
///
/// The `role` feeds the rule engine's role allowlist condition and the
/// `base_hourly_rate` prices multiplier and differential components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name for reports and batch logs.
    pub name: String,
    /// The employee's role (e.g., "nurse", "supervisor").
    pub role: String,
    /// The base hourly rate used to price pay components.
    pub base_hourly_rate: Decimal,
    /// Whether the employee is active (inactive employees are skipped by
    /// batch accrual and payroll runs).
    pub is_active: bool,
}
