//! Monthly leave accrual scheduler.
//!
//! Runs the configured per-cycle accrual rate for every active employee
//! against every active leave type. The run is idempotent per calendar
//! month: the leave ledger skips rows that already accrued in the target
//! month, so re-running a month (after a crash, or by operator mistake)
//! never double-credits anyone.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::ledger::{LeaveKey, LeaveLedger};
use crate::models::Employee;

/// Summary of one accrual run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccrualRunReport {
    /// Number of (employee, leave type) rows that accrued.
    pub processed: usize,
    /// Number of rows skipped because the month had already accrued.
    pub skipped: usize,
    /// Total hours banked across all rows.
    pub total_accrued: Decimal,
    /// Per-row failures. A failed row never aborts the run.
    pub errors: Vec<String>,
}

/// Drives monthly accrual against a leave ledger.
///
/// # Example
///
/// ```
/// use payroll_engine::ledger::{AccrualScheduler, LeaveLedger};
/// use payroll_engine::models::{Employee, LeaveType};
/// use rust_decimal::Decimal;
///
/// let ledger = LeaveLedger::new(vec![LeaveType {
///     id: "annual".to_string(),
///     name: "Annual Leave".to_string(),
///     accrual_rate: Some(Decimal::new(10, 0)),
///     requires_approval: true,
///     max_consecutive_days: None,
///     max_balance_hours: None,
///     is_active: true,
/// }]);
/// let employees = vec![Employee {
///     id: "emp_001".to_string(),
///     name: "Asha Patel".to_string(),
///     role: "nurse".to_string(),
///     base_hourly_rate: Decimal::new(45, 0),
///     is_active: true,
/// }];
///
/// let scheduler = AccrualScheduler::new(&ledger);
/// let report = scheduler.run_monthly_accrual(&employees, 2026, 1).unwrap();
/// assert_eq!(report.processed, 1);
/// assert_eq!(report.total_accrued, Decimal::new(10, 0));
/// ```
#[derive(Debug)]
pub struct AccrualScheduler<'a> {
    ledger: &'a LeaveLedger,
}

impl<'a> AccrualScheduler<'a> {
    /// Creates a scheduler over the given leave ledger.
    pub fn new(ledger: &'a LeaveLedger) -> Self {
        Self { ledger }
    }

    /// Accrues one month of leave for every active employee.
    ///
    /// Inactive employees and leave types without an effective accrual
    /// rate are skipped. Rows that already accrued in the target month
    /// count as `skipped`. Individual row failures are collected into the
    /// report rather than aborting the run.
    pub fn run_monthly_accrual(
        &self,
        employees: &[Employee],
        year: i32,
        month: u32,
    ) -> EngineResult<AccrualRunReport> {
        let on = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            EngineError::InvalidRule {
                rule: "monthly_accrual".to_string(),
                message: format!("invalid accrual month {year}-{month:02}"),
            }
        })?;

        let mut report = AccrualRunReport::default();
        for employee in employees.iter().filter(|e| e.is_active) {
            for leave_type in self.ledger.leave_types() {
                let Some(rate) = leave_type.effective_accrual_rate() else {
                    continue;
                };
                let key = LeaveKey::new(employee.id.clone(), leave_type.id.clone(), on.year());
                match self.ledger.accrue_monthly(&key, rate, on) {
                    Ok(Some(banked)) => {
                        report.processed += 1;
                        report.total_accrued += banked;
                    }
                    Ok(None) => report.skipped += 1,
                    Err(e) => {
                        warn!(
                            employee = %employee.id,
                            leave_type = %leave_type.id,
                            error = %e,
                            "accrual failed for row"
                        );
                        report
                            .errors
                            .push(format!("{}/{}: {e}", employee.id, leave_type.id));
                    }
                }
            }
        }

        info!(
            year,
            month,
            processed = report.processed,
            skipped = report.skipped,
            total = %report.total_accrued,
            failures = report.errors.len(),
            "monthly accrual run complete"
        );
        Ok(report)
    }
}
