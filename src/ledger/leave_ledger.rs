//! Leave balance ledger.
//!
//! One balance row exists per (employee, leave type, year); rows are
//! created lazily on first accrual or first balance query and are never
//! deleted. Each year starts its own row; unused balance does not carry
//! forward.
//!
//! Concurrency: every row sits behind its own mutex, so concurrent
//! `deduct` calls against the same balance serialize and the
//! `hours <= balance` check can never pass against a stale read. Different
//! rows are independent and may be mutated in parallel.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, RwLock};
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::LeaveType;

/// Key of a leave balance row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeaveKey {
    /// The employee the balance belongs to.
    pub employee_id: String,
    /// The leave type the balance tracks.
    pub leave_type: String,
    /// The calendar year of the row.
    pub year: i32,
}

impl LeaveKey {
    /// Creates a key from its parts.
    pub fn new(employee_id: impl Into<String>, leave_type: impl Into<String>, year: i32) -> Self {
        Self {
            employee_id: employee_id.into(),
            leave_type: leave_type.into(),
            year,
        }
    }
}

/// A leave balance row.
///
/// The audit counters `accrued_this_year` and `used_this_year` only ever
/// grow; an administrative adjustment changes the balance without touching
/// them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// Available hours. Never driven negative by `deduct`.
    pub balance: Decimal,
    /// Total hours accrued this year (including accrual beyond the banked
    /// ceiling).
    pub accrued_this_year: Decimal,
    /// Total hours deducted this year.
    pub used_this_year: Decimal,
    /// The date of the most recent accrual, used for per-month idempotence.
    pub last_accrual_date: Option<NaiveDate>,
}

/// The leave balance ledger.
///
/// # Example
///
/// ```
/// use payroll_engine::ledger::{LeaveKey, LeaveLedger};
/// use payroll_engine::models::LeaveType;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let ledger = LeaveLedger::new(vec![LeaveType {
///     id: "sick".to_string(),
///     name: "Sick Leave".to_string(),
///     accrual_rate: Some(Decimal::new(25, 1)),
///     requires_approval: true,
///     max_consecutive_days: None,
///     max_balance_hours: None,
///     is_active: true,
/// }]);
///
/// let key = LeaveKey::new("emp_001", "sick", 2026);
/// let on = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
/// ledger.accrue(&key, Decimal::new(40, 0), on).unwrap();
///
/// assert!(ledger.deduct(&key, Decimal::new(8, 0)).unwrap());
/// assert_eq!(ledger.balance(&key).balance, Decimal::new(32, 0));
/// ```
#[derive(Debug, Default)]
pub struct LeaveLedger {
    types: BTreeMap<String, LeaveType>,
    rows: RwLock<HashMap<LeaveKey, Arc<Mutex<LeaveBalance>>>>,
}

impl LeaveLedger {
    /// Creates a ledger over the given leave type catalog.
    pub fn new(types: Vec<LeaveType>) -> Self {
        Self {
            types: types.into_iter().map(|t| (t.id.clone(), t)).collect(),
            rows: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the leave types the ledger knows about.
    pub fn leave_types(&self) -> impl Iterator<Item = &LeaveType> {
        self.types.values()
    }

    /// Looks up a leave type, returning an error when absent.
    pub fn require_type(&self, id: &str) -> EngineResult<&LeaveType> {
        self.types
            .get(id)
            .ok_or_else(|| EngineError::UnknownLeaveType { id: id.to_string() })
    }

    /// Accrues hours onto a balance row.
    ///
    /// The balance is clamped to the leave type's ceiling after the add;
    /// accrual beyond the ceiling is still recorded in `accrued_this_year`
    /// but not banked. Returns the banked amount.
    pub fn accrue(&self, key: &LeaveKey, hours: Decimal, on: NaiveDate) -> EngineResult<Decimal> {
        if hours < Decimal::ZERO {
            return Err(EngineError::InvalidHours {
                operation: "accrue".to_string(),
                hours,
            });
        }
        let cap = self.require_type(&key.leave_type)?.max_balance_hours;

        let row = self.row(key);
        let mut balance = row.lock().expect("leave balance lock poisoned");

        let before = balance.balance;
        balance.balance += hours;
        if let Some(cap) = cap {
            balance.balance = balance.balance.min(cap);
        }
        balance.accrued_this_year += hours;
        balance.last_accrual_date = Some(on);

        Ok(balance.balance - before)
    }

    /// Accrues hours unless the row has already accrued in the month of
    /// `on`.
    ///
    /// The month check happens under the row lock, so two concurrent runs
    /// for the same month cannot both accrue. Returns `None` when the
    /// accrual was skipped as already done.
    pub fn accrue_monthly(
        &self,
        key: &LeaveKey,
        hours: Decimal,
        on: NaiveDate,
    ) -> EngineResult<Option<Decimal>> {
        if hours < Decimal::ZERO {
            return Err(EngineError::InvalidHours {
                operation: "accrue".to_string(),
                hours,
            });
        }
        let cap = self.require_type(&key.leave_type)?.max_balance_hours;

        let row = self.row(key);
        let mut balance = row.lock().expect("leave balance lock poisoned");

        if let Some(last) = balance.last_accrual_date {
            if last.year() == on.year() && last.month() == on.month() {
                return Ok(None);
            }
        }

        let before = balance.balance;
        balance.balance += hours;
        if let Some(cap) = cap {
            balance.balance = balance.balance.min(cap);
        }
        balance.accrued_this_year += hours;
        balance.last_accrual_date = Some(on);

        Ok(Some(balance.balance - before))
    }

    /// Deducts hours from a balance row.
    ///
    /// Returns `Ok(false)` without any mutation when the requested hours
    /// exceed the available balance; an insufficient balance is an
    /// expected business outcome, not an error. An unknown leave type is
    /// an error, the same as for accrual.
    pub fn deduct(&self, key: &LeaveKey, hours: Decimal) -> EngineResult<bool> {
        if hours < Decimal::ZERO {
            return Err(EngineError::InvalidHours {
                operation: "deduct".to_string(),
                hours,
            });
        }
        self.require_type(&key.leave_type)?;

        let row = self.row(key);
        let mut balance = row.lock().expect("leave balance lock poisoned");

        if hours > balance.balance {
            return Ok(false);
        }

        balance.balance -= hours;
        balance.used_this_year += hours;
        Ok(true)
    }

    /// Administratively overrides a row's balance.
    ///
    /// The audit counters are deliberately left untouched: the adjustment
    /// is visible as a balance/counter discrepancy rather than a rewritten
    /// history. Callers needing reconciled counters adjust them with
    /// separate operations.
    pub fn adjust(&self, key: &LeaveKey, new_balance: Decimal, reason: &str) {
        let row = self.row(key);
        let mut balance = row.lock().expect("leave balance lock poisoned");

        info!(
            employee = %key.employee_id,
            leave_type = %key.leave_type,
            year = key.year,
            old = %balance.balance,
            new = %new_balance,
            reason,
            "leave balance adjusted"
        );
        balance.balance = new_balance;
    }

    /// Returns a snapshot of a balance row, creating it lazily.
    pub fn balance(&self, key: &LeaveKey) -> LeaveBalance {
        let row = self.row(key);
        let balance = row.lock().expect("leave balance lock poisoned");
        balance.clone()
    }

    /// Fetches or lazily creates the row for a key.
    fn row(&self, key: &LeaveKey) -> Arc<Mutex<LeaveBalance>> {
        {
            let rows = self.rows.read().expect("leave ledger lock poisoned");
            if let Some(row) = rows.get(key) {
                return Arc::clone(row);
            }
        }
        let mut rows = self.rows.write().expect("leave ledger lock poisoned");
        Arc::clone(
            rows.entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(LeaveBalance::default()))),
        )
    }
}
