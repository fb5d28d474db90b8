//! Absence approval and its linkage to leave balances.
//!
//! Approval is the point where an absence touches a leave balance: a pay
//! code configured with `deducts_from_balance` deducts the entry's hours
//! from the linked leave type at approval time, not at logging time. The
//! deduction happens before the approval is recorded, so an entry is never
//! marked approved with an unpaid-for balance.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::ledger::{LeaveKey, LeaveLedger, TimeLedger};
use crate::models::PayCodeCatalog;

/// Result of an approval attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ApprovalOutcome {
    /// The absence was approved. `deducted` is the number of hours taken
    /// from the linked leave balance (zero for codes that do not deduct).
    Approved {
        /// Hours deducted from the linked balance.
        deducted: Decimal,
    },
    /// The linked leave balance could not cover the absence; nothing was
    /// approved or deducted.
    InsufficientBalance {
        /// Hours available on the linked balance.
        available: Decimal,
    },
}

/// Validates an absence request before it is logged.
///
/// Returns a list of human-readable problems; an empty list means the
/// request is acceptable. Validation is advisory only and performs no
/// mutation, so a race against a concurrent deduction is still resolved
/// at approval time.
pub fn validate_absence(
    catalog: &PayCodeCatalog,
    leave_ledger: &LeaveLedger,
    employee_id: &str,
    code: &str,
    date: NaiveDate,
    hours: Decimal,
) -> Vec<String> {
    let mut problems = Vec::new();

    let Some(pay_code) = catalog.get(code) else {
        problems.push(format!("unknown pay code '{code}'"));
        return problems;
    };
    if !pay_code.is_absence || !pay_code.is_active {
        problems.push(format!("'{code}' is not an active absence code"));
    }
    if hours <= Decimal::ZERO {
        problems.push("hours must be positive".to_string());
    }
    if let Some(max) = pay_code.config.max_hours_per_day {
        if hours > max {
            problems.push(format!("{hours} hours exceeds the daily maximum of {max}"));
        }
    }
    if pay_code.config.deducts_from_balance {
        if let Some(leave_type) = &pay_code.config.linked_leave_type {
            let key = LeaveKey::new(employee_id, leave_type.clone(), date.year());
            let available = leave_ledger.balance(&key).balance;
            if hours > available {
                problems.push(format!(
                    "insufficient {leave_type} balance: {available} hours available, {hours} requested"
                ));
            }
        }
    }

    problems
}

/// Approves a logged absence, deducting from the linked leave balance.
///
/// Deduction and approval are ordered so the entry only becomes approved
/// once the balance has actually been charged. A balance that cannot
/// cover the hours is reported as [`ApprovalOutcome::InsufficientBalance`]
/// and leaves both the entry and the balance untouched.
pub fn approve_absence(
    time_ledger: &mut TimeLedger,
    entry_id: Uuid,
    approver: &str,
    at: NaiveDateTime,
    catalog: &PayCodeCatalog,
    leave_ledger: &LeaveLedger,
) -> EngineResult<ApprovalOutcome> {
    let entry = time_ledger
        .entry(entry_id)
        .ok_or_else(|| EngineError::InvalidTimeEntry {
            entry_id: entry_id.to_string(),
            message: "entry not found".to_string(),
        })?;
    let absence = entry
        .absence
        .as_ref()
        .ok_or_else(|| EngineError::InvalidTimeEntry {
            entry_id: entry_id.to_string(),
            message: "entry is not an absence".to_string(),
        })?;
    if absence.is_approved() {
        return Err(EngineError::InvalidTimeEntry {
            entry_id: entry_id.to_string(),
            message: "absence is already approved".to_string(),
        });
    }

    let pay_code = catalog.require(&absence.pay_code)?;
    let hours = entry.total_hours();
    let year = entry.work_date().year();
    let employee_id = entry.employee_id.clone();

    let mut deducted = Decimal::ZERO;
    if pay_code.config.deducts_from_balance {
        let leave_type = pay_code.config.linked_leave_type.as_ref().ok_or_else(|| {
            EngineError::InvalidPayCode {
                code: pay_code.code.clone(),
                message: "deducts_from_balance requires a linked leave type".to_string(),
            }
        })?;
        let key = LeaveKey::new(employee_id, leave_type.clone(), year);
        if !leave_ledger.deduct(&key, hours)? {
            return Ok(ApprovalOutcome::InsufficientBalance {
                available: leave_ledger.balance(&key).balance,
            });
        }
        deducted = hours;
    }

    time_ledger.entry_mut(entry_id)?.record_approval(approver, at)?;
    Ok(ApprovalOutcome::Approved { deducted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeaveType;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn leave_ledger() -> LeaveLedger {
        LeaveLedger::new(vec![LeaveType {
            id: "sick".to_string(),
            name: "Sick Leave".to_string(),
            accrual_rate: Some(dec("2.5")),
            requires_approval: true,
            max_consecutive_days: None,
            max_balance_hours: None,
            is_active: true,
        }])
    }

    fn log_sick_day(time_ledger: &mut TimeLedger, catalog: &PayCodeCatalog) -> Uuid {
        time_ledger
            .log_absence(
                "emp_001",
                make_date("2026-03-10"),
                "SICK_PAY",
                dec("8"),
                Some("flu".to_string()),
                "mgr_001",
                catalog,
            )
            .unwrap()
    }

    #[test]
    fn test_approval_deducts_linked_balance() {
        let catalog = PayCodeCatalog::standard();
        let leave = leave_ledger();
        let key = LeaveKey::new("emp_001", "sick", 2026);
        leave.adjust(&key, dec("40"), "seed");

        let mut time = TimeLedger::new();
        let id = log_sick_day(&mut time, &catalog);

        let outcome = approve_absence(
            &mut time,
            id,
            "mgr_001",
            make_datetime("2026-03-10", "10:00:00"),
            &catalog,
            &leave,
        )
        .unwrap();

        assert_eq!(outcome, ApprovalOutcome::Approved { deducted: dec("8") });
        let snapshot = leave.balance(&key);
        assert_eq!(snapshot.balance, dec("32"));
        assert_eq!(snapshot.used_this_year, dec("8"));
        assert!(time.entry(id).unwrap().absence.as_ref().unwrap().is_approved());
    }

    #[test]
    fn test_approval_blocked_by_insufficient_balance() {
        let catalog = PayCodeCatalog::standard();
        let leave = leave_ledger();
        let key = LeaveKey::new("emp_001", "sick", 2026);
        leave.adjust(&key, dec("5"), "seed");

        let mut time = TimeLedger::new();
        let id = log_sick_day(&mut time, &catalog);

        let outcome = approve_absence(
            &mut time,
            id,
            "mgr_001",
            make_datetime("2026-03-10", "10:00:00"),
            &catalog,
            &leave,
        )
        .unwrap();

        assert_eq!(
            outcome,
            ApprovalOutcome::InsufficientBalance { available: dec("5") }
        );
        // Neither the balance nor the entry changed.
        assert_eq!(leave.balance(&key).balance, dec("5"));
        assert!(!time.entry(id).unwrap().absence.as_ref().unwrap().is_approved());
    }

    #[test]
    fn test_double_approval_rejected() {
        let catalog = PayCodeCatalog::standard();
        let leave = leave_ledger();
        let key = LeaveKey::new("emp_001", "sick", 2026);
        leave.adjust(&key, dec("40"), "seed");

        let mut time = TimeLedger::new();
        let id = log_sick_day(&mut time, &catalog);
        let at = make_datetime("2026-03-10", "10:00:00");

        approve_absence(&mut time, id, "mgr_001", at, &catalog, &leave).unwrap();
        let second = approve_absence(&mut time, id, "mgr_002", at, &catalog, &leave);

        assert!(second.is_err());
        // The balance was only charged once.
        assert_eq!(leave.balance(&key).balance, dec("32"));
    }

    #[test]
    fn test_approval_of_non_absence_entry_rejected() {
        let catalog = PayCodeCatalog::standard();
        let leave = leave_ledger();
        let mut time = TimeLedger::new();

        let id = time
            .clock_in("emp_001", make_datetime("2026-03-10", "09:00:00"))
            .unwrap();
        time.clock_out(id, make_datetime("2026-03-10", "17:00:00"), 0)
            .unwrap();

        let result = approve_absence(
            &mut time,
            id,
            "mgr_001",
            make_datetime("2026-03-10", "18:00:00"),
            &catalog,
            &leave,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_flags_all_problems() {
        let catalog = PayCodeCatalog::standard();
        let leave = leave_ledger();

        // 12 hours of sick pay against an empty balance: exceeds the daily
        // maximum and the available balance.
        let problems = validate_absence(
            &catalog,
            &leave,
            "emp_001",
            "SICK_PAY",
            make_date("2026-03-10"),
            dec("12"),
        );
        assert_eq!(problems.len(), 2);
    }

    #[test]
    fn test_validate_passes_clean_request() {
        let catalog = PayCodeCatalog::standard();
        let leave = leave_ledger();
        let key = LeaveKey::new("emp_001", "sick", 2026);
        leave.adjust(&key, dec("40"), "seed");

        let problems = validate_absence(
            &catalog,
            &leave,
            "emp_001",
            "SICK_PAY",
            make_date("2026-03-10"),
            dec("8"),
        );
        assert!(problems.is_empty());
    }

    #[test]
    fn test_validate_unknown_code_short_circuits() {
        let catalog = PayCodeCatalog::standard();
        let leave = leave_ledger();

        let problems = validate_absence(
            &catalog,
            &leave,
            "emp_001",
            "NOPE",
            make_date("2026-03-10"),
            dec("8"),
        );
        assert_eq!(problems, vec!["unknown pay code 'NOPE'".to_string()]);
    }
}
