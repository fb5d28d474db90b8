//! Stateful ledgers and their invariants.
//!
//! This module contains the time ledger (attendance rows and their
//! lifecycle), the leave ledger (per employee/type/year balance rows with
//! accrual and deduction invariants), the absence approval linkage between
//! pay codes and leave balances, and the monthly accrual scheduler.

mod absence;
mod accrual;
mod leave_ledger;
mod time_ledger;

pub use absence::{ApprovalOutcome, approve_absence, validate_absence};
pub use accrual::{AccrualRunReport, AccrualScheduler};
pub use leave_ledger::{LeaveBalance, LeaveKey, LeaveLedger};
pub use time_ledger::TimeLedger;
