//! Data models for the payroll engine.

mod employee;
mod leave_type;
mod pay_calculation;
mod pay_code;
mod pay_period;
mod pay_rule;
mod time_entry;

pub use employee::Employee;
pub use leave_type::LeaveType;
pub use pay_calculation::{
    ComponentValue, EntryException, PayCalculation, PayComponent, PayrollRunReport,
};
pub use pay_code::{PayCode, PayCodeCatalog, PayCodeConfig};
pub use pay_period::PayPeriod;
pub use pay_rule::{PayRule, RuleAction, RuleConditions, RuleSet, TimeRange};
pub use time_entry::{AbsenceDetail, TimeEntry};
