//! Pay period model.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A pay period defining the date window for a payroll compilation.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod {
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(),
/// };
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 7).unwrap()));
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Checks if a given date falls within this pay period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Checks if an instant's date falls within this pay period.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.contains_date(instant.date())
    }

    /// Returns the calendar year of the period start, used to key leave
    /// balance rows.
    pub fn year(&self) -> i32 {
        self.start_date.year()
    }
}
