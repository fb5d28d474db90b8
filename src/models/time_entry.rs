//! Time entry model and lifecycle.
//!
//! This module defines the TimeEntry struct representing a single work
//! interval (clock-in to clock-out, minus breaks) or a logged absence.
//!
//! Lifecycle: an entry is created open on clock-in, mutated by clock-out and
//! break events, and closed permanently once the clock-out instant is set.
//! After close the only permitted mutation is recording absence approval
//! metadata.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// Absence metadata attached to a time entry that represents an absence
/// rather than worked time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsenceDetail {
    /// The absence pay code (e.g., "SICK_PAY").
    pub pay_code: String,
    /// Free-text reason supplied when the absence was logged.
    pub reason: Option<String>,
    /// The employee ID of the approver, once approved.
    pub approved_by: Option<String>,
    /// The instant of approval, once approved.
    pub approved_at: Option<NaiveDateTime>,
}

impl AbsenceDetail {
    /// Returns true once the absence has been approved.
    pub fn is_approved(&self) -> bool {
        self.approved_at.is_some()
    }
}

/// Represents a single attendance interval for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// The employee this entry belongs to.
    pub employee_id: String,
    /// The clock-in instant.
    pub clock_in: NaiveDateTime,
    /// The clock-out instant. `None` while the entry is open.
    pub clock_out: Option<NaiveDateTime>,
    /// Total unpaid break minutes recorded for the entry.
    #[serde(default)]
    pub break_minutes: i64,
    /// Optional payroll pay code applied to the entry (e.g., "OT").
    #[serde(default)]
    pub pay_code: Option<String>,
    /// Absence metadata when this entry represents an absence.
    #[serde(default)]
    pub absence: Option<AbsenceDetail>,
}

impl TimeEntry {
    /// Creates a new open entry at the given clock-in instant.
    pub fn open(employee_id: impl Into<String>, clock_in: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: employee_id.into(),
            clock_in,
            clock_out: None,
            break_minutes: 0,
            pay_code: None,
            absence: None,
        }
    }

    /// Returns true while the entry has no clock-out instant.
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Returns true once the entry has been closed.
    pub fn is_closed(&self) -> bool {
        self.clock_out.is_some()
    }

    /// Closes the entry at the given clock-out instant.
    ///
    /// Fails if the entry is already closed, or if the clock-out instant is
    /// not strictly after the clock-in instant.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::TimeEntry;
    /// use chrono::NaiveDateTime;
    ///
    /// let start = NaiveDateTime::parse_from_str("2026-01-15 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// let end = NaiveDateTime::parse_from_str("2026-01-15 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    ///
    /// let mut entry = TimeEntry::open("emp_001", start);
    /// entry.close(end).unwrap();
    /// assert!(entry.is_closed());
    /// ```
    pub fn close(&mut self, clock_out: NaiveDateTime) -> EngineResult<()> {
        if self.is_closed() {
            return Err(EngineError::InvalidTimeEntry {
                entry_id: self.id.to_string(),
                message: "entry is already closed".to_string(),
            });
        }
        if clock_out <= self.clock_in {
            return Err(EngineError::InvalidTimeEntry {
                entry_id: self.id.to_string(),
                message: "clock-out must be strictly after clock-in".to_string(),
            });
        }
        self.clock_out = Some(clock_out);
        Ok(())
    }

    /// Adds unpaid break minutes to an open entry.
    pub fn add_break_minutes(&mut self, minutes: i64) -> EngineResult<()> {
        if self.is_closed() {
            return Err(EngineError::InvalidTimeEntry {
                entry_id: self.id.to_string(),
                message: "cannot add breaks to a closed entry".to_string(),
            });
        }
        self.break_minutes += minutes;
        Ok(())
    }

    /// Records absence approval metadata.
    ///
    /// This is the only mutation permitted after close. Fails if the entry
    /// carries no absence detail.
    pub fn record_approval(
        &mut self,
        approver: impl Into<String>,
        at: NaiveDateTime,
    ) -> EngineResult<()> {
        match self.absence.as_mut() {
            Some(absence) => {
                absence.approved_by = Some(approver.into());
                absence.approved_at = Some(at);
                Ok(())
            }
            None => Err(EngineError::InvalidTimeEntry {
                entry_id: self.id.to_string(),
                message: "entry has no absence to approve".to_string(),
            }),
        }
    }

    /// Calculates the total worked hours for the entry.
    ///
    /// Total hours are the clock-in to clock-out duration minus recorded
    /// break minutes, as a Decimal with minute precision. An open entry has
    /// zero total hours.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::TimeEntry;
    /// use chrono::NaiveDateTime;
    /// use rust_decimal::Decimal;
    ///
    /// let start = NaiveDateTime::parse_from_str("2026-01-15 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// let end = NaiveDateTime::parse_from_str("2026-01-15 17:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
    ///
    /// let mut entry = TimeEntry::open("emp_001", start);
    /// entry.add_break_minutes(30).unwrap();
    /// entry.close(end).unwrap();
    /// assert_eq!(entry.total_hours(), Decimal::new(80, 1)); // 8.0 hours
    /// ```
    pub fn total_hours(&self) -> Decimal {
        let Some(clock_out) = self.clock_out else {
            return Decimal::ZERO;
        };

        let total_minutes = (clock_out - self.clock_in).num_minutes();
        let worked_minutes = total_minutes - self.break_minutes;

        Decimal::new(worked_minutes, 0) / Decimal::new(60, 0)
    }

    /// Returns the work date (the date of clock-in).
    pub fn work_date(&self) -> NaiveDate {
        self.clock_in.date()
    }

    /// Returns the day of the week of the clock-in instant.
    pub fn day_of_week(&self) -> Weekday {
        self.clock_in.weekday()
    }

    /// Returns the hour of day (0-23) of the clock-in instant.
    pub fn start_hour(&self) -> u32 {
        self.clock_in.hour()
    }
}
