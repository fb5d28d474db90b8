//! Time ledger: attendance rows and their lifecycle.
//!
//! The ledger stores one row per time entry. Entries enter either through
//! the clock-in/clock-out lifecycle or through `finalize`, the interface
//! the time-tracking subsystem uses to hand over an already-closed entry.
//! Open entries are never accepted by `finalize`, and an employee can have
//! at most one open entry at a time.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{AbsenceDetail, PayCodeCatalog, PayPeriod, TimeEntry};

/// In-memory store of time entries, one row per entry.
#[derive(Debug, Clone, Default)]
pub struct TimeLedger {
    entries: Vec<TimeEntry>,
}

impl TimeLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new entry for an employee at the given instant.
    ///
    /// Fails when the employee already has an open entry; an employee has
    /// at most one open entry at a time.
    pub fn clock_in(
        &mut self,
        employee_id: impl Into<String>,
        at: NaiveDateTime,
    ) -> EngineResult<Uuid> {
        let employee_id = employee_id.into();

        if let Some(open) = self.open_entry_for(&employee_id) {
            return Err(EngineError::InvalidTimeEntry {
                entry_id: open.id.to_string(),
                message: format!("employee {employee_id} already has an open entry"),
            });
        }

        let entry = TimeEntry::open(employee_id, at);
        let id = entry.id;
        self.entries.push(entry);
        Ok(id)
    }

    /// Closes an open entry at the given instant, recording any unpaid
    /// break minutes accumulated during the interval.
    pub fn clock_out(
        &mut self,
        id: Uuid,
        at: NaiveDateTime,
        break_minutes: i64,
    ) -> EngineResult<()> {
        let entry = self.entry_mut(id)?;
        entry.add_break_minutes(break_minutes)?;
        entry.close(at)
    }

    /// Accepts a closed entry from the time-tracking subsystem.
    ///
    /// Rejects open entries and entries whose interval is inconsistent
    /// (clock-out not strictly after clock-in, or breaks consuming the
    /// whole interval).
    pub fn finalize(&mut self, entry: TimeEntry) -> EngineResult<Uuid> {
        let Some(clock_out) = entry.clock_out else {
            return Err(EngineError::InvalidTimeEntry {
                entry_id: entry.id.to_string(),
                message: "cannot finalize an open entry".to_string(),
            });
        };
        if clock_out <= entry.clock_in {
            return Err(EngineError::InvalidTimeEntry {
                entry_id: entry.id.to_string(),
                message: "clock-out must be strictly after clock-in".to_string(),
            });
        }
        if entry.total_hours() <= Decimal::ZERO {
            return Err(EngineError::InvalidTimeEntry {
                entry_id: entry.id.to_string(),
                message: "breaks consume the whole interval".to_string(),
            });
        }

        let id = entry.id;
        self.entries.push(entry);
        Ok(id)
    }

    /// Logs an absence entry for an employee on a given date.
    ///
    /// The entry starts at 09:00 and spans the requested hours. When the
    /// pay code does not require approval the entry is approved
    /// immediately with the logging manager as approver.
    pub fn log_absence(
        &mut self,
        employee_id: impl Into<String>,
        date: NaiveDate,
        code: &str,
        hours: Decimal,
        reason: Option<String>,
        manager: &str,
        catalog: &PayCodeCatalog,
    ) -> EngineResult<Uuid> {
        let employee_id = employee_id.into();
        let pay_code = catalog.require(code)?;

        if !pay_code.is_absence || !pay_code.is_active {
            return Err(EngineError::InvalidPayCode {
                code: code.to_string(),
                message: "not an active absence code".to_string(),
            });
        }
        if hours <= Decimal::ZERO {
            return Err(EngineError::InvalidHours {
                operation: "log_absence".to_string(),
                hours,
            });
        }
        if self
            .entries
            .iter()
            .any(|e| e.employee_id == employee_id && e.work_date() == date)
        {
            return Err(EngineError::InvalidTimeEntry {
                entry_id: format!("{employee_id}@{date}"),
                message: "an entry already exists for this employee and date".to_string(),
            });
        }

        let minutes = (hours * Decimal::new(60, 0))
            .round()
            .to_i64()
            .ok_or_else(|| EngineError::InvalidHours {
                operation: "log_absence".to_string(),
                hours,
            })?;
        let start = date
            .and_hms_opt(9, 0, 0)
            .ok_or_else(|| EngineError::InvalidTimeEntry {
                entry_id: format!("{employee_id}@{date}"),
                message: "invalid absence date".to_string(),
            })?;
        let end = start + chrono::Duration::minutes(minutes);

        let mut entry = TimeEntry::open(employee_id, start);
        entry.absence = Some(AbsenceDetail {
            pay_code: code.to_string(),
            reason,
            approved_by: None,
            approved_at: None,
        });
        entry.close(end)?;

        if !pay_code.config.requires_approval {
            entry.record_approval(manager, start)?;
        }

        let id = entry.id;
        self.entries.push(entry);
        Ok(id)
    }

    /// Returns the employee's open entry, if any.
    pub fn open_entry_for(&self, employee_id: &str) -> Option<&TimeEntry> {
        self.entries
            .iter()
            .find(|e| e.employee_id == employee_id && e.is_open())
    }

    /// Returns the employee's entries whose work date falls in the period.
    pub fn entries_for(&self, employee_id: &str, period: &PayPeriod) -> Vec<&TimeEntry> {
        self.entries
            .iter()
            .filter(|e| e.employee_id == employee_id && period.contains_date(e.work_date()))
            .collect()
    }

    /// Looks up an entry by ID.
    pub fn entry(&self, id: Uuid) -> Option<&TimeEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Returns the number of entries in the ledger.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the ledger holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entry_mut(&mut self, id: Uuid) -> EngineResult<&mut TimeEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| EngineError::InvalidTimeEntry {
                entry_id: id.to_string(),
                message: "entry not found".to_string(),
            })
    }

    /// Inserts a row without validation; used to model pre-existing stored
    /// rows in tests.
    #[cfg(test)]
    pub(crate) fn insert_unchecked(&mut self, entry: TimeEntry) {
        self.entries.push(entry);
    }
}
