//! Leave type model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A category of leave (annual, sick, unpaid, ...) with its accrual policy.
///
/// The `accrual_rate` is expressed in hours per accrual cycle (the cycle is
/// monthly) and is applied by the scheduler unmodified — rates are stored
/// already normalized to the cycle rather than as an annual figure divided
/// at accrual time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveType {
    /// Unique identifier (e.g., "annual", "sick").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Hours accrued per accrual cycle. `None` or zero means the type does
    /// not accrue automatically.
    #[serde(default)]
    pub accrual_rate: Option<Decimal>,
    /// Whether absences of this type require approval.
    #[serde(default)]
    pub requires_approval: bool,
    /// Maximum consecutive days of this leave type.
    #[serde(default)]
    pub max_consecutive_days: Option<u32>,
    /// Ceiling on the banked balance; accrual beyond it is recorded in the
    /// accrued counter but not banked.
    #[serde(default)]
    pub max_balance_hours: Option<Decimal>,
    /// Whether the type is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl LeaveType {
    /// Returns the accrual rate when the type accrues: active with a
    /// positive rate.
    pub fn effective_accrual_rate(&self) -> Option<Decimal> {
        if !self.is_active {
            return None;
        }
        self.accrual_rate.filter(|rate| *rate > Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        use std::str::FromStr;
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_effective_accrual_rate_positive() {
        let leave_type = LeaveType {
            id: "annual".to_string(),
            name: "Annual Leave".to_string(),
            accrual_rate: Some(dec("10")),
            requires_approval: true,
            max_consecutive_days: None,
            max_balance_hours: Some(dec("160")),
            is_active: true,
        };
        assert_eq!(leave_type.effective_accrual_rate(), Some(dec("10")));
    }

    #[test]
    fn test_zero_or_missing_rate_does_not_accrue() {
        let mut leave_type = LeaveType {
            id: "unpaid".to_string(),
            name: "Unpaid Leave".to_string(),
            accrual_rate: None,
            requires_approval: true,
            max_consecutive_days: None,
            max_balance_hours: None,
            is_active: true,
        };
        assert_eq!(leave_type.effective_accrual_rate(), None);

        leave_type.accrual_rate = Some(Decimal::ZERO);
        assert_eq!(leave_type.effective_accrual_rate(), None);
    }

    #[test]
    fn test_inactive_type_does_not_accrue() {
        let leave_type = LeaveType {
            id: "legacy".to_string(),
            name: "Legacy Leave".to_string(),
            accrual_rate: Some(dec("5")),
            requires_approval: false,
            max_consecutive_days: None,
            max_balance_hours: None,
            is_active: false,
        };
        assert_eq!(leave_type.effective_accrual_rate(), None);
    }

    #[test]
    fn test_yaml_defaults() {
        let yaml = r#"
id: sick
name: Sick Leave
accrual_rate: "2.5"
"#;
        let leave_type: LeaveType = serde_yaml::from_str(yaml).unwrap();
        assert!(leave_type.is_active);
        assert!(!leave_type.requires_approval);
        assert_eq!(leave_type.max_balance_hours, None);
    }
}
