//! Pay code model and catalog.
//!
//! Pay codes classify time entries for payroll: regular work, overtime,
//! and absence codes (sick, vacation, unpaid). Absence codes carry the
//! configuration that links an approved absence to a leave-type balance.
//!
//! The configuration is a strongly-typed struct validated at load time,
//! replacing the JSON-encoded configuration blobs the legacy system stored
//! per code.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::error::{EngineError, EngineResult};

/// Typed configuration for a pay code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayCodeConfig {
    /// Multiplier applied to the employee's base rate (must be >= 0).
    #[serde(default = "default_pay_rate_factor")]
    pub pay_rate_factor: Decimal,
    /// Whether an absence under this code is paid. Only meaningful for
    /// absence codes.
    #[serde(default)]
    pub is_paid: bool,
    /// Whether an absence under this code requires manager approval.
    #[serde(default)]
    pub requires_approval: bool,
    /// Maximum hours that may be logged under this code in one day.
    #[serde(default)]
    pub max_hours_per_day: Option<Decimal>,
    /// Maximum consecutive days this code may be used.
    #[serde(default)]
    pub max_consecutive_days: Option<u32>,
    /// Whether an approved absence deducts from a leave balance.
    #[serde(default)]
    pub deducts_from_balance: bool,
    /// The leave type whose balance is deducted. Required when
    /// `deducts_from_balance` is true.
    #[serde(default)]
    pub linked_leave_type: Option<String>,
}

fn default_pay_rate_factor() -> Decimal {
    Decimal::ONE
}

impl Default for PayCodeConfig {
    fn default() -> Self {
        Self {
            pay_rate_factor: Decimal::ONE,
            is_paid: false,
            requires_approval: false,
            max_hours_per_day: None,
            max_consecutive_days: None,
            deducts_from_balance: false,
            linked_leave_type: None,
        }
    }
}

/// A pay code definition.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PayCode, PayCodeConfig};
/// use rust_decimal::Decimal;
///
/// let code = PayCode {
///     code: "OT".to_string(),
///     description: "Overtime at time-and-a-half".to_string(),
///     is_absence: false,
///     is_active: true,
///     config: PayCodeConfig {
///         pay_rate_factor: Decimal::new(15, 1),
///         ..PayCodeConfig::default()
///     },
/// };
/// assert!(code.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayCode {
    /// Unique code string (e.g., "SICK_PAY").
    pub code: String,
    /// Human-readable description.
    pub description: String,
    /// Whether this code represents an absence rather than worked time.
    #[serde(default)]
    pub is_absence: bool,
    /// Whether the code is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Typed configuration for the code.
    #[serde(default)]
    pub config: PayCodeConfig,
}

fn default_true() -> bool {
    true
}

impl PayCode {
    /// Validates the pay code definition.
    ///
    /// A code that deducts from a balance must name the leave type it
    /// deducts from, and the rate factor must be non-negative.
    pub fn validate(&self) -> EngineResult<()> {
        if self.config.pay_rate_factor < Decimal::ZERO {
            return Err(EngineError::InvalidPayCode {
                code: self.code.clone(),
                message: "pay_rate_factor must be non-negative".to_string(),
            });
        }
        if self.config.deducts_from_balance && self.config.linked_leave_type.is_none() {
            return Err(EngineError::InvalidPayCode {
                code: self.code.clone(),
                message: "deducts_from_balance requires a linked leave type".to_string(),
            });
        }
        Ok(())
    }
}

/// Catalog of pay codes keyed by code string.
///
/// Invalid definitions are skipped with a logged warning rather than
/// aborting catalog construction, so one malformed code never takes down
/// the rest of the catalog.
#[derive(Debug, Clone, Default)]
pub struct PayCodeCatalog {
    codes: BTreeMap<String, PayCode>,
}

impl PayCodeCatalog {
    /// Creates a catalog from a list of definitions, skipping invalid ones.
    pub fn new(codes: Vec<PayCode>) -> Self {
        let mut catalog = Self::default();
        for code in codes {
            catalog.insert(code);
        }
        catalog
    }

    /// Inserts a pay code, replacing any existing definition with the same
    /// code. Invalid definitions are skipped with a warning.
    pub fn insert(&mut self, code: PayCode) {
        if let Err(e) = code.validate() {
            warn!(code = %code.code, error = %e, "skipping invalid pay code");
            return;
        }
        self.codes.insert(code.code.clone(), code);
    }

    /// Looks up a pay code by its code string.
    pub fn get(&self, code: &str) -> Option<&PayCode> {
        self.codes.get(code)
    }

    /// Looks up a pay code, returning an error when absent.
    pub fn require(&self, code: &str) -> EngineResult<&PayCode> {
        self.get(code).ok_or_else(|| EngineError::UnknownPayCode {
            code: code.to_string(),
        })
    }

    /// Returns all active absence codes, ordered by code.
    pub fn active_absence_codes(&self) -> impl Iterator<Item = &PayCode> {
        self.codes
            .values()
            .filter(|c| c.is_absence && c.is_active)
    }

    /// Returns the number of codes in the catalog.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true when the catalog holds no codes.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Builds the standard seed catalog: regular work, overtime, and the
    /// common absence codes.
    pub fn standard() -> Self {
        Self::new(vec![
            PayCode {
                code: "REG".to_string(),
                description: "Regular worked hours".to_string(),
                is_absence: false,
                is_active: true,
                config: PayCodeConfig::default(),
            },
            PayCode {
                code: "OT".to_string(),
                description: "Overtime at time-and-a-half".to_string(),
                is_absence: false,
                is_active: true,
                config: PayCodeConfig {
                    pay_rate_factor: Decimal::new(15, 1),
                    ..PayCodeConfig::default()
                },
            },
            PayCode {
                code: "SICK_PAY".to_string(),
                description: "Paid sick leave".to_string(),
                is_absence: true,
                is_active: true,
                config: PayCodeConfig {
                    is_paid: true,
                    requires_approval: true,
                    deducts_from_balance: true,
                    linked_leave_type: Some("sick".to_string()),
                    max_hours_per_day: Some(Decimal::new(8, 0)),
                    ..PayCodeConfig::default()
                },
            },
            PayCode {
                code: "VAC".to_string(),
                description: "Paid vacation leave".to_string(),
                is_absence: true,
                is_active: true,
                config: PayCodeConfig {
                    is_paid: true,
                    requires_approval: true,
                    deducts_from_balance: true,
                    linked_leave_type: Some("annual".to_string()),
                    ..PayCodeConfig::default()
                },
            },
            PayCode {
                code: "UNPAID".to_string(),
                description: "Unpaid absence".to_string(),
                is_absence: true,
                is_active: true,
                config: PayCodeConfig {
                    pay_rate_factor: Decimal::ZERO,
                    requires_approval: true,
                    ..PayCodeConfig::default()
                },
            },
        ])
    }
}
