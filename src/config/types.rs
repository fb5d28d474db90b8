//! Configuration types for the payroll policy.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{LeaveType, PayCode, PayRule};

/// Metadata about the payroll policy.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyMetadata {
    /// The policy name (e.g., "Default Hospital Payroll Policy").
    pub name: String,
    /// The version or effective date of the policy.
    pub version: String,
    /// A description of the policy.
    #[serde(default)]
    pub description: String,
}

/// Overtime settings from policy.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimeSettings {
    /// Hours before overtime starts for a time entry.
    pub daily_threshold_hours: Decimal,
    /// Width of the 1.5x band; hours beyond it pay 2.0x.
    pub tier_one_span_hours: Decimal,
}

/// Policy configuration file structure (policy.yaml).
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyFile {
    /// Policy metadata.
    pub policy: PolicyMetadata,
    /// Overtime tiering settings.
    pub overtime: OvertimeSettings,
}

/// Pay rules configuration file structure (pay_rules.yaml).
#[derive(Debug, Clone, Deserialize)]
pub struct PayRulesFile {
    /// The rule definitions.
    pub rules: Vec<PayRule>,
}

/// Pay codes configuration file structure (pay_codes.yaml).
#[derive(Debug, Clone, Deserialize)]
pub struct PayCodesFile {
    /// The pay code definitions.
    pub pay_codes: Vec<PayCode>,
}

/// Leave types configuration file structure (leave_types.yaml).
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveTypesFile {
    /// The leave type definitions.
    pub leave_types: Vec<LeaveType>,
}
