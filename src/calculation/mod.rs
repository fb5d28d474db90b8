//! Calculation logic for the payroll engine.
//!
//! This module contains the rule engine that evaluates pay rules against
//! time entries, the pure overtime tiering function that splits worked
//! hours into regular/1.5x/2.0x bands, and the payroll compiler that
//! orchestrates both across a pay period.

mod compiler;
mod overtime_tiering;
mod rule_engine;

pub use compiler::{CompilerConfig, PayrollCompiler};
pub use overtime_tiering::{
    DEFAULT_DAILY_OVERTIME_THRESHOLD, DEFAULT_TIER_ONE_SPAN, TierSplit, tier,
};
pub use rule_engine::{RuleContext, RuleEngine};
