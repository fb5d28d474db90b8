//! Policy-driven payroll computation and leave-balance ledger.
//!
//! This crate converts raw attendance events (clock-in/out intervals, absence
//! codes) into pay components under a prioritized set of configurable pay
//! rules, splits worked hours into regular/overtime bands, and maintains a
//! consistent, auditable leave-balance ledger that accrues and deducts hours
//! under concurrent approval workflows.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
