//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load a payroll policy from YAML
//! files: pay rules, pay codes, leave types, and overtime settings.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Loaded policy: {}", config.policy().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    LeaveTypesFile, OvertimeSettings, PayCodesFile, PayRulesFile, PolicyFile, PolicyMetadata,
};
