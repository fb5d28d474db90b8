//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a payroll
//! policy from YAML files.

use std::fs;
use std::path::Path;
use tracing::warn;

use crate::calculation::CompilerConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveType, PayCodeCatalog, RuleSet};

use super::types::{LeaveTypesFile, PayCodesFile, PayRulesFile, PolicyFile, PolicyMetadata};

/// Loads and provides access to a payroll policy.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// provides the loaded ruleset, pay code catalog, and leave types.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/
/// ├── policy.yaml      # Policy metadata and overtime settings
/// ├── pay_rules.yaml   # Pay rule definitions
/// ├── pay_codes.yaml   # Pay code definitions
/// └── leave_types.yaml # Leave type definitions
/// ```
///
/// Individual definitions that fail validation are skipped with a logged
/// warning; one malformed rule or code never takes down the rest of the
/// policy. A file that is missing or fails to parse is still a hard error.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// println!("Loaded policy: {}", loader.policy().name);
/// println!("{} pay codes", loader.pay_codes().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: PolicyMetadata,
    compiler_config: CompilerConfig,
    ruleset: RuleSet,
    pay_codes: PayCodeCatalog,
    leave_types: Vec<LeaveType>,
}

impl ConfigLoader {
    /// Loads a policy from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error when a required file is missing
    /// ([`EngineError::ConfigNotFound`]) or contains invalid YAML
    /// ([`EngineError::ConfigParseError`]).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy_file = Self::load_yaml::<PolicyFile>(&path.join("policy.yaml"))?;
        let rules_file = Self::load_yaml::<PayRulesFile>(&path.join("pay_rules.yaml"))?;
        let pay_codes_file = Self::load_yaml::<PayCodesFile>(&path.join("pay_codes.yaml"))?;
        let leave_types_file = Self::load_yaml::<LeaveTypesFile>(&path.join("leave_types.yaml"))?;

        let rules = rules_file
            .rules
            .into_iter()
            .filter(|rule| match rule.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!(rule = %rule.name, error = %e, "skipping invalid pay rule");
                    false
                }
            })
            .collect();

        Ok(Self {
            policy: policy_file.policy,
            compiler_config: CompilerConfig {
                daily_threshold: policy_file.overtime.daily_threshold_hours,
                tier_one_span: policy_file.overtime.tier_one_span_hours,
            },
            ruleset: RuleSet::new(rules),
            pay_codes: PayCodeCatalog::new(pay_codes_file.pay_codes),
            leave_types: leave_types_file.leave_types,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the policy metadata.
    pub fn policy(&self) -> &PolicyMetadata {
        &self.policy
    }

    /// Returns the overtime tiering settings as a compiler configuration.
    pub fn compiler_config(&self) -> CompilerConfig {
        self.compiler_config
    }

    /// Returns the loaded ruleset.
    pub fn ruleset(&self) -> &RuleSet {
        &self.ruleset
    }

    /// Returns the loaded pay code catalog.
    pub fn pay_codes(&self) -> &PayCodeCatalog {
        &self.pay_codes
    }

    /// Returns the loaded leave types.
    pub fn leave_types(&self) -> &[LeaveType] {
        &self.leave_types
    }
}
