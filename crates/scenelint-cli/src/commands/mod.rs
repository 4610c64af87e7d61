//! CLI command implementations

pub mod batch;
pub mod serve;
pub mod validate;

use anyhow::{Context, Result};
use scenelint_rules::{LogObserver, RuleSet, ValidationSession};
use scenelint_scene::ParserRegistry;
use std::sync::Arc;

/// Result of a command that ran to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// At least one scene had an error finding
    ValidationFailed,
}

impl Outcome {
    pub fn from_valid(valid: bool) -> Self {
        if valid {
            Outcome::Success
        } else {
            Outcome::ValidationFailed
        }
    }
}

/// Process exit status: 0 valid, 1 validation errors, 2 setup failure
pub fn exit_status(result: &Result<Outcome>) -> u8 {
    match result {
        Ok(Outcome::Success) => 0,
        Ok(Outcome::ValidationFailed) => 1,
        Err(_) => 2,
    }
}

/// Load the rule set and build a session that logs its progress
pub(crate) fn build_session(config: &str) -> Result<ValidationSession> {
    let rules = RuleSet::load_file(config)
        .with_context(|| format!("Failed to load configuration from {}", config))?;
    log::info!("Loaded configuration from {}", config);

    Ok(
        ValidationSession::new(Arc::new(rules), ParserRegistry::with_defaults())
            .with_observer(Arc::new(LogObserver)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status_mapping() {
        assert_eq!(exit_status(&Ok(Outcome::Success)), 0);
        assert_eq!(exit_status(&Ok(Outcome::ValidationFailed)), 1);
        assert_eq!(exit_status(&Err(anyhow::anyhow!("bad config"))), 2);
    }

    #[test]
    fn test_missing_config_fails_setup() {
        let result = build_session("no/such/config.yaml").map(|_| Outcome::Success);
        assert_eq!(exit_status(&result), 2);
    }
}
