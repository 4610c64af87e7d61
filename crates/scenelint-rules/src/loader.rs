//! Rule configuration loading

use crate::types::{RuleSet, RulesFile};
use scenelint_core::{Result, SceneLintError};
use std::fs;
use std::path::Path;

/// Syntax of a rules file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSyntax {
    Yaml,
    Toml,
    Json,
}

impl ConfigSyntax {
    /// Pick the syntax from a file extension; anything unknown is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("toml") => ConfigSyntax::Toml,
            Some("json") => ConfigSyntax::Json,
            _ => ConfigSyntax::Yaml,
        }
    }
}

impl RuleSet {
    /// Load a rule set from a YAML, TOML or JSON file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SceneLintError::ConfigNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_string(&content, ConfigSyntax::from_path(path)).map_err(|e| match e {
            SceneLintError::ConfigParse(msg) => {
                SceneLintError::ConfigParse(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Load a rule set from a string in the given syntax
    pub fn load_string(content: &str, syntax: ConfigSyntax) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(RuleSet::new());
        }

        let file: RulesFile = match syntax {
            ConfigSyntax::Yaml => serde_yaml::from_str(content)?,
            ConfigSyntax::Toml => toml::from_str(content)?,
            ConfigSyntax::Json => serde_json::from_str(content)?,
        };

        RuleSet::try_from(file)
    }
}
