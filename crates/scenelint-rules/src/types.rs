//! Rule set definitions

use scenelint_core::{Result, SceneLintError};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// A recognised naming-convention identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingConvention {
    /// `prefix_objectName_suffix`: names must contain at least one `_`
    PrefixObjectNameSuffix,
}

impl NamingConvention {
    pub fn identifier(&self) -> &'static str {
        match self {
            NamingConvention::PrefixObjectNameSuffix => "prefix_objectName_suffix",
        }
    }

    /// Check whether an element name follows this convention
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NamingConvention::PrefixObjectNameSuffix => name.contains('_'),
        }
    }
}

impl FromStr for NamingConvention {
    type Err = SceneLintError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "prefix_objectName_suffix" => Ok(NamingConvention::PrefixObjectNameSuffix),
            other => Err(SceneLintError::UnknownNamingConvention(other.to_string())),
        }
    }
}

impl fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// The checks to run and their parameters
///
/// Immutable once built; share it with `Arc` across sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    required_elements: Vec<String>,
    naming_convention: Option<NamingConvention>,
    forbidden_elements: Vec<String>,
}

impl RuleSet {
    /// A rule set with every configurable check disabled
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_required_elements<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_elements = dedup(types.into_iter().map(Into::into));
        self
    }

    pub fn with_naming_convention(mut self, convention: NamingConvention) -> Self {
        self.naming_convention = Some(convention);
        self
    }

    pub fn with_forbidden_elements<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.forbidden_elements = dedup(names.into_iter().map(Into::into));
        self
    }

    /// Element type tags that must each appear at least once
    pub fn required_elements(&self) -> &[String] {
        &self.required_elements
    }

    pub fn naming_convention(&self) -> Option<NamingConvention> {
        self.naming_convention
    }

    /// Exact element names that must not appear
    pub fn forbidden_elements(&self) -> &[String] {
        &self.forbidden_elements
    }
}

fn dedup(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// File format for rule configuration
///
/// Unknown keys are ignored at every level.
#[derive(Debug, Default, Deserialize)]
pub struct RulesFile {
    #[serde(default)]
    pub validation_rules: Option<ValidationRules>,
}

/// The `validation_rules` section
#[derive(Debug, Default, Deserialize)]
pub struct ValidationRules {
    #[serde(default, deserialize_with = "null_as_default")]
    pub required_elements: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub naming_convention: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub forbidden_elements: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl TryFrom<RulesFile> for RuleSet {
    type Error = SceneLintError;

    fn try_from(file: RulesFile) -> Result<Self> {
        let Some(rules) = file.validation_rules else {
            return Ok(RuleSet::new());
        };

        let mut rule_set = RuleSet::new()
            .with_required_elements(rules.required_elements)
            .with_forbidden_elements(rules.forbidden_elements);

        let convention = rules.naming_convention.trim();
        if !convention.is_empty() {
            rule_set = rule_set.with_naming_convention(convention.parse()?);
        }

        Ok(rule_set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rules_from_yaml() {
        let yaml = r#"
validation_rules:
  required_elements: ["camera", "lighting"]
  naming_convention: "prefix_objectName_suffix"
  forbidden_elements: ["temp", "test_object"]
"#;

        let file: RulesFile = serde_yaml::from_str(yaml).unwrap();
        let rules = RuleSet::try_from(file).unwrap();
        assert_eq!(rules.required_elements(), ["camera", "lighting"]);
        assert_eq!(
            rules.naming_convention(),
            Some(NamingConvention::PrefixObjectNameSuffix)
        );
        assert_eq!(rules.forbidden_elements(), ["temp", "test_object"]);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let yaml = r#"
project: "feature_film"
output:
  directory: reports
validation_rules:
  required_elements: [camera]
  max_polycount: 100000
"#;

        let file: RulesFile = serde_yaml::from_str(yaml).unwrap();
        let rules = RuleSet::try_from(file).unwrap();
        assert_eq!(rules.required_elements(), ["camera"]);
        assert!(rules.naming_convention().is_none());
    }

    #[test]
    fn test_absent_section_disables_checks() {
        let file: RulesFile = serde_yaml::from_str("project: demo\n").unwrap();
        let rules = RuleSet::try_from(file).unwrap();
        assert_eq!(rules, RuleSet::new());
    }

    #[test]
    fn test_null_fields_are_empty() {
        let yaml = "validation_rules:\n  required_elements:\n  naming_convention:\n";
        let file: RulesFile = serde_yaml::from_str(yaml).unwrap();
        let rules = RuleSet::try_from(file).unwrap();
        assert!(rules.required_elements().is_empty());
        assert!(rules.naming_convention().is_none());
    }

    #[test]
    fn test_empty_convention_disables_check() {
        let toml_str = r#"
[validation_rules]
naming_convention = "  "
"#;
        let file: RulesFile = toml::from_str(toml_str).unwrap();
        let rules = RuleSet::try_from(file).unwrap();
        assert!(rules.naming_convention().is_none());
    }

    #[test]
    fn test_unknown_convention_rejected() {
        let toml_str = r#"
[validation_rules]
naming_convention = "camelCase"
"#;
        let file: RulesFile = toml::from_str(toml_str).unwrap();
        let err = RuleSet::try_from(file).unwrap_err();
        assert!(
            matches!(&err, SceneLintError::UnknownNamingConvention(id) if id == "camelCase")
        );
    }

    #[test]
    fn test_duplicates_removed_in_order() {
        let rules = RuleSet::new()
            .with_required_elements(["lighting", "camera", "lighting"])
            .with_forbidden_elements(["temp", "temp"]);
        assert_eq!(rules.required_elements(), ["lighting", "camera"]);
        assert_eq!(rules.forbidden_elements(), ["temp"]);
    }

    #[test]
    fn test_convention_matches() {
        let convention = NamingConvention::PrefixObjectNameSuffix;
        assert!(convention.matches("chr_hero_geo"));
        assert!(convention.matches("default_cube"));
        assert!(!convention.matches("Camera"));
        assert_eq!(convention.to_string(), "prefix_objectName_suffix");
    }
}
