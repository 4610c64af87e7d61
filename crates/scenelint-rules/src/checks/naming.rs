//! Naming-convention check

use super::Check;
use crate::finding::{Finding, FindingCode};
use crate::types::RuleSet;
use scenelint_scene::SceneModel;

/// Element names follow the configured naming convention (`E003`)
pub struct NamingConventionCheck;

impl Check for NamingConventionCheck {
    fn name(&self) -> &'static str {
        "naming_convention"
    }

    fn run(&self, scene: &SceneModel, rules: &RuleSet, findings: &mut Vec<Finding>) {
        let Some(convention) = rules.naming_convention() else {
            return;
        };

        for element in &scene.elements {
            if !convention.matches(&element.name) {
                findings.push(Finding::new(
                    FindingCode::E003,
                    format!(
                        "Element name '{}' does not follow naming convention '{}'",
                        element.name, convention
                    ),
                    element.path.as_str(),
                ));
            }
        }
    }
}
