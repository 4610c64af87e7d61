//! Forbidden element names

use super::Check;
use crate::finding::{Finding, FindingCode};
use crate::types::RuleSet;
use scenelint_scene::SceneModel;

/// No element carries a forbidden name (`E004`)
///
/// Only name identity is checked, so findings are located at the scene.
pub struct ForbiddenElementsCheck;

impl Check for ForbiddenElementsCheck {
    fn name(&self) -> &'static str {
        "forbidden_elements"
    }

    fn run(&self, scene: &SceneModel, rules: &RuleSet, findings: &mut Vec<Finding>) {
        for forbidden in rules.forbidden_elements() {
            if scene.has_element(forbidden) {
                findings.push(Finding::new(
                    FindingCode::E004,
                    format!("Forbidden element found: {}", forbidden),
                    scene.source.as_str(),
                ));
            }
        }
    }
}
