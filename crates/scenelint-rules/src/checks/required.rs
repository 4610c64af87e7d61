//! Required element types

use super::Check;
use crate::finding::{Finding, FindingCode};
use crate::types::RuleSet;
use scenelint_scene::SceneModel;

/// Every required element type has at least one element (`E002`)
pub struct RequiredElementsCheck;

impl Check for RequiredElementsCheck {
    fn name(&self) -> &'static str {
        "required_elements"
    }

    fn run(&self, scene: &SceneModel, rules: &RuleSet, findings: &mut Vec<Finding>) {
        for element_type in rules.required_elements() {
            if scene.elements_of_type(element_type).next().is_none() {
                findings.push(Finding::new(
                    FindingCode::E002,
                    format!("Missing required element type: {}", element_type),
                    scene.source.as_str(),
                ));
            }
        }
    }
}
