//! Hierarchy structure and path resolution

use super::Check;
use crate::finding::{Finding, FindingCode};
use crate::types::RuleSet;
use scenelint_scene::SceneModel;

/// Hierarchy shape (`W001`) and element path resolution (`W002`)
///
/// Unconditional and advisory: it only ever produces warnings.
pub struct StructureCheck;

impl Check for StructureCheck {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn run(&self, scene: &SceneModel, _rules: &RuleSet, findings: &mut Vec<Finding>) {
        if scene.root_count() != 1 {
            findings.push(Finding::new(
                FindingCode::W001,
                "Scene does not have a single root node",
                scene.source.as_str(),
            ));
        }

        for element in &scene.elements {
            if !scene.resolves(&element.path) {
                findings.push(Finding::new(
                    FindingCode::W002,
                    format!(
                        "Element '{}' path does not resolve in the scene hierarchy",
                        element.name
                    ),
                    element.path.as_str(),
                ));
            }
        }
    }
}
