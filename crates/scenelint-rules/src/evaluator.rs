//! Rule evaluation engine

use crate::checks::{
    Check, ForbiddenElementsCheck, NamingConventionCheck, RequiredElementsCheck, StructureCheck,
};
use crate::finding::Finding;
use crate::types::RuleSet;
use scenelint_scene::SceneModel;

/// Runs the rule checks against a scene
///
/// Checks always run in the same order and never short-circuit, so one pass
/// reports every violation and identical inputs give identical findings.
pub struct RuleEvaluator {
    checks: Vec<Box<dyn Check>>,
}

impl RuleEvaluator {
    /// Evaluator with the standard checks: required elements, naming
    /// convention, forbidden elements, structure
    pub fn new() -> Self {
        Self {
            checks: vec![
                Box::new(RequiredElementsCheck),
                Box::new(NamingConventionCheck),
                Box::new(ForbiddenElementsCheck),
                Box::new(StructureCheck),
            ],
        }
    }

    /// Evaluate all checks and return findings in check order
    pub fn evaluate(&self, scene: &SceneModel, rules: &RuleSet) -> Vec<Finding> {
        let mut findings = Vec::new();
        for check in &self.checks {
            let before = findings.len();
            check.run(scene, rules, &mut findings);
            log::debug!(
                "Check {} on {}: {} finding(s)",
                check.name(),
                scene.source,
                findings.len() - before
            );
        }
        findings
    }

    /// Names of the checks, in evaluation order
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }
}

impl Default for RuleEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate a scene with the standard checks
pub fn evaluate(scene: &SceneModel, rules: &RuleSet) -> Vec<Finding> {
    RuleEvaluator::new().evaluate(scene, rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::{FindingCode, Severity};
    use crate::types::NamingConvention;
    use scenelint_scene::Element;

    fn production_scene() -> SceneModel {
        SceneModel::from_elements(
            "shot010.toml",
            vec![
                Element::new("camera1", "camera", "root|camera1"),
                Element::new("light1", "lighting", "root|light1"),
                Element::new("environment", "environment", "root|environment"),
                Element::new("asset1", "mesh", "root|asset1"),
            ],
        )
    }

    #[test]
    fn test_check_order() {
        assert_eq!(
            RuleEvaluator::new().check_names(),
            vec![
                "required_elements",
                "naming_convention",
                "forbidden_elements",
                "structure"
            ]
        );
    }

    #[test]
    fn test_empty_rules_never_error() {
        let scenes = vec![
            production_scene(),
            SceneModel::new("empty.toml"),
            SceneModel::from_elements(
                "two_roots.toml",
                vec![
                    Element::new("Camera", "camera", "a|Camera"),
                    Element::new("Light", "lighting", "b|Light"),
                ],
            ),
        ];

        for scene in &scenes {
            let findings = evaluate(scene, &RuleSet::new());
            assert!(findings.iter().all(|f| f.severity == Severity::Warning));
            assert!(findings.len() <= 1);
            if let Some(finding) = findings.first() {
                assert_eq!(finding.code, FindingCode::W001);
            }
        }
    }

    #[test]
    fn test_scenario_a_valid_scene() {
        let rules = RuleSet::new().with_required_elements(["camera", "lighting"]);
        assert!(evaluate(&production_scene(), &rules).is_empty());
    }

    #[test]
    fn test_scenario_b_missing_prop() {
        let rules = RuleSet::new().with_required_elements(["camera", "lighting", "prop"]);
        let findings = evaluate(&production_scene(), &rules);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, FindingCode::E002);
        assert!(findings[0].message.contains("prop"));
    }

    #[test]
    fn test_scenario_c_naming_violation() {
        let scene = SceneModel::from_elements(
            "blend.toml",
            vec![
                Element::new("Camera", "camera", "Scene|Camera"),
                Element::new("key_light_01", "lighting", "Scene|key_light_01"),
            ],
        );
        let rules = RuleSet::new().with_naming_convention(NamingConvention::PrefixObjectNameSuffix);

        let findings = evaluate(&scene, &rules);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, FindingCode::E003);
        assert_eq!(findings[0].location, "Scene|Camera");
    }

    #[test]
    fn test_scenario_d_two_roots() {
        let scene = SceneModel::from_elements(
            "split.toml",
            vec![
                Element::new("camera1", "camera", "cams|camera1"),
                Element::new("light1", "lighting", "lights|light1"),
            ],
        );
        let rules = RuleSet::new().with_required_elements(["camera", "lighting"]);

        let findings = evaluate(&scene, &rules);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, FindingCode::W001);
    }

    #[test]
    fn test_all_checks_run_in_order() {
        let scene = SceneModel::from_elements(
            "messy.toml",
            vec![
                Element::new("Camera", "camera", "a|Camera"),
                Element::new("temp", "mesh", "b|temp"),
            ],
        );
        let rules = RuleSet::new()
            .with_required_elements(["lighting", "environment"])
            .with_naming_convention(NamingConvention::PrefixObjectNameSuffix)
            .with_forbidden_elements(["temp"]);

        let codes: Vec<FindingCode> = evaluate(&scene, &rules).iter().map(|f| f.code).collect();
        assert_eq!(
            codes,
            vec![
                FindingCode::E002,
                FindingCode::E002,
                FindingCode::E003,
                FindingCode::E003,
                FindingCode::E004,
                FindingCode::W001,
            ]
        );
    }

    #[test]
    fn test_forbidden_presence_iff_error() {
        let rules = RuleSet::new().with_forbidden_elements(["asset1"]);
        let findings = evaluate(&production_scene(), &rules);
        assert!(findings.iter().any(|f| f.code == FindingCode::E004));

        let rules = RuleSet::new().with_forbidden_elements(["asset2"]);
        let findings = evaluate(&production_scene(), &rules);
        assert!(!findings.iter().any(|f| f.code == FindingCode::E004));
    }

    #[test]
    fn test_deterministic() {
        let scene = production_scene();
        let rules = RuleSet::new()
            .with_required_elements(["prop", "fx", "camera"])
            .with_naming_convention(NamingConvention::PrefixObjectNameSuffix)
            .with_forbidden_elements(["light1", "environment"]);

        let first = evaluate(&scene, &rules);
        let second = evaluate(&scene, &rules);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}
