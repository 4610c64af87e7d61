//! Individual rule checks
//!
//! Each check is an independent strategy over `(SceneModel, RuleSet)`.
//! [`crate::RuleEvaluator`] composes them in a fixed order, which is also the
//! order of the findings in a report.

mod forbidden;
mod naming;
mod required;
mod structure;

pub use forbidden::ForbiddenElementsCheck;
pub use naming::NamingConventionCheck;
pub use required::RequiredElementsCheck;
pub use structure::StructureCheck;

use crate::finding::Finding;
use crate::types::RuleSet;
use scenelint_scene::SceneModel;

/// A single validation check
pub trait Check: Send + Sync {
    /// Stable name used in logs
    fn name(&self) -> &'static str;

    /// Append this check's findings for `scene`
    fn run(&self, scene: &SceneModel, rules: &RuleSet, findings: &mut Vec<Finding>);
}
