//! scenelint Scene - Canonical scene model and format adapters
//!
//! Scene files are turned into a [`SceneModel`] by a [`SceneParser`] chosen
//! from a [`ParserRegistry`] by file extension. New formats plug in by
//! registering another adapter; the rule evaluator only sees the model.

mod format;
mod model;
mod parsers;
mod registry;

pub use format::{metadata_string, SceneDocument};
pub use model::{Element, Hierarchy, HierarchyNode, SceneModel, DEFAULT_PATH_DELIMITER};
pub use parsers::{JsonSceneParser, TomlSceneParser, YamlSceneParser};
pub use registry::{ParserRegistry, SceneParser};
