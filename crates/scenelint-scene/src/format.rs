//! Scene description document format
//!
//! The same shape is accepted from TOML, JSON and YAML:
//!
//! ```toml
//! path_delimiter = "|"
//!
//! [metadata]
//! author = "User123"
//!
//! [hierarchy.root]
//! camera1 = {}
//!
//! [[elements]]
//! name = "camera1"
//! type = "camera"
//! path = "root|camera1"
//! ```

use crate::model::{Element, Hierarchy, SceneModel, DEFAULT_PATH_DELIMITER};
use scenelint_core::{Result, SceneLintError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root structure of a scene description file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(default = "default_delimiter")]
    pub path_delimiter: char,
    #[serde(default)]
    pub metadata: BTreeMap<String, Option<toml::Value>>,
    #[serde(default)]
    pub hierarchy: Hierarchy,
    #[serde(default)]
    pub elements: Vec<Element>,
}

fn default_delimiter() -> char {
    DEFAULT_PATH_DELIMITER
}

impl Default for SceneDocument {
    fn default() -> Self {
        Self {
            path_delimiter: DEFAULT_PATH_DELIMITER,
            metadata: BTreeMap::new(),
            hierarchy: Hierarchy::default(),
            elements: Vec::new(),
        }
    }
}

/// Flatten a metadata value to the string kept in the scene model
///
/// Strings stay as written, null becomes empty and everything else uses its
/// inline TOML form (`2023-01-01T12:00:00`, `["a", "b"]`, `{ linear = "cm" }`).
pub fn metadata_string(value: Option<&toml::Value>) -> String {
    match value {
        None => String::new(),
        Some(toml::Value::String(s)) => s.clone(),
        Some(toml::Value::Datetime(dt)) => dt.to_string(),
        Some(other) => other.to_string(),
    }
}

impl SceneDocument {
    /// Convert into a scene model, checking element invariants
    pub fn into_model(self, source: impl Into<String>) -> Result<SceneModel> {
        for (index, element) in self.elements.iter().enumerate() {
            if element.name.trim().is_empty() {
                return Err(SceneLintError::SceneParse(format!(
                    "element #{} (path '{}') has an empty name",
                    index, element.path
                )));
            }
        }

        let mut scene = SceneModel::new(source).with_hierarchy(self.hierarchy);
        scene.path_delimiter = self.path_delimiter;
        scene.elements = self.elements;
        scene.metadata = self
            .metadata
            .into_iter()
            .map(|(key, value)| (key, metadata_string(value.as_ref())))
            .collect();
        Ok(scene)
    }
}
