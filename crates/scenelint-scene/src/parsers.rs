//! Built-in adapters for scene description documents

use crate::format::SceneDocument;
use crate::model::SceneModel;
use crate::registry::SceneParser;
use scenelint_core::{Result, SceneLintError};
use std::fs;
use std::path::Path;

/// Scene description written as TOML
pub struct TomlSceneParser;

/// Scene description written as JSON
pub struct JsonSceneParser;

/// Scene description written as YAML
pub struct YamlSceneParser;

impl SceneParser for TomlSceneParser {
    fn name(&self) -> &'static str {
        "TOML scene description"
    }

    fn extensions(&self) -> &[&'static str] {
        &["toml"]
    }

    fn parse(&self, path: &Path) -> Result<SceneModel> {
        let content = fs::read_to_string(path)?;
        let doc: SceneDocument = toml::from_str(&content).map_err(|e| parse_error(path, e))?;
        doc.into_model(path.display().to_string())
    }
}

impl SceneParser for JsonSceneParser {
    fn name(&self) -> &'static str {
        "JSON scene description"
    }

    fn extensions(&self) -> &[&'static str] {
        &["json"]
    }

    fn parse(&self, path: &Path) -> Result<SceneModel> {
        let content = fs::read_to_string(path)?;
        let doc: SceneDocument =
            serde_json::from_str(&content).map_err(|e| parse_error(path, e))?;
        doc.into_model(path.display().to_string())
    }
}

impl SceneParser for YamlSceneParser {
    fn name(&self) -> &'static str {
        "YAML scene description"
    }

    fn extensions(&self) -> &[&'static str] {
        &["yaml", "yml"]
    }

    fn parse(&self, path: &Path) -> Result<SceneModel> {
        let content = fs::read_to_string(path)?;
        // serde_yaml rejects an empty stream, an empty file is an empty scene
        if content.trim().is_empty() {
            return SceneDocument::default().into_model(path.display().to_string());
        }
        let doc: SceneDocument =
            serde_yaml::from_str(&content).map_err(|e| parse_error(path, e))?;
        doc.into_model(path.display().to_string())
    }
}

fn parse_error(path: &Path, err: impl std::fmt::Display) -> SceneLintError {
    SceneLintError::SceneParse(format!("{}: {}", path.display(), err))
}
