//! Parser registry: selects a scene adapter by file extension

use crate::model::SceneModel;
use crate::parsers::{JsonSceneParser, TomlSceneParser, YamlSceneParser};
use scenelint_core::{Result, SceneLintError};
use std::path::Path;

/// A format adapter producing the canonical scene model
pub trait SceneParser: Send + Sync {
    /// Short human-readable format name
    fn name(&self) -> &'static str;

    /// Lowercase file extensions (without the dot) handled by this adapter
    fn extensions(&self) -> &[&'static str];

    /// Parse the file at `path`. The registry has already checked that it exists.
    fn parse(&self, path: &Path) -> Result<SceneModel>;
}

/// Registry that holds the available scene adapters
///
/// Adapters registered later take precedence for a shared extension.
#[derive(Default)]
pub struct ParserRegistry {
    parsers: Vec<Box<dyn SceneParser>>,
}

impl ParserRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in scene description adapters
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(TomlSceneParser));
        registry.register(Box::new(JsonSceneParser));
        registry.register(Box::new(YamlSceneParser));
        registry
    }

    /// Register an adapter
    pub fn register(&mut self, parser: Box<dyn SceneParser>) {
        self.parsers.push(parser);
    }

    /// Find the adapter responsible for `path`
    pub fn parser_for(&self, path: &Path) -> Result<&dyn SceneParser> {
        let extension = extension_of(path);
        self.parsers
            .iter()
            .rev()
            .find(|p| p.extensions().contains(&extension.as_str()))
            .map(|p| p.as_ref())
            .ok_or_else(|| SceneLintError::unsupported(&extension))
    }

    /// Check whether some adapter handles `path`
    pub fn is_supported(&self, path: &Path) -> bool {
        self.parser_for(path).is_ok()
    }

    /// All registered extensions with a leading dot, in registration order
    pub fn supported_extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = Vec::new();
        for parser in &self.parsers {
            for ext in parser.extensions() {
                let dotted = format!(".{}", ext);
                if !extensions.contains(&dotted) {
                    extensions.push(dotted);
                }
            }
        }
        extensions
    }

    /// Parse a scene file
    ///
    /// Fails with `NotFound` when the path does not exist and with
    /// `UnsupportedFormat` when no adapter handles its extension.
    pub fn parse<P: AsRef<Path>>(&self, path: P) -> Result<SceneModel> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SceneLintError::NotFound(path.to_path_buf()));
        }
        self.parser_for(path)?.parse(path)
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Element;
    use std::fs;

    struct FixedParser;

    impl SceneParser for FixedParser {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn extensions(&self) -> &[&'static str] {
            &["ma", "toml"]
        }

        fn parse(&self, path: &Path) -> Result<SceneModel> {
            Ok(SceneModel::from_elements(
                path.display().to_string(),
                vec![Element::new("camera1", "camera", "root|camera1")],
            ))
        }
    }

    #[test]
    fn test_default_extensions() {
        let registry = ParserRegistry::with_defaults();
        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.supported_extensions(),
            vec![".toml", ".json", ".yaml", ".yml"]
        );
        assert!(registry.is_supported(Path::new("shot.TOML")));
        assert!(!registry.is_supported(Path::new("shot.blend")));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let registry = ParserRegistry::with_defaults();
        let err = registry.parse("does/not/exist.blend").unwrap_err();
        assert!(matches!(err, SceneLintError::NotFound(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.c4d");
        fs::write(&path, b"binary").unwrap();

        let registry = ParserRegistry::with_defaults();
        let err = registry.parse(&path).unwrap_err();
        assert!(
            matches!(&err, SceneLintError::UnsupportedFormat { extension } if extension == ".c4d")
        );
    }

    #[test]
    fn test_later_registration_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.toml");
        fs::write(&path, "not = [valid").unwrap();

        let mut registry = ParserRegistry::with_defaults();
        registry.register(Box::new(FixedParser));

        assert_eq!(registry.parser_for(&path).unwrap().name(), "fixed");
        let scene = registry.parse(&path).unwrap();
        assert_eq!(scene.elements.len(), 1);
        assert!(registry.is_supported(Path::new("anim.ma")));
    }

    #[test]
    fn test_empty_registry_supports_nothing() {
        let registry = ParserRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.supported_extensions().is_empty());
        assert!(registry.parser_for(Path::new("a.toml")).is_err());
    }
}
