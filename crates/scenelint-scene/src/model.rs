//! Canonical in-memory scene representation

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Delimiter used by hierarchy paths unless a format says otherwise
pub const DEFAULT_PATH_DELIMITER: char = '|';

/// One named, typed node extracted from a scene file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    /// Categorical tag such as `camera`, `lighting` or `mesh`
    #[serde(rename = "type")]
    pub element_type: String,
    /// Position in the hierarchy, e.g. `root|camera1`
    pub path: String,
}

impl Element {
    pub fn new(
        name: impl Into<String>,
        element_type: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            element_type: element_type.into(),
            path: path.into(),
        }
    }
}

/// A node of the scene hierarchy, keyed by child name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HierarchyNode {
    pub children: BTreeMap<String, HierarchyNode>,
}

impl HierarchyNode {
    pub fn child(&self, name: &str) -> Option<&HierarchyNode> {
        self.children.get(name)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

// YAML writes leaf nodes as `camera1:` (null), TOML and JSON as empty tables.
impl<'de> Deserialize<'de> for HierarchyNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let children = Option::<BTreeMap<String, HierarchyNode>>::deserialize(deserializer)?;
        Ok(Self {
            children: children.unwrap_or_default(),
        })
    }
}

/// The scene tree: zero or more roots at depth 0
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hierarchy {
    pub roots: HierarchyNode,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of root nodes
    pub fn root_count(&self) -> usize {
        self.roots.children.len()
    }

    /// Names of the root nodes, sorted
    pub fn root_names(&self) -> impl Iterator<Item = &str> {
        self.roots.children.keys().map(String::as_str)
    }

    /// Insert every node along `path`, creating missing intermediate nodes
    pub fn insert_path(&mut self, path: &str, delimiter: char) {
        let mut node = &mut self.roots;
        for segment in segments(path, delimiter) {
            node = node.children.entry(segment.to_string()).or_default();
        }
    }

    /// Check whether `path` names an existing node
    ///
    /// A leading delimiter is accepted (`|root|camera1` and `root|camera1`
    /// resolve identically). The empty path never resolves.
    pub fn resolves(&self, path: &str, delimiter: char) -> bool {
        let mut node = &self.roots;
        let mut walked = false;
        for segment in segments(path, delimiter) {
            match node.child(segment) {
                Some(next) => node = next,
                None => return false,
            }
            walked = true;
        }
        walked
    }
}

fn segments(path: &str, delimiter: char) -> impl Iterator<Item = &str> {
    path.split(delimiter).filter(|s| !s.is_empty())
}

/// A parsed scene: elements, hierarchy and metadata
///
/// Built once by a parser adapter and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneModel {
    /// Path (or label) of the scene, used as the location of scene-level findings
    pub source: String,
    /// Elements in discovery order
    pub elements: Vec<Element>,
    pub hierarchy: Hierarchy,
    pub metadata: BTreeMap<String, String>,
    pub path_delimiter: char,
}

impl SceneModel {
    /// Create an empty scene
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            elements: Vec::new(),
            hierarchy: Hierarchy::new(),
            metadata: BTreeMap::new(),
            path_delimiter: DEFAULT_PATH_DELIMITER,
        }
    }

    /// Create a scene whose hierarchy is derived from the element paths
    pub fn from_elements(source: impl Into<String>, elements: Vec<Element>) -> Self {
        let mut scene = Self::new(source);
        for element in &elements {
            scene
                .hierarchy
                .insert_path(&element.path, scene.path_delimiter);
        }
        scene.elements = elements;
        scene
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_hierarchy(mut self, hierarchy: Hierarchy) -> Self {
        self.hierarchy = hierarchy;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Replace the source label (e.g. an uploaded file name instead of a temp path)
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn element_names(&self) -> Vec<&str> {
        self.elements.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn elements_of_type<'a>(&'a self, element_type: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements
            .iter()
            .filter(move |e| e.element_type == element_type)
    }

    pub fn has_element(&self, name: &str) -> bool {
        self.elements.iter().any(|e| e.name == name)
    }

    pub fn root_count(&self) -> usize {
        self.hierarchy.root_count()
    }

    /// Check whether an element path resolves in this scene's hierarchy
    pub fn resolves(&self, path: &str) -> bool {
        self.hierarchy.resolves(path, self.path_delimiter)
    }
}
