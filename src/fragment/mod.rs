//! Fragment data model.
//!
//! A [`Fragment`] is the parsed form of one markup page: its top-level view
//! nodes, the templates it defines, the files it imports and its inline script
//! (`wxs`) assets. The resolver consumes fragments and produces [`Artifact`]s,
//! collected into one [`RunResult`] per top-level conversion.
//!
//! All types serialize with serde so a run can be dumped as JSON by
//! `wxport inspect`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::constants::{IMPORT_NAME_PREFIX, IMPORT_TAG, TEXT_TAG};

/// A tagged tree element.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Node {
    /// Tag or component identifier.
    pub name: String,
    /// Attribute map; order carries no meaning.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Ordered child nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    /// Character data, only set on `#text` nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Node {
    /// Create an element with no attributes or children.
    pub fn element(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            name: TEXT_TAG.to_string(),
            text: Some(content.into()),
            ..Self::default()
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder-style child appender.
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Build the import node the injector prepends to a tree.
    ///
    /// The reference name is lower-cased; non-template references carry the
    /// `import-` marker so they never collide with a template of the same name
    /// in the generated module.
    pub fn import(name: &str, src: &str, is_template: bool) -> Self {
        let lowered = name.to_lowercase();
        let reference = if is_template {
            lowered
        } else {
            format!("{IMPORT_NAME_PREFIX}{lowered}")
        };
        Self::element(IMPORT_TAG)
            .with_attr("name", reference)
            .with_attr("src", src)
            .with_attr("template", is_template.to_string())
    }

    /// Attribute lookup.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        self.name == TEXT_TAG
    }
}

/// Source position used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// An inline-script asset declared by a page.
///
/// `path` is derived by the relocator; parsers leave it empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WxsAsset {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub path: PathBuf,
}

/// A cross-file or template import declared by a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDirective {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub src: PathBuf,
    #[serde(default)]
    pub template: bool,
    #[serde(default)]
    pub location: Location,
}

impl ImportDirective {
    /// A plain file import.
    pub fn file(src: impl Into<PathBuf>, location: Location) -> Self {
        Self {
            name: None,
            src: src.into(),
            template: false,
            location,
        }
    }

    /// A named template import that needs no further parsing.
    pub fn template(name: impl Into<String>, src: impl Into<PathBuf>, location: Location) -> Self {
        Self {
            name: Some(name.into()),
            src: src.into(),
            template: true,
            location,
        }
    }

    /// True when the directive names a template directly, so resolving it
    /// requires no file access.
    #[must_use]
    pub fn is_template_sugar(&self) -> bool {
        self.template && self.name.as_deref().is_some_and(|name| !name.is_empty())
    }
}

/// A named, reusable subtree declared once per page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDefinition {
    pub name: String,
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub location: Location,
}

/// The parsed form of one page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fragment {
    #[serde(default)]
    pub wxs: Vec<WxsAsset>,
    #[serde(default)]
    pub views: Vec<Node>,
    #[serde(default)]
    pub imports: Vec<ImportDirective>,
    #[serde(default)]
    pub templates: Vec<TemplateDefinition>,
}

impl Fragment {
    /// A fragment consisting only of view nodes, used when a template subtree
    /// is resolved as its own page.
    #[must_use]
    pub fn from_views(views: Vec<Node>) -> Self {
        Self {
            views,
            ..Self::default()
        }
    }
}

/// How a consumer references a generated artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    pub name: String,
    pub src: PathBuf,
}

impl DependencyRecord {
    pub fn new(name: impl Into<String>, src: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            src: src.into(),
        }
    }
}

/// One unit of output destined for a single output path.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Artifact {
    pub nodes: Vec<Node>,
    pub wxs: Vec<WxsAsset>,
}

/// Run-wide accumulator shared by every recursive resolution of one
/// top-level conversion.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunResult {
    /// The root page's own view artifact, if it has any views.
    pub entry: Option<Artifact>,
    /// Every other artifact keyed by absolute output path.
    pub deps: BTreeMap<PathBuf, Artifact>,
}

impl RunResult {
    /// Store an artifact under `path`, replacing any earlier one.
    ///
    /// Returns `true` when an artifact was already stored at that path.
    pub fn insert_dep(&mut self, path: PathBuf, artifact: Artifact) -> bool {
        self.deps.insert(path, artifact).is_some()
    }

    #[must_use]
    pub fn dep(&self, path: &Path) -> Option<&Artifact> {
        self.deps.get(path)
    }

    /// Number of artifacts produced, entry included.
    #[must_use]
    pub fn artifact_count(&self) -> usize {
        self.deps.len() + usize::from(self.entry.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_node_attributes() {
        let node = Node::import("MyCard", "./card.wxml", false);
        assert_eq!(node.name, "import");
        assert_eq!(node.attr("name"), Some("import-mycard"));
        assert_eq!(node.attr("src"), Some("./card.wxml"));
        assert_eq!(node.attr("template"), Some("false"));

        let node = Node::import("MyCard", "./card.wxml", true);
        assert_eq!(node.attr("name"), Some("mycard"));
        assert_eq!(node.attr("template"), Some("true"));
    }

    #[test]
    fn test_template_sugar_requires_name_and_flag() {
        let loc = Location::default();
        assert!(ImportDirective::template("item", "/src/item.wxml", loc).is_template_sugar());
        assert!(!ImportDirective::file("/src/item.wxml", loc).is_template_sugar());

        let unnamed = ImportDirective {
            name: Some(String::new()),
            src: PathBuf::from("/src/item.wxml"),
            template: true,
            location: loc,
        };
        assert!(!unnamed.is_template_sugar());
    }

    #[test]
    fn test_insert_dep_reports_overwrite() {
        let mut result = RunResult::default();
        let path = PathBuf::from("/dist/a.axml");
        assert!(!result.insert_dep(path.clone(), Artifact::default()));

        let replacement = Artifact {
            nodes: vec![Node::element("view")],
            wxs: Vec::new(),
        };
        assert!(result.insert_dep(path.clone(), replacement.clone()));
        assert_eq!(result.dep(&path), Some(&replacement));
        assert_eq!(result.artifact_count(), 1);
    }

    #[test]
    fn test_location_defaults_to_first_column() {
        assert_eq!(Location::default(), Location::new(1, 1));
    }

    #[test]
    fn test_fragment_json_shape() {
        let fragment = Fragment::from_views(vec![Node::element("view").with_attr("class", "a")]);
        let json = serde_json::to_value(&fragment).unwrap();
        assert_eq!(json["views"][0]["name"], "view");
        assert_eq!(json["views"][0]["attributes"]["class"], "a");
        assert!(json["views"][0].get("children").is_none());
    }
}
