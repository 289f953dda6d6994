//! Import-reference search and idempotent import injection.
//!
//! [`inject`] is the only place that adds import nodes to a tree, and it
//! consults [`exists`] first, so a tree never holds two import references for
//! the same (case-insensitive) name.

use crate::constants::{IMPORT_NAME_PREFIX, IMPORT_TAG};
use crate::fragment::Node;

/// Whether `nodes` (searched depth-first, pre-order) already declares an
/// import reference for `name`.
///
/// An import node declares `name` when its `name` attribute, lower-cased, is
/// either `name` or `import-name` lower-cased.
#[must_use]
pub fn exists(name: &str, nodes: &[Node]) -> bool {
    let key = name.to_lowercase();
    let marked = format!("{IMPORT_NAME_PREFIX}{key}");
    contains_reference(&key, &marked, nodes)
}

fn contains_reference(key: &str, marked: &str, nodes: &[Node]) -> bool {
    nodes.iter().any(|node| {
        declares(node, key, marked) || contains_reference(key, marked, &node.children)
    })
}

fn declares(node: &Node, key: &str, marked: &str) -> bool {
    if node.name != IMPORT_TAG {
        return false;
    }
    node.attr("name").is_some_and(|declared| {
        let declared = declared.to_lowercase();
        declared == key || declared == marked
    })
}

/// Prepend an import node for `name` to `nodes` unless one already exists.
///
/// Returns `true` when a node was added.
pub fn inject(name: &str, src: &str, nodes: &mut Vec<Node>, is_template: bool) -> bool {
    if exists(name, nodes) {
        return false;
    }
    nodes.insert(0, Node::import(name, src, is_template));
    true
}
