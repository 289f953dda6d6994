//! Template splitting.
//!
//! A template shares its page's artifact only when it is the page's single
//! template and the page has no views of its own. Otherwise it is written to
//! a virtual file next to the page, `<page>-<template>.<ext>`.

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::{Resolver, tree};
use crate::constants::SOURCE_MARKUP_EXT;
use crate::fragment::{DependencyRecord, Fragment, TemplateDefinition};
use crate::utils::fs::{dotted_extension, relative_src, replace_extension};

/// Whether templates get virtual files of their own.
#[must_use]
pub const fn should_split(template_count: usize, has_views: bool) -> bool {
    template_count > 1 || has_views
}

/// Path of the artifact a template named `name` in `page` is written to.
#[must_use]
pub fn template_path(page: &Path, name: &str, split: bool) -> PathBuf {
    if !split {
        return page.to_path_buf();
    }
    let ext = dotted_extension(page).unwrap_or_else(|| SOURCE_MARKUP_EXT.to_string());
    replace_extension(page, &format!("-{name}{ext}"))
}

/// Give every template an import for every other template of the same page.
pub(super) fn inject_siblings(templates: &mut [TemplateDefinition], paths: &[PathBuf]) {
    let siblings: Vec<(String, PathBuf)> =
        templates.iter().map(|t| t.name.clone()).zip(paths.iter().cloned()).collect();

    for (index, template) in templates.iter_mut().enumerate() {
        let own_path = &paths[index];
        for (sibling_index, (name, path)) in siblings.iter().enumerate() {
            if sibling_index != index {
                tree::inject(name, &relative_src(own_path, path), &mut template.nodes, true);
            }
        }
    }
}

impl Resolver<'_> {
    /// Resolve one template as a page of its own at `path`.
    ///
    /// The template's subtree first receives the page's imports and a
    /// reference to itself. Returns the record other pages use to import it.
    pub fn split_template(
        &mut self,
        template: TemplateDefinition,
        path: PathBuf,
        import_deps: &[DependencyRecord],
    ) -> Result<DependencyRecord> {
        let TemplateDefinition {
            name,
            mut nodes,
            location,
        } = template;

        for dep in import_deps {
            tree::inject(&dep.name, &relative_src(&path, &dep.src), &mut nodes, false);
        }
        tree::inject(&name, &relative_src(&path, &path), &mut nodes, true);

        tracing::debug!(
            "Splitting template '{}' ({}:{}) into {}",
            name,
            location.line,
            location.column,
            path.display()
        );
        self.resolve(Fragment::from_views(nodes), &path, false)?;

        Ok(DependencyRecord::new(name, path))
    }
}
