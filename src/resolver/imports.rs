use anyhow::Result;
use std::path::Path;

use super::{Resolver, tree};
use crate::fragment::{DependencyRecord, ImportDirective, Node};
use crate::utils::fs::{absolutize, relative_src};

impl Resolver<'_> {
    /// Turn a page's import directives into dependency records.
    ///
    /// Template imports yield their record directly. File imports resolve the
    /// imported page as a non-root member of this run and take over the
    /// records it returns. Every record is also injected into `views` when the
    /// page has any.
    pub fn resolve_imports(
        &mut self,
        imports: Vec<ImportDirective>,
        page: &Path,
        views: &mut Vec<Node>,
    ) -> Result<Vec<DependencyRecord>> {
        let page_dir = page.parent().unwrap_or_else(|| Path::new(""));
        let mut import_deps = Vec::new();

        for directive in imports {
            let src = absolutize(page_dir, &directive.src);
            let deps = if directive.is_template_sugar() {
                let name = directive.name.unwrap_or_default();
                vec![DependencyRecord::new(name, src)]
            } else {
                self.load_and_resolve(&src, Some(page), directive.location, false)?
            };

            if !views.is_empty() {
                for dep in &deps {
                    tree::inject(&dep.name, &relative_src(page, &dep.src), views, false);
                }
            }
            import_deps.extend(deps);
        }

        Ok(import_deps)
    }
}
