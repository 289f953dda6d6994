//! Page graph resolution.
//!
//! This module rewrites one parsed page, and every page it transitively
//! imports, into standalone artifacts: one per locally defined template and one
//! for each page's own view tree. Each artifact carries exactly the import
//! nodes it needs.
//!
//! # Resolution steps
//!
//! For every page [`Resolver::resolve`] runs, in order:
//!
//! 1. **Imports** ([`Resolver::resolve_imports`]) - template imports become
//!    dependency records directly; file imports load and resolve the imported
//!    page (recursively) and take over its dependency records.
//! 2. **Sibling templates** - every template subtree gets an import for every
//!    other template defined in the same page.
//! 3. **Templates** ([`Resolver::split_template`]) - each template is resolved
//!    as a page of its own at a virtual path and contributes one dependency
//!    record naming that path.
//! 4. **Scripts** ([`wxs::relocate`]) - inline scripts get output paths.
//! 5. **Views** - the page's own view nodes receive an import for every
//!    dependency gathered above and are stored as the run's entry (root page)
//!    or under the page's output path.
//!
//! # Run context
//!
//! A [`Resolver`] is the context of one top-level conversion: it owns the
//! [`RunResult`] every recursive call writes into, the diagnostics reported
//! so far and the stack of pages currently being loaded (used to stop import
//! cycles). It borrows the file system, parser and options.
//!
//! # Failure model
//!
//! Missing pages and import cycles are reported as [`Diagnostic`]s and the
//! offending import contributes nothing; resolution of its siblings
//! continues. A parse error aborts the run.
//!
//! # Example
//!
//! ```rust,no_run
//! use wxport::config::ConvertOptions;
//! use wxport::parser::MarkupParser;
//! use wxport::resolver::convert_page;
//! use wxport::utils::LocalFs;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let options = ConvertOptions::new("/project/src", "/project/dist");
//! let parser = MarkupParser::new()?;
//! let report = convert_page(&LocalFs, &parser, &options, Path::new("/project/src/pages/index/index.wxml"))?;
//! for (path, _artifact) in &report.result.deps {
//!     println!("generated {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod diagnostics;
mod imports;
mod templates;
pub mod tree;
pub mod wxs;

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use templates::{should_split, template_path};

use crate::config::ConvertOptions;
use crate::fragment::{Artifact, DependencyRecord, Fragment, Location, RunResult, WxsAsset};
use crate::parser::FragmentParser;
use crate::utils::fs::{normalize_path, relative_src, SourceFs};

/// What one resolved page hands back to the page that imported it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolved {
    /// One record per template the page defines.
    pub deps: Vec<DependencyRecord>,
    /// The page's relocated script assets.
    pub wxs: Vec<WxsAsset>,
}

/// Outcome of one top-level conversion.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RunReport {
    pub result: RunResult,
    pub diagnostics: Vec<Diagnostic>,
}

impl RunReport {
    /// Number of error diagnostics.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Context of one resolution run.
pub struct Resolver<'a> {
    fs: &'a dyn SourceFs,
    parser: &'a dyn FragmentParser,
    options: &'a ConvertOptions,
    result: RunResult,
    diagnostics: Vec<Diagnostic>,
    loading: Vec<PathBuf>,
    /// Page each dependency artifact was last produced from, by output path.
    origins: HashMap<PathBuf, PathBuf>,
}

impl<'a> Resolver<'a> {
    pub fn new(
        fs: &'a dyn SourceFs,
        parser: &'a dyn FragmentParser,
        options: &'a ConvertOptions,
    ) -> Self {
        Self {
            fs,
            parser,
            options,
            result: RunResult::default(),
            diagnostics: Vec::new(),
            loading: Vec::new(),
            origins: HashMap::new(),
        }
    }

    /// The artifacts accumulated so far.
    #[must_use]
    pub fn result(&self) -> &RunResult {
        &self.result
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// End the run and hand over everything it produced.
    #[must_use]
    pub fn finish(self) -> RunReport {
        RunReport {
            result: self.result,
            diagnostics: self.diagnostics,
        }
    }

    /// Read, parse and resolve the page at `file`.
    ///
    /// A missing page, or one that is already being resolved further up the
    /// import chain, is reported against `referrer` at `location` and yields
    /// no dependencies.
    ///
    /// # Errors
    ///
    /// Read and parse failures are returned and abort the run.
    pub fn load_and_resolve(
        &mut self,
        file: &Path,
        referrer: Option<&Path>,
        location: Location,
        is_root: bool,
    ) -> Result<Vec<DependencyRecord>> {
        let file = normalize_path(file);

        if !self.fs.exists(&file) {
            self.report(DiagnosticKind::MissingFile, file, referrer, location);
            return Ok(Vec::new());
        }

        if let Some(start) = self.loading.iter().position(|page| *page == file) {
            let mut chain = self.loading[start..].to_vec();
            chain.push(file.clone());
            self.report(
                DiagnosticKind::CircularImport {
                    chain,
                },
                file,
                referrer,
                location,
            );
            return Ok(Vec::new());
        }

        tracing::debug!("Loading {}", file.display());
        let source = self.fs.read_to_string(&file)?;
        let fragment = self.parser.parse(&source, &file)?;

        self.loading.push(file.clone());
        let resolved = self.resolve(fragment, &file, is_root);
        self.loading.pop();

        Ok(resolved?.deps)
    }

    /// Resolve one fragment located at `page`.
    ///
    /// Template subtrees re-enter here with their virtual path as `page` and
    /// `is_root == false`.
    pub fn resolve(&mut self, fragment: Fragment, page: &Path, is_root: bool) -> Result<Resolved> {
        let Fragment {
            wxs,
            mut views,
            imports,
            mut templates,
        } = fragment;

        let import_deps = self.resolve_imports(imports, page, &mut views)?;

        let split = should_split(templates.len(), !views.is_empty());
        let template_paths: Vec<PathBuf> =
            templates.iter().map(|t| template_path(page, &t.name, split)).collect();
        templates::inject_siblings(&mut templates, &template_paths);

        let mut deps = Vec::with_capacity(templates.len());
        for (template, path) in templates.into_iter().zip(template_paths) {
            deps.push(self.split_template(template, path, &import_deps)?);
        }

        let wxs = wxs::relocate(&wxs, page, &self.options.ext.wxs);

        if !views.is_empty() {
            for dep in import_deps.iter().chain(&deps) {
                tree::inject(&dep.name, &relative_src(page, &dep.src), &mut views, false);
            }
            self.place(
                Artifact {
                    nodes: views,
                    wxs: wxs.clone(),
                },
                page,
                is_root,
            );
        }

        Ok(Resolved {
            deps,
            wxs,
        })
    }

    fn place(&mut self, artifact: Artifact, page: &Path, is_root: bool) {
        if is_root {
            self.result.entry = Some(artifact);
            return;
        }

        let output = self.options.output_path(page);
        tracing::debug!("{} -> {}", page.display(), output.display());
        // Re-resolving the same page into the same artifact (diamond imports) is not a conflict
        let other_page = self
            .origins
            .insert(output.clone(), page.to_path_buf())
            .is_some_and(|origin| origin != page);
        let changed = self.result.dep(&output).is_some_and(|previous| *previous != artifact);
        if self.result.insert_dep(output.clone(), artifact) && (other_page || changed) {
            self.report(DiagnosticKind::OutputOverwritten, output, Some(page), Location::default());
        }
    }

    fn report(
        &mut self,
        kind: DiagnosticKind,
        path: PathBuf,
        referrer: Option<&Path>,
        location: Location,
    ) {
        let diagnostic = Diagnostic {
            kind,
            path,
            referrer: referrer.map(Path::to_path_buf),
            location,
        };
        diagnostic.log();
        self.diagnostics.push(diagnostic);
    }
}

/// Resolve `entry` as the root page of a new run.
///
/// # Errors
///
/// Fails when a page in the graph cannot be read or parsed.
pub fn convert_page(
    fs: &dyn SourceFs,
    parser: &dyn FragmentParser,
    options: &ConvertOptions,
    entry: &Path,
) -> Result<RunReport> {
    let mut resolver = Resolver::new(fs, parser, options);
    resolver.load_and_resolve(entry, None, Location::default(), true)?;
    let report = resolver.finish();
    tracing::info!(
        "Resolved {} into {} artifact(s) with {} error(s)",
        entry.display(),
        report.result.artifact_count(),
        report.error_count()
    );
    Ok(report)
}
