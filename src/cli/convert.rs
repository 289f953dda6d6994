//! Convert pages into standalone artifacts.
//!
//! Every page named on the command line (or, with `--all`, every `.wxml` file
//! under the input root) is resolved as its own run and its artifacts are
//! written below the output root.
//!
//! # Examples
//!
//! ```bash
//! wxport convert src/pages/index/index.wxml
//! wxport convert --all --dry-run
//! wxport convert --all --input app --output build --wxml-ext .swan --wxs-ext .sjs
//! ```

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

use super::CliConfig;
use crate::config::ConvertOptions;
use crate::constants::SOURCE_MARKUP_EXT;
use crate::parser::MarkupParser;
use crate::resolver::convert_page;
use crate::utils::fs::{LocalFs, absolutize, find_pages};
use crate::writer;

/// Command to resolve pages and write their artifacts.
#[derive(Args, Debug, Default)]
pub struct ConvertCommand {
    /// Pages to convert, relative to the current directory.
    #[arg(value_name = "PAGES", required_unless_present = "all")]
    pub pages: Vec<PathBuf>,

    /// Convert every page under the input root.
    #[arg(long, conflicts_with = "pages")]
    pub all: bool,

    /// Override the input root.
    #[arg(long, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Override the output root.
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Extension for generated markup files, e.g. `.axml`.
    #[arg(long, value_name = "EXT")]
    pub wxml_ext: Option<String>,

    /// Extension for relocated script files, e.g. `.sjs`.
    #[arg(long, value_name = "EXT")]
    pub wxs_ext: Option<String>,

    /// Resolve and list outputs without writing anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Totals over every page of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    pub pages: usize,
    /// Files written, or that would be written under `--dry-run`.
    pub outputs: Vec<PathBuf>,
    pub errors: usize,
    pub warnings: usize,
}

impl ConvertCommand {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let cwd = std::env::current_dir()?;
        let options = self.apply_overrides(config.load_options()?, &cwd);
        options.validate()?;

        let summary = self.run(&options, &cwd)?;

        if !config.quiet {
            self.print_summary(&summary, &cwd);
        }
        if summary.errors > 0 {
            bail!("{} error(s) reported while converting {} page(s)", summary.errors, summary.pages);
        }
        Ok(())
    }

    /// Apply command-line overrides; relative roots are taken from `cwd`.
    #[must_use]
    pub fn apply_overrides(&self, mut options: ConvertOptions, cwd: &Path) -> ConvertOptions {
        if let Some(input) = &self.input {
            options.input = absolutize(cwd, input);
        }
        if let Some(output) = &self.output {
            options.output = absolutize(cwd, output);
        }
        if let Some(ext) = &self.wxml_ext {
            options.ext.wxml.clone_from(ext);
        }
        if let Some(ext) = &self.wxs_ext {
            options.ext.wxs.clone_from(ext);
        }
        options
    }

    /// Resolve, and unless `--dry-run` write, every selected page.
    ///
    /// # Errors
    ///
    /// A page that cannot be read or parsed aborts the invocation. Missing
    /// imports and cycles are only counted.
    pub fn run(&self, options: &ConvertOptions, cwd: &Path) -> Result<ConvertSummary> {
        let pages = if self.all {
            find_pages(&options.input, SOURCE_MARKUP_EXT)?
        } else {
            self.pages.iter().map(|page| absolutize(cwd, page)).collect()
        };

        let parser = MarkupParser::new()?;
        let mut summary = ConvertSummary {
            pages: pages.len(),
            ..ConvertSummary::default()
        };

        for page in &pages {
            let report = convert_page(&LocalFs, &parser, options, page)
                .with_context(|| format!("Failed to convert {}", page.display()))?;

            summary.errors += report.error_count();
            summary.warnings += report.diagnostics.len() - report.error_count();

            if self.dry_run {
                let files = writer::render_run(&report.result, page, options, &LocalFs)?;
                summary.outputs.extend(files.into_iter().map(|file| file.path));
            } else {
                summary.outputs.extend(writer::write_run(&report.result, page, options, &LocalFs)?);
            }
        }

        Ok(summary)
    }

    fn print_summary(&self, summary: &ConvertSummary, cwd: &Path) {
        let verb = if self.dry_run { "Would write" } else { "Wrote" };
        for output in &summary.outputs {
            let shown = output.strip_prefix(cwd).unwrap_or(output);
            println!("  {} {}", verb.dimmed(), shown.display());
        }

        let headline = format!(
            "Converted {} page(s) into {} file(s)",
            summary.pages,
            summary.outputs.len()
        );
        if summary.errors > 0 {
            println!("{} {} with {} error(s)", "✗".red(), headline, summary.errors);
        } else if summary.warnings > 0 {
            println!("{} {} with {} warning(s)", "⚠".yellow(), headline, summary.warnings);
        } else {
            println!("{} {}", "✓".green(), headline.green());
        }
    }
}
