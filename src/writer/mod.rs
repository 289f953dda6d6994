//! Serialization of resolved artifacts to disk.
//!
//! Every [`Artifact`] of a [`RunResult`] becomes one markup file at its output
//! path, and each of its script assets one script file. Rendering and writing
//! are split so `--dry-run` can list what would be produced.
//!
//! Markup is rendered two spaces per level. `import` and `include` elements
//! close themselves; everything else gets an explicit closing tag. Import
//! `src` attributes pointing at source markup files are rewritten to the
//! output markup extension, and each relocated script is referenced at the
//! top of its artifact:
//!
//! ```text
//! <import-sjs name="fmt" from="./index-wxs-fmt.sjs"/>
//! <import name="import-card" src="../../common/card.axml" template="false"/>
//! <view class="page">
//!   ...
//! </view>
//! ```

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::config::ConvertOptions;
use crate::constants::{IMPORT_TAG, INCLUDE_TAG, SCRIPT_IMPORT_TAG, SOURCE_MARKUP_EXT};
use crate::fragment::{Artifact, Node, RunResult, WxsAsset};
use crate::utils::fs::{SourceFs, relative_src, safe_write};

/// One file the writer will produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub content: String,
}

/// Render a node sequence as markup.
#[must_use]
pub fn render_nodes(nodes: &[Node], options: &ConvertOptions) -> String {
    let mut out = String::new();
    for node in nodes {
        render_node(&mut out, node, 0, options);
    }
    out
}

fn render_node(out: &mut String, node: &Node, depth: usize, options: &ConvertOptions) {
    let indent = "  ".repeat(depth);

    if node.is_text() {
        let text = node.text.as_deref().unwrap_or_default();
        let _ = writeln!(out, "{indent}{text}");
        return;
    }

    let attributes = render_attributes(node, options);
    if node.name == IMPORT_TAG || node.name == INCLUDE_TAG {
        let _ = writeln!(out, "{indent}<{}{attributes}/>", node.name);
        return;
    }

    match node.children.as_slice() {
        [] => {
            let _ = writeln!(out, "{indent}<{0}{attributes}></{0}>", node.name);
        }
        [only] if only.is_text() => {
            let text = only.text.as_deref().unwrap_or_default();
            let _ = writeln!(out, "{indent}<{0}{attributes}>{text}</{0}>", node.name);
        }
        children => {
            let _ = writeln!(out, "{indent}<{}{attributes}>", node.name);
            for child in children {
                render_node(out, child, depth + 1, options);
            }
            let _ = writeln!(out, "{indent}</{}>", node.name);
        }
    }
}

fn render_attributes(node: &Node, options: &ConvertOptions) -> String {
    let mut rendered = String::new();
    for (key, value) in &node.attributes {
        let value = if node.name == IMPORT_TAG && key == "src" {
            rewrite_markup_src(value, &options.ext.wxml)
        } else {
            value.clone()
        };

        if value.is_empty() {
            let _ = write!(rendered, " {key}");
        } else if value.contains('"') {
            let _ = write!(rendered, " {key}='{value}'");
        } else {
            let _ = write!(rendered, " {key}=\"{value}\"");
        }
    }
    rendered
}

fn rewrite_markup_src(src: &str, markup_ext: &str) -> String {
    match src.strip_suffix(SOURCE_MARKUP_EXT) {
        Some(stem) => format!("{stem}{markup_ext}"),
        None => src.to_string(),
    }
}

/// Render one artifact destined for `output`.
#[must_use]
pub fn render_artifact(artifact: &Artifact, output: &Path, options: &ConvertOptions) -> String {
    let mut out = String::new();
    for asset in &artifact.wxs {
        let from = relative_src(output, &options.output_asset_path(&asset.path));
        let _ = writeln!(out, "<{SCRIPT_IMPORT_TAG} name=\"{}\" from=\"{from}\"/>", asset.name);
    }
    out.push_str(&render_nodes(&artifact.nodes, options));
    out
}

/// Everything a run would write, in output-path order with the entry first.
///
/// `entry` is the root page the run started from; its artifact goes to the
/// page's own output path.
pub fn render_run(
    result: &RunResult,
    entry: &Path,
    options: &ConvertOptions,
    fs: &dyn SourceFs,
) -> Result<Vec<OutputFile>> {
    let mut files = Vec::new();

    let artifacts = result
        .entry
        .as_ref()
        .map(|artifact| (options.output_path(entry), artifact))
        .into_iter()
        .chain(result.deps.iter().map(|(path, artifact)| (path.clone(), artifact)));

    for (output, artifact) in artifacts {
        files.push(OutputFile {
            content: render_artifact(artifact, &output, options),
            path: output,
        });
        for asset in &artifact.wxs {
            if let Some(content) = script_content(asset, fs)? {
                files.push(OutputFile {
                    path: options.output_asset_path(&asset.path),
                    content,
                });
            }
        }
    }

    Ok(files)
}

fn script_content(asset: &WxsAsset, fs: &dyn SourceFs) -> Result<Option<String>> {
    if let Some(content) = &asset.content {
        return Ok(Some(content.trim().to_string()));
    }
    match &asset.src {
        Some(src) if fs.exists(src) => fs
            .read_to_string(src)
            .map(Some)
            .with_context(|| format!("Failed to read script module '{}'", asset.name)),
        Some(src) => {
            tracing::warn!("Script module '{}' points at missing {}", asset.name, src.display());
            Ok(None)
        }
        None => Ok(None),
    }
}

/// Render and write a run; returns the written paths.
pub fn write_run(
    result: &RunResult,
    entry: &Path,
    options: &ConvertOptions,
    fs: &dyn SourceFs,
) -> Result<Vec<PathBuf>> {
    let files = render_run(result, entry, options, fs)?;
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        safe_write(&file.path, &file.content)?;
        tracing::debug!("Wrote {}", file.path.display());
        written.push(file.path);
    }
    Ok(written)
}
