//! Markup page parsing.
//!
//! The resolver only depends on the [`FragmentParser`] trait. [`MarkupParser`]
//! is the bundled implementation for the WXML subset mini-program pages use:
//!
//! - elements with quoted, unquoted or bare attributes
//! - self-closing elements (`<import src="a.wxml"/>`)
//! - comments, which are dropped
//! - `<wxs>` bodies, which are kept as raw text
//! - `{{a < b}}` style expressions inside text, with or without spaces
//!
//! Top-level elements are sorted into a [`Fragment`]: `<import src>` becomes an
//! [`ImportDirective`], `<template name>` a [`TemplateDefinition`],
//! `<wxs module>` a [`WxsAsset`], and everything else a view node.
//!
//! Import and script `src` attributes are resolved against the page's
//! directory, so the resolver only ever sees normalized absolute sources.

use anyhow::Result;
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::constants::{IMPORT_TAG, TEMPLATE_TAG, WXS_TAG};
use crate::core::WxportError;
use crate::fragment::{
    Fragment, ImportDirective, Location, Node, TemplateDefinition, WxsAsset,
};
use crate::utils::fs::absolutize;

/// Turns page source text into a [`Fragment`].
pub trait FragmentParser {
    /// Parse `source`, the content of the page at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`WxportError::ParseError`] for malformed markup.
    fn parse(&self, source: &str, path: &Path) -> Result<Fragment>;
}

/// Parser for WXML pages.
#[derive(Debug, Clone)]
pub struct MarkupParser {
    attribute: Regex,
}

impl MarkupParser {
    /// Compile the parser's attribute pattern.
    pub fn new() -> Result<Self> {
        let attribute = Regex::new(
            r#"([^\s=/>"']+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#,
        )?;
        Ok(Self {
            attribute,
        })
    }

    /// Parse markup into top-level nodes paired with their start positions.
    pub fn parse_nodes(&self, source: &str, path: &Path) -> Result<Vec<(Node, Location)>> {
        let mut scanner = Scanner::new(source, path);
        let mut stack: Vec<(Node, Location)> = Vec::new();
        let mut top: Vec<(Node, Location)> = Vec::new();

        while !scanner.at_end() {
            if scanner.starts_with("<!--") {
                let location = scanner.location();
                scanner.skip_past("-->").ok_or_else(|| {
                    scanner.error_at(location, "unterminated comment")
                })?;
            } else if scanner.starts_with("</") {
                let location = scanner.location();
                let name = scanner.read_closing_tag()?;
                let Some((node, opened_at)) = stack.pop() else {
                    return Err(
                        scanner.error_at(location, &format!("unexpected closing tag </{name}>"))
                    );
                };
                if node.name != name {
                    return Err(scanner.error_at(
                        location,
                        &format!(
                            "expected </{}> (opened at {}:{}), found </{name}>",
                            node.name, opened_at.line, opened_at.column
                        ),
                    ));
                }
                emit(&mut stack, &mut top, node, opened_at);
            } else if scanner.starts_element() {
                let location = scanner.location();
                let (name, body, self_closing) = scanner.read_open_tag()?;
                let mut node = Node::element(name);
                self.read_attributes(body, &mut node);

                if self_closing {
                    emit(&mut stack, &mut top, node, location);
                } else {
                    if node.name == WXS_TAG {
                        let raw = scanner.read_raw_until("</wxs").ok_or_else(|| {
                            scanner.error_at(location, "unclosed element <wxs>")
                        })?;
                        if !raw.trim().is_empty() {
                            node.children.push(Node::text(raw));
                        }
                    }
                    stack.push((node, location));
                }
            } else {
                let text = scanner.read_text();
                if !text.trim().is_empty() {
                    emit(&mut stack, &mut top, Node::text(text), scanner.location());
                }
            }
        }

        if let Some((node, location)) = stack.pop() {
            return Err(scanner.error_at(location, &format!("unclosed element <{}>", node.name)));
        }
        Ok(top)
    }

    fn read_attributes(&self, body: &str, node: &mut Node) {
        for caps in self.attribute.captures_iter(body) {
            let key = &caps[1];
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());
            node.attributes.insert(key.to_string(), value.to_string());
        }
    }
}

impl FragmentParser for MarkupParser {
    fn parse(&self, source: &str, path: &Path) -> Result<Fragment> {
        let nodes = self.parse_nodes(source, path)?;
        let fragment = sort_top_level(nodes, path);
        tracing::trace!(
            "Parsed {}: {} views, {} imports, {} templates, {} wxs",
            path.display(),
            fragment.views.len(),
            fragment.imports.len(),
            fragment.templates.len(),
            fragment.wxs.len()
        );
        Ok(fragment)
    }
}

fn emit(
    stack: &mut [(Node, Location)],
    top: &mut Vec<(Node, Location)>,
    node: Node,
    location: Location,
) {
    match stack.last_mut() {
        Some((parent, _)) => parent.children.push(node),
        None => top.push((node, location)),
    }
}

fn sort_top_level(nodes: Vec<(Node, Location)>, path: &Path) -> Fragment {
    let page_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let mut fragment = Fragment::default();

    for (node, location) in nodes {
        match node.name.as_str() {
            IMPORT_TAG if node.attr("src").is_some_and(|src| !src.is_empty()) => {
                let src = absolutize(page_dir, Path::new(node.attr("src").unwrap_or_default()));
                let name = node.attr("name").filter(|name| !name.is_empty()).map(String::from);
                let template = node.attr("template").is_some_and(|flag| flag.is_empty() || flag == "true");
                fragment.imports.push(ImportDirective {
                    name,
                    src,
                    template,
                    location,
                });
            }
            TEMPLATE_TAG if node.attr("is").is_none() && node.attr("name").is_some() => {
                let name = node.attr("name").unwrap_or_default().to_string();
                fragment.templates.push(TemplateDefinition {
                    name,
                    nodes: node.children,
                    location,
                });
            }
            WXS_TAG if node.attr("module").is_some() => {
                let src = node
                    .attr("src")
                    .filter(|src| !src.is_empty())
                    .map(|src| absolutize(page_dir, Path::new(src)));
                let content = node.children.iter().find_map(|child| child.text.clone());
                fragment.wxs.push(WxsAsset {
                    name: node.attr("module").unwrap_or_default().to_string(),
                    src,
                    content,
                    path: PathBuf::new(),
                });
            }
            _ => fragment.views.push(node),
        }
    }

    fragment
}

/// Byte cursor over the source that tracks line and column.
struct Scanner<'a> {
    source: &'a str,
    file: &'a Path,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str, file: &'a Path) -> Self {
        Self {
            source,
            file,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }

    /// `<` followed by something that can start a tag name.
    fn starts_element(&self) -> bool {
        let mut chars = self.rest().chars();
        chars.next() == Some('<')
            && chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
    }

    fn starts_markup(&self) -> bool {
        self.starts_with("<!--") || self.starts_with("</") || self.starts_element()
    }

    fn advance(&mut self, bytes: usize) -> &'a str {
        let taken = &self.source[self.pos..self.pos + bytes];
        for c in taken.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos += bytes;
        taken
    }

    fn skip_past(&mut self, terminator: &str) -> Option<()> {
        let offset = self.rest().find(terminator)?;
        self.advance(offset + terminator.len());
        Some(())
    }

    fn read_raw_until(&mut self, terminator: &str) -> Option<&'a str> {
        let offset = self.rest().find(terminator)?;
        Some(self.advance(offset))
    }

    /// Read text up to the next markup, skipping over `{{ ... }}` expressions
    /// whole so a `<` inside them never opens a tag.
    fn read_text(&mut self) -> &'a str {
        let start = self.pos;
        // The first step always consumes, so a lone '<' cannot stall the loop
        while !self.at_end() && (self.pos == start || !self.starts_markup()) {
            let rest = self.rest();
            let step = if rest.starts_with("{{") {
                rest.find("}}").map_or(2, |end| end + 2)
            } else {
                let first = rest.chars().next().map_or(1, char::len_utf8);
                let tail = &rest[first..];
                [tail.find('<'), tail.find("{{")]
                    .into_iter()
                    .flatten()
                    .min()
                    .map_or(rest.len(), |offset| first + offset)
            };
            self.advance(step);
        }
        &self.source[start..self.pos]
    }

    fn read_closing_tag(&mut self) -> Result<String> {
        let location = self.location();
        self.advance(2);
        let Some(end) = self.rest().find('>') else {
            return Err(self.error_at(location, "unterminated closing tag"));
        };
        let name = self.advance(end).trim().to_string();
        self.advance(1);
        Ok(name)
    }

    /// Reads `<name ...>` and returns the name, the raw attribute text and
    /// whether the tag closed itself.
    fn read_open_tag(&mut self) -> Result<(String, &'a str, bool)> {
        let location = self.location();
        self.advance(1);

        let name_len = self
            .rest()
            .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
            .unwrap_or(self.rest().len());
        let name = self.advance(name_len).to_string();

        let mut quote: Option<char> = None;
        let mut end = None;
        for (offset, c) in self.rest().char_indices() {
            match (quote, c) {
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'') => quote = Some(c),
                (None, '>') => {
                    end = Some(offset);
                    break;
                }
                (None, _) => {}
            }
        }
        let Some(end) = end else {
            return Err(self.error_at(location, &format!("unterminated tag <{name}")));
        };

        let body = self.advance(end);
        self.advance(1);

        let trimmed = body.trim_end();
        match trimmed.strip_suffix('/') {
            Some(attributes) => Ok((name, attributes, true)),
            None => Ok((name, body, false)),
        }
    }

    fn error_at(&self, location: Location, reason: &str) -> anyhow::Error {
        WxportError::ParseError {
            file: self.file.display().to_string(),
            line: location.line,
            column: location.column,
            reason: reason.to_string(),
        }
        .into()
    }
}
