//! Non-fatal problems found while resolving a page graph.
//!
//! Each diagnostic is logged through `tracing` when it is recorded and kept
//! in the run's [`RunReport`](super::RunReport), so callers can both watch the
//! log and count failures.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::fragment::Location;

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// An imported (or entry) page does not exist.
    MissingFile,
    /// Loading the page would re-enter a page that is still being resolved.
    CircularImport {
        /// Pages from the first occurrence of the repeated page down to it again.
        chain: Vec<PathBuf>,
    },
    /// A second artifact replaced the one already stored at an output path.
    OutputOverwritten,
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    #[serde(flatten)]
    pub kind: DiagnosticKind,
    /// The page (or output path) the problem is about.
    pub path: PathBuf,
    /// The page that referenced `path`, if any.
    pub referrer: Option<PathBuf>,
    /// Position of the reference inside `referrer`.
    pub location: Location,
}

impl Diagnostic {
    /// Errors mean some dependency is absent from the output; warnings do not.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        !matches!(self.kind, DiagnosticKind::OutputOverwritten)
    }

    /// The message without the position prefix.
    #[must_use]
    pub fn reason(&self) -> String {
        match &self.kind {
            DiagnosticKind::MissingFile => format!("`{}` does not exist", self.path.display()),
            DiagnosticKind::CircularImport {
                chain,
            } => {
                let chain: Vec<String> = chain.iter().map(|p| p.display().to_string()).collect();
                format!("circular import: {}", chain.join(" → "))
            }
            DiagnosticKind::OutputOverwritten => {
                format!("`{}` was generated more than once; keeping the last one", self.path.display())
            }
        }
    }

    /// Emit the diagnostic through `tracing`.
    pub fn log(&self) {
        let referrer = self.referrer.as_ref().map(|p| p.display().to_string()).unwrap_or_default();
        if self.is_error() {
            tracing::error!(
                referrer = %referrer,
                line = self.location.line,
                column = self.location.column,
                "{}",
                self.reason()
            );
        } else {
            tracing::warn!(referrer = %referrer, "{}", self.reason());
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.referrer {
            Some(referrer) => write!(
                f,
                "{}:{}:{}: {}",
                referrer.display(),
                self.location.line,
                self.location.column,
                self.reason()
            ),
            None => write!(f, "{}", self.reason()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_display() {
        let diagnostic = Diagnostic {
            kind: DiagnosticKind::MissingFile,
            path: PathBuf::from("/src/b.wxml"),
            referrer: Some(PathBuf::from("/src/a.wxml")),
            location: Location::new(3, 5),
        };
        assert!(diagnostic.is_error());
        assert_eq!(diagnostic.to_string(), "/src/a.wxml:3:5: `/src/b.wxml` does not exist");
    }

    #[test]
    fn test_cycle_reason_lists_chain() {
        let diagnostic = Diagnostic {
            kind: DiagnosticKind::CircularImport {
                chain: vec![
                    PathBuf::from("/src/a.wxml"),
                    PathBuf::from("/src/b.wxml"),
                    PathBuf::from("/src/a.wxml"),
                ],
            },
            path: PathBuf::from("/src/a.wxml"),
            referrer: Some(PathBuf::from("/src/b.wxml")),
            location: Location::default(),
        };
        assert_eq!(diagnostic.reason(), "circular import: /src/a.wxml → /src/b.wxml → /src/a.wxml");
    }

    #[test]
    fn test_overwrite_is_warning_without_referrer() {
        let diagnostic = Diagnostic {
            kind: DiagnosticKind::OutputOverwritten,
            path: PathBuf::from("/dist/a.axml"),
            referrer: None,
            location: Location::default(),
        };
        assert!(!diagnostic.is_error());
        assert!(diagnostic.to_string().starts_with("`/dist/a.axml` was generated more than once"));
    }

    #[test]
    fn test_serializes_kind_tag() {
        let diagnostic = Diagnostic {
            kind: DiagnosticKind::MissingFile,
            path: PathBuf::from("/src/b.wxml"),
            referrer: None,
            location: Location::default(),
        };
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["kind"], "missing-file");
        assert_eq!(json["location"]["line"], 1);
    }
}
