//! Error handling for wxport
//!
//! This module provides the error types and user-friendly error reporting for the
//! wxport template rewriter. The error system follows two principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`WxportError`] - Enumerated error types for every fatal failure in wxport
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! Only two things can abort a resolution run: a page that fails to parse and an
//! I/O failure while reading or writing. Missing imports and import cycles are
//! *not* errors at this level; they are recorded as diagnostics by the resolver
//! and the run continues.
//!
//! # Error Conversion
//!
//! Common library errors convert automatically:
//! - [`std::io::Error`] → [`WxportError::IoError`]
//! - [`toml::de::Error`] → [`WxportError::TomlError`]
//! - [`serde_json::Error`] → [`WxportError::JsonError`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use wxport::core::{WxportError, user_friendly_error};
//!
//! let error = WxportError::ParseError {
//!     file: "src/pages/index/index.wxml".to_string(),
//!     line: 3,
//!     column: 5,
//!     reason: "unclosed element <view>".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for wxport operations
///
/// # Error Categories
///
/// ## Input
/// - [`FileNotFound`] - A page handed to the CLI does not exist
/// - [`ParseError`] - A markup page could not be parsed
///
/// ## Configuration
/// - [`ConfigNotFound`] - An explicitly requested config file is missing
/// - [`ConfigError`] - Configuration values are invalid
/// - [`TomlError`] - TOML parsing errors from [`toml::de::Error`]
///
/// ## Output
/// - [`IoError`] - Standard I/O errors from [`std::io::Error`]
/// - [`JsonError`] - JSON serialization errors from [`serde_json::Error`]
///
/// [`FileNotFound`]: WxportError::FileNotFound
/// [`ParseError`]: WxportError::ParseError
/// [`ConfigNotFound`]: WxportError::ConfigNotFound
/// [`ConfigError`]: WxportError::ConfigError
/// [`TomlError`]: WxportError::TomlError
/// [`IoError`]: WxportError::IoError
/// [`JsonError`]: WxportError::JsonError
#[derive(Error, Debug)]
pub enum WxportError {
    /// A page requested on the command line does not exist
    ///
    /// Imported pages that are missing never raise this error; they are
    /// reported as diagnostics and the run continues without them.
    #[error("Page file not found: {path}")]
    FileNotFound {
        /// The path that was requested
        path: String,
    },

    /// Markup parsing failed
    ///
    /// A malformed page has no well-defined partial resolution, so this error
    /// aborts the run it occurs in.
    #[error("Failed to parse {file}:{line}:{column}: {reason}")]
    ParseError {
        /// The page that failed to parse
        file: String,
        /// 1-based line of the offending construct
        line: usize,
        /// 1-based column of the offending construct
        column: usize,
        /// What the parser expected or found
        reason: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path to the configuration file that was not found
        path: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl Clone for WxportError {
    fn clone(&self) -> Self {
        match self {
            Self::FileNotFound {
                path,
            } => Self::FileNotFound {
                path: path.clone(),
            },
            Self::ParseError {
                file,
                line,
                column,
                reason,
            } => Self::ParseError {
                file: file.clone(),
                line: *line,
                column: *column,
                reason: reason.clone(),
            },
            Self::ConfigNotFound {
                path,
            } => Self::ConfigNotFound {
                path: path.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            // For errors that don't implement Clone, convert to Other
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::JsonError(e) => Self::Other {
                message: format!("JSON serialization error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
///
/// # Examples
///
/// ```rust,no_run
/// use wxport::core::{ErrorContext, WxportError};
///
/// let context = ErrorContext::new(WxportError::ConfigNotFound {
///     path: "wxport.toml".to_string(),
/// })
/// .with_suggestion("Create wxport.toml or pass --input/--output explicitly");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying wxport error
    pub error: WxportError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`WxportError`]
    #[must_use]
    pub const fn new(error: WxportError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`WxportError`] variants, [`std::io::Error`] and
/// [`toml::de::Error`]; everything else is shown with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(wxport_error) = error.downcast_ref::<WxportError>() {
        return create_error_context(wxport_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(WxportError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check that the output directory is writable")
                .with_details("wxport could not read or write one of the files involved");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(WxportError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(WxportError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax in your wxport.toml file");
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(WxportError::Other {
        message,
    })
}

fn create_error_context(error: WxportError) -> ErrorContext {
    match &error {
        WxportError::FileNotFound {
            path,
        } => {
            let suggestion = format!("Check that '{path}' exists under the configured input root");
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        WxportError::ParseError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Fix the markup at the reported position and run the conversion again")
            .with_details("A page that fails to parse aborts the conversion run it belongs to"),
        WxportError::ConfigNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Create a wxport.toml file or pass --input and --output on the command line"),
        WxportError::ConfigError {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Extensions must start with '.', e.g. `wxml = \".axml\"` and `wxs = \".sjs\"`",
        ),
        _ => ErrorContext::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = WxportError::FileNotFound {
            path: "/src/a.wxml".to_string(),
        };
        assert_eq!(error.to_string(), "Page file not found: /src/a.wxml");

        let error = WxportError::ParseError {
            file: "a.wxml".to_string(),
            line: 2,
            column: 7,
            reason: "unexpected </text>".to_string(),
        };
        assert_eq!(error.to_string(), "Failed to parse a.wxml:2:7: unexpected </text>");
    }

    #[test]
    fn test_error_context_display() {
        let ctx = ErrorContext::new(WxportError::ConfigError {
            message: "bad ext".to_string(),
        })
        .with_suggestion("fix it");

        let display = format!("{ctx}");
        assert!(display.contains("Configuration error: bad ext"));
        assert!(display.contains("Suggestion: fix it"));
        assert!(!display.contains("Details:"));
    }

    #[test]
    fn test_user_friendly_error_for_parse_error() {
        let error = WxportError::ParseError {
            file: "a.wxml".to_string(),
            line: 1,
            column: 1,
            reason: "boom".to_string(),
        };
        let ctx = user_friendly_error(anyhow::Error::from(error));
        assert!(matches!(ctx.error, WxportError::ParseError { .. }));
        assert!(ctx.suggestion.is_some());
        assert!(ctx.details.is_some());
    }

    #[test]
    fn test_user_friendly_error_keeps_cause_chain() {
        let error = anyhow::anyhow!("root cause").context("while converting");
        let ctx = user_friendly_error(error);
        let message = ctx.error.to_string();
        assert!(message.starts_with("while converting"));
        assert!(message.contains("1: root cause"));
    }

    #[test]
    fn test_io_error_clone_becomes_other() {
        let error = WxportError::from(std::io::Error::other("disk full"));
        let cloned = error.clone();
        assert!(matches!(cloned, WxportError::Other { .. }));
        assert!(cloned.to_string().contains("disk full"));
    }
}
