//! Core types and error handling for wxport
//!
//! The fragment data model lives in [`crate::fragment`]; this module only holds
//! the error vocabulary shared by every other module.

pub mod error;

pub use error::{ErrorContext, WxportError, user_friendly_error};
