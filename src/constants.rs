//! Constants shared across the wxport codebase.
//!
//! Tag names, filename markers and defaults live here so the parser, the
//! resolver and the writer agree on them.

/// Tag of import-style reference nodes.
pub const IMPORT_TAG: &str = "import";

/// Tag of include nodes; self-closing like imports.
pub const INCLUDE_TAG: &str = "include";

/// Tag of template definitions (`name=`) and usages (`is=`).
pub const TEMPLATE_TAG: &str = "template";

/// Tag of inline script modules.
pub const WXS_TAG: &str = "wxs";

/// Pseudo-tag for character data nodes.
pub const TEXT_TAG: &str = "#text";

/// Marker prefixed to non-template import reference names.
pub const IMPORT_NAME_PREFIX: &str = "import-";

/// Infix placed between a page stem and a script module name.
pub const WXS_PATH_INFIX: &str = "-wxs-";

/// Extension of source markup pages.
pub const SOURCE_MARKUP_EXT: &str = ".wxml";

/// Tag the writer uses to reference a relocated script module.
pub const SCRIPT_IMPORT_TAG: &str = "import-sjs";

/// Default output markup extension.
pub const DEFAULT_MARKUP_EXT: &str = ".axml";

/// Default output script extension.
pub const DEFAULT_SCRIPT_EXT: &str = ".sjs";

/// Default input root, relative to the config file or working directory.
pub const DEFAULT_INPUT_DIR: &str = "src";

/// Default output root, relative to the config file or working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "dist";

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "wxport.toml";
