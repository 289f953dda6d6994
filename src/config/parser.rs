//! Generic TOML configuration parsing.
//!
//! Reads a file and deserializes it into any `DeserializeOwned` type, with
//! the file path attached to both read and parse failures:
//!
//! ```text
//! Failed to parse config file: /project/wxport.toml
//! Caused by:
//!     invalid type: integer `3`, expected a string
//! ```
//!
//! ```rust,no_run
//! use wxport::config::{ConvertOptions, parse_config};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let options: ConvertOptions = parse_config(Path::new("wxport.toml"))?;
//! println!("{} -> {}", options.input.display(), options.output.display());
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::path::Path;

/// Parse a TOML configuration file into `T`.
///
/// # Errors
///
/// Fails when the file cannot be read, is not valid TOML, or does not match
/// the shape of `T`. The underlying I/O or TOML error is kept as the cause.
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: T = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[derive(Debug, serde::Deserialize)]
    struct Roots {
        input: String,
        output: String,
    }

    #[test]
    fn test_parse_config() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("wxport.toml");
        std::fs::write(&config_path, "input = \"miniprogram\"\noutput = \"build\"\n").unwrap();

        let roots: Roots = parse_config(&config_path).unwrap();
        assert_eq!(roots.input, "miniprogram");
        assert_eq!(roots.output, "build");
    }

    #[test]
    fn test_parse_config_invalid_toml() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("wxport.toml");
        std::fs::write(&config_path, "input = {").unwrap();

        let err = parse_config::<Roots>(&config_path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_parse_config_missing_file() {
        let temp = tempdir().unwrap();
        let err = parse_config::<Roots>(&temp.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
